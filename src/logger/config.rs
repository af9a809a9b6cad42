//! Configuration types for the logger

use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::Level;

/// Main logger configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggerConfig {
    pub console: ConsoleConfig,
    pub file: FileConfig,
    pub level: String,
}

impl LoggerConfig {
    /// Create a new logger configuration with validation
    pub fn new(console: ConsoleConfig, file: FileConfig, level: String) -> Result<Self> {
        let config = Self {
            console,
            file,
            level,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.parse_level()
            .with_context(|| format!("Invalid log level: {}", self.level))?;

        self.file.validate().context("Invalid file configuration")?;

        if !self.console.enabled && !self.file.enabled {
            anyhow::bail!("At least one output (console or file) must be enabled");
        }

        Ok(())
    }

    /// Parse the log level string into a tracing::Level
    pub fn parse_level(&self) -> Result<Level> {
        match self.level.to_lowercase().as_str() {
            "trace" => Ok(Level::TRACE),
            "debug" => Ok(Level::DEBUG),
            "info" => Ok(Level::INFO),
            "warn" => Ok(Level::WARN),
            "error" => Ok(Level::ERROR),
            _ => anyhow::bail!(
                "Invalid log level '{}'. Valid levels are: trace, debug, info, warn, error",
                self.level
            ),
        }
    }
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            console: ConsoleConfig::default(),
            file: FileConfig::default(),
            level: "info".to_string(),
        }
    }
}

/// Console output configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConsoleConfig {
    pub enabled: bool,
    pub colored: bool,
}

impl ConsoleConfig {
    pub fn new(enabled: bool, colored: bool) -> Self {
        Self { enabled, colored }
    }
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            colored: true,
        }
    }
}

/// File output configuration.
///
/// Files are written under `directory` as `{file_prefix}.{date}` when rotated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileConfig {
    pub enabled: bool,
    pub directory: PathBuf,
    pub file_prefix: String,
    pub format: LogFormat,
    pub rotation: RotationPolicy,
}

impl FileConfig {
    pub fn new(
        enabled: bool,
        directory: PathBuf,
        file_prefix: String,
        format: LogFormat,
        rotation: RotationPolicy,
    ) -> Result<Self> {
        let config = Self {
            enabled,
            directory,
            file_prefix,
            format,
            rotation,
        };
        config.validate()?;
        Ok(config)
    }

    /// Pure validation; the directory is created when the writer is built.
    pub fn validate(&self) -> Result<()> {
        if self.enabled {
            if self.directory.as_os_str().is_empty() {
                anyhow::bail!("Log directory cannot be empty when file output is enabled");
            }
            if self.file_prefix.trim().is_empty() {
                anyhow::bail!("Log file prefix cannot be empty when file output is enabled");
            }
        }
        Ok(())
    }
}

impl Default for FileConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            directory: PathBuf::from("logs"),
            file_prefix: "notify.log".to_string(),
            format: LogFormat::Json,
            rotation: RotationPolicy::Daily,
        }
    }
}

/// Log format options
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum LogFormat {
    #[default]
    Full,
    Compact,
    Json,
}

impl std::str::FromStr for LogFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "full" => Ok(LogFormat::Full),
            "compact" => Ok(LogFormat::Compact),
            "json" => Ok(LogFormat::Json),
            _ => anyhow::bail!(
                "Invalid log format '{}'. Valid formats are: full, compact, json",
                s
            ),
        }
    }
}

impl LogFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogFormat::Full => "full",
            LogFormat::Compact => "compact",
            LogFormat::Json => "json",
        }
    }
}

/// How often the rolling file writer starts a new file
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum RotationPolicy {
    #[default]
    Daily,
    Hourly,
    Never,
}

impl std::str::FromStr for RotationPolicy {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "daily" => Ok(RotationPolicy::Daily),
            "hourly" => Ok(RotationPolicy::Hourly),
            "never" => Ok(RotationPolicy::Never),
            _ => anyhow::bail!(
                "Invalid rotation '{}'. Valid values are: daily, hourly, never",
                s
            ),
        }
    }
}

impl From<RotationPolicy> for tracing_appender::rolling::Rotation {
    fn from(policy: RotationPolicy) -> Self {
        match policy {
            RotationPolicy::Daily => tracing_appender::rolling::Rotation::DAILY,
            RotationPolicy::Hourly => tracing_appender::rolling::Rotation::HOURLY,
            RotationPolicy::Never => tracing_appender::rolling::Rotation::NEVER,
        }
    }
}
