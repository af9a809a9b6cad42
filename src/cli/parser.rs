//! CLI argument parsing with clap
//!
//! This module defines the command-line interface structure using clap,
//! including all commands, arguments, and their documentation.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Webhook notification relay
#[derive(Parser, Debug)]
#[command(name = "notify-rs")]
#[command(about = "Webhook notification relay with API-key authenticated sending")]
#[command(long_about = "
notify-rs relays messages to chat platform webhooks (WeCom, DingTalk, Feishu,
Bark, ...). Callers send through a per-user API key; the relay renders each
bound channel's template and reports a per-channel outcome.

EXAMPLES:
    # Start the server with default configuration
    notify-rs serve

    # Start server on custom host and port
    notify-rs serve --host 0.0.0.0 --port 8080

    # Use custom configuration file
    notify-rs --config /path/to/config.toml serve

    # Run with production configuration layers
    notify-rs --env production serve

    # Check configuration without starting server
    notify-rs serve --dry-run

    # Print three fresh API keys
    notify-rs keygen --count 3
")]
#[command(version = crate::clap_long_version())]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Configuration file path
    ///
    /// Load a single TOML file instead of the layered `config/` directory.
    /// NOTIFY_* environment variables still apply on top of it.
    ///
    /// Example: --config /etc/notify-rs/production.toml
    #[arg(short, long, value_name = "FILE", value_parser = super::validation::validate_config_file_path)]
    pub config: Option<PathBuf>,

    /// Override environment detection
    ///
    /// Selects which `{environment}.toml` layer is loaded. Takes precedence
    /// over NOTIFY_APP_ENV.
    #[arg(short, long, value_enum)]
    pub env: Option<Environment>,

    /// Enable verbose logging
    ///
    /// Sets the log level to debug. Cannot be used with --quiet.
    #[arg(short, long)]
    pub verbose: bool,

    /// Suppress non-error output
    ///
    /// Sets the log level to error. Cannot be used with --verbose.
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the web server (default)
    ///
    /// Examples:
    ///   notify-rs serve                           # Start with defaults
    ///   notify-rs serve --host 0.0.0.0 --port 80  # Bind to all interfaces on port 80
    ///   notify-rs serve --dry-run                 # Validate config without starting
    Serve {
        /// Host address to bind to
        ///
        /// Default: 127.0.0.1
        #[arg(long, value_name = "ADDRESS", value_parser = super::validation::validate_host_address)]
        host: Option<String>,

        /// Port number to listen on
        ///
        /// Default: 3000
        #[arg(short, long, value_name = "PORT", value_parser = super::validation::validate_port)]
        port: Option<u16>,

        /// Log level override
        ///
        /// Takes precedence over both the configuration file and --verbose/--quiet.
        #[arg(long, value_enum)]
        log_level: Option<LogLevel>,

        /// Validate configuration and exit
        #[arg(long)]
        dry_run: bool,
    },
    /// Generate API keys
    ///
    /// Prints fresh 64-character hex keys, one per line. Nothing is stored;
    /// use the management API to bind a key to a user.
    ///
    /// Examples:
    ///   notify-rs keygen              # One key
    ///   notify-rs keygen --count 5    # Five keys
    Keygen {
        /// Number of keys to print (1-100)
        #[arg(short = 'n', long, default_value_t = 1, value_parser = super::validation::validate_key_count)]
        count: u32,
    },
}

/// Environment options
#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum Environment {
    #[value(name = "development", alias = "dev")]
    Development,
    #[value(name = "test")]
    Test,
    #[value(name = "staging", alias = "stage")]
    Staging,
    #[value(name = "production", alias = "prod")]
    Production,
}

/// Log level options
#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum LogLevel {
    #[value(name = "error")]
    Error,
    #[value(name = "warn", alias = "warning")]
    Warn,
    #[value(name = "info")]
    Info,
    #[value(name = "debug")]
    Debug,
    #[value(name = "trace")]
    Trace,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

impl From<Environment> for crate::config::Environment {
    fn from(env: Environment) -> Self {
        match env {
            Environment::Development => crate::config::Environment::Development,
            Environment::Test => crate::config::Environment::Test,
            Environment::Staging => crate::config::Environment::Staging,
            Environment::Production => crate::config::Environment::Production,
        }
    }
}
