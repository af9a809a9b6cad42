//! Configuration merger for CLI arguments and config files
//!
//! Precedence, lowest to highest: config files, NOTIFY_* environment
//! variables, global CLI flags, then subcommand flags.

use super::parser::{Cli, Commands};
use crate::config::error::ConfigError;
use crate::config::{ConfigLoader, Environment, Settings};

/// Applies CLI overrides on top of file-based configuration
pub struct ConfigurationMerger {
    base_config: Settings,
    environment: Environment,
}

impl ConfigurationMerger {
    pub fn new(base_config: Settings, environment: Environment) -> Self {
        Self {
            base_config,
            environment,
        }
    }

    /// Load the base configuration the way the CLI asks for it
    ///
    /// `--config` switches to single-file loading and `--env` overrides
    /// NOTIFY_APP_ENV when picking the environment layer.
    ///
    /// # Errors
    /// Returns ConfigError if configuration loading or validation fails
    pub fn from_cli(cli: &Cli) -> Result<Self, ConfigError> {
        let mut loader = ConfigLoader::new()?;
        if let Some(path) = &cli.config {
            loader = loader.with_config_file(path);
        }
        if let Some(env) = cli.env {
            loader = loader.with_environment(env.into());
        }

        let environment = loader.environment();
        let config = loader.load()?;
        Ok(Self::new(config, environment))
    }

    /// Environment the base configuration was loaded for
    pub fn environment(&self) -> Environment {
        self.environment
    }

    /// Merge CLI arguments with the base configuration and validate the result
    pub fn merge_cli_args(&self, cli: &Cli) -> Result<Settings, ConfigError> {
        let mut config = self.base_config.clone();

        if cli.verbose {
            config.logger.level = "debug".to_string();
        } else if cli.quiet {
            config.logger.level = "error".to_string();
        }

        if let Some(Commands::Serve {
            host,
            port,
            log_level,
            ..
        }) = &cli.command
        {
            if let Some(host_addr) = host {
                config.server.host = host_addr.clone();
            }
            if let Some(port_num) = port {
                config.server.port = *port_num;
            }
            if let Some(level) = log_level {
                config.logger.level = level.as_str().to_string();
            }
        }

        config.validate()?;

        Ok(config)
    }

    pub fn config(&self) -> &Settings {
        &self.base_config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn merger() -> ConfigurationMerger {
        let mut config = Settings::default();
        config.database.url = "postgres://localhost/notify_test".to_string();
        ConfigurationMerger::new(config, Environment::Test)
    }

    #[test]
    fn test_merge_verbose_flag() {
        let cli = Cli::try_parse_from(["notify-rs", "--verbose"]).unwrap();
        let merged = merger().merge_cli_args(&cli).unwrap();
        assert_eq!(merged.logger.level, "debug");
    }

    #[test]
    fn test_merge_quiet_flag() {
        let cli = Cli::try_parse_from(["notify-rs", "--quiet"]).unwrap();
        let merged = merger().merge_cli_args(&cli).unwrap();
        assert_eq!(merged.logger.level, "error");
    }

    #[test]
    fn test_merge_serve_host_and_port() {
        let cli =
            Cli::try_parse_from(["notify-rs", "serve", "--host", "0.0.0.0", "--port", "8080"])
                .unwrap();
        let merged = merger().merge_cli_args(&cli).unwrap();
        assert_eq!(merged.server.host, "0.0.0.0");
        assert_eq!(merged.server.port, 8080);
    }

    #[test]
    fn test_command_log_level_overrides_global() {
        let cli = Cli::try_parse_from(["notify-rs", "--verbose", "serve", "--log-level", "warn"])
            .unwrap();
        let merged = merger().merge_cli_args(&cli).unwrap();
        assert_eq!(merged.logger.level, "warn");
    }

    #[test]
    fn test_keygen_leaves_server_untouched() {
        let merger = merger();
        let cli = Cli::try_parse_from(["notify-rs", "keygen"]).unwrap();
        let merged = merger.merge_cli_args(&cli).unwrap();
        assert_eq!(merged.server, merger.config().server);
        assert_eq!(merger.environment(), Environment::Test);
    }

    #[test]
    fn test_merge_rejects_invalid_result() {
        let merger = ConfigurationMerger::new(Settings::default(), Environment::Test);
        let cli = Cli::try_parse_from(["notify-rs"]).unwrap();
        // Default settings carry no database URL
        assert!(merger.merge_cli_args(&cli).is_err());
    }
}
