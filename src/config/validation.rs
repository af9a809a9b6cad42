//! Configuration validation logic
//!
//! Range and format checks for every configuration section.

use axum::http::HeaderName;

use crate::config::error::ConfigError;
use crate::config::settings::{
    DatabaseConfig, FileSettings, LoggerSettings, NotifyConfig, ServerConfig, Settings,
};

const VALID_LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

const VALID_LOG_FORMATS: &[&str] = &["full", "compact", "json"];

const VALID_ROTATIONS: &[&str] = &["daily", "hourly", "never"];

impl ServerConfig {
    /// Validate server configuration
    ///
    /// # Validation Rules
    /// - Port must be between 1 and 65535
    /// - Request and keep-alive timeouts must be greater than 0
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.port == 0 {
            return Err(ConfigError::validation(
                "server.port",
                "Port must be between 1 and 65535. Please specify a valid port number.",
            ));
        }

        if self.request_timeout == 0 {
            return Err(ConfigError::validation(
                "server.request_timeout",
                "Request timeout must be greater than 0 seconds.",
            ));
        }

        if self.keep_alive_timeout == 0 {
            return Err(ConfigError::validation(
                "server.keep_alive_timeout",
                "Keep-alive timeout must be greater than 0 seconds.",
            ));
        }

        Ok(())
    }
}

impl DatabaseConfig {
    /// Validate database configuration
    ///
    /// # Validation Rules
    /// - URL must be a non-empty PostgreSQL URL
    /// - Pool sizes must be positive with min <= max
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.url.is_empty() {
            return Err(ConfigError::validation(
                "database.url",
                "Database URL is required. Please specify a valid database connection string.",
            ));
        }

        if !self.url.starts_with("postgres://") && !self.url.starts_with("postgresql://") {
            return Err(ConfigError::validation(
                "database.url",
                "Invalid database URL format. Expected format: postgres://[user:password@]host[:port]/database",
            ));
        }

        if self.max_connections == 0 {
            return Err(ConfigError::validation(
                "database.max_connections",
                "Max connections must be greater than 0.",
            ));
        }

        if self.min_connections == 0 {
            return Err(ConfigError::validation(
                "database.min_connections",
                "Min connections must be greater than 0.",
            ));
        }

        if self.min_connections > self.max_connections {
            return Err(ConfigError::Invalid {
                field: "database.min_connections".to_string(),
                message: format!(
                    "Min connections ({}) cannot exceed max connections ({}).",
                    self.min_connections, self.max_connections
                ),
            });
        }

        Ok(())
    }
}

impl FileSettings {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.enabled && self.directory.trim().is_empty() {
            return Err(ConfigError::validation(
                "logger.file.directory",
                "Log directory is required when file logging is enabled.",
            ));
        }

        if self.enabled && self.prefix.trim().is_empty() {
            return Err(ConfigError::validation(
                "logger.file.prefix",
                "Log file prefix is required when file logging is enabled.",
            ));
        }

        if !VALID_LOG_FORMATS.contains(&self.format.to_lowercase().as_str()) {
            return Err(ConfigError::Invalid {
                field: "logger.file.format".to_string(),
                message: format!(
                    "Invalid log format '{}'. Valid formats are: {}",
                    self.format,
                    VALID_LOG_FORMATS.join(", ")
                ),
            });
        }

        if !VALID_ROTATIONS.contains(&self.rotation.to_lowercase().as_str()) {
            return Err(ConfigError::Invalid {
                field: "logger.file.rotation".to_string(),
                message: format!(
                    "Invalid rotation '{}'. Valid values are: {}",
                    self.rotation,
                    VALID_ROTATIONS.join(", ")
                ),
            });
        }

        Ok(())
    }
}

impl LoggerSettings {
    /// Validate logger settings
    ///
    /// # Validation Rules
    /// - Log level must be one of: trace, debug, info, warn, error
    /// - At least one output must be enabled
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !VALID_LOG_LEVELS.contains(&self.level.to_lowercase().as_str()) {
            return Err(ConfigError::Invalid {
                field: "logger.level".to_string(),
                message: format!(
                    "Invalid log level '{}'. Valid levels are: {}",
                    self.level,
                    VALID_LOG_LEVELS.join(", ")
                ),
            });
        }

        if !self.console.enabled && !self.file.enabled {
            return Err(ConfigError::validation(
                "logger",
                "At least one output (console or file) must be enabled.",
            ));
        }

        self.file.validate()
    }
}

impl NotifyConfig {
    /// Validate notify settings
    ///
    /// # Validation Rules
    /// - Timeouts must be greater than 0
    /// - Default daily limit must not be negative
    /// - User header must be a valid HTTP header name
    /// - Admin user ids must be positive
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.send_timeout_secs == 0 {
            return Err(ConfigError::validation(
                "notify.send_timeout_secs",
                "Send timeout must be greater than 0 seconds.",
            ));
        }

        if self.test_timeout_secs == 0 {
            return Err(ConfigError::validation(
                "notify.test_timeout_secs",
                "Test timeout must be greater than 0 seconds.",
            ));
        }

        if self.default_daily_limit < 0 {
            return Err(ConfigError::validation(
                "notify.default_daily_limit",
                "Default daily limit cannot be negative.",
            ));
        }

        if HeaderName::from_bytes(self.user_header.as_bytes()).is_err() {
            return Err(ConfigError::Invalid {
                field: "notify.user_header".to_string(),
                message: format!("'{}' is not a valid HTTP header name.", self.user_header),
            });
        }

        if let Some(id) = self.admin_user_ids.iter().find(|id| **id <= 0) {
            return Err(ConfigError::Invalid {
                field: "notify.admin_user_ids".to_string(),
                message: format!("Admin user id {} must be a positive user id.", id),
            });
        }

        Ok(())
    }
}

impl Settings {
    /// Validate all configuration settings, returning the first error.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.server.validate()?;
        self.database.validate()?;
        self.logger.validate()?;
        self.notify.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_settings() -> Settings {
        Settings {
            database: DatabaseConfig {
                url: "postgres://localhost/notify".to_string(),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    fn field_of(err: ConfigError) -> String {
        match err {
            ConfigError::Invalid { field, .. } => field,
            other => panic!("Expected Invalid, got {:?}", other),
        }
    }

    #[test]
    fn test_server_config_invalid_port_zero() {
        let config = ServerConfig {
            port: 0,
            ..Default::default()
        };
        assert_eq!(field_of(config.validate().unwrap_err()), "server.port");
    }

    #[test]
    fn test_server_config_invalid_timeouts() {
        let config = ServerConfig {
            request_timeout: 0,
            ..Default::default()
        };
        assert_eq!(field_of(config.validate().unwrap_err()), "server.request_timeout");

        let config = ServerConfig {
            keep_alive_timeout: 0,
            ..Default::default()
        };
        assert_eq!(field_of(config.validate().unwrap_err()), "server.keep_alive_timeout");
    }

    #[test]
    fn test_database_config_empty_url() {
        let config = DatabaseConfig::default();
        assert_eq!(field_of(config.validate().unwrap_err()), "database.url");
    }

    #[test]
    fn test_database_config_rejects_non_postgres_url() {
        for url in ["mysql://localhost/db", "sqlite://notify.db", "invalid-url"] {
            let config = DatabaseConfig {
                url: url.to_string(),
                ..Default::default()
            };
            assert!(config.validate().is_err(), "URL should be rejected: {}", url);
        }
    }

    #[test]
    fn test_database_config_min_exceeds_max() {
        let config = DatabaseConfig {
            url: "postgresql://localhost/notify".to_string(),
            max_connections: 2,
            min_connections: 5,
            ..Default::default()
        };
        assert_eq!(
            field_of(config.validate().unwrap_err()),
            "database.min_connections"
        );
    }

    #[test]
    fn test_logger_settings_invalid_level() {
        let settings = LoggerSettings {
            level: "verbose".to_string(),
            ..Default::default()
        };
        assert_eq!(field_of(settings.validate().unwrap_err()), "logger.level");
    }

    #[test]
    fn test_logger_settings_invalid_rotation() {
        let mut settings = LoggerSettings::default();
        settings.file.rotation = "size".to_string();
        assert_eq!(
            field_of(settings.validate().unwrap_err()),
            "logger.file.rotation"
        );
    }

    #[test]
    fn test_logger_settings_enabled_file_needs_directory() {
        let mut settings = LoggerSettings::default();
        settings.file.enabled = true;
        settings.file.directory = "  ".to_string();
        assert_eq!(
            field_of(settings.validate().unwrap_err()),
            "logger.file.directory"
        );
    }

    #[test]
    fn test_notify_config_rules() {
        assert!(NotifyConfig::default().validate().is_ok());

        let config = NotifyConfig {
            send_timeout_secs: 0,
            ..Default::default()
        };
        assert_eq!(field_of(config.validate().unwrap_err()), "notify.send_timeout_secs");

        let config = NotifyConfig {
            default_daily_limit: -1,
            ..Default::default()
        };
        assert_eq!(
            field_of(config.validate().unwrap_err()),
            "notify.default_daily_limit"
        );

        let config = NotifyConfig {
            user_header: "bad header".to_string(),
            ..Default::default()
        };
        assert_eq!(field_of(config.validate().unwrap_err()), "notify.user_header");

        let config = NotifyConfig {
            admin_user_ids: vec![1, 0],
            ..Default::default()
        };
        assert_eq!(field_of(config.validate().unwrap_err()), "notify.admin_user_ids");
    }

    #[test]
    fn test_settings_validate() {
        assert!(valid_settings().validate().is_ok());

        let mut settings = valid_settings();
        settings.notify.test_timeout_secs = 0;
        assert_eq!(
            field_of(settings.validate().unwrap_err()),
            "notify.test_timeout_secs"
        );
    }
}
