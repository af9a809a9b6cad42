//! Configuration error types

use thiserror::Error;

/// Errors raised while loading or validating settings
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A required configuration file is absent
    #[error("Configuration file not found: {0}")]
    MissingFile(String),

    /// Sources merged but did not deserialize into `Settings`
    #[error("Failed to parse configuration: {0}")]
    Parse(String),

    /// A setting is out of range or malformed
    #[error("Invalid setting {field}: {message}")]
    Invalid { field: String, message: String },

    /// `NOTIFY_APP_ENV` or `--env` names no known environment
    #[error("Unknown environment: {0}")]
    UnknownEnvironment(String),

    /// Both the layered directory and a single file were requested
    #[error("Conflicting configuration sources: {0}")]
    ConflictingSources(String),

    #[error("Configuration source error: {0}")]
    Source(#[from] config::ConfigError),
}

impl ConfigError {
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        ConfigError::Invalid {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn missing_file(path: impl Into<String>) -> Self {
        ConfigError::MissingFile(path.into())
    }

    pub fn conflicting_sources(message: impl Into<String>) -> Self {
        ConfigError::ConflictingSources(message.into())
    }

    /// Dotted path of the offending setting, when the error names one
    pub fn field(&self) -> Option<&str> {
        match self {
            ConfigError::Invalid { field, .. } => Some(field),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_names_field() {
        let err = ConfigError::validation("notify.user_header", "must not be empty");
        assert_eq!(err.field(), Some("notify.user_header"));
        assert_eq!(
            err.to_string(),
            "Invalid setting notify.user_header: must not be empty"
        );
    }

    #[test]
    fn test_other_errors_have_no_field() {
        assert_eq!(ConfigError::missing_file("config/default.toml").field(), None);
    }
}
