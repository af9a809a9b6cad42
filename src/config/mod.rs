//! Settings for notify-rs.
//!
//! Sources, lowest precedence first:
//! 1. `config/default.toml` (required)
//! 2. `config/{environment}.toml`, chosen by `--env` or `NOTIFY_APP_ENV`
//! 3. `config/local.toml`, for uncommitted local tweaks
//! 4. `NOTIFY_SECTION__KEY` environment variables
//! 5. CLI overrides (`--host`, `--port`, log level flags)
//!
//! `NOTIFY_CONFIG_FILE` replaces steps 1-3 with a single file.

pub mod environment;
pub mod error;
pub mod loader;
pub mod settings;
pub mod validation;

pub use environment::Environment;
pub use error::ConfigError;
pub use loader::ConfigLoader;
pub use settings::{DatabaseConfig, NotifyConfig, Settings};
