//! Logger Module
//!
//! Builds the `tracing-subscriber` stack:
//! - Console output with color control
//! - Optional file output in full, compact or JSON format
//! - Daily / hourly rolling files through `tracing-appender`

pub mod config;
pub mod error;

pub use config::*;
pub use error::LoggerError;

use std::io::IsTerminal;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::RollingFileAppender;
use tracing_subscriber::{
    EnvFilter, Layer, Registry, fmt, layer::SubscriberExt, util::SubscriberInitExt,
};

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

/// Keeps the non-blocking file writer flushing; hold it until shutdown.
#[must_use = "dropping the guard stops file logging"]
pub struct LoggerGuard {
    _file: Option<WorkerGuard>,
}

/// Initialize the global subscriber with the given configuration
pub fn init_logger(config: LoggerConfig) -> anyhow::Result<LoggerGuard> {
    config.validate()?;

    // RUST_LOG wins over the configured level when present
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let mut layers: Vec<BoxedLayer> = Vec::new();
    let mut guard = None;

    // File layer must come before the console layer so ANSI codes
    // do not leak into span fields written to the file.
    if config.file.enabled {
        let (layer, file_guard) = file_layer(&config.file)?;
        layers.push(layer);
        guard = Some(file_guard);
    }
    if config.console.enabled {
        layers.push(console_layer(&config.console));
    }

    tracing_subscriber::registry()
        .with(layers)
        .with(filter)
        .try_init()
        .map_err(|e| LoggerError::config(e.to_string()))?;

    Ok(LoggerGuard { _file: guard })
}

fn console_layer(config: &ConsoleConfig) -> BoxedLayer {
    let use_ansi = config.colored && std::io::stdout().is_terminal();

    fmt::layer()
        .with_ansi(use_ansi)
        .with_target(true)
        .with_level(true)
        .boxed()
}

fn file_layer(config: &FileConfig) -> Result<(BoxedLayer, WorkerGuard), LoggerError> {
    std::fs::create_dir_all(&config.directory)?;

    let appender = RollingFileAppender::builder()
        .rotation(config.rotation.into())
        .filename_prefix(config.file_prefix.as_str())
        .build(&config.directory)
        .map_err(|e| LoggerError::appender(e.to_string()))?;
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let layer = match config.format {
        LogFormat::Full => fmt::layer()
            .with_ansi(false)
            .with_target(true)
            .with_writer(writer)
            .boxed(),
        LogFormat::Compact => fmt::layer()
            .with_ansi(false)
            .with_target(true)
            .compact()
            .with_writer(writer)
            .boxed(),
        LogFormat::Json => fmt::layer()
            .with_ansi(false)
            .json()
            .with_writer(writer)
            .boxed(),
    };

    Ok((layer, guard))
}
