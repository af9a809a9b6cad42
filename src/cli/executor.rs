//! Command executor for dispatching CLI commands

use super::handlers::{KeygenCommandHandler, ServeCommandHandler};
use super::parser::{Cli, Commands};
use crate::config::{Environment, Settings};

/// Execute a CLI command with the merged settings
///
/// No subcommand means `serve` with its defaults.
///
/// # Errors
/// Returns errors from command handlers
pub async fn execute_command(
    cli: &Cli,
    settings: Settings,
    environment: Environment,
) -> anyhow::Result<()> {
    match &cli.command {
        Some(Commands::Serve { host, port, dry_run, .. }) => {
            warn_privileged_bind(host.as_deref(), *port);
            ServeCommandHandler::new(settings, environment)
                .execute(*dry_run)
                .await
        }
        None => {
            ServeCommandHandler::new(settings, environment)
                .execute(false)
                .await
        }
        Some(Commands::Keygen { count }) => KeygenCommandHandler::new(*count).execute(),
    }
}

fn warn_privileged_bind(host: Option<&str>, port: Option<u16>) {
    if let (Some("0.0.0.0"), Some(port_num)) = (host, port) {
        if port_num < 1024 {
            tracing::warn!(
                port = port_num,
                "Binding to 0.0.0.0 on a privileged port typically requires root privileges"
            );
        }
    }
}
