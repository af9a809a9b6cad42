use clap::Parser;

use notify_rs::cli::{self, Cli};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let (settings, environment) = cli::load_and_merge_config(&cli)?;
    let _logger_guard = cli::init_logger_from_settings(&settings)?;

    cli::execute_command(&cli, settings, environment).await
}
