use std::process::ExitCode;

use clap::Parser;
use opencode_pushover::cli::{self, Cli};

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    cli::init_logger_from_cli(&cli)?;

    // Settings are resolved before the first event and never re-read
    let settings = cli::load_settings(&cli);

    match cli::execute_command(&cli, settings).await {
        Ok(()) => Ok(ExitCode::SUCCESS),
        Err(e) => {
            tracing::error!(error = %e, "Command failed");
            Ok(ExitCode::FAILURE)
        }
    }
}
