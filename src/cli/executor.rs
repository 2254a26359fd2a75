//! Command executor for dispatching CLI commands
//!
//! This module provides the main entry point for executing CLI commands
//! after parsing and configuration loading.

use std::sync::Arc;

use super::handlers::{CheckCommandHandler, ListenCommandHandler, SendCommandHandler};
use super::parser::{Cli, Commands};
use crate::config::settings::Settings;
use crate::error::AppResult;
use crate::services::PushoverDispatcher;
use crate::services::notifications::PushoverProvider;

/// Build the dispatcher for `settings`, honouring an endpoint override
pub fn build_dispatcher(cli: &Cli, settings: Settings) -> PushoverDispatcher {
    let settings = Arc::new(settings);
    match &cli.endpoint {
        Some(endpoint) => PushoverDispatcher::with_provider(
            settings,
            Arc::new(PushoverProvider::with_endpoint(endpoint.clone())),
        ),
        None => PushoverDispatcher::new(settings),
    }
}

/// Execute a CLI command with the given settings
///
/// # Errors
/// `send` returns the dispatch error; `listen` only fails when stdin
/// cannot be read.
pub async fn execute_command(cli: &Cli, settings: Settings) -> AppResult<()> {
    match cli.selected_command() {
        Commands::Check => CheckCommandHandler::new(settings).execute(),
        Commands::Send => {
            SendCommandHandler::new(build_dispatcher(cli, settings))
                .execute()
                .await
        }
        Commands::Listen => {
            ListenCommandHandler::new(build_dispatcher(cli, settings))
                .execute()
                .await
                .map(|_| ())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use clap::Parser;

    #[tokio::test]
    async fn test_execute_check() {
        let cli = Cli::try_parse_from(["opencode-pushover", "check"]).unwrap();
        let result = execute_command(&cli, Settings::default()).await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_execute_send_without_credentials() {
        let cli = Cli::try_parse_from(["opencode-pushover", "send"]).unwrap();
        let result = execute_command(&cli, Settings::default()).await;
        assert!(matches!(result, Err(AppError::MissingCredentials { .. })));
    }

    #[test]
    fn test_endpoint_override_is_used() {
        let cli = Cli::try_parse_from([
            "opencode-pushover",
            "--endpoint",
            "http://127.0.0.1:9/1/messages.json",
            "send",
        ])
        .unwrap();
        assert_eq!(cli.endpoint.as_deref(), Some("http://127.0.0.1:9/1/messages.json"));
        // builds without touching the network
        let _ = build_dispatcher(&cli, Settings::default());
    }
}
