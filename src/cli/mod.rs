//! CLI module for opencode-pushover
//!
//! This module provides command-line interface functionality including:
//! - Argument parsing with clap
//! - Configuration resolution with CLI path overrides
//! - Command handlers for listen, send and check

pub mod executor;
pub mod handlers;
pub mod parser;
pub mod validation;

// Re-export public types for convenience
pub use executor::execute_command;
pub use parser::{Cli, Commands, LogLevel};

use crate::config::settings::Settings;
use crate::logger::{LoggerConfig, LoggerError, init_logger};

/// Resolve settings using the paths given on the command line
pub fn load_settings(cli: &Cli) -> Settings {
    cli.config_loader().resolve()
}

/// Initialize logging from the CLI flags
pub fn init_logger_from_cli(cli: &Cli) -> Result<(), LoggerError> {
    let config = LoggerConfig::new(cli.effective_log_level(), cli.log_format.into(), true)?;
    init_logger(config)
}
