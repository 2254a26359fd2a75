//! Logging setup
//!
//! A thin layer over `tracing-subscriber`: one `fmt` layer on stderr in the
//! configured format, filtered by an `EnvFilter`. Stdout is left to the host.

pub mod config;
pub mod error;


// Re-export main types
pub use config::{LogFormat, LoggerConfig};
pub use error::LoggerError;

use std::io::IsTerminal;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Build the filter for `config`, falling back to `info` on a bad directive
pub fn build_filter(config: &LoggerConfig) -> EnvFilter {
    EnvFilter::try_new(&config.level).unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Initialize the global subscriber with the given configuration
///
/// Fails if the configuration is invalid or a subscriber is already set.
pub fn init_logger(config: LoggerConfig) -> Result<(), LoggerError> {
    config.validate()?;

    let filter = build_filter(&config);
    let use_ansi = config.colored && std::io::stderr().is_terminal();
    let registry = tracing_subscriber::registry().with(filter);

    let result = match config.format {
        LogFormat::Full => registry
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_ansi(use_ansi)
                    .with_target(true)
                    .with_level(true),
            )
            .try_init(),
        LogFormat::Compact => registry
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_ansi(use_ansi)
                    .with_target(true)
                    .compact(),
            )
            .try_init(),
        LogFormat::Json => registry
            .with(fmt::layer().with_writer(std::io::stderr).with_ansi(false).json())
            .try_init(),
    };

    result.map_err(|e| LoggerError::AlreadyInitialized {
        message: e.to_string(),
    })
}
