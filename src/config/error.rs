//! Configuration error types

use thiserror::Error;

/// Configuration error types
///
/// The loader never surfaces these to callers. They decide whether a layer is
/// logged and skipped (bundled defaults) or skipped silently (user file).
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Configuration file not found
    #[error("Configuration file not found: {0}")]
    FileNotFound(String),

    /// Failed to parse configuration
    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    /// Environment file could not be read
    #[error("Environment file error: {0}")]
    EnvFileError(#[from] dotenvy::Error),

    /// Generic configuration error from config crate
    #[error("Configuration error: {0}")]
    Other(#[from] config::ConfigError),
}

impl ConfigError {
    /// Create a new file not found error
    pub fn file_not_found<S: Into<String>>(path: S) -> Self {
        ConfigError::FileNotFound(path.into())
    }

    /// Create a new parse error
    pub fn parse<S: Into<String>>(message: S) -> Self {
        ConfigError::ParseError(message.into())
    }
}
