use std::path::PathBuf;

use thiserror::Error;

/// Error type for everything that can go wrong while delivering a notification.
///
/// None of these ever escape the event handler. The dispatcher returns them
/// internally and logs them at the handler boundary.
#[derive(Error, Debug)]
pub enum AppError {
    /// One or both Pushover credentials are missing or empty
    #[error("Pushover credentials missing: {missing}")]
    MissingCredentials { missing: String },

    /// Inline base64 attachment could not be decoded
    #[error("Invalid base64 attachment payload")]
    AttachmentDecode {
        #[source]
        source: base64::DecodeError,
    },

    /// Attachment file exists but could not be read
    #[error("Failed to read attachment {}", path.display())]
    AttachmentRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The configured attachment mime type is not a valid mime string
    #[error("Invalid attachment mime type: {mime}")]
    InvalidMimeType {
        mime: String,
        #[source]
        source: reqwest::Error,
    },

    /// Network or protocol failure talking to the API
    #[error("Pushover request failed")]
    Transport {
        #[source]
        source: reqwest::Error,
    },

    /// The API answered with a non-success status
    #[error("Pushover rejected the request with status {status}: {body}")]
    Rejected { status: u16, body: String },

    /// Internal error for unexpected failures
    #[error("Internal error")]
    Internal {
        #[source]
        source: anyhow::Error,
    },
}

impl AppError {
    /// Builds a `MissingCredentials` error naming the absent fields
    pub fn missing_credentials(user_missing: bool, token_missing: bool) -> Self {
        let missing = match (user_missing, token_missing) {
            (true, true) => "user key and API token",
            (true, false) => "user key",
            _ => "API token",
        };
        AppError::MissingCredentials {
            missing: missing.to_string(),
        }
    }
}

impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        AppError::Internal { source: error }
    }
}

impl From<reqwest::Error> for AppError {
    fn from(error: reqwest::Error) -> Self {
        AppError::Transport { source: error }
    }
}

impl From<base64::DecodeError> for AppError {
    fn from(error: base64::DecodeError) -> Self {
        AppError::AttachmentDecode { source: error }
    }
}

/// Type alias for Result with AppError to simplify function signatures
pub type AppResult<T> = Result<T, AppError>;
