//! Core notification provider trait and types.
//!
//! A provider turns one fully assembled `NotificationMessage` into one
//! outbound request. Assembly (parameters, attachment) happens in the
//! dispatcher so providers stay stateless.

use crate::error::AppResult;
use async_trait::async_trait;

/// Binary attachment sent as the `attachment` multipart part
#[derive(Clone, PartialEq, Eq)]
pub struct Attachment {
    /// File name reported in the part's `Content-Disposition`
    pub file_name: String,
    /// Mime type of the part
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl std::fmt::Debug for Attachment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Attachment")
            .field("file_name", &self.file_name)
            .field("mime_type", &self.mime_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}

/// Message to be sent via notification provider
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NotificationMessage {
    /// Request parameters in assembly order
    pub params: Vec<(&'static str, String)>,
    /// Optional binary attachment
    pub attachment: Option<Attachment>,
}

/// Result of a notification send attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationResult {
    /// Whether the API answered with a 2xx status
    pub success: bool,
    /// HTTP status code
    pub status_code: u16,
    /// Raw response body
    pub response: Option<String>,
    /// Time taken for the operation in milliseconds
    pub duration_ms: u64,
}

/// Trait for notification providers
///
/// Uses `async_trait` to support async methods with dynamic dispatch.
/// All providers must be Send + Sync so overlapping events can share one.
#[async_trait]
pub trait NotificationProvider: Send + Sync {
    /// Sends a notification message
    ///
    /// Returns `Ok` for any HTTP response, successful or not; `Err` only when
    /// no response was obtained or the request could not be built.
    async fn send(&self, message: &NotificationMessage) -> AppResult<NotificationResult>;

    /// Returns the provider name for logging
    fn name(&self) -> &'static str;
}
