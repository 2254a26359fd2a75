//! Pushover notification provider implementation.
//!
//! Posts messages to the Pushover messages API using the global `HTTP_CLIENT`.
//! Messages with an attachment go out as `multipart/form-data`, all others as
//! `application/x-www-form-urlencoded`.
//!
//! Pushover API Reference: https://pushover.net/api

use super::provider::{Attachment, NotificationMessage, NotificationProvider, NotificationResult};
use crate::error::{AppError, AppResult};
use crate::external::client::HTTP_CLIENT;
use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::multipart::{Form, Part};
use std::time::Instant;

/// Pushover messages endpoint
pub const PUSHOVER_API_URL: &str = "https://api.pushover.net/1/messages.json";

/// Pushover notification provider
///
/// # Example
/// ```ignore
/// let provider = PushoverProvider::new();
/// let result = provider.send(&message).await?;
/// ```
#[derive(Debug, Clone)]
pub struct PushoverProvider {
    endpoint: String,
    client: reqwest::Client,
}

impl PushoverProvider {
    /// Creates a provider posting to the public Pushover API
    pub fn new() -> Self {
        Self::with_endpoint(PUSHOVER_API_URL)
    }

    /// Creates a provider posting to another endpoint (mock servers, proxies)
    pub fn with_endpoint(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            client: HTTP_CLIENT.clone(),
        }
    }

    /// Uses `client` instead of the shared global client
    pub fn with_client(mut self, client: reqwest::Client) -> Self {
        self.client = client;
        self
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Builds the multipart body: every parameter as a text field plus the attachment
    fn build_multipart(message: &NotificationMessage, attachment: &Attachment) -> AppResult<Form> {
        let form = message
            .params
            .iter()
            .fold(Form::new(), |form, (key, value)| form.text(*key, value.clone()));

        let part = Part::bytes(attachment.bytes.clone())
            .file_name(attachment.file_name.clone())
            .mime_str(&attachment.mime_type)
            .map_err(|source| AppError::InvalidMimeType {
                mime: attachment.mime_type.clone(),
                source,
            })?;

        Ok(form.part("attachment", part))
    }
}

impl Default for PushoverProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl NotificationProvider for PushoverProvider {
    /// Sends a notification via Pushover
    ///
    /// Returns the status and body of whatever the API answered; only
    /// transport failures and invalid attachments are errors.
    async fn send(&self, message: &NotificationMessage) -> AppResult<NotificationResult> {
        let start = Instant::now();

        let request = self.client.post(&self.endpoint);
        let request = match &message.attachment {
            Some(attachment) => request.multipart(Self::build_multipart(message, attachment)?),
            None => request
                .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
                .form(&message.params),
        };

        let response = request.send().await?;
        let status = response.status();
        let response_text = response.text().await.ok();
        let duration_ms = start.elapsed().as_millis() as u64;

        Ok(NotificationResult {
            success: status.is_success(),
            status_code: status.as_u16(),
            response: response_text,
            duration_ms,
        })
    }

    fn name(&self) -> &'static str {
        "pushover"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_endpoint() {
        assert_eq!(PushoverProvider::new().endpoint(), PUSHOVER_API_URL);
        assert_eq!(
            PushoverProvider::with_endpoint("http://127.0.0.1:1/1/messages.json").endpoint(),
            "http://127.0.0.1:1/1/messages.json"
        );
    }

    #[test]
    fn test_invalid_mime_is_rejected() {
        let message = NotificationMessage {
            params: vec![("user", "u".to_string())],
            attachment: None,
        };
        let attachment = Attachment {
            file_name: "a.png".to_string(),
            mime_type: "not a mime".to_string(),
            bytes: vec![1, 2, 3],
        };
        let result = PushoverProvider::build_multipart(&message, &attachment);
        assert!(matches!(result, Err(AppError::InvalidMimeType { .. })));
    }

    #[test]
    fn test_valid_multipart_builds() {
        let message = NotificationMessage {
            params: vec![("user", "u".to_string()), ("message", "Done".to_string())],
            attachment: None,
        };
        let attachment = Attachment {
            file_name: "a.png".to_string(),
            mime_type: "image/png".to_string(),
            bytes: vec![1, 2, 3],
        };
        assert!(PushoverProvider::build_multipart(&message, &attachment).is_ok());
    }
}
