//! Notification dispatcher.
//!
//! Turns qualifying host events into exactly one Pushover request. The
//! handler never fails: every error is logged here and swallowed.

use std::sync::Arc;

use tracing::{debug, error, info, warn};

use super::attachment::resolve_attachment;
use super::params::build_params;
use super::provider::{NotificationMessage, NotificationProvider, NotificationResult};
use super::pushover_provider::PushoverProvider;
use crate::config::Settings;
use crate::error::{AppError, AppResult};
use crate::models::HostEvent;

/// Reacts to host events by sending Pushover notifications
///
/// Cheap to clone; clones share the settings and the provider.
#[derive(Clone)]
pub struct PushoverDispatcher {
    settings: Arc<Settings>,
    provider: Arc<dyn NotificationProvider>,
}

impl PushoverDispatcher {
    /// Creates a dispatcher posting to the public Pushover API
    pub fn new(settings: Arc<Settings>) -> Self {
        Self::with_provider(settings, Arc::new(PushoverProvider::new()))
    }

    pub fn with_provider(settings: Arc<Settings>, provider: Arc<dyn NotificationProvider>) -> Self {
        Self { settings, provider }
    }

    /// Event handler entry point
    ///
    /// Only the completion event triggers a send. Failures are logged and
    /// never returned.
    pub async fn on_event(&self, event: &HostEvent) {
        if !event.is_completion() {
            debug!(kind = %event.kind, "Ignoring host event");
            return;
        }

        match self.dispatch().await {
            Ok(result) => info!(
                provider = self.provider.name(),
                status = result.status_code,
                duration_ms = result.duration_ms,
                "Pushover notification sent"
            ),
            Err(e) => log_failure(&e),
        }
    }

    /// Sends one notification built from the resolved settings
    ///
    /// Fails with `MissingCredentials` before any network activity when a
    /// credential is absent, and with `Rejected` on a non-2xx answer.
    pub async fn dispatch(&self) -> AppResult<NotificationResult> {
        let message = self.build_message()?;

        debug!(
            provider = self.provider.name(),
            multipart = message.attachment.is_some(),
            "Sending Pushover notification"
        );
        let result = self.provider.send(&message).await?;

        if !result.success {
            return Err(AppError::Rejected {
                status: result.status_code,
                body: result.response.unwrap_or_default(),
            });
        }
        Ok(result)
    }

    /// Assembles parameters and attachment for one request
    pub fn build_message(&self) -> AppResult<NotificationMessage> {
        let credentials = &self.settings.credentials;
        let (user, token) = credentials.pair().ok_or_else(|| {
            AppError::missing_credentials(credentials.user_missing(), credentials.token_missing())
        })?;

        let notification = &self.settings.notification;
        let params = build_params(notification, user, token);
        let attachment = if notification.has_attachment() {
            resolve_attachment(notification, &self.settings.attachment_base_dir)?
        } else {
            None
        };

        Ok(NotificationMessage { params, attachment })
    }
}

/// Logs a failed dispatch at the handler boundary
fn log_failure(e: &AppError) {
    match e {
        AppError::MissingCredentials { missing } => {
            warn!(missing = %missing, "Pushover user/token not set; skipping notification")
        }
        AppError::Rejected { status, body } => {
            error!(status = *status, body = %body, "Pushover request failed")
        }
        other => error!(error = %other, source = ?std::error::Error::source(other), "Failed to send Pushover notification"),
    }
}
