//! Send command handler
//!
//! Dispatches one notification immediately. Unlike the event handler, the
//! outcome is returned so the process exit code can reflect it.

use tracing::info;

use crate::error::AppResult;
use crate::services::PushoverDispatcher;

/// Handler for the send command
pub struct SendCommandHandler {
    dispatcher: PushoverDispatcher,
}

impl SendCommandHandler {
    pub fn new(dispatcher: PushoverDispatcher) -> Self {
        Self { dispatcher }
    }

    pub async fn execute(&self) -> AppResult<()> {
        let result = self.dispatcher.dispatch().await?;
        info!(
            status = result.status_code,
            duration_ms = result.duration_ms,
            "Pushover notification sent"
        );
        Ok(())
    }
}
