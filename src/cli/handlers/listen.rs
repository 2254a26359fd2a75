//! Listen command handler
//!
//! Reads newline-delimited JSON host events and feeds them to the
//! dispatcher. Each completion event is handled on its own task so a slow
//! request never holds up reading the next event.

use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::task::JoinSet;
use tracing::{debug, info, warn};

use crate::error::{AppError, AppResult};
use crate::models::HostEvent;
use crate::services::PushoverDispatcher;

/// Counters reported when the input stream ends
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ListenSummary {
    /// Well-formed events read
    pub events: usize,
    /// Events that triggered a dispatch
    pub triggered: usize,
    /// Lines that were not valid events
    pub malformed: usize,
}

/// Handler for the listen command
pub struct ListenCommandHandler {
    dispatcher: PushoverDispatcher,
}

impl ListenCommandHandler {
    pub fn new(dispatcher: PushoverDispatcher) -> Self {
        Self { dispatcher }
    }

    /// Listen on the process stdin until EOF
    pub async fn execute(&self) -> AppResult<ListenSummary> {
        let stdin = tokio::io::BufReader::new(tokio::io::stdin());
        self.run(stdin).await
    }

    /// Consume events from `reader` until EOF, then wait for in-flight sends
    pub async fn run<R>(&self, reader: R) -> AppResult<ListenSummary>
    where
        R: AsyncBufRead + Unpin,
    {
        let mut summary = ListenSummary::default();
        let mut in_flight = JoinSet::new();
        let mut lines = reader.lines();

        while let Some(line) = lines.next_line().await.map_err(|e| AppError::Internal {
            source: anyhow::Error::new(e).context("reading host events"),
        })? {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            let event = match HostEvent::from_json(line) {
                Ok(event) => event,
                Err(e) => {
                    summary.malformed += 1;
                    warn!(error = %e, "Skipping malformed host event");
                    continue;
                }
            };
            summary.events += 1;

            if event.is_completion() {
                summary.triggered += 1;
                let dispatcher = self.dispatcher.clone();
                in_flight.spawn(async move { dispatcher.on_event(&event).await });
            } else {
                self.dispatcher.on_event(&event).await;
            }
        }

        debug!(pending = in_flight.len(), "Input closed, waiting for pending notifications");
        while let Some(joined) = in_flight.join_next().await {
            if let Err(e) = joined {
                warn!(error = %e, "Notification task did not complete");
            }
        }

        info!(
            events = summary.events,
            triggered = summary.triggered,
            malformed = summary.malformed,
            "Stopped listening for host events"
        );
        Ok(summary)
    }
}
