//! Pushover notification dispatch.
//!
//! `PushoverDispatcher` receives host events, assembles the request from the
//! resolved settings and hands it to a `NotificationProvider`. The Pushover
//! HTTP API is the only provider.

mod attachment;
mod dispatcher;
mod params;
mod provider;
mod pushover_provider;


pub use attachment::{FALLBACK_MIME, guess_mime, resolve_attachment};
pub use dispatcher::PushoverDispatcher;
pub use params::build_params;
pub use provider::{Attachment, NotificationMessage, NotificationProvider, NotificationResult};
pub use pushover_provider::{PUSHOVER_API_URL, PushoverProvider};
