//! opencode-pushover
//!
//! Sends a Pushover notification when the host reports that a session went
//! idle. Settings are resolved once by [`config::ConfigLoader`] and events are
//! handled by [`services::PushoverDispatcher`].

pub mod cli;
pub mod config;
pub mod error;
pub mod external;
pub mod logger;
pub mod models;
pub mod services;

pub use config::{ConfigLoader, Settings};
pub use models::HostEvent;
pub use services::PushoverDispatcher;
