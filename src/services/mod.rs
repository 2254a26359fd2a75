//! Service layer.
//!
//! Services hold the behaviour run in response to host events.

pub mod notifications;

pub use notifications::PushoverDispatcher;
