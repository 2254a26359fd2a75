//! Configuration resolution for opencode-pushover
//!
//! Settings are resolved once at startup from layered sources.
//!
//! # Configuration Priority (lowest to highest)
//! 1. `opencode-pushover.json` next to the installed binary - bundled defaults
//! 2. `~/.config/opencode/opencode-pushover.json` - user overrides
//!
//! Credentials follow their own chain: `~/.config/opencode/.env` <
//! process environment < `PUSHOVER_USER` / `PUSHOVER_TOKEN` in the user file.

pub mod credentials;
pub mod error;
pub mod loader;
pub mod settings;

// Re-export public types
pub use credentials::resolve_credential;
pub use error::ConfigError;
pub use loader::ConfigLoader;
pub use settings::{Credentials, HtmlFlag, NotificationSettings, ScalarValue, Settings};
