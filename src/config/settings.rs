//! Configuration settings structures for opencode-pushover
//!
//! `NotificationSettings` mirrors the JSON schema shared by the bundled
//! defaults file and the user override file. `Settings` is the fully resolved
//! result handed to the dispatcher.

use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Message sent when no `message` is configured
pub const DEFAULT_MESSAGE: &str = "OpenCode has finished!";

// ============================================================================
// Loosely typed values
// ============================================================================

/// The `html` flag as it may appear in a config file: `0`, `1`, `"1"` or a bool
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum HtmlFlag {
    Bool(bool),
    Number(i64),
    Text(String),
}

impl HtmlFlag {
    /// Only integer 1, string "1" and `true` enable HTML formatting
    pub fn is_enabled(&self) -> bool {
        match self {
            HtmlFlag::Bool(flag) => *flag,
            HtmlFlag::Number(n) => *n == 1,
            HtmlFlag::Text(s) => s == "1",
        }
    }
}

/// A field that may be written either as a number or as a string
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ScalarValue {
    Integer(i64),
    Float(f64),
    Text(String),
}

impl ScalarValue {
    /// Returns the value as request text, or `None` for `0` and `""`
    pub fn to_param(&self) -> Option<String> {
        match self {
            ScalarValue::Integer(0) => None,
            ScalarValue::Integer(n) => Some(n.to_string()),
            ScalarValue::Float(f) if *f == 0.0 => None,
            ScalarValue::Float(f) => Some(f.to_string()),
            ScalarValue::Text(s) if s.is_empty() => None,
            ScalarValue::Text(s) => Some(s.clone()),
        }
    }
}

// ============================================================================
// File schema
// ============================================================================

/// Notification options read from the config files
///
/// Every field is optional. Unknown keys (including the `PUSHOVER_USER` and
/// `PUSHOVER_TOKEN` credentials) are ignored here.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NotificationSettings {
    /// Message body; `DEFAULT_MESSAGE` when absent
    #[serde(default)]
    pub message: Option<String>,

    /// Path of an image to attach
    #[serde(default)]
    pub attachment: Option<String>,

    /// Inline attachment payload, takes priority over `attachment`
    #[serde(default)]
    pub attachment_base64: Option<String>,

    /// Mime type override for the attachment
    #[serde(default)]
    pub attachment_type: Option<String>,

    #[serde(default)]
    pub device: Option<String>,

    #[serde(default)]
    pub html: Option<HtmlFlag>,

    #[serde(default)]
    pub priority: Option<i64>,

    #[serde(default)]
    pub sound: Option<String>,

    /// Unix timestamp shown instead of the API receive time
    #[serde(default)]
    pub timestamp: Option<ScalarValue>,

    #[serde(default)]
    pub title: Option<String>,

    /// Seconds before the message is deleted from devices
    #[serde(default)]
    pub ttl: Option<i64>,

    #[serde(default)]
    pub url: Option<String>,

    #[serde(default)]
    pub url_title: Option<String>,
}

impl NotificationSettings {
    /// The message to send, falling back to the built-in text
    pub fn message(&self) -> &str {
        self.message.as_deref().unwrap_or(DEFAULT_MESSAGE)
    }

    /// Inline payload, if set to a non-empty value
    pub fn inline_attachment(&self) -> Option<&str> {
        self.attachment_base64.as_deref().filter(|s| !s.is_empty())
    }

    /// Attachment path, if set to a non-empty value
    pub fn attachment_path(&self) -> Option<&str> {
        self.attachment.as_deref().filter(|s| !s.is_empty())
    }

    /// Whether any kind of attachment is configured; empty strings count as unset
    pub fn has_attachment(&self) -> bool {
        self.inline_attachment().is_some() || self.attachment_path().is_some()
    }
}

/// Credentials embedded in the user config file
#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct EmbeddedCredentials {
    #[serde(default, rename = "PUSHOVER_USER", alias = "pushover_user")]
    pub user_key: Option<String>,

    #[serde(default, rename = "PUSHOVER_TOKEN", alias = "pushover_token")]
    pub api_token: Option<String>,
}

// ============================================================================
// Resolved settings
// ============================================================================

/// Pushover user key and application token
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    pub user_key: Option<String>,
    pub api_token: Option<String>,
}

impl Credentials {
    pub fn new(user_key: impl Into<String>, api_token: impl Into<String>) -> Self {
        Self {
            user_key: Some(user_key.into()),
            api_token: Some(api_token.into()),
        }
    }

    /// Returns both values when both are present and non-empty
    pub fn pair(&self) -> Option<(&str, &str)> {
        let user = self.user_key.as_deref().filter(|v| !v.is_empty())?;
        let token = self.api_token.as_deref().filter(|v| !v.is_empty())?;
        Some((user, token))
    }

    pub fn is_complete(&self) -> bool {
        self.pair().is_some()
    }

    pub(crate) fn user_missing(&self) -> bool {
        self.user_key.as_deref().is_none_or(str::is_empty)
    }

    pub(crate) fn token_missing(&self) -> bool {
        self.api_token.as_deref().is_none_or(str::is_empty)
    }
}

fn redact(value: &Option<String>) -> &'static str {
    match value.as_deref() {
        Some(v) if !v.is_empty() => "<set>",
        _ => "<missing>",
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("user_key", &redact(&self.user_key))
            .field("api_token", &redact(&self.api_token))
            .finish()
    }
}

/// Fully resolved settings, immutable after startup
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Settings {
    pub notification: NotificationSettings,
    pub credentials: Credentials,
    /// Directory that relative `attachment` paths are resolved against
    pub attachment_base_dir: PathBuf,
}

impl Settings {
    /// Summary safe to print: options as JSON, credentials redacted
    pub fn redacted_summary(&self) -> serde_json::Value {
        serde_json::json!({
            "notification": self.notification,
            "effective_message": self.notification.message(),
            "credentials": {
                "PUSHOVER_USER": redact(&self.credentials.user_key),
                "PUSHOVER_TOKEN": redact(&self.credentials.api_token),
            },
            "attachment_base_dir": self.attachment_base_dir.display().to_string(),
        })
    }
}
