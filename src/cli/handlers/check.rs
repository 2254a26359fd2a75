//! Check command handler
//!
//! Prints the resolved configuration so users can see which layers applied.

use crate::config::settings::Settings;
use crate::error::{AppError, AppResult};

/// Handler for the check command
pub struct CheckCommandHandler {
    settings: Settings,
}

impl CheckCommandHandler {
    pub fn new(settings: Settings) -> Self {
        Self { settings }
    }

    /// Render the redacted configuration as pretty JSON
    pub fn render(&self) -> AppResult<String> {
        serde_json::to_string_pretty(&self.settings.redacted_summary()).map_err(|e| {
            AppError::Internal {
                source: anyhow::Error::new(e).context("rendering configuration"),
            }
        })
    }

    /// Print the configuration to stdout
    pub fn execute(&self) -> AppResult<()> {
        println!("{}", self.render()?);
        if !self.settings.credentials.is_complete() {
            eprintln!("Warning: PUSHOVER_USER and PUSHOVER_TOKEN must both be set to send notifications");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Credentials, NotificationSettings};

    #[test]
    fn test_render_redacts_credentials() {
        let settings = Settings {
            notification: NotificationSettings {
                title: Some("OpenCode".into()),
                ..Default::default()
            },
            credentials: Credentials::new("user-secret", "token-secret"),
            ..Default::default()
        };
        let output = CheckCommandHandler::new(settings).render().unwrap();

        assert!(output.contains("OpenCode"));
        assert!(!output.contains("user-secret"));
        assert!(!output.contains("token-secret"));
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["credentials"]["PUSHOVER_USER"], "<set>");
    }

    #[test]
    fn test_execute_without_credentials_succeeds() {
        assert!(CheckCommandHandler::new(Settings::default()).execute().is_ok());
    }
}
