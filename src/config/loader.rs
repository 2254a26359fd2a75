//! Configuration loader for opencode-pushover
//!
//! This module provides the `ConfigLoader` struct that resolves settings
//! from the bundled defaults file, the user override file and the
//! environment with proper precedence.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use config::{Config, File};
use tracing::{debug, trace, warn};

use crate::config::credentials::{API_TOKEN_VAR, USER_KEY_VAR, resolve_credential};
use crate::config::error::ConfigError;
use crate::config::settings::{Credentials, EmbeddedCredentials, NotificationSettings, Settings};

/// File name of both the bundled defaults and the user override file
pub const CONFIG_FILE_NAME: &str = "opencode-pushover.json";

/// File name of the dotfile holding credentials
pub const ENV_FILE_NAME: &str = ".env";

/// Directory under the home directory holding user files
const USER_CONFIG_SUBDIR: &str = ".config/opencode";

/// Directory containing the running executable, or `.` if it cannot be found
pub fn install_dir() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
        .unwrap_or_else(|| PathBuf::from("."))
}

/// `~/.config/opencode`, if a home directory is known
pub fn user_config_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(USER_CONFIG_SUBDIR))
}

/// Configuration loader that resolves layered settings
///
/// Sources, lowest priority first:
/// 1. bundled defaults file (failures are logged, never fatal)
/// 2. user override file (failures are ignored silently)
///
/// Credentials are resolved separately, see [`resolve_credential`].
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    /// Bundled defaults file
    defaults_path: PathBuf,
    /// User override file
    user_path: Option<PathBuf>,
    /// Dotfile with `KEY=value` credentials
    env_file_path: Option<PathBuf>,
    /// Snapshot of the process environment
    process_env: HashMap<String, String>,
    /// Base directory for relative attachment paths
    attachment_base_dir: PathBuf,
}

impl ConfigLoader {
    /// Create a loader pointing at the well-known locations
    ///
    /// Defaults and the attachment base directory come from the install
    /// directory; the user file and dotfile from `~/.config/opencode`.
    pub fn new() -> Self {
        let install = install_dir();
        let user_dir = user_config_dir();

        Self {
            defaults_path: install.join(CONFIG_FILE_NAME),
            user_path: user_dir.as_ref().map(|dir| dir.join(CONFIG_FILE_NAME)),
            env_file_path: user_dir.as_ref().map(|dir| dir.join(ENV_FILE_NAME)),
            process_env: std::env::vars().collect(),
            attachment_base_dir: install,
        }
    }

    /// Use a different bundled defaults file
    pub fn with_defaults_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.defaults_path = path.into();
        self
    }

    /// Use a different user override file
    pub fn with_user_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.user_path = Some(path.into());
        self
    }

    /// Use a different dotfile
    pub fn with_env_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.env_file_path = Some(path.into());
        self
    }

    /// Replace the process environment snapshot
    pub fn with_process_env(mut self, env: HashMap<String, String>) -> Self {
        self.process_env = env;
        self
    }

    /// Resolve relative attachment paths against `dir`
    pub fn with_attachment_base_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.attachment_base_dir = dir.into();
        self
    }

    /// Resolve settings from all sources
    ///
    /// Never fails: every broken layer is replaced by an empty one.
    pub fn resolve(&self) -> Settings {
        let defaults = self.load_defaults();
        let user = self.load_user();

        let notification = Self::merge(&defaults, user.as_ref());
        let embedded = user
            .as_ref()
            .and_then(|layer| layer.clone().try_deserialize::<EmbeddedCredentials>().ok())
            .unwrap_or_default();
        let credentials = self.resolve_credentials(&embedded);

        debug!(
            defaults = %self.defaults_path.display(),
            user_override = user.is_some(),
            credentials_complete = credentials.is_complete(),
            "Resolved Pushover configuration"
        );

        Settings {
            notification,
            credentials,
            attachment_base_dir: self.attachment_base_dir.clone(),
        }
    }

    /// Load the bundled defaults, logging and falling back to an empty layer
    fn load_defaults(&self) -> Config {
        let loaded = Self::read_layer(&self.defaults_path).and_then(|layer| {
            // Reject a defaults file that does not fit the schema up front so a
            // schema error is never blamed on the user file.
            layer
                .clone()
                .try_deserialize::<NotificationSettings>()
                .map_err(|e| ConfigError::parse(format!("{}: {}", self.defaults_path.display(), e)))?;
            Ok(layer)
        });

        match loaded {
            Ok(layer) => layer,
            Err(e) => {
                warn!(
                    path = %self.defaults_path.display(),
                    error = %e,
                    "Failed to load default config"
                );
                Config::default()
            }
        }
    }

    /// Load the user override file; any failure means "no override"
    fn load_user(&self) -> Option<Config> {
        let path = self.user_path.as_ref()?;
        match Self::read_layer(path) {
            Ok(layer) => Some(layer),
            Err(e) => {
                trace!(path = %path.display(), error = %e, "No usable user config");
                None
            }
        }
    }

    /// Read one file into its own `Config` layer
    ///
    /// The format is inferred from the extension (`.json` or `.toml`).
    fn read_layer(path: &Path) -> Result<Config, ConfigError> {
        if !path.is_file() {
            return Err(ConfigError::file_not_found(path.display().to_string()));
        }

        Config::builder()
            .add_source(File::from(path.to_path_buf()).required(true))
            .build()
            .map_err(ConfigError::from)
    }

    /// Overlay the user layer on the defaults
    ///
    /// If the combined layers do not fit the schema the user file is at
    /// fault (the defaults were checked on load) and is dropped.
    fn merge(defaults: &Config, user: Option<&Config>) -> NotificationSettings {
        let defaults_only = || {
            defaults
                .clone()
                .try_deserialize::<NotificationSettings>()
                .unwrap_or_default()
        };

        let Some(user) = user else {
            return defaults_only();
        };

        Config::builder()
            .add_source(defaults.clone())
            .add_source(user.clone())
            .build()
            .and_then(|merged| merged.try_deserialize::<NotificationSettings>())
            .unwrap_or_else(|e| {
                trace!(error = %e, "Ignoring user config that does not match the schema");
                defaults_only()
            })
    }

    fn resolve_credentials(&self, embedded: &EmbeddedCredentials) -> Credentials {
        let dotfile = self.load_env_file();

        let lookup = |var: &str, from_user: &Option<String>| {
            resolve_credential(
                from_user.as_deref(),
                self.process_env.get(var).map(String::as_str),
                dotfile.get(var).map(String::as_str),
            )
        };

        Credentials {
            user_key: lookup(USER_KEY_VAR, &embedded.user_key),
            api_token: lookup(API_TOKEN_VAR, &embedded.api_token),
        }
    }

    /// Parse the dotfile into a map without touching the process environment
    fn load_env_file(&self) -> HashMap<String, String> {
        let Some(path) = self.env_file_path.as_ref() else {
            return HashMap::new();
        };
        if !path.is_file() {
            return HashMap::new();
        }

        match Self::read_env_file(path) {
            Ok(vars) => vars,
            Err(e) => {
                debug!(path = %path.display(), error = %e, "Failed to read env file");
                HashMap::new()
            }
        }
    }

    fn read_env_file(path: &Path) -> Result<HashMap<String, String>, ConfigError> {
        let mut vars = HashMap::new();
        for item in dotenvy::from_path_iter(path)? {
            let (key, value) = item?;
            vars.insert(key, value);
        }
        Ok(vars)
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::settings::{DEFAULT_MESSAGE, HtmlFlag};
    use proptest::prelude::*;
    use std::fs;
    use tempfile::TempDir;

    /// Helper to create a temporary config directory with files
    fn setup_config_dir(files: &[(&str, &str)]) -> TempDir {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        for (name, content) in files {
            let path = temp_dir.path().join(name);
            fs::write(&path, content).expect("Failed to write config file");
        }
        temp_dir
    }

    /// Loader isolated from the real home directory and environment
    fn loader_for(dir: &TempDir) -> ConfigLoader {
        ConfigLoader::new()
            .with_defaults_path(dir.path().join("defaults.json"))
            .with_user_path(dir.path().join("user.json"))
            .with_env_file(dir.path().join(".env"))
            .with_process_env(HashMap::new())
            .with_attachment_base_dir(dir.path())
    }

    fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_no_files_yields_defaults() {
        let dir = setup_config_dir(&[]);
        let settings = loader_for(&dir).resolve();

        assert_eq!(settings.notification, NotificationSettings::default());
        assert_eq!(settings.notification.message(), DEFAULT_MESSAGE);
        assert!(!settings.credentials.is_complete());
        assert_eq!(settings.attachment_base_dir, dir.path());
    }

    #[test]
    fn test_defaults_file_only() {
        let dir = setup_config_dir(&[(
            "defaults.json",
            r#"{"message": "From defaults", "title": "OpenCode", "priority": 0}"#,
        )]);
        let settings = loader_for(&dir).resolve();

        assert_eq!(settings.notification.message(), "From defaults");
        assert_eq!(settings.notification.title.as_deref(), Some("OpenCode"));
        assert_eq!(settings.notification.priority, Some(0));
        assert!(settings.notification.attachment.is_none());
    }

    #[test]
    fn test_user_file_overrides_defaults() {
        let dir = setup_config_dir(&[
            (
                "defaults.json",
                r#"{"message": "From defaults", "title": "OpenCode", "sound": "pushover"}"#,
            ),
            ("user.json", r#"{"message": "From user", "html": 1}"#),
        ]);
        let settings = loader_for(&dir).resolve();

        // Values from the user file win
        assert_eq!(settings.notification.message(), "From user");
        assert_eq!(settings.notification.html, Some(HtmlFlag::Number(1)));

        // Values not in the user file come from the defaults
        assert_eq!(settings.notification.title.as_deref(), Some("OpenCode"));
        assert_eq!(settings.notification.sound.as_deref(), Some("pushover"));
    }

    #[test]
    fn test_malformed_defaults_fall_back_to_empty() {
        let dir = setup_config_dir(&[
            ("defaults.json", "{ not json"),
            ("user.json", r#"{"title": "User title"}"#),
        ]);
        let settings = loader_for(&dir).resolve();

        assert_eq!(settings.notification.message(), DEFAULT_MESSAGE);
        assert_eq!(settings.notification.title.as_deref(), Some("User title"));
    }

    #[test]
    fn test_malformed_user_file_is_ignored() {
        let dir = setup_config_dir(&[
            ("defaults.json", r#"{"message": "From defaults"}"#),
            ("user.json", "{ \"message\": "),
        ]);
        let settings = loader_for(&dir).resolve();

        assert_eq!(settings.notification.message(), "From defaults");
    }

    #[test]
    fn test_user_file_with_wrong_types_is_ignored() {
        let dir = setup_config_dir(&[
            ("defaults.json", r#"{"message": "From defaults", "ttl": 60}"#),
            ("user.json", r#"{"message": "From user", "ttl": {"nested": true}}"#),
        ]);
        let settings = loader_for(&dir).resolve();

        assert_eq!(settings.notification.message(), "From defaults");
        assert_eq!(settings.notification.ttl, Some(60));
    }

    #[test]
    fn test_toml_user_file_is_accepted() {
        let dir = setup_config_dir(&[("user.toml", "message = \"From toml\"\nttl = 3600\n")]);
        let settings = loader_for(&dir)
            .with_user_path(dir.path().join("user.toml"))
            .resolve();

        assert_eq!(settings.notification.message(), "From toml");
        assert_eq!(settings.notification.ttl, Some(3600));
    }

    #[test]
    fn test_credentials_from_process_env() {
        let dir = setup_config_dir(&[]);
        let settings = loader_for(&dir)
            .with_process_env(env(&[("PUSHOVER_USER", "env-user"), ("PUSHOVER_TOKEN", "env-token")]))
            .resolve();

        assert_eq!(settings.credentials.pair(), Some(("env-user", "env-token")));
    }

    #[test]
    fn test_credentials_from_env_file() {
        let dir = setup_config_dir(&[(".env", "PUSHOVER_USER=dot-user\nPUSHOVER_TOKEN=dot-token\n")]);
        let settings = loader_for(&dir).resolve();

        assert_eq!(settings.credentials.pair(), Some(("dot-user", "dot-token")));
    }

    #[test]
    fn test_credential_precedence_chain() {
        let dir = setup_config_dir(&[
            (".env", "PUSHOVER_USER=dot-user\nPUSHOVER_TOKEN=dot-token\n"),
            ("user.json", r#"{"PUSHOVER_USER": "file-user"}"#),
        ]);
        let settings = loader_for(&dir)
            .with_process_env(env(&[("PUSHOVER_TOKEN", "env-token")]))
            .resolve();

        // user file beats everything, process env beats the dotfile
        assert_eq!(settings.credentials.user_key.as_deref(), Some("file-user"));
        assert_eq!(settings.credentials.api_token.as_deref(), Some("env-token"));
    }

    #[test]
    fn test_credentials_in_defaults_file_are_ignored() {
        let dir = setup_config_dir(&[(
            "defaults.json",
            r#"{"PUSHOVER_USER": "bundled-user", "PUSHOVER_TOKEN": "bundled-token"}"#,
        )]);
        let settings = loader_for(&dir).resolve();

        assert!(!settings.credentials.is_complete());
    }

    #[test]
    fn test_resolve_does_not_touch_process_env() {
        let dir = setup_config_dir(&[("user.json", r#"{"PUSHOVER_USER": "loader-test-user-marker"}"#)]);
        let _ = loader_for(&dir).resolve();

        assert_ne!(
            std::env::var("PUSHOVER_USER").ok().as_deref(),
            Some("loader-test-user-marker")
        );
    }

    fn arb_layer() -> impl Strategy<Value = HashMap<&'static str, String>> {
        let keys = prop::sample::subsequence(
            vec!["message", "device", "sound", "title", "url", "url_title", "attachment_type"],
            0..=7,
        );
        keys.prop_flat_map(|keys| {
            let n = keys.len();
            (Just(keys), prop::collection::vec("[a-z]{1,12}", n))
        })
        .prop_map(|(keys, values)| keys.into_iter().zip(values).collect())
    }

    fn field<'a>(settings: &'a NotificationSettings, key: &str) -> Option<&'a str> {
        match key {
            "message" => settings.message.as_deref(),
            "device" => settings.device.as_deref(),
            "sound" => settings.sound.as_deref(),
            "title" => settings.title.as_deref(),
            "url" => settings.url.as_deref(),
            "url_title" => settings.url_title.as_deref(),
            "attachment_type" => settings.attachment_type.as_deref(),
            _ => None,
        }
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(32))]

        #[test]
        fn prop_user_values_win_over_defaults(defaults in arb_layer(), user in arb_layer()) {
            let defaults_json = serde_json::to_string(&defaults).unwrap();
            let user_json = serde_json::to_string(&user).unwrap();
            let dir = setup_config_dir(&[
                ("defaults.json", defaults_json.as_str()),
                ("user.json", user_json.as_str()),
            ]);
            let settings = loader_for(&dir).resolve();

            for key in ["message", "device", "sound", "title", "url", "url_title", "attachment_type"] {
                let expected = user.get(key).or_else(|| defaults.get(key)).map(String::as_str);
                prop_assert_eq!(field(&settings.notification, key), expected);
            }
        }
    }
}
