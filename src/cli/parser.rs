//! CLI argument parsing with clap
//!
//! This module defines the command-line interface structure using clap,
//! including all commands, arguments, and their documentation.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::config::ConfigLoader;
use crate::logger::LogFormat;

/// Pushover notifications for OpenCode sessions
#[derive(Parser, Debug)]
#[command(name = "opencode-pushover")]
#[command(about = "Send a Pushover notification when an OpenCode session goes idle")]
#[command(long_about = "
opencode-pushover reads host events and sends one Pushover notification each
time a session goes idle. Settings come from the bundled defaults file, the
user file in ~/.config/opencode and the PUSHOVER_USER / PUSHOVER_TOKEN
environment variables.

EXAMPLES:
    # Forward events piped in by the host (one JSON object per line)
    opencode-pushover listen

    # Send a notification right now
    opencode-pushover send

    # Show the resolved configuration with credentials redacted
    opencode-pushover check

    # Use another user file and verbose logging
    opencode-pushover --user-config ./pushover.json --verbose send
")]
#[command(version)]
pub struct Cli {
    /// Subcommand to execute (defaults to `listen`)
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Bundled defaults file
    ///
    /// Default: opencode-pushover.json next to the executable
    #[arg(long, value_name = "FILE", global = true)]
    pub defaults: Option<PathBuf>,

    /// User override file
    ///
    /// Default: ~/.config/opencode/opencode-pushover.json
    #[arg(long, value_name = "FILE", global = true)]
    pub user_config: Option<PathBuf>,

    /// Dotfile holding PUSHOVER_USER / PUSHOVER_TOKEN
    ///
    /// Default: ~/.config/opencode/.env
    #[arg(long, value_name = "FILE", global = true)]
    pub env_file: Option<PathBuf>,

    /// Directory relative attachment paths are resolved against
    ///
    /// Default: the directory containing the executable
    #[arg(long, value_name = "DIR", global = true, value_parser = super::validation::validate_directory)]
    pub attachment_dir: Option<PathBuf>,

    /// Alternative API endpoint
    #[arg(long, value_name = "URL", hide = true, global = true, env = "OPENCODE_PUSHOVER_ENDPOINT", value_parser = super::validation::validate_endpoint_url)]
    pub endpoint: Option<String>,

    /// Enable verbose logging
    ///
    /// Cannot be used with --quiet.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Only log errors
    ///
    /// Cannot be used with --verbose.
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Log level override, takes precedence over --verbose / --quiet
    #[arg(long, value_enum, global = true)]
    pub log_level: Option<LogLevel>,

    /// Log output format
    #[arg(long, value_enum, global = true, default_value = "full")]
    pub log_format: LogFormatArg,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Commands {
    /// Read host events from stdin and notify on session idle (default)
    ///
    /// Each line is one JSON event, either `{"type": "..."}` or
    /// `{"event": {"type": "..."}}`. Malformed lines are logged and skipped.
    Listen,
    /// Send one notification now, as if the session had gone idle
    ///
    /// Exits non-zero when credentials are missing or the request fails.
    Send,
    /// Print the resolved configuration with credentials redacted
    Check,
}

/// Log level options
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogLevel {
    #[value(name = "error")]
    Error,
    #[value(name = "warn", alias = "warning")]
    Warn,
    #[value(name = "info")]
    Info,
    #[value(name = "debug")]
    Debug,
    #[value(name = "trace")]
    Trace,
}

/// Log format options
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogFormatArg {
    Full,
    Compact,
    Json,
}

impl Cli {
    /// The subcommand to run, `listen` when none was given
    pub fn selected_command(&self) -> Commands {
        self.command.unwrap_or(Commands::Listen)
    }

    /// Effective log level from --log-level, --verbose and --quiet
    pub fn effective_log_level(&self) -> String {
        match (self.log_level, self.verbose, self.quiet) {
            (Some(level), _, _) => level.into(),
            (None, true, _) => "debug".to_string(),
            (None, _, true) => "error".to_string(),
            _ => "info".to_string(),
        }
    }

    /// A config loader with the path overrides from the command line applied
    pub fn config_loader(&self) -> ConfigLoader {
        let mut loader = ConfigLoader::new();
        if let Some(path) = &self.defaults {
            loader = loader.with_defaults_path(path);
        }
        if let Some(path) = &self.user_config {
            loader = loader.with_user_path(path);
        }
        if let Some(path) = &self.env_file {
            loader = loader.with_env_file(path);
        }
        if let Some(dir) = &self.attachment_dir {
            loader = loader.with_attachment_base_dir(dir);
        }
        loader
    }
}

impl From<LogLevel> for String {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => "error".to_string(),
            LogLevel::Warn => "warn".to_string(),
            LogLevel::Info => "info".to_string(),
            LogLevel::Debug => "debug".to_string(),
            LogLevel::Trace => "trace".to_string(),
        }
    }
}

impl From<LogFormatArg> for LogFormat {
    fn from(format: LogFormatArg) -> Self {
        match format {
            LogFormatArg::Full => LogFormat::Full,
            LogFormatArg::Compact => LogFormat::Compact,
            LogFormatArg::Json => LogFormat::Json,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_help_flag() {
        let result = Cli::try_parse_from(["opencode-pushover", "--help"]);
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayHelp);
    }

    #[test]
    fn test_version_flag() {
        let result = Cli::try_parse_from(["opencode-pushover", "--version"]);
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayVersion);
    }

    #[test]
    fn test_default_behavior() {
        let cli = Cli::try_parse_from(["opencode-pushover"]).unwrap();
        assert!(cli.command.is_none());
        assert_eq!(cli.selected_command(), Commands::Listen);
        assert!(!cli.verbose);
        assert!(!cli.quiet);
        assert!(cli.user_config.is_none());
        assert_eq!(cli.log_format, LogFormatArg::Full);
        assert_eq!(cli.effective_log_level(), "info");
    }

    #[test]
    fn test_subcommands() {
        let cli = Cli::try_parse_from(["opencode-pushover", "send"]).unwrap();
        assert_eq!(cli.selected_command(), Commands::Send);

        let cli = Cli::try_parse_from(["opencode-pushover", "check"]).unwrap();
        assert_eq!(cli.selected_command(), Commands::Check);
    }

    #[test]
    fn test_global_path_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "opencode-pushover",
            "send",
            "--user-config",
            "/tmp/pushover.json",
            "--env-file",
            "/tmp/.env",
        ])
        .unwrap();
        assert_eq!(cli.user_config, Some(PathBuf::from("/tmp/pushover.json")));
        assert_eq!(cli.env_file, Some(PathBuf::from("/tmp/.env")));
    }

    #[test]
    fn test_log_level_precedence() {
        let cli = Cli::try_parse_from(["opencode-pushover", "--verbose"]).unwrap();
        assert_eq!(cli.effective_log_level(), "debug");

        let cli = Cli::try_parse_from(["opencode-pushover", "--quiet"]).unwrap();
        assert_eq!(cli.effective_log_level(), "error");

        let cli =
            Cli::try_parse_from(["opencode-pushover", "--verbose", "--log-level", "trace"]).unwrap();
        assert_eq!(cli.effective_log_level(), "trace");
    }

    #[test]
    fn test_conflicting_verbose_quiet() {
        let result = Cli::try_parse_from(["opencode-pushover", "--verbose", "--quiet"]);
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::ArgumentConflict);
    }

    #[test]
    fn test_invalid_endpoint_rejected() {
        let result = Cli::try_parse_from(["opencode-pushover", "--endpoint", "ftp://example.com"]);
        assert!(result.is_err());
    }
}
