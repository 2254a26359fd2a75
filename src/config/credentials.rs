//! Credential precedence

/// Environment variable holding the Pushover user key
pub const USER_KEY_VAR: &str = "PUSHOVER_USER";

/// Environment variable holding the Pushover application token
pub const API_TOKEN_VAR: &str = "PUSHOVER_TOKEN";

/// Picks the effective value of one credential field.
///
/// Precedence from highest to lowest: value embedded in the user config file,
/// process environment, dotfile. Empty strings count as absent at every layer.
pub fn resolve_credential(
    user_config: Option<&str>,
    process_env: Option<&str>,
    dotfile: Option<&str>,
) -> Option<String> {
    [user_config, process_env, dotfile]
        .into_iter()
        .flatten()
        .find(|value| !value.is_empty())
        .map(str::to_owned)
}
