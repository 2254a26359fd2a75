//! Request parameter assembly.

use crate::config::NotificationSettings;

/// Builds the request parameters for one notification
///
/// `user`, `token` and `message` are always present. Optional fields are
/// added only when set: empty strings and zero `ttl` / `timestamp` are
/// skipped, `priority` is kept even when 0, and `html` becomes `"1"` only for
/// `1`, `"1"` or `true`.
pub fn build_params(
    settings: &NotificationSettings,
    user: &str,
    token: &str,
) -> Vec<(&'static str, String)> {
    let mut params = vec![
        ("user", user.to_string()),
        ("token", token.to_string()),
        ("message", settings.message().to_string()),
    ];

    let text = |value: &Option<String>| value.clone().filter(|v| !v.is_empty());

    if let Some(device) = text(&settings.device) {
        params.push(("device", device));
    }
    if settings.html.as_ref().is_some_and(|flag| flag.is_enabled()) {
        params.push(("html", "1".to_string()));
    }
    if let Some(priority) = settings.priority {
        params.push(("priority", priority.to_string()));
    }
    if let Some(sound) = text(&settings.sound) {
        params.push(("sound", sound));
    }
    if let Some(timestamp) = settings.timestamp.as_ref().and_then(|t| t.to_param()) {
        params.push(("timestamp", timestamp));
    }
    if let Some(title) = text(&settings.title) {
        params.push(("title", title));
    }
    if let Some(ttl) = settings.ttl.filter(|ttl| *ttl != 0) {
        params.push(("ttl", ttl.to_string()));
    }
    if let Some(url) = text(&settings.url) {
        params.push(("url", url));
    }
    if let Some(url_title) = text(&settings.url_title) {
        params.push(("url_title", url_title));
    }

    params
}
