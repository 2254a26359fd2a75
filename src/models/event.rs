//! Host lifecycle events.
//!
//! The host emits many event kinds; only `session.idle` (the unit of work
//! has finished) triggers a notification.

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// Wire name of the completion event
pub const SESSION_IDLE: &str = "session.idle";

/// Discriminant of a host event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum EventKind {
    /// The session went idle, i.e. the agent finished its work
    SessionIdle,
    /// Any other event kind, ignored by the dispatcher
    Other(String),
}

impl EventKind {
    pub fn as_str(&self) -> &str {
        match self {
            EventKind::SessionIdle => SESSION_IDLE,
            EventKind::Other(kind) => kind,
        }
    }
}

impl From<String> for EventKind {
    fn from(kind: String) -> Self {
        if kind == SESSION_IDLE {
            EventKind::SessionIdle
        } else {
            EventKind::Other(kind)
        }
    }
}

impl From<&str> for EventKind {
    fn from(kind: &str) -> Self {
        EventKind::from(kind.to_string())
    }
}

impl From<EventKind> for String {
    fn from(kind: EventKind) -> Self {
        kind.as_str().to_string()
    }
}

impl std::fmt::Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An event as delivered by the host
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HostEvent {
    #[serde(rename = "type")]
    pub kind: EventKind,
    /// Event payload, carried but not interpreted
    #[serde(default, skip_serializing_if = "JsonValue::is_null")]
    pub properties: JsonValue,
}

/// Either a bare event or the `{ "event": { ... } }` envelope hosts pass to plugins
#[derive(Deserialize)]
#[serde(untagged)]
enum IncomingEvent {
    Wrapped { event: HostEvent },
    Bare(HostEvent),
}

impl HostEvent {
    pub fn new(kind: impl Into<EventKind>) -> Self {
        Self {
            kind: kind.into(),
            properties: JsonValue::Null,
        }
    }

    /// The completion event that triggers a notification
    pub fn session_idle() -> Self {
        Self::new(EventKind::SessionIdle)
    }

    pub fn is_completion(&self) -> bool {
        self.kind == EventKind::SessionIdle
    }

    /// Parse one JSON document, accepting both the bare and the wrapped shape
    pub fn from_json(input: &str) -> serde_json::Result<Self> {
        let incoming: IncomingEvent = serde_json::from_str(input)?;
        Ok(match incoming {
            IncomingEvent::Wrapped { event } => event,
            IncomingEvent::Bare(event) => event,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_session_idle() {
        let event = HostEvent::from_json(r#"{"type": "session.idle", "properties": {"sessionID": "abc"}}"#).unwrap();
        assert!(event.is_completion());
        assert_eq!(event.properties["sessionID"], "abc");
    }

    #[test]
    fn test_parse_wrapped_event() {
        let event = HostEvent::from_json(r#"{"event": {"type": "session.idle"}}"#).unwrap();
        assert_eq!(event, HostEvent::session_idle());
    }

    #[test]
    fn test_other_kinds_are_preserved() {
        let event = HostEvent::from_json(r#"{"type": "message.updated"}"#).unwrap();
        assert!(!event.is_completion());
        assert_eq!(event.kind, EventKind::Other("message.updated".to_string()));
    }

    #[test]
    fn test_missing_type_is_rejected() {
        assert!(HostEvent::from_json(r#"{"properties": {}}"#).is_err());
        assert!(HostEvent::from_json("not json").is_err());
    }

    #[test]
    fn test_serialize_round_trips_wire_name() {
        let value = serde_json::to_value(HostEvent::session_idle()).unwrap();
        assert_eq!(value, json!({"type": "session.idle"}));
    }
}
