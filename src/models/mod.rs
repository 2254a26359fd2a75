mod event;

pub use event::{EventKind, HostEvent, SESSION_IDLE};
