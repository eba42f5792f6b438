//! Relay events
//!
//! Event names and the payloads the relay sends to clients.

mod event_types;
mod payloads;
mod server_event;

pub use event_types::EventType;
pub use payloads::{ConnectedEvent, UserJoinedEvent, UserLeftEvent, UserTypingEvent};
pub use server_event::ServerEvent;
