//! Outbound event envelope
//!
//! Serializes to `{"event": "<name>", "data": <payload>}`.

use super::{ConnectedEvent, EventType, UserJoinedEvent, UserLeftEvent, UserTypingEvent};
use relay_core::ChatMessage;
use serde::{Deserialize, Serialize};

/// An event pushed from the relay to a client
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "kebab-case")]
pub enum ServerEvent {
    Connected(ConnectedEvent),
    /// Usernames of the room's members in join order
    RoomUsers(Vec<String>),
    UserJoined(UserJoinedEvent),
    UserLeft(UserLeftEvent),
    UserTyping(UserTypingEvent),
    ReceiveMessage(ChatMessage),
}

impl ServerEvent {
    #[must_use]
    pub fn event_type(&self) -> EventType {
        match self {
            Self::Connected(_) => EventType::Connected,
            Self::RoomUsers(_) => EventType::RoomUsers,
            Self::UserJoined(_) => EventType::UserJoined,
            Self::UserLeft(_) => EventType::UserLeft,
            Self::UserTyping(_) => EventType::UserTyping,
            Self::ReceiveMessage(_) => EventType::ReceiveMessage,
        }
    }

    /// Serialize to a JSON text frame
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Parse a server frame
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
