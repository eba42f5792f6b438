//! Event type names
//!
//! Every frame on the wire carries one of these names in its `event` field.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Relay event names
///
/// Client-originated events come first, server-originated events after.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EventType {
    // Client -> server
    JoinRoom,
    SendMessage,
    TypingStart,
    TypingStop,

    // Server -> client
    Connected,
    RoomUsers,
    UserJoined,
    UserLeft,
    UserTyping,
    ReceiveMessage,
}

impl EventType {
    /// Get the wire name for this event
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::JoinRoom => "join-room",
            Self::SendMessage => "send-message",
            Self::TypingStart => "typing-start",
            Self::TypingStop => "typing-stop",
            Self::Connected => "connected",
            Self::RoomUsers => "room-users",
            Self::UserJoined => "user-joined",
            Self::UserLeft => "user-left",
            Self::UserTyping => "user-typing",
            Self::ReceiveMessage => "receive-message",
        }
    }

    /// Parse an event type from its wire name
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "join-room" => Some(Self::JoinRoom),
            "send-message" => Some(Self::SendMessage),
            "typing-start" => Some(Self::TypingStart),
            "typing-stop" => Some(Self::TypingStop),
            "connected" => Some(Self::Connected),
            "room-users" => Some(Self::RoomUsers),
            "user-joined" => Some(Self::UserJoined),
            "user-left" => Some(Self::UserLeft),
            "user-typing" => Some(Self::UserTyping),
            "receive-message" => Some(Self::ReceiveMessage),
            _ => None,
        }
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
