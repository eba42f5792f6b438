//! Server event payloads
//!
//! Field names follow the wire format (camelCase).

use relay_core::RoomId;
use serde::{Deserialize, Serialize};

/// Acknowledgement sent to a connection after it joins a room
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectedEvent {
    pub message: String,
    pub room_id: RoomId,
    pub username: String,
}

impl ConnectedEvent {
    #[must_use]
    pub fn new(room_id: RoomId, username: impl Into<String>) -> Self {
        Self {
            message: format!("Connected to room {room_id}"),
            room_id,
            username: username.into(),
        }
    }
}

/// Someone joined the room
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserJoinedEvent {
    pub username: String,
    pub message: String,
}

impl UserJoinedEvent {
    #[must_use]
    pub fn new(username: impl Into<String>) -> Self {
        let username = username.into();
        Self {
            message: format!("{username} joined the chat"),
            username,
        }
    }
}

/// Someone disconnected from the room
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserLeftEvent {
    pub username: String,
    pub message: String,
}

impl UserLeftEvent {
    #[must_use]
    pub fn new(username: impl Into<String>) -> Self {
        let username = username.into();
        Self {
            message: format!("{username} left the chat"),
            username,
        }
    }
}

/// Typing indicator change for one user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserTypingEvent {
    pub username: String,
    pub is_typing: bool,
}

impl UserTypingEvent {
    #[must_use]
    pub fn new(username: impl Into<String>, is_typing: bool) -> Self {
        Self {
            username: username.into(),
            is_typing,
        }
    }
}
