//! User session - the (username, room) binding of one live connection

use crate::value_objects::{ConnectionId, RoomId};

/// Session created by `join-room`, destroyed on disconnect
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserSession {
    pub connection_id: ConnectionId,
    pub username: String,
    pub room_id: RoomId,
}

impl UserSession {
    pub fn new(connection_id: ConnectionId, username: impl Into<String>, room_id: RoomId) -> Self {
        Self {
            connection_id,
            username: username.into(),
            room_id,
        }
    }
}

/// Per-connection state, derived from whether a session exists
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectionState {
    /// Connected but has not joined a room yet
    Unjoined,
    /// Member of the given room
    Joined(RoomId),
}
