//! Connection registry
//!
//! Maps each connection to its session. Single source of truth for who is
//! online and in which room. Holds no lock: callers serialize access.

use std::collections::HashMap;

use crate::entities::{ConnectionState, UserSession};
use crate::value_objects::{ConnectionId, RoomId};

/// Sessions keyed by connection ID
#[derive(Debug, Default)]
pub struct ConnectionRegistry {
    sessions: HashMap<ConnectionId, UserSession>,
}

impl ConnectionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite the session for a connection
    ///
    /// Returns the session it replaced, if any. Usernames are not validated or
    /// required to be unique.
    pub fn set_session(
        &mut self,
        connection_id: ConnectionId,
        username: impl Into<String>,
        room_id: RoomId,
    ) -> Option<UserSession> {
        let session = UserSession::new(connection_id.clone(), username, room_id);
        self.sessions.insert(connection_id, session)
    }

    pub fn get_session(&self, connection_id: &ConnectionId) -> Option<&UserSession> {
        self.sessions.get(connection_id)
    }

    /// Delete the session; absent sessions are a no-op
    pub fn remove_session(&mut self, connection_id: &ConnectionId) -> Option<UserSession> {
        self.sessions.remove(connection_id)
    }

    pub fn state(&self, connection_id: &ConnectionId) -> ConnectionState {
        self.sessions
            .get(connection_id)
            .map_or(ConnectionState::Unjoined, |s| {
                ConnectionState::Joined(s.room_id.clone())
            })
    }

    pub fn iter(&self) -> impl Iterator<Item = &UserSession> {
        self.sessions.values()
    }

    /// Number of sessions (users that joined a room)
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}
