//! Relay state
//!
//! The connection registry and room directory, mutated only through the
//! transitions below so the two stay in agreement.

use relay_core::{ConnectionId, ConnectionRegistry, RoomDirectory, RoomId, UserSession};

/// Registry and directory owned together by the event router
#[derive(Debug, Default)]
pub struct RelayState {
    registry: ConnectionRegistry,
    directory: RoomDirectory,
}

impl RelayState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn registry(&self) -> &ConnectionRegistry {
        &self.registry
    }

    pub fn directory(&self) -> &RoomDirectory {
        &self.directory
    }

    /// Drop the connection's session and its membership in the session's room
    ///
    /// Returns the session that was removed. Unjoined connections are a no-op.
    pub fn leave_current_room(&mut self, connection_id: &ConnectionId) -> Option<UserSession> {
        let session = self.registry.remove_session(connection_id)?;
        self.directory
            .remove_member(session.room_id.as_str(), connection_id);
        Some(session)
    }

    /// Bind the connection to a room under a username
    ///
    /// The connection must not currently belong to another room; call
    /// [`Self::leave_current_room`] first.
    pub fn join_room(&mut self, connection_id: &ConnectionId, username: &str, room_id: RoomId) {
        self.directory.ensure_room(&room_id);
        self.directory
            .add_member(&room_id, connection_id.clone(), username);
        self.registry
            .set_session(connection_id.clone(), username, room_id);
    }

    /// Check that the registry and directory describe the same memberships
    ///
    /// Every session's connection is listed in its room, every listed member
    /// has a session naming that room, and no room is empty.
    pub fn is_consistent(&self) -> bool {
        let sessions_listed = self.registry.iter().all(|session| {
            self.directory
                .room(session.room_id.as_str())
                .is_some_and(|room| room.contains(&session.connection_id))
        });

        let members_bound = self.directory.iter().all(|(room_id, room)| {
            !room.is_empty()
                && room.members().iter().all(|member| {
                    self.registry
                        .get_session(&member.connection_id)
                        .is_some_and(|session| &session.room_id == room_id)
                })
        });

        sessions_listed && members_bound
    }
}
