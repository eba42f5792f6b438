//! Room entity - a named broadcast group and its members

use crate::value_objects::ConnectionId;

/// One occupant of a room
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Member {
    pub connection_id: ConnectionId,
    pub username: String,
}

impl Member {
    pub fn new(connection_id: ConnectionId, username: impl Into<String>) -> Self {
        Self {
            connection_id,
            username: username.into(),
        }
    }
}

/// Room members in join order
///
/// A connection appears at most once; membership is keyed by connection ID,
/// never by username.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Room {
    members: Vec<Member>,
}

impl Room {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a member, replacing the username in place if the connection is already present
    ///
    /// Returns `true` if a new entry was inserted.
    pub fn add(&mut self, connection_id: ConnectionId, username: impl Into<String>) -> bool {
        let username = username.into();
        if let Some(existing) = self
            .members
            .iter_mut()
            .find(|m| m.connection_id == connection_id)
        {
            existing.username = username;
            false
        } else {
            self.members.push(Member::new(connection_id, username));
            true
        }
    }

    /// Remove the entry for a connection
    pub fn remove(&mut self, connection_id: &ConnectionId) -> Option<Member> {
        let pos = self
            .members
            .iter()
            .position(|m| &m.connection_id == connection_id)?;
        Some(self.members.remove(pos))
    }

    #[inline]
    pub fn contains(&self, connection_id: &ConnectionId) -> bool {
        self.members.iter().any(|m| &m.connection_id == connection_id)
    }

    pub fn members(&self) -> &[Member] {
        &self.members
    }

    /// Display names in join order
    pub fn usernames(&self) -> Vec<String> {
        self.members.iter().map(|m| m.username.clone()).collect()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}
