//! Room directory
//!
//! Maps room IDs to their members. Rooms exist only while they have at least
//! one member: removing the last member deletes the room.

use std::collections::{BTreeMap, HashMap};

use crate::entities::{Member, Room};
use crate::value_objects::{ConnectionId, RoomId};

/// All rooms keyed by room ID
#[derive(Debug, Default)]
pub struct RoomDirectory {
    rooms: HashMap<RoomId, Room>,
}

impl RoomDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty room if absent
    ///
    /// Returns `true` if the room was created.
    pub fn ensure_room(&mut self, room_id: &RoomId) -> bool {
        if self.rooms.contains_key(room_id) {
            return false;
        }
        self.rooms.insert(room_id.clone(), Room::new());
        true
    }

    /// Add a member to a room, creating the room if needed
    ///
    /// A connection already present in the room keeps a single entry with the
    /// new username. Returns `true` if a new entry was inserted.
    pub fn add_member(
        &mut self,
        room_id: &RoomId,
        connection_id: ConnectionId,
        username: impl Into<String>,
    ) -> bool {
        self.rooms
            .entry(room_id.clone())
            .or_default()
            .add(connection_id, username)
    }

    /// Remove a member by connection ID, dropping the room once it is empty
    ///
    /// Unknown rooms and members are a no-op.
    pub fn remove_member(&mut self, room_id: &str, connection_id: &ConnectionId) -> Option<Member> {
        let room = self.rooms.get_mut(room_id)?;
        let removed = room.remove(connection_id);

        if room.is_empty() {
            self.rooms.remove(room_id);
        }

        removed
    }

    pub fn room(&self, room_id: &str) -> Option<&Room> {
        self.rooms.get(room_id)
    }

    /// Snapshot of member display names in join order
    pub fn list_usernames(&self, room_id: &str) -> Vec<String> {
        self.rooms.get(room_id).map(Room::usernames).unwrap_or_default()
    }

    pub fn room_count(&self) -> usize {
        self.rooms.len()
    }

    /// Every room with its member names, ordered by room ID
    pub fn list_rooms(&self) -> BTreeMap<RoomId, Vec<String>> {
        self.rooms
            .iter()
            .map(|(id, room)| (id.clone(), room.usernames()))
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&RoomId, &Room)> {
        self.rooms.iter()
    }
}
