//! # relay-core
//!
//! Domain layer of the chat relay: identifiers, sessions, rooms, the connection
//! registry and the room directory. Pure in-memory data structures with no I/O
//! and no locking.

pub mod directory;
pub mod entities;
pub mod registry;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use directory::RoomDirectory;
pub use entities::{iso_millis, ChatMessage, ConnectionState, Member, Room, UserSession};
pub use registry::ConnectionRegistry;
pub use value_objects::{ConnectionId, MessageId, MessageIdGenerator, RoomId};
