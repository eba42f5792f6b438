//! Value objects - identifiers

mod ids;
mod message_id;

pub use ids::{ConnectionId, RoomId};
pub use message_id::{MessageId, MessageIdGenerator};
