//! Domain entities - sessions, rooms and messages

mod message;
mod room;
mod session;

pub use message::{iso_millis, ChatMessage};
pub use room::{Member, Room};
pub use session::{ConnectionState, UserSession};
