//! Wire protocol
//!
//! Decoding of client frames into typed events.

mod error;
mod messages;

pub use error::{ProtocolError, ProtocolResult};
pub use messages::{ClientEvent, ClientMessage, JoinRoomPayload, SendMessagePayload};
