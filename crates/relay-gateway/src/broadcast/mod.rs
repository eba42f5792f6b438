//! Event broadcasting
//!
//! Handles distribution of server events to WebSocket connections.

mod broadcaster;

pub use broadcaster::{Broadcaster, Target};
