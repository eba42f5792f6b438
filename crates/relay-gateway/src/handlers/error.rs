//! Handler error types

use crate::events::EventType;
use thiserror::Error;

/// Reasons a decoded event was not acted on
///
/// Never reported to the client; the event is dropped.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HandlerError {
    /// Event needs a session and the connection has not joined a room
    #[error("{0} from a connection that has not joined a room")]
    NotJoined(EventType),

    /// Event arrived after its connection was closed
    #[error("{0} from a closed connection")]
    ConnectionClosed(EventType),
}

/// Handler result type
///
/// The success value is the number of outboxes the resulting events reached.
pub type HandlerResult<T> = Result<T, HandlerError>;
