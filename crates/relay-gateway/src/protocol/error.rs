//! Protocol error types

use crate::events::EventType;
use thiserror::Error;

/// Reasons an inbound frame could not be turned into a client event
///
/// None of these reach the client: the frame is logged and dropped.
#[derive(Debug, Error)]
pub enum ProtocolError {
    /// Not valid JSON, or not an `{event, data}` object
    #[error("Malformed frame: {0}")]
    Decode(#[from] serde_json::Error),

    /// Event name the relay does not know
    #[error("Unknown event: {0}")]
    UnknownEvent(String),

    /// Client sent an event only the server may emit
    #[error("Server-only event sent by client: {0}")]
    ServerOnlyEvent(EventType),

    /// Event requires a payload and none was given
    #[error("Missing payload for {0}")]
    MissingPayload(EventType),

    /// Payload present but of the wrong shape
    #[error("Invalid payload for {event}: {source}")]
    InvalidPayload {
        event: EventType,
        #[source]
        source: serde_json::Error,
    },
}

/// Protocol result type
pub type ProtocolResult<T> = Result<T, ProtocolError>;
