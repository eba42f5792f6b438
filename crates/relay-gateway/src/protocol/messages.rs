//! Inbound message format
//!
//! Clients send JSON text frames of the form `{"event": "<name>", "data": <payload>}`.

use super::{ProtocolError, ProtocolResult};
use crate::events::EventType;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Raw client frame before the payload is interpreted
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientMessage {
    /// Event name
    pub event: String,

    /// Event payload
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl ClientMessage {
    #[must_use]
    pub fn new(event: EventType, data: Option<Value>) -> Self {
        Self {
            event: event.as_str().to_string(),
            data,
        }
    }

    /// Parse a frame from a JSON string
    pub fn from_json(json: &str) -> ProtocolResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serialize to a JSON string
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Interpret the frame as a client event
    pub fn into_event(self) -> ProtocolResult<ClientEvent> {
        let event = EventType::from_name(&self.event)
            .ok_or_else(|| ProtocolError::UnknownEvent(self.event.clone()))?;

        match event {
            EventType::JoinRoom => Ok(ClientEvent::JoinRoom(payload(event, self.data)?)),
            EventType::SendMessage => Ok(ClientEvent::SendMessage(payload(event, self.data)?)),
            // Typing payloads carry nothing the relay uses
            EventType::TypingStart => Ok(ClientEvent::TypingStart),
            EventType::TypingStop => Ok(ClientEvent::TypingStop),
            _ => Err(ProtocolError::ServerOnlyEvent(event)),
        }
    }
}

fn payload<T: DeserializeOwned>(event: EventType, data: Option<Value>) -> ProtocolResult<T> {
    let data = data.ok_or(ProtocolError::MissingPayload(event))?;
    serde_json::from_value(data).map_err(|source| ProtocolError::InvalidPayload { event, source })
}

/// `join-room` payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JoinRoomPayload {
    pub username: String,
    pub room_id: String,
}

/// `send-message` payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SendMessagePayload {
    pub message: String,
}

/// A decoded client event
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientEvent {
    JoinRoom(JoinRoomPayload),
    SendMessage(SendMessagePayload),
    TypingStart,
    TypingStop,
}

impl ClientEvent {
    /// Decode a text frame in one step
    pub fn parse(json: &str) -> ProtocolResult<Self> {
        ClientMessage::from_json(json)?.into_event()
    }

    /// Build a `join-room` event
    #[must_use]
    pub fn join_room(username: impl Into<String>, room_id: impl Into<String>) -> Self {
        Self::JoinRoom(JoinRoomPayload {
            username: username.into(),
            room_id: room_id.into(),
        })
    }

    /// Build a `send-message` event
    #[must_use]
    pub fn send_message(message: impl Into<String>) -> Self {
        Self::SendMessage(SendMessagePayload {
            message: message.into(),
        })
    }

    #[must_use]
    pub fn event_type(&self) -> EventType {
        match self {
            Self::JoinRoom(_) => EventType::JoinRoom,
            Self::SendMessage(_) => EventType::SendMessage,
            Self::TypingStart => EventType::TypingStart,
            Self::TypingStop => EventType::TypingStop,
        }
    }

    /// Convert back to a wire frame
    #[must_use]
    pub fn to_message(&self) -> ClientMessage {
        let data = match self {
            Self::JoinRoom(payload) => serde_json::to_value(payload).ok(),
            Self::SendMessage(payload) => serde_json::to_value(payload).ok(),
            Self::TypingStart | Self::TypingStop => None,
        };
        ClientMessage::new(self.event_type(), data)
    }
}
