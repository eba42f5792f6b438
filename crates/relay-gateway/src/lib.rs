//! # relay-gateway
//!
//! WebSocket relay for room-based chat: connection tracking, event routing,
//! fan-out and the HTTP status API.

pub mod broadcast;
pub mod connection;
pub mod events;
pub mod handlers;
pub mod protocol;
pub mod router;
pub mod server;

pub use server::{create_app, create_gateway_state, run, GatewayState};
