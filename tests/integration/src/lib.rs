//! Integration test utilities for the chat relay
//!
//! This crate provides helpers for running end-to-end tests against
//! the HTTP status API and the WebSocket endpoint.

pub mod fixtures;
pub mod ws;

pub use fixtures::*;
pub use helpers::*;
pub use ws::WsClient;
