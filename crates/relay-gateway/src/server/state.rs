//! Gateway state
//!
//! Application state for the relay server.

use crate::connection::ConnectionManager;
use crate::router::EventRouter;
use relay_common::AppConfig;
use std::sync::Arc;

/// Gateway application state
///
/// Holds all shared dependencies for the relay server.
#[derive(Clone)]
pub struct GatewayState {
    /// Event router owning rooms and sessions
    router: Arc<EventRouter>,
    /// Connection manager for WebSocket connections
    connection_manager: Arc<ConnectionManager>,
    /// Application configuration
    config: Arc<AppConfig>,
}

impl GatewayState {
    /// Create a new gateway state
    pub fn new(
        router: Arc<EventRouter>,
        connection_manager: Arc<ConnectionManager>,
        config: AppConfig,
    ) -> Self {
        Self {
            router,
            connection_manager,
            config: Arc::new(config),
        }
    }

    /// Get the event router
    pub fn router(&self) -> &EventRouter {
        &self.router
    }

    /// Get the connection manager
    pub fn connection_manager(&self) -> &ConnectionManager {
        &self.connection_manager
    }

    /// Get the application configuration
    pub fn config(&self) -> &AppConfig {
        &self.config
    }
}

impl std::fmt::Debug for GatewayState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GatewayState")
            .field("router", &self.router)
            .field("connection_manager", &self.connection_manager)
            .field("config", &"AppConfig")
            .finish()
    }
}
