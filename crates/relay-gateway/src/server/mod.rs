//! Relay server setup
//!
//! Provides the WebSocket endpoint, the status API and static client files.

mod api;
mod handler;
mod middleware;
mod state;

pub use api::{health_check, list_rooms, HealthResponse};
pub use handler::gateway_handler;
pub use middleware::{apply_middleware, REQUEST_ID_HEADER};
pub use state::GatewayState;

use crate::connection::ConnectionManager;
use crate::router::EventRouter;
use axum::{routing::get, Router};
use relay_common::{AppConfig, AppError, AppResult};
use std::path::Path;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::services::ServeDir;

/// Create the relay router
///
/// When `static_dir` is given, unmatched paths are served from it.
pub fn create_router(static_dir: Option<&Path>) -> Router<GatewayState> {
    let router = Router::new()
        .route("/ws", get(gateway_handler))
        .route("/api/health", get(health_check))
        .route("/api/rooms", get(list_rooms));

    match static_dir {
        Some(dir) => router.fallback_service(ServeDir::new(dir)),
        None => router,
    }
}

/// Build the complete application
pub fn create_app(state: GatewayState) -> Router {
    let static_dir = Path::new(&state.config().static_files.dir);
    let static_dir = if static_dir.is_dir() {
        tracing::info!(dir = %static_dir.display(), "Serving static files");
        Some(static_dir)
    } else {
        tracing::debug!(dir = %static_dir.display(), "Static directory not found, skipping");
        None
    };

    let router = create_router(static_dir);
    apply_middleware(router, &state.config().cors).with_state(state)
}

/// Create the shared state for a configuration
pub fn create_gateway_state(config: AppConfig) -> GatewayState {
    let connection_manager = ConnectionManager::new_shared(config.gateway.outbound_buffer);
    let router = Arc::new(EventRouter::new(connection_manager.clone()));

    GatewayState::new(router, connection_manager, config)
}

/// Run the relay server on a bound listener until shutdown
pub async fn serve(listener: TcpListener, app: Router) -> AppResult<()> {
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(AppError::server)?;

    tracing::info!("Server stopped gracefully");
    Ok(())
}

/// Bind the address and run the relay server
pub async fn run_server(app: Router, addr: &str) -> AppResult<()> {
    tracing::info!("Starting relay server on {}", addr);

    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| AppError::bind(addr, e))?;

    let local_addr = listener.local_addr().map_err(AppError::internal)?;
    tracing::info!("Relay listening on ws://{}/ws", local_addr);

    serve(listener, app).await
}

/// Run the complete relay server with configuration
pub async fn run(config: AppConfig) -> AppResult<()> {
    let addr = config.server.address();

    // Create gateway state
    let state = create_gateway_state(config);

    // Build application
    let app = create_app(state);

    // Run server
    run_server(app, &addr).await
}

/// Resolves on Ctrl-C or SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!(error = %e, "Failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {}
        () = terminate => {}
    }

    tracing::info!("Shutdown signal received");
}
