//! Chat relay server entry point
//!
//! Run with:
//! ```bash
//! cargo run -p relay-gateway
//! ```
//!
//! Configuration is loaded from environment variables and an optional `.env` file.

use relay_common::{
    try_init_tracing, try_init_tracing_with_config, AppConfig, AppError, TracingConfig,
};
use tracing::{error, info};

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        error!(error = %e, "Relay server failed");
        std::process::exit(e.exit_code());
    }
}

async fn run() -> Result<(), AppError> {
    // Load configuration
    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            // Tracing is not set up yet
            if let Err(err) = try_init_tracing() {
                eprintln!("Warning: Failed to initialize tracing: {err}");
            }
            return Err(e.into());
        }
    };

    // Initialize tracing
    if let Err(e) = try_init_tracing_with_config(TracingConfig::from_app_config(&config)) {
        eprintln!("Warning: Failed to initialize tracing: {e}");
    }

    info!(
        name = %config.app.name,
        env = ?config.app.env,
        address = %config.server.address(),
        "Configuration loaded"
    );

    relay_gateway::run(config).await
}
