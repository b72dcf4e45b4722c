//! HTTP endpoint exposing the snapshot file to other processes.
//!
//! This runs separately from the daemon and only ever reads the sink file.

pub mod config;
pub mod handlers;
pub mod router;

// Re-export commonly used items
pub use config::WebConfig;
pub use router::create_app;

use crate::error::{Result, SystemError};
use std::net::SocketAddr;
use tracing::info;

/// Start the web server with the provided configuration.
pub async fn start_web_server(config: WebConfig) -> Result<()> {
    let app = create_app(&config);

    let addr = config
        .bind_address()
        .parse::<SocketAddr>()
        .map_err(|e| SystemError::config_error(format!("Invalid bind address: {}", e)))?;

    info!("Starting metrics server on http://{}", addr);
    info!("Metrics endpoint: http://{}/metrics", addr);
    info!("Serving {}", config.metrics_path.display());

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| SystemError::web_server_error(format!("Failed to bind to address: {}", e)))?;

    axum::serve(listener, app)
        .await
        .map_err(|e| SystemError::web_server_error(format!("Server error: {}", e)))?;

    Ok(())
}
