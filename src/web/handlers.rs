//! HTTP handlers for the metrics endpoint.

use axum::{extract::State, http::StatusCode, response::Json};
use serde_json::{json, Value};
use std::io::ErrorKind;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::error;

/// State shared by every handler.
#[derive(Debug, Clone)]
pub struct AppState {
    pub metrics_path: Arc<PathBuf>,
}

/// Serve the latest snapshot file as JSON.
///
/// The file is read on every request; the in-memory snapshot is never
/// touched from here.
pub async fn get_metrics(State(state): State<AppState>) -> (StatusCode, Json<Value>) {
    let content = match tokio::fs::read_to_string(state.metrics_path.as_path()).await {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            return (
                StatusCode::NOT_FOUND,
                Json(json!({ "error": "Metrics file not found" })),
            );
        }
        Err(e) => return read_failure(e.to_string()),
    };

    match serde_json::from_str::<Value>(&content) {
        Ok(metrics) => (StatusCode::OK, Json(metrics)),
        Err(e) => read_failure(e.to_string()),
    }
}

fn read_failure(details: String) -> (StatusCode, Json<Value>) {
    error!("Failed to read metrics file: {}", details);
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "error": "Error reading metrics", "details": details })),
    )
}

/// Health check endpoint.
pub async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": "system-monitor",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}
