//! Health, readiness, and service info handlers.

use std::sync::Arc;

use axum::{extract::State, response::IntoResponse, Json};
use serde_json::json;

use crate::state::AppState;

/// Liveness probe.
pub async fn health_check(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(json!({
        "status": "healthy",
        "api_key_configured": state.dispatcher.api_key_configured(),
    }))
}

/// Readiness probe. Also reports whether the agent CLI can be launched.
pub async fn readiness_check(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(json!({
        "status": "ready",
        "runtime_available": state.dispatcher.runtime_available().await,
        "api_key_configured": state.dispatcher.api_key_configured(),
    }))
}

/// Service description.
pub async fn index() -> impl IntoResponse {
    Json(json!({
        "service": "SwarmRun Dispatcher",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "POST /api/orchestrate": "Run multiple agents on a prompt",
            "POST /api/orchestrate/stream": "Run agents with streaming results",
            "GET /health": "Health check",
            "GET /ready": "Readiness check",
        }
    }))
}
