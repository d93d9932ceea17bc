//! HTTP server for the dispatcher.
//!
//! Provides endpoints for:
//! - Synchronous orchestration (`/api/orchestrate`)
//! - Streaming orchestration (`/api/orchestrate/stream`)
//! - Health and readiness probes (`/health`, `/ready`)

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

mod handlers;
pub mod responses;

/// Create the HTTP router.
pub fn create_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // API routes
        .route("/api/orchestrate", post(handlers::orchestrate))
        .route("/api/orchestrate/stream", post(handlers::orchestrate_stream))
        // Observability routes
        .route("/health", get(handlers::health_check))
        .route("/ready", get(handlers::readiness_check))
        .route("/", get(handlers::index))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
