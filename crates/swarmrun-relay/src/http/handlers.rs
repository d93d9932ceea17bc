//! Relay request handlers.

use std::convert::Infallible;
use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{
        sse::{Event, KeepAlive, Sse},
        IntoResponse,
    },
    Json,
};
use futures_util::{Stream, StreamExt};
use serde_json::{json, Value};
use tracing::warn;

use swarmrun_core::{CoreError, Task};

use crate::error::RelayError;
use crate::state::AppState;

fn task_from_body(body: Result<Json<Value>, JsonRejection>) -> Result<Task, RelayError> {
    let Json(body) = body.map_err(|_| CoreError::NoData)?;
    Task::from_request(&body).map_err(|e| {
        warn!(error = %e, "Rejected submission");
        RelayError::from(e)
    })
}

/// Forward a submission and pass the dispatcher's answer through.
///
/// POST /api/submit
pub async fn submit(
    State(state): State<Arc<AppState>>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<Value>), RelayError> {
    let task = task_from_body(body)?;
    let (status, body) = state.backend.forward(&task).await?;
    Ok((status, Json(body)))
}

/// Forward a submission and relay each dispatcher event as an SSE frame.
///
/// POST /api/submit/stream
pub async fn submit_stream(
    State(state): State<Arc<AppState>>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Sse<impl Stream<Item = Result<Event, Infallible>>>, RelayError> {
    let task = task_from_body(body)?;
    let frames = state
        .backend
        .forward_stream(&task)
        .map(|line| Ok::<_, Infallible>(Event::default().data(line)));

    Ok(Sse::new(frames).keep_alive(KeepAlive::default()))
}

/// Liveness probe.
pub async fn health_check() -> impl IntoResponse {
    Json(json!({ "status": "healthy" }))
}

/// Readiness probe, including whether the dispatcher answers.
pub async fn readiness_check(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(json!({
        "status": "ready",
        "backend_connected": state.backend.health().await,
    }))
}
