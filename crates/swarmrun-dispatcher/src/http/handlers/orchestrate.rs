//! Orchestration handlers.

use std::convert::Infallible;
use std::sync::Arc;

use axum::{
    body::Body,
    extract::{rejection::JsonRejection, State},
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use futures_util::StreamExt;
use serde_json::Value;

use swarmrun_core::{CoreError, RunResult, Task};

use crate::http::responses::ApiError;
use crate::state::AppState;

/// Validate a request body into a task.
fn task_from_body(body: Result<Json<Value>, JsonRejection>) -> Result<Task, CoreError> {
    let Json(body) = body.map_err(|_| CoreError::NoData)?;
    Task::from_request(&body)
}

/// Run agents and return all results at once.
///
/// POST /api/orchestrate
pub async fn orchestrate(
    State(state): State<Arc<AppState>>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<RunResult>, ApiError> {
    let task = task_from_body(body)?;
    let run = state.dispatcher.run(&task).await?;
    Ok(Json(run))
}

/// Run agents and stream one JSON event per line.
///
/// POST /api/orchestrate/stream
pub async fn orchestrate_stream(
    State(state): State<Arc<AppState>>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Response, ApiError> {
    let task = task_from_body(body)?;
    let lines = state
        .dispatcher
        .run_stream(task)
        .map(|event| Ok::<_, Infallible>(event.to_line()));

    Ok((
        [(header::CONTENT_TYPE, "application/x-ndjson")],
        Body::from_stream(lines),
    )
        .into_response())
}
