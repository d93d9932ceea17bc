//! HTTP error responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use swarmrun_core::CoreError;

use crate::error::DispatchError;

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,

    /// How to fix the problem, when we know.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,

    /// Run status, for run-level failures.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

impl ErrorResponse {
    fn new(error: impl ToString) -> Self {
        Self {
            error: error.to_string(),
            hint: None,
            status: None,
        }
    }
}

/// Anything a handler can fail with.
#[derive(Debug)]
pub enum ApiError {
    /// Request failed validation; nothing was dispatched.
    InvalidInput(CoreError),
    /// The run could not be carried out.
    Dispatch(DispatchError),
}

impl From<CoreError> for ApiError {
    fn from(e: CoreError) -> Self {
        Self::InvalidInput(e)
    }
}

impl From<DispatchError> for ApiError {
    fn from(e: DispatchError) -> Self {
        Self::Dispatch(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            Self::InvalidInput(e) => (StatusCode::BAD_REQUEST, ErrorResponse::new(e)),
            Self::Dispatch(e @ DispatchError::ConfigurationMissing) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorResponse {
                    hint: Some("Set the ANTHROPIC_API_KEY environment variable".to_string()),
                    ..ErrorResponse::new(e)
                },
            ),
            Self::Dispatch(e @ DispatchError::RunFailure(_)) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorResponse {
                    status: Some("failed".to_string()),
                    ..ErrorResponse::new(e)
                },
            ),
        };
        (status, Json(body)).into_response()
    }
}
