//! Error types for the relay.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use swarmrun_core::CoreError;

/// Errors that can occur while relaying a submission.
#[derive(Debug, Error)]
pub enum RelayError {
    /// Submission failed validation; the backend was not contacted.
    #[error(transparent)]
    InvalidInput(#[from] CoreError),

    /// Could not connect to the dispatcher.
    #[error("Could not connect to backend orchestrator")]
    BackendUnavailable,

    /// Dispatcher did not answer in time.
    #[error("Request timed out")]
    Timeout,

    /// Anything else: malformed responses, client setup failures.
    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

impl RelayError {
    /// HTTP status reported to the caller.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidInput(_) => StatusCode::BAD_REQUEST,
            Self::BackendUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            Self::Timeout => StatusCode::GATEWAY_TIMEOUT,
            Self::Unexpected(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<reqwest::Error> for RelayError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            Self::Timeout
        } else if e.is_connect() {
            Self::BackendUnavailable
        } else {
            Self::Unexpected(e.to_string())
        }
    }
}

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        (self.status_code(), Json(json!({ "error": self.to_string() }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes_are_distinct() {
        assert_eq!(
            RelayError::from(CoreError::EmptyPrompt).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            RelayError::BackendUnavailable.status_code(),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(RelayError::Timeout.status_code(), StatusCode::GATEWAY_TIMEOUT);
    }

    #[test]
    fn test_invalid_input_message_is_passed_through() {
        let err = RelayError::from(CoreError::InvalidAgentCount);
        assert_eq!(err.to_string(), "Invalid agent count");
    }
}
