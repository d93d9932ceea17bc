//! Error types for the Claude Code SDK.

use thiserror::Error;

/// Errors that can occur during Claude Code SDK operations.
#[derive(Debug, Error)]
pub enum SdkError {
    /// Claude CLI executable not found.
    #[error("Claude CLI not found at '{0}'. Ensure Claude Code is installed.")]
    ClaudeNotFound(String),

    /// Failed to spawn or talk to the Claude process.
    #[error("Failed to spawn Claude process: {0}")]
    SpawnError(#[from] std::io::Error),

    /// Claude process exited with an error.
    #[error("Claude process exited with error: {0}")]
    ProcessError(String),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Protocol error during communication.
    #[error("Protocol error: {0}")]
    ProtocolError(String),
}

impl SdkError {
    /// Returns true if the runtime itself is unavailable, as opposed to an
    /// execution that started and then went wrong.
    pub fn is_unavailable(&self) -> bool {
        matches!(self, Self::ClaudeNotFound(_))
    }

    /// Short machine-readable kind, used in result details.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::ClaudeNotFound(_) => "runtime_unavailable",
            Self::SpawnError(_) => "spawn_error",
            Self::ProcessError(_) => "process_error",
            Self::JsonError(_) => "json_error",
            Self::ProtocolError(_) => "protocol_error",
        }
    }
}
