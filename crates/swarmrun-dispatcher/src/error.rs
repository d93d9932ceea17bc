//! Run-level dispatch errors.
//!
//! Failures of individual agents are never errors here; they become
//! `AgentResult`s with `status = error`.

use thiserror::Error;

/// Errors that fail a whole run.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DispatchError {
    /// No API credential configured; nothing was launched.
    #[error("ANTHROPIC_API_KEY not configured")]
    ConfigurationMissing,

    /// The orchestration layer itself failed.
    #[error("Orchestration failed: {0}")]
    RunFailure(String),
}
