//! Core domain errors.

use thiserror::Error;

/// Core domain errors for SwarmRun.
///
/// The display strings are returned to HTTP callers verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// Request body was missing or not a JSON object.
    #[error("No data provided")]
    NoData,

    /// Prompt was missing or blank.
    #[error("Prompt is required")]
    EmptyPrompt,

    /// Agent count was not an integer.
    #[error("Invalid agent count")]
    InvalidAgentCount,

    /// Agent count was an integer outside the allowed range.
    #[error("Agent count must be between {min} and {max}")]
    AgentCountOutOfRange { min: u32, max: u32 },
}
