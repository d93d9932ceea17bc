//! SwarmRun Core Domain Types
//!
//! This crate contains pure domain types with no dependencies on:
//! - Network/HTTP
//! - Process spawning
//! - Runtime specifics
//!
//! Both the dispatcher and the relay validate requests with the same
//! [`Task::from_request`] so the two tiers can never disagree on what a
//! valid submission is.

pub mod error;
pub mod event;
pub mod ids;
pub mod result;
pub mod status;
pub mod task;

// Re-export commonly used types
pub use error::CoreError;
pub use event::{AgentEvent, RunEvent};
pub use ids::{AgentId, RunId};
pub use result::{AgentResult, RunResult};
pub use status::AgentStatus;
pub use task::{Task, MAX_AGENTS, MIN_AGENTS};
