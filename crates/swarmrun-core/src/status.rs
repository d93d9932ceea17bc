//! Terminal status of a single agent.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Terminal status of an agent within a run.
///
/// There is no "running" status: results only exist once an agent is done.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgentStatus {
    /// Agent reported success, or finished without a terminal event.
    Success,
    /// Agent reported an error, or failed to run at all.
    Error,
    /// Agent finished with a result subtype we do not recognise.
    Unknown,
}

impl AgentStatus {
    /// Wire name of the status.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Error => "error",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for AgentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
