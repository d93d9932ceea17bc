//! Newtype wrappers for identifiers to ensure type safety.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Unique identifier for a Run, used to correlate log lines.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RunId(String);

impl RunId {
    /// Generate a new random RunId.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Get the inner string reference.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RunId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 1-based index of an agent within a single run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AgentId(u32);

impl AgentId {
    /// Create an AgentId from its 1-based index.
    pub fn new(index: u32) -> Self {
        Self(index)
    }

    /// Ids for a run of `count` agents: `1..=count`.
    pub fn range(count: u32) -> impl Iterator<Item = AgentId> {
        (1..=count).map(Self)
    }

    /// Get the numeric index.
    pub fn get(self) -> u32 {
        self.0
    }
}

impl fmt::Display for AgentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_id_generate() {
        let id1 = RunId::generate();
        let id2 = RunId::generate();
        assert_ne!(id1, id2);
    }

    #[test]
    fn test_agent_id_range_is_one_based() {
        let ids: Vec<u32> = AgentId::range(3).map(AgentId::get).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn test_agent_id_serializes_as_number() {
        let json = serde_json::to_string(&AgentId::new(7)).unwrap();
        assert_eq!(json, "7");
    }
}
