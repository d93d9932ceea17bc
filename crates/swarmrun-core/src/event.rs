//! Agent runtime events and run stream events.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::result::AgentResult;
use crate::task::Task;

/// A progress event emitted by an agent runtime.
#[derive(Debug, Clone, PartialEq)]
pub enum AgentEvent {
    /// Terminal event. Nothing after it is considered.
    Result {
        /// Completion kind reported by the runtime (`success`, `error`, ...).
        subtype: String,
        /// Final output or error payload.
        payload: Value,
    },
    /// Intermediate text output.
    Text { content: String },
}

/// A record in a streaming run, serialized one per line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RunEvent {
    /// First event of every successful stream.
    Start {
        agent_count: u32,
        /// Prompt preview, truncated.
        prompt: String,
    },
    /// One agent finished.
    AgentResult { data: AgentResult },
    /// Last event of every successful stream.
    Complete {
        /// Agents requested, not agents reported.
        total_agents: u32,
    },
    /// Run-level fault; ends the stream.
    Error { error: String },
}

impl RunEvent {
    /// Create the start event for a task.
    pub fn start(task: &Task) -> Self {
        Self::Start {
            agent_count: task.agent_count(),
            prompt: task.prompt_preview(),
        }
    }

    /// Create the completion event for a task.
    pub fn complete(task: &Task) -> Self {
        Self::Complete {
            total_agents: task.agent_count(),
        }
    }

    /// Create an error event.
    pub fn error(error: impl Into<String>) -> Self {
        Self::Error {
            error: error.into(),
        }
    }

    /// Serialize as a single NDJSON line, including the trailing newline.
    pub fn to_line(&self) -> String {
        let mut line = serde_json::to_string(self).unwrap_or_else(|e| {
            format!(r#"{{"type":"error","error":"failed to serialize event: {}"}}"#, e)
        });
        line.push('\n');
        line
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::AgentId;
    use serde_json::json;

    #[test]
    fn test_start_event_shape() {
        let task = Task::new("list files", 2).unwrap();
        let line = RunEvent::start(&task).to_line();

        assert!(line.ends_with('\n'));
        let value: Value = serde_json::from_str(line.trim_end()).unwrap();
        assert_eq!(value, json!({"type": "start", "agent_count": 2, "prompt": "list files"}));
    }

    #[test]
    fn test_agent_result_event_shape() {
        let event = RunEvent::AgentResult {
            data: AgentResult::succeeded(AgentId::new(1), json!("ok")),
        };
        let value = serde_json::to_value(&event).unwrap();
        assert_eq!(value["type"], "agent_result");
        assert_eq!(value["data"]["agent_id"], 1);
    }

    #[test]
    fn test_complete_and_error_shapes() {
        let task = Task::new("hi", 5).unwrap();
        assert_eq!(
            serde_json::to_value(RunEvent::complete(&task)).unwrap(),
            json!({"type": "complete", "total_agents": 5})
        );
        assert_eq!(
            serde_json::to_value(RunEvent::error("boom")).unwrap(),
            json!({"type": "error", "error": "boom"})
        );
    }
}
