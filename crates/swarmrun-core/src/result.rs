//! Per-agent and per-run results.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::ids::AgentId;
use crate::status::AgentStatus;
use crate::task::Task;

/// Terminal outcome of one agent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentResult {
    /// 1-based agent index.
    pub agent_id: AgentId,
    /// Terminal status.
    pub status: AgentStatus,
    /// Human readable summary.
    pub message: String,
    /// Open payload, e.g. `{"result": ...}` or `{"error": ...}`.
    pub details: Option<Value>,
}

impl AgentResult {
    /// Create a result with a details payload.
    pub fn new(
        agent_id: AgentId,
        status: AgentStatus,
        message: impl Into<String>,
        details: Value,
    ) -> Self {
        Self {
            agent_id,
            status,
            message: message.into(),
            details: Some(details),
        }
    }

    /// The agent reported success.
    pub fn succeeded(agent_id: AgentId, result: Value) -> Self {
        Self::new(
            agent_id,
            AgentStatus::Success,
            "Task completed successfully",
            json!({ "result": result }),
        )
    }

    /// The agent reported an error.
    pub fn reported_error(agent_id: AgentId, error: Value) -> Self {
        let message = format!("Task failed: {}", value_text(&error));
        Self::new(agent_id, AgentStatus::Error, message, json!({ "error": error }))
    }

    /// The agent finished with a result subtype we don't recognise.
    pub fn unrecognized(agent_id: AgentId, subtype: &str, payload: &Value) -> Self {
        Self::new(
            agent_id,
            AgentStatus::Unknown,
            value_text(payload),
            json!({ "subtype": subtype }),
        )
    }

    /// The agent's event stream ended without a terminal result.
    pub fn without_terminal(agent_id: AgentId, messages: Vec<String>) -> Self {
        Self::new(
            agent_id,
            AgentStatus::Success,
            "Task completed",
            json!({ "messages": messages }),
        )
    }

    /// The agent could not run, or faulted while running.
    pub fn failed(agent_id: AgentId, message: impl Into<String>, error_type: &str) -> Self {
        Self::new(
            agent_id,
            AgentStatus::Error,
            message,
            json!({ "error_type": error_type }),
        )
    }
}

/// Render a payload as text: strings unquoted, everything else as JSON.
fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => "None".to_string(),
        other => other.to_string(),
    }
}

/// Aggregated outcome of one run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunResult {
    /// Always `"completed"`; run-level failures are reported as errors instead.
    pub status: String,
    /// The prompt every agent received.
    pub prompt: String,
    /// Number of agents requested.
    pub agent_count: u32,
    /// Results sorted ascending by `agent_id`.
    pub results: Vec<AgentResult>,
}

impl RunResult {
    /// Build a run result, ordering agents by id.
    pub fn new(task: &Task, mut results: Vec<AgentResult>) -> Self {
        results.sort_by_key(|r| r.agent_id);
        results.dedup_by_key(|r| r.agent_id);
        Self {
            status: "completed".to_string(),
            prompt: task.prompt().to_string(),
            agent_count: task.agent_count(),
            results,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_result_sorts_by_agent_id() {
        let task = Task::new("list files", 3).unwrap();
        let results = vec![
            AgentResult::succeeded(AgentId::new(3), json!("c")),
            AgentResult::succeeded(AgentId::new(1), json!("a")),
            AgentResult::failed(AgentId::new(2), "boom", "runtime_error"),
        ];

        let run = RunResult::new(&task, results);
        let ids: Vec<u32> = run.results.iter().map(|r| r.agent_id.get()).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        assert_eq!(run.status, "completed");
        assert_eq!(run.agent_count, 3);
    }

    #[test]
    fn test_wire_shape() {
        let result = AgentResult::succeeded(AgentId::new(1), json!("done"));
        assert_eq!(
            serde_json::to_value(&result).unwrap(),
            json!({
                "agent_id": 1,
                "status": "success",
                "message": "Task completed successfully",
                "details": {"result": "done"}
            })
        );
    }

    #[test]
    fn test_reported_error_message_uses_payload_text() {
        let result = AgentResult::reported_error(AgentId::new(2), json!("rate limited"));
        assert_eq!(result.status, AgentStatus::Error);
        assert_eq!(result.message, "Task failed: rate limited");
        assert_eq!(result.details, Some(json!({"error": "rate limited"})));
    }

    #[test]
    fn test_unrecognized_keeps_subtype() {
        let result =
            AgentResult::unrecognized(AgentId::new(1), "error_max_turns", &json!("stopped"));
        assert_eq!(result.status, AgentStatus::Unknown);
        assert_eq!(result.message, "stopped");
        assert_eq!(result.details, Some(json!({"subtype": "error_max_turns"})));
    }
}
