//! The validated unit of work submitted by a client.

use serde::Serialize;
use serde_json::Value;

use crate::error::CoreError;

/// Smallest number of agents a run may request.
pub const MIN_AGENTS: u32 = 1;

/// Largest number of agents a run may request.
pub const MAX_AGENTS: u32 = 10;

/// Number of prompt characters echoed in stream `start` events.
const PREVIEW_CHARS: usize = 100;

/// A Task is one prompt to be fanned out to `agent_count` agents.
///
/// Only constructible through validation, so holding a `Task` means the
/// prompt is non-blank and the count is in range. Serializes to the same
/// `{prompt, agent_count}` body the HTTP endpoints accept.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Task {
    prompt: String,
    agent_count: u32,
}

impl Task {
    /// Validate a prompt and agent count.
    pub fn new(prompt: &str, agent_count: i64) -> Result<Self, CoreError> {
        let prompt = prompt.trim();
        if prompt.is_empty() {
            return Err(CoreError::EmptyPrompt);
        }

        if agent_count < i64::from(MIN_AGENTS) || agent_count > i64::from(MAX_AGENTS) {
            return Err(CoreError::AgentCountOutOfRange {
                min: MIN_AGENTS,
                max: MAX_AGENTS,
            });
        }

        Ok(Self {
            prompt: prompt.to_string(),
            agent_count: agent_count as u32,
        })
    }

    /// Validate a raw JSON request body.
    ///
    /// `prompt` defaults to empty and `agent_count` defaults to 1. The count
    /// may be a JSON integer or a string holding one.
    pub fn from_request(body: &Value) -> Result<Self, CoreError> {
        let fields = match body.as_object() {
            Some(fields) if !fields.is_empty() => fields,
            _ => return Err(CoreError::NoData),
        };

        let prompt = match fields.get("prompt") {
            None | Some(Value::Null) => "",
            Some(Value::String(s)) => s.as_str(),
            Some(_) => return Err(CoreError::EmptyPrompt),
        };
        if prompt.trim().is_empty() {
            return Err(CoreError::EmptyPrompt);
        }

        let agent_count = match fields.get("agent_count") {
            None => i64::from(MIN_AGENTS),
            Some(value) => parse_agent_count(value)?,
        };

        Self::new(prompt, agent_count)
    }

    /// The trimmed prompt.
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    /// Number of agents to launch.
    pub fn agent_count(&self) -> u32 {
        self.agent_count
    }

    /// First 100 characters of the prompt, for logs and stream headers.
    pub fn prompt_preview(&self) -> String {
        self.prompt.chars().take(PREVIEW_CHARS).collect()
    }
}

fn parse_agent_count(value: &Value) -> Result<i64, CoreError> {
    match value {
        Value::Number(n) => n.as_i64().ok_or(CoreError::InvalidAgentCount),
        Value::String(s) => s
            .trim()
            .parse::<i64>()
            .map_err(|_| CoreError::InvalidAgentCount),
        _ => Err(CoreError::InvalidAgentCount),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_valid_request() {
        let task = Task::from_request(&json!({"prompt": "  list files ", "agent_count": 2})).unwrap();
        assert_eq!(task.prompt(), "list files");
        assert_eq!(task.agent_count(), 2);
    }

    #[test]
    fn test_agent_count_defaults_to_one() {
        let task = Task::from_request(&json!({"prompt": "hi"})).unwrap();
        assert_eq!(task.agent_count(), 1);
    }

    #[test]
    fn test_agent_count_accepts_numeric_string() {
        let task = Task::from_request(&json!({"prompt": "hi", "agent_count": "4"})).unwrap();
        assert_eq!(task.agent_count(), 4);
    }

    #[test]
    fn test_bounds_are_inclusive() {
        assert!(Task::new("hi", 1).is_ok());
        assert!(Task::new("hi", 10).is_ok());
        assert_eq!(
            Task::new("hi", 0),
            Err(CoreError::AgentCountOutOfRange { min: 1, max: 10 })
        );
        assert_eq!(
            Task::new("hi", 11),
            Err(CoreError::AgentCountOutOfRange { min: 1, max: 10 })
        );
    }

    #[test]
    fn test_out_of_range_message() {
        let err = Task::new("hi", 11).unwrap_err();
        assert_eq!(err.to_string(), "Agent count must be between 1 and 10");
    }

    #[test]
    fn test_non_integer_counts_rejected() {
        for count in [json!(2.5), json!("two"), json!(true), json!(null), json!([3])] {
            let err = Task::from_request(&json!({"prompt": "hi", "agent_count": count})).unwrap_err();
            assert_eq!(err, CoreError::InvalidAgentCount, "count {count} should be rejected");
        }
    }

    #[test]
    fn test_blank_prompt_rejected() {
        assert_eq!(
            Task::from_request(&json!({"prompt": "   ", "agent_count": 2})),
            Err(CoreError::EmptyPrompt)
        );
        assert_eq!(
            Task::from_request(&json!({"agent_count": 2})),
            Err(CoreError::EmptyPrompt)
        );
    }

    #[test]
    fn test_empty_body_rejected() {
        assert_eq!(Task::from_request(&json!({})), Err(CoreError::NoData));
        assert_eq!(Task::from_request(&json!(null)), Err(CoreError::NoData));
        assert_eq!(Task::from_request(&json!("prompt")), Err(CoreError::NoData));
    }

    #[test]
    fn test_prompt_preview_truncates_on_chars() {
        let task = Task::new(&"é".repeat(150), 1).unwrap();
        assert_eq!(task.prompt_preview().chars().count(), 100);
    }

    #[test]
    fn test_serializes_as_request_body() {
        let task = Task::new("hi", 3).unwrap();
        assert_eq!(
            serde_json::to_value(&task).unwrap(),
            json!({"prompt": "hi", "agent_count": 3})
        );
    }
}
