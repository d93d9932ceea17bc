//! Agent runtimes.
//!
//! The dispatcher only sees the [`AgentRuntime`] trait. [`ClaudeRuntime`]
//! implements it by running the Claude Code CLI with a docker-backed MCP
//! tool server.

use std::path::Path;

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::mpsc;
use tracing::{debug, warn};

use swarmrun_claude_sdk::{ClaudeExecutor, ClaudeMessage, McpServerConfig, SdkError};
use swarmrun_core::{AgentEvent, AgentId};

use crate::config::Config;

/// Name the tool server is registered under.
pub const MCP_SERVER_NAME: &str = "claude-code-docker";

/// Buffer between the CLI reader and the event consumer.
const EVENT_BUFFER: usize = 64;

/// Something that can run one agent against a prompt.
#[async_trait]
pub trait AgentRuntime: Send + Sync {
    /// Run agent `agent_id` on `prompt`, sending progress on `events`.
    ///
    /// Returns once the agent has finished. An error returned before any
    /// terminal event was sent means the agent failed.
    async fn run(
        &self,
        agent_id: AgentId,
        prompt: &str,
        events: mpsc::Sender<AgentEvent>,
    ) -> Result<(), SdkError>;

    /// Whether the runtime can currently launch agents.
    async fn is_available(&self) -> bool;
}

/// Runs agents through the Claude Code CLI.
pub struct ClaudeRuntime {
    executor: ClaudeExecutor,
}

impl ClaudeRuntime {
    /// Build the runtime from configuration.
    ///
    /// Every agent gets the same tool server: a throwaway container with the
    /// workspace mounted, reached over stdio.
    pub fn from_config(config: &Config) -> Self {
        let mount = format!("{}:/workspace", config.workspace_path.display());
        let mut server = McpServerConfig::stdio(
            "docker",
            [
                "run",
                "-i",
                "--rm",
                "-v",
                mount.as_str(),
                config.mcp_image.as_str(),
                "claude",
                "mcp",
                "serve",
            ],
        );

        let mut executor = ClaudeExecutor::new(config.claude_path.as_str())
            .with_allowed_tool(format!("mcp__{}__*", MCP_SERVER_NAME));

        if let Some(key) = &config.api_key {
            server = server.with_env("ANTHROPIC_API_KEY", key.as_str());
            executor = executor.with_env("ANTHROPIC_API_KEY", key.as_str());
        }
        if let Some(model) = &config.model {
            executor = executor.with_model(model.as_str());
        }

        Self {
            executor: executor.with_mcp_server(MCP_SERVER_NAME, server),
        }
    }
}

#[async_trait]
impl AgentRuntime for ClaudeRuntime {
    async fn run(
        &self,
        agent_id: AgentId,
        prompt: &str,
        events: mpsc::Sender<AgentEvent>,
    ) -> Result<(), SdkError> {
        let executor = self
            .executor
            .clone()
            .with_env("SWARMRUN_AGENT_ID", agent_id.to_string());

        let (tx, mut rx) = mpsc::channel::<ClaudeMessage>(EVENT_BUFFER);

        let forward = async move {
            while let Some(message) = rx.recv().await {
                debug!(agent_id = %agent_id, message_type = message.kind(), "Agent message");
                for event in agent_events(message) {
                    if events.send(event).await.is_err() {
                        // Consumer saw a terminal event and stopped listening.
                        return;
                    }
                }
            }
        };

        let (result, ()) = tokio::join!(executor.execute(Path::new("."), prompt, tx), forward);
        let execution = result?;
        debug!(agent_id = %agent_id, session_id = ?execution.session_id, messages = execution.message_count, "Agent execution finished");
        Ok(())
    }

    async fn is_available(&self) -> bool {
        match self.executor.check_available().await {
            Ok(version) => {
                debug!(version = %version, "Claude CLI available");
                true
            }
            Err(e) => {
                warn!(error = %e, "Claude CLI unavailable");
                false
            }
        }
    }
}

/// Translate one CLI message into runtime events.
fn agent_events(message: ClaudeMessage) -> Vec<AgentEvent> {
    match message {
        ClaudeMessage::Result {
            subtype,
            is_error,
            result,
            error,
            ..
        } => {
            let subtype = subtype.unwrap_or_else(|| {
                if is_error.unwrap_or(false) {
                    "error".to_string()
                } else {
                    "success".to_string()
                }
            });
            let payload = result.or_else(|| error.map(Value::String)).unwrap_or(Value::Null);
            vec![AgentEvent::Result { subtype, payload }]
        }
        ref assistant @ ClaudeMessage::Assistant { .. } => assistant
            .text_blocks()
            .into_iter()
            .map(|text| AgentEvent::Text {
                content: text.to_string(),
            })
            .collect(),
        _ => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(line: &str) -> ClaudeMessage {
        serde_json::from_str(line).unwrap()
    }

    #[test]
    fn test_result_message_is_terminal_event() {
        let events = agent_events(parse(
            r#"{"type":"result","subtype":"success","is_error":false,"result":"done"}"#,
        ));
        assert_eq!(
            events,
            vec![AgentEvent::Result {
                subtype: "success".into(),
                payload: json!("done")
            }]
        );
    }

    #[test]
    fn test_result_without_subtype_uses_error_flag() {
        let events = agent_events(parse(r#"{"type":"result","isError":true,"error":"quota"}"#));
        assert_eq!(
            events,
            vec![AgentEvent::Result {
                subtype: "error".into(),
                payload: json!("quota")
            }]
        );
    }

    #[test]
    fn test_assistant_text_becomes_text_events() {
        let events = agent_events(parse(
            r#"{"type":"assistant","message":{"role":"assistant","content":[{"type":"text","text":"a"},{"type":"text","text":"b"}]}}"#,
        ));
        assert_eq!(
            events,
            vec![
                AgentEvent::Text { content: "a".into() },
                AgentEvent::Text { content: "b".into() }
            ]
        );
    }

    #[test]
    fn test_system_messages_are_ignored() {
        assert!(agent_events(parse(r#"{"type":"system","subtype":"init"}"#)).is_empty());
    }

    #[tokio::test]
    async fn test_missing_cli_reports_unavailable() {
        let config = Config {
            claude_path: "/nonexistent/swarmrun-claude-binary".to_string(),
            api_key: Some("sk-test".to_string()),
            ..Config::default()
        };
        let runtime = ClaudeRuntime::from_config(&config);
        assert!(!runtime.is_available().await);

        let (tx, _rx) = mpsc::channel(1);
        let err = runtime.run(AgentId::new(1), "hi", tx).await.unwrap_err();
        assert!(err.is_unavailable());
    }
}
