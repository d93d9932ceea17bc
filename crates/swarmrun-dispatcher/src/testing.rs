//! Scripted agent runtime for tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::{json, Value};
use tokio::sync::mpsc;

use swarmrun_claude_sdk::SdkError;
use swarmrun_core::{AgentEvent, AgentId};

use crate::config::Config;
use crate::runtime::AgentRuntime;

/// Config with a credential set.
pub fn config() -> Config {
    Config {
        api_key: Some("sk-test".to_string()),
        ..Config::default()
    }
}

/// What a scripted agent does.
#[derive(Clone)]
pub enum Script {
    /// Send these events, then finish cleanly.
    Events(Vec<AgentEvent>),
    /// Runtime cannot be launched.
    Unavailable,
    /// Emit some text, then fail.
    Crash,
    /// Report success, then fail anyway.
    SucceedThenCrash,
    /// Panic inside the runtime.
    Panic,
    /// Never finish.
    Hang,
    /// Sleep, then run the inner script.
    Delayed(Duration, Box<Script>),
}

impl Script {
    pub fn result(subtype: &str, payload: Value) -> Self {
        Self::Events(vec![AgentEvent::Result {
            subtype: subtype.to_string(),
            payload,
        }])
    }

    pub fn succeed(result: &str) -> Self {
        Self::Events(vec![
            AgentEvent::Text {
                content: "working".to_string(),
            },
            AgentEvent::Result {
                subtype: "success".to_string(),
                payload: json!(result),
            },
        ])
    }

    pub fn texts<const N: usize>(texts: [&str; N]) -> Self {
        Self::Events(
            texts
                .iter()
                .map(|t| AgentEvent::Text {
                    content: t.to_string(),
                })
                .collect(),
        )
    }

    pub fn after(self, delay: Duration) -> Self {
        Self::Delayed(delay, Box::new(self))
    }
}

/// Runtime whose agents follow a per-id script.
pub struct ScriptedRuntime {
    script: Box<dyn Fn(AgentId) -> Script + Send + Sync>,
    launched: Arc<AtomicUsize>,
}

impl ScriptedRuntime {
    pub fn new(script: impl Fn(AgentId) -> Script + Send + Sync + 'static) -> Self {
        Self {
            script: Box::new(script),
            launched: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Counter of agents launched so far.
    pub fn launched(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.launched)
    }
}

#[async_trait]
impl AgentRuntime for ScriptedRuntime {
    async fn run(
        &self,
        agent_id: AgentId,
        _prompt: &str,
        events: mpsc::Sender<AgentEvent>,
    ) -> Result<(), SdkError> {
        self.launched.fetch_add(1, Ordering::SeqCst);

        let mut script = (self.script)(agent_id);
        while let Script::Delayed(delay, inner) = script {
            tokio::time::sleep(delay).await;
            script = *inner;
        }

        match script {
            Script::Events(list) => {
                for event in list {
                    // The collector stops listening after a terminal event.
                    let _ = events.send(event).await;
                }
                Ok(())
            }
            Script::Unavailable => Err(SdkError::ClaudeNotFound("claude".to_string())),
            Script::Crash => {
                let _ = events
                    .send(AgentEvent::Text {
                        content: "partial".to_string(),
                    })
                    .await;
                Err(SdkError::ProcessError("Claude exited with code 1".to_string()))
            }
            Script::SucceedThenCrash => {
                let _ = events
                    .send(AgentEvent::Result {
                        subtype: "success".to_string(),
                        payload: json!("done"),
                    })
                    .await;
                Err(SdkError::ProcessError("Claude exited with code 1".to_string()))
            }
            Script::Panic => panic!("scripted agent {} panicked", agent_id),
            Script::Hang => std::future::pending().await,
            Script::Delayed(..) => unreachable!("delays are unwrapped above"),
        }
    }

    async fn is_available(&self) -> bool {
        true
    }
}
