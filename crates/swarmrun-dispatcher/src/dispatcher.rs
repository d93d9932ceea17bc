//! Fan-out / fan-in of agents for a single task.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::{JoinError, JoinHandle};
use tokio::time::Instant;
use tokio_stream::wrappers::ReceiverStream;
use tracing::{error, info, warn};

use swarmrun_core::{AgentEvent, AgentId, AgentResult, AgentStatus, RunEvent, RunId, RunResult, Task};

use crate::config::Config;
use crate::error::DispatchError;
use crate::runtime::AgentRuntime;

/// Buffer between an agent runtime and its collector.
const AGENT_EVENT_BUFFER: usize = 64;

/// Buffer between the stream producer and the HTTP body.
const STREAM_BUFFER: usize = 16;

/// Launches agents and aggregates their results.
#[derive(Clone)]
pub struct Dispatcher {
    runtime: Arc<dyn AgentRuntime>,
    api_key_configured: bool,
    agent_timeout: Duration,
    stream_timeout: Duration,
}

impl Dispatcher {
    /// Create a dispatcher over `runtime`.
    pub fn new(runtime: Arc<dyn AgentRuntime>, config: &Config) -> Self {
        Self {
            runtime,
            api_key_configured: config.api_key_configured(),
            agent_timeout: config.agent_timeout,
            stream_timeout: config.stream_timeout,
        }
    }

    /// Whether an API credential is configured.
    pub fn api_key_configured(&self) -> bool {
        self.api_key_configured
    }

    /// Whether the agent runtime can launch agents right now.
    pub async fn runtime_available(&self) -> bool {
        self.runtime.is_available().await
    }

    /// Run every agent to completion and return results ordered by agent id.
    pub async fn run(&self, task: &Task) -> Result<RunResult, DispatchError> {
        self.ensure_configured()?;

        let run_id = RunId::generate();
        info!(
            run_id = %run_id,
            agent_count = task.agent_count(),
            prompt = %task.prompt_preview(),
            "Orchestrating agents"
        );

        let handles = self.spawn_agents(&run_id, task);
        let mut results = Vec::with_capacity(handles.len());
        for (agent_id, handle) in handles {
            results.push(settle(agent_id, handle.await)?);
        }

        let run = RunResult::new(task, results);
        let succeeded = run
            .results
            .iter()
            .filter(|r| r.status == AgentStatus::Success)
            .count();
        info!(run_id = %run_id, succeeded, total = run.results.len(), "Run completed");
        Ok(run)
    }

    /// Run every agent, yielding results as they arrive.
    ///
    /// The stream is `start`, then one `agent_result` per agent that finishes
    /// before the stream timeout (in arrival order), then `complete`. A
    /// missing credential or run-level fault yields a single `error` instead.
    /// Agents still running at the timeout are left to finish unobserved.
    pub fn run_stream(&self, task: Task) -> ReceiverStream<RunEvent> {
        let (tx, rx) = mpsc::channel(STREAM_BUFFER);
        let dispatcher = self.clone();
        tokio::spawn(async move { dispatcher.produce_stream(task, tx).await });
        ReceiverStream::new(rx)
    }

    async fn produce_stream(self, task: Task, out: mpsc::Sender<RunEvent>) {
        if let Err(e) = self.ensure_configured() {
            warn!(error = %e, "Rejecting streaming run");
            let _ = out.send(RunEvent::error(e.to_string())).await;
            return;
        }

        let run_id = RunId::generate();
        info!(
            run_id = %run_id,
            agent_count = task.agent_count(),
            prompt = %task.prompt_preview(),
            "Orchestrating agents (streaming)"
        );

        if out.send(RunEvent::start(&task)).await.is_err() {
            return;
        }

        let deadline = Instant::now() + self.stream_timeout;
        let (result_tx, mut result_rx) = mpsc::unbounded_channel();
        for (agent_id, handle) in self.spawn_agents(&run_id, &task) {
            let result_tx = result_tx.clone();
            tokio::spawn(async move {
                let _ = result_tx.send(settle(agent_id, handle.await));
            });
        }
        // The channel closes once every agent has reported.
        drop(result_tx);

        let expected = task.agent_count() as usize;
        let mut emitted = 0;
        while emitted < expected {
            match tokio::time::timeout_at(deadline, result_rx.recv()).await {
                Ok(Some(settled)) => {
                    if !emit(&run_id, &out, settled).await {
                        return;
                    }
                    emitted += 1;
                }
                Ok(None) => break,
                Err(_) => {
                    warn!(
                        run_id = %run_id,
                        missing = expected - emitted,
                        timeout_secs = self.stream_timeout.as_secs(),
                        "Stream timeout elapsed; remaining agents dropped from stream"
                    );
                    break;
                }
            }
        }

        while let Ok(settled) = result_rx.try_recv() {
            if !emit(&run_id, &out, settled).await {
                return;
            }
        }

        info!(run_id = %run_id, "Streaming run completed");
        let _ = out.send(RunEvent::complete(&task)).await;
    }

    fn ensure_configured(&self) -> Result<(), DispatchError> {
        if self.api_key_configured {
            Ok(())
        } else {
            Err(DispatchError::ConfigurationMissing)
        }
    }

    fn spawn_agents(&self, run_id: &RunId, task: &Task) -> Vec<(AgentId, JoinHandle<AgentResult>)> {
        AgentId::range(task.agent_count())
            .map(|agent_id| {
                let handle = tokio::spawn(run_agent(
                    Arc::clone(&self.runtime),
                    run_id.clone(),
                    agent_id,
                    task.prompt().to_string(),
                    self.agent_timeout,
                ));
                (agent_id, handle)
            })
            .collect()
    }
}

/// Send one settled agent outcome downstream. Returns false if the stream
/// should end.
async fn emit(
    run_id: &RunId,
    out: &mpsc::Sender<RunEvent>,
    settled: Result<AgentResult, DispatchError>,
) -> bool {
    match settled {
        Ok(result) => out.send(RunEvent::AgentResult { data: result }).await.is_ok(),
        Err(e) => {
            error!(run_id = %run_id, error = %e, "Streaming run failed");
            let _ = out.send(RunEvent::error(e.to_string())).await;
            false
        }
    }
}

/// Turn a joined agent task into its result.
///
/// A panicking agent is that agent's failure; a cancelled one means the
/// runtime is shutting down, which fails the run.
fn settle(
    agent_id: AgentId,
    joined: Result<AgentResult, JoinError>,
) -> Result<AgentResult, DispatchError> {
    match joined {
        Ok(result) => Ok(result),
        Err(e) if e.is_panic() => {
            error!(agent_id = %agent_id, "Agent task panicked");
            Ok(AgentResult::failed(
                agent_id,
                "Unexpected error: agent task panicked",
                "panic",
            ))
        }
        Err(_) => Err(DispatchError::RunFailure(format!(
            "agent {} task was cancelled",
            agent_id
        ))),
    }
}

/// Run one agent and reduce its events to a single result.
async fn run_agent(
    runtime: Arc<dyn AgentRuntime>,
    run_id: RunId,
    agent_id: AgentId,
    prompt: String,
    timeout: Duration,
) -> AgentResult {
    info!(run_id = %run_id, agent_id = %agent_id, "Agent starting");

    let result = match tokio::time::timeout(timeout, drive_agent(runtime.as_ref(), agent_id, &prompt)).await {
        Ok(result) => result,
        Err(_) => {
            warn!(run_id = %run_id, agent_id = %agent_id, timeout_secs = timeout.as_secs(), "Agent timed out");
            AgentResult::failed(
                agent_id,
                format!("Agent timed out after {}s", timeout.as_secs()),
                "timeout",
            )
        }
    };

    match result.status {
        AgentStatus::Error => warn!(run_id = %run_id, agent_id = %agent_id, message = %result.message, "Agent failed"),
        status => info!(run_id = %run_id, agent_id = %agent_id, status = %status, "Agent finished"),
    }
    result
}

/// Drive the runtime until a terminal event, or until it finishes without one.
async fn drive_agent(runtime: &dyn AgentRuntime, agent_id: AgentId, prompt: &str) -> AgentResult {
    let (tx, mut rx) = mpsc::channel(AGENT_EVENT_BUFFER);
    let mut execution = runtime.run(agent_id, prompt, tx);
    let mut outcome = None;
    let mut texts = Vec::new();

    loop {
        tokio::select! {
            event = rx.recv() => match event {
                Some(AgentEvent::Result { subtype, payload }) => {
                    return match subtype.as_str() {
                        "success" => AgentResult::succeeded(agent_id, payload),
                        "error" => AgentResult::reported_error(agent_id, payload),
                        other => AgentResult::unrecognized(agent_id, other, &payload),
                    };
                }
                Some(AgentEvent::Text { content }) => texts.push(content),
                None => break,
            },
            finished = &mut execution, if outcome.is_none() => outcome = Some(finished),
        }
    }

    let outcome = match outcome {
        Some(outcome) => outcome,
        None => execution.await,
    };

    match outcome {
        Ok(()) => AgentResult::without_terminal(agent_id, texts),
        Err(e) if e.is_unavailable() => AgentResult::failed(
            agent_id,
            format!("Agent runtime not available: {}", e),
            e.kind(),
        ),
        Err(e) => AgentResult::failed(agent_id, format!("Unexpected error: {}", e), e.kind()),
    }
}
