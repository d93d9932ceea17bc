//! HTTP client for the dispatcher.

use std::time::Duration;

use axum::http::StatusCode;
use futures_util::StreamExt;
use serde_json::Value;
use tokio::sync::mpsc;
use tokio_stream::wrappers::ReceiverStream;
use tracing::{debug, info, warn};

use swarmrun_core::{RunEvent, Task};

use crate::config::Config;
use crate::error::RelayError;
use crate::lines::LineDecoder;

/// Buffer between the backend reader and the SSE body.
const STREAM_BUFFER: usize = 16;

/// HTTP client for the dispatcher's REST API.
#[derive(Clone)]
pub struct BackendClient {
    inner: reqwest::Client,
    base_url: String,
    request_timeout: Duration,
    probe_timeout: Duration,
}

impl BackendClient {
    /// Create a new client from configuration.
    ///
    /// Timeouts are set per request: a streamed forward may legitimately
    /// outlive `request_timeout` as long as the dispatcher keeps talking.
    pub fn new(config: &Config) -> Result<Self, RelayError> {
        let inner = reqwest::Client::builder()
            .build()
            .map_err(|e| RelayError::Unexpected(e.to_string()))?;

        Ok(Self {
            inner,
            base_url: config.backend_url.trim_end_matches('/').to_string(),
            request_timeout: config.request_timeout,
            probe_timeout: config.probe_timeout,
        })
    }

    /// Check if the dispatcher is healthy.
    pub async fn health(&self) -> bool {
        let url = format!("{}/health", self.base_url);
        debug!(url = %url, "Checking backend health");

        match self.inner.get(&url).timeout(self.probe_timeout).send().await {
            Ok(response) => response.status() == reqwest::StatusCode::OK,
            Err(e) => {
                debug!(error = %e, "Backend health check failed");
                false
            }
        }
    }

    /// Forward a task and return the dispatcher's status and JSON body.
    ///
    /// Error statuses from the dispatcher are passed through, not mapped.
    pub async fn forward(&self, task: &Task) -> Result<(StatusCode, Value), RelayError> {
        let url = format!("{}/api/orchestrate", self.base_url);
        info!(url = %url, agent_count = task.agent_count(), "Forwarding submission");

        let response = self
            .inner
            .post(&url)
            .timeout(self.request_timeout)
            .json(task)
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, "Backend request failed");
                RelayError::from(e)
            })?;

        let status = response.status();
        let body = response.json::<Value>().await?;

        info!(status = %status, "Backend responded");
        Ok((status, body))
    }

    /// Forward a task to the streaming endpoint, yielding each response line.
    ///
    /// Never fails outright: connection errors, timeouts, and mid-stream
    /// faults are reported as one final `error` event line.
    ///
    /// `request_timeout` bounds the wait for the response headers and for
    /// each subsequent chunk, not the stream as a whole.
    pub fn forward_stream(&self, task: &Task) -> ReceiverStream<String> {
        let url = format!("{}/api/orchestrate/stream", self.base_url);
        info!(url = %url, agent_count = task.agent_count(), "Forwarding streaming submission");

        let request = self.inner.post(url).json(task);
        let read_timeout = self.request_timeout;
        let (tx, rx) = mpsc::channel(STREAM_BUFFER);

        tokio::spawn(async move {
            if let Err(e) = relay_lines(request, read_timeout, &tx).await {
                warn!(error = %e, "Backend stream failed");
                let line = RunEvent::error(e.to_string()).to_line();
                let _ = tx.send(line.trim_end().to_string()).await;
            }
        });

        ReceiverStream::new(rx)
    }
}

/// Send every non-empty line of the response body on `tx`.
async fn relay_lines(
    request: reqwest::RequestBuilder,
    read_timeout: Duration,
    tx: &mpsc::Sender<String>,
) -> Result<(), RelayError> {
    let response = tokio::time::timeout(read_timeout, request.send())
        .await
        .map_err(|_| RelayError::Timeout)??;
    debug!(status = %response.status(), "Backend stream opened");

    let mut decoder = LineDecoder::default();
    let mut chunks = response.bytes_stream();
    loop {
        let chunk = match tokio::time::timeout(read_timeout, chunks.next()).await {
            Ok(Some(chunk)) => chunk?,
            Ok(None) => break,
            Err(_) => return Err(RelayError::Timeout),
        };
        for line in decoder.push(&chunk) {
            if tx.send(line).await.is_err() {
                debug!("Client went away; stopping relay");
                return Ok(());
            }
        }
    }

    if let Some(line) = decoder.finish() {
        let _ = tx.send(line).await;
    }
    Ok(())
}
