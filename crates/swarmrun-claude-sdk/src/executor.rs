//! Claude Code executor for running agents via subprocess.
//!
//! This module provides the main `ClaudeExecutor` type for executing
//! Claude Code agents using one-shot mode with streaming JSON output.

use std::io::ErrorKind;
use std::path::Path;
use std::process::Stdio;

use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::process::Command;
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

use crate::error::SdkError;
use crate::types::{ClaudeMessage, McpConfig, McpServerConfig, PermissionMode};

/// Result of a Claude Code execution.
#[derive(Debug, Clone)]
pub struct ExecutionResult {
    /// The session ID reported by Claude Code, if any message carried one.
    pub session_id: Option<String>,

    /// Number of messages parsed from stdout.
    pub message_count: u64,
}

/// Executor for Claude Code agents.
///
/// Each call to [`execute`](Self::execute) spawns a fresh `claude --print`
/// process. The child is killed if the returned future is dropped.
#[derive(Debug, Clone)]
pub struct ClaudeExecutor {
    /// Path to the Claude CLI executable.
    claude_path: String,

    /// Permission mode to use.
    permission_mode: PermissionMode,

    /// Model to use (optional).
    model: Option<String>,

    /// MCP servers made available to the agent.
    mcp_config: McpConfig,

    /// Tool patterns the agent may use without asking.
    allowed_tools: Vec<String>,

    /// Additional environment variables.
    env_vars: Vec<(String, String)>,
}

impl ClaudeExecutor {
    /// Create a new executor with the given path to the Claude CLI.
    ///
    /// The path can be just "claude" to use PATH lookup, or a full path.
    pub fn new(claude_path: impl Into<String>) -> Self {
        Self {
            claude_path: claude_path.into(),
            permission_mode: PermissionMode::Default,
            model: None,
            mcp_config: McpConfig::default(),
            allowed_tools: Vec::new(),
            env_vars: Vec::new(),
        }
    }

    /// Set the permission mode.
    pub fn with_permission_mode(mut self, mode: PermissionMode) -> Self {
        self.permission_mode = mode;
        self
    }

    /// Set the model to use.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Register an MCP server under `name`.
    pub fn with_mcp_server(mut self, name: impl Into<String>, server: McpServerConfig) -> Self {
        self.mcp_config.mcp_servers.insert(name.into(), server);
        self
    }

    /// Allow a tool (or `mcp__server__*` pattern) without prompting.
    pub fn with_allowed_tool(mut self, pattern: impl Into<String>) -> Self {
        self.allowed_tools.push(pattern.into());
        self
    }

    /// Add an environment variable.
    pub fn with_env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env_vars.push((key.into(), value.into()));
        self
    }

    /// Check that the CLI can be launched, returning its version string.
    pub async fn check_available(&self) -> Result<String, SdkError> {
        let output = Command::new(&self.claude_path)
            .arg("--version")
            .stdin(Stdio::null())
            .output()
            .await
            .map_err(|e| self.spawn_error(e))?;

        if !output.status.success() {
            return Err(SdkError::ProcessError(format!(
                "'{} --version' exited with code {}",
                self.claude_path,
                output.status.code().unwrap_or(-1)
            )));
        }

        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }

    /// Execute a prompt with Claude Code.
    ///
    /// Every parsed stdout message is sent on `messages`. If the receiver is
    /// dropped the process keeps running to completion, but nothing more is
    /// sent.
    pub async fn execute(
        &self,
        working_dir: &Path,
        prompt: &str,
        messages: mpsc::Sender<ClaudeMessage>,
    ) -> Result<ExecutionResult, SdkError> {
        info!(
            claude_path = %self.claude_path,
            working_dir = %working_dir.display(),
            prompt_len = prompt.len(),
            mcp_servers = self.mcp_config.mcp_servers.len(),
            "Preparing Claude execution"
        );

        let mut cmd = Command::new(&self.claude_path);
        cmd.args(self.build_args(prompt)?);

        // No stdin needed for one-shot mode
        cmd.stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .current_dir(working_dir)
            .kill_on_drop(true);

        for (key, value) in &self.env_vars {
            cmd.env(key, value);
        }

        // Arguments carry the MCP server env (including credentials); never log them.
        let mut child = cmd.spawn().map_err(|e| {
            error!(error = %e, "Failed to spawn Claude process");
            self.spawn_error(e)
        })?;

        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| SdkError::ProtocolError("Failed to get stdout".to_string()))?;
        let stderr = child
            .stderr
            .take()
            .ok_or_else(|| SdkError::ProtocolError("Failed to get stderr".to_string()))?;

        // Spawn stderr reader for logging
        tokio::spawn(async move {
            let mut reader = BufReader::new(stderr);
            let mut line = String::new();
            loop {
                line.clear();
                match reader.read_line(&mut line).await {
                    Ok(0) => break, // EOF
                    Ok(_) => {
                        let trimmed = line.trim();
                        if !trimmed.is_empty() {
                            warn!(stderr = %trimmed, "Claude stderr");
                        }
                    }
                    Err(e) => {
                        error!(error = %e, "Error reading Claude stderr");
                        break;
                    }
                }
            }
        });

        let mut reader = BufReader::new(stdout);
        let mut line = String::new();
        let mut message_count = 0u64;
        let mut session_id: Option<String> = None;
        let mut receiver_open = true;

        loop {
            line.clear();
            let bytes = reader.read_line(&mut line).await?;
            if bytes == 0 {
                debug!(total_messages = message_count, "Claude stdout closed (EOF)");
                break;
            }

            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }

            match serde_json::from_str::<ClaudeMessage>(trimmed) {
                Ok(message) => {
                    message_count += 1;
                    debug!(message_num = message_count, message_type = message.kind(), "Parsed Claude message");

                    if session_id.is_none() {
                        session_id = message.session_id().map(str::to_string);
                    }

                    if receiver_open && messages.send(message).await.is_err() {
                        debug!("Message receiver dropped; draining remaining output");
                        receiver_open = false;
                    }
                }
                Err(e) => {
                    let preview: String = trimmed.chars().take(200).collect();
                    warn!(error = %e, preview = %preview, "Failed to parse Claude message");
                }
            }
        }

        let status = child.wait().await?;
        let exit_code = status.code().unwrap_or(-1);
        info!(exit_code = exit_code, success = status.success(), messages = message_count, "Claude process exited");

        if !status.success() {
            return Err(SdkError::ProcessError(format!(
                "Claude exited with code {}",
                exit_code
            )));
        }

        Ok(ExecutionResult {
            session_id,
            message_count,
        })
    }

    /// Command-line arguments for a one-shot run of `prompt`.
    fn build_args(&self, prompt: &str) -> Result<Vec<String>, SdkError> {
        // stream-json output requires --verbose in --print mode
        let mut args = vec![
            "--output-format=stream-json".to_string(),
            "--verbose".to_string(),
            "--permission-mode".to_string(),
            self.permission_mode.to_string(),
        ];

        if let Some(model) = &self.model {
            args.push("--model".to_string());
            args.push(model.clone());
        }

        if !self.mcp_config.is_empty() {
            args.push("--mcp-config".to_string());
            args.push(serde_json::to_string(&self.mcp_config)?);
        }

        if !self.allowed_tools.is_empty() {
            args.push("--allowedTools".to_string());
            args.push(self.allowed_tools.join(","));
        }

        // The prompt is caller-supplied; `--` keeps a leading dash from
        // being parsed as an option.
        args.push("--print".to_string());
        args.push("--".to_string());
        args.push(prompt.to_string());
        Ok(args)
    }

    fn spawn_error(&self, e: std::io::Error) -> SdkError {
        if e.kind() == ErrorKind::NotFound {
            SdkError::ClaudeNotFound(self.claude_path.clone())
        } else {
            SdkError::SpawnError(e)
        }
    }
}

impl Default for ClaudeExecutor {
    fn default() -> Self {
        Self::new("claude")
    }
}
