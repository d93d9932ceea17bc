//! Claude Code SDK for SwarmRun
//!
//! This crate runs Claude Code agents as one-shot subprocesses and streams
//! their `stream-json` output back as typed [`ClaudeMessage`]s.
//!
//! # Example
//!
//! ```rust,no_run
//! use std::path::Path;
//! use swarmrun_claude_sdk::{ClaudeExecutor, McpServerConfig, PermissionMode};
//! use tokio::sync::mpsc;
//!
//! async fn run_agent() -> Result<(), Box<dyn std::error::Error>> {
//!     let executor = ClaudeExecutor::new("claude")
//!         .with_permission_mode(PermissionMode::BypassPermissions)
//!         .with_mcp_server("tools", McpServerConfig::stdio("docker", ["run", "-i", "tools"]))
//!         .with_allowed_tool("mcp__tools__*");
//!
//!     let (tx, mut rx) = mpsc::channel(64);
//!     tokio::spawn(async move {
//!         while let Some(message) = rx.recv().await {
//!             println!("{:?}", message);
//!         }
//!     });
//!
//!     let result = executor.execute(Path::new("."), "What is 2 + 2?", tx).await?;
//!     println!("Session ID: {:?}", result.session_id);
//!     Ok(())
//! }
//! ```

mod error;
mod executor;
mod types;

// Re-export main types
pub use error::SdkError;
pub use executor::{ClaudeExecutor, ExecutionResult};
pub use types::{
    AssistantMessage, ClaudeMessage, ContentItem, McpConfig, McpServerConfig, PermissionMode,
    UserMessage,
};
