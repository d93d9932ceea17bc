//! Dispatcher configuration.

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

/// Command-line arguments, each with an environment fallback.
#[derive(Parser)]
#[command(name = "swarmrun-dispatcher")]
#[command(about = "Fan a prompt out to multiple Claude Code agents", long_about = None)]
pub struct Args {
    /// Address to bind the HTTP server to
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Port to bind the HTTP server to
    #[arg(short, long, env = "PORT", default_value_t = 8080)]
    pub port: u16,

    /// Anthropic API key handed to every agent
    #[arg(long, env = "ANTHROPIC_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Host directory mounted into the tool container at /workspace
    #[arg(long, env = "WORKSPACE_PATH", default_value = "/workspace")]
    pub workspace_path: PathBuf,

    /// Image providing the `claude mcp serve` tool server
    #[arg(long, env = "CLAUDE_MCP_IMAGE", default_value = "claude-mcp")]
    pub mcp_image: String,

    /// Claude Code CLI executable
    #[arg(long, env = "CLAUDE_PATH", default_value = "claude")]
    pub claude_path: String,

    /// Model override for agents
    #[arg(long, env = "CLAUDE_MODEL")]
    pub model: Option<String>,

    /// Seconds before a single agent is abandoned
    #[arg(long, env = "AGENT_TIMEOUT_SECS", default_value_t = 600)]
    pub agent_timeout_secs: u64,

    /// Seconds a streaming run waits for agents before completing
    #[arg(long, env = "STREAM_TIMEOUT_SECS", default_value_t = 300)]
    pub stream_timeout_secs: u64,
}

/// Dispatcher configuration, built once at startup.
#[derive(Clone)]
pub struct Config {
    /// HTTP server bind address.
    pub bind_addr: String,

    /// API credential; `None` if unset or empty.
    pub api_key: Option<String>,

    /// Host path mounted into the tool container.
    pub workspace_path: PathBuf,

    /// Tool server image.
    pub mcp_image: String,

    /// Claude Code CLI executable.
    pub claude_path: String,

    /// Optional model override.
    pub model: Option<String>,

    /// Upper bound on a single agent's execution.
    pub agent_timeout: Duration,

    /// How long a streaming run waits for stragglers.
    pub stream_timeout: Duration,
}

impl Config {
    /// Returns true if an API credential is configured.
    pub fn api_key_configured(&self) -> bool {
        self.api_key.is_some()
    }
}

impl From<Args> for Config {
    fn from(args: Args) -> Self {
        Self {
            bind_addr: format!("{}:{}", args.host, args.port),
            api_key: args.api_key.filter(|key| !key.trim().is_empty()),
            workspace_path: args.workspace_path,
            mcp_image: args.mcp_image,
            claude_path: args.claude_path,
            model: args.model,
            agent_timeout: Duration::from_secs(args.agent_timeout_secs),
            stream_timeout: Duration::from_secs(args.stream_timeout_secs),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:8080".to_string(),
            api_key: None,
            workspace_path: PathBuf::from("/workspace"),
            mcp_image: "claude-mcp".to_string(),
            claude_path: "claude".to_string(),
            model: None,
            agent_timeout: Duration::from_secs(600),
            stream_timeout: Duration::from_secs(300),
        }
    }
}
