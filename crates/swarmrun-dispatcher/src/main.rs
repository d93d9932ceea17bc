//! SwarmRun Dispatcher Server

use std::net::SocketAddr;
use std::sync::Arc;

use clap::Parser;
use tokio::net::TcpListener;
use tracing::{info, Level};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use swarmrun_dispatcher::{http, AppState, Args, ClaudeRuntime, Config, Dispatcher};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::from_default_env().add_directive(Level::INFO.into()))
        .with_target(true)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    // Load config
    let config = Config::from(Args::parse());
    let http_addr: SocketAddr = config.bind_addr.parse()?;

    info!(api_key_configured = config.api_key_configured(), "Credential check");
    info!(workspace = %config.workspace_path.display(), "Workspace path");
    info!(image = %config.mcp_image, "Claude MCP image");

    let runtime = Arc::new(ClaudeRuntime::from_config(&config));
    let dispatcher = Dispatcher::new(runtime, &config);
    let router = http::create_router(AppState::new(dispatcher));

    let listener = TcpListener::bind(http_addr).await?;
    info!("HTTP server listening on {}", http_addr);
    axum::serve(listener, router).await?;

    Ok(())
}
