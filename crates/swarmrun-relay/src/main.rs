//! SwarmRun Relay Server

use std::net::SocketAddr;

use clap::Parser;
use tokio::net::TcpListener;
use tracing::{info, Level};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use swarmrun_relay::{http, AppState, Args, BackendClient, Config};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::from_default_env().add_directive(Level::INFO.into()))
        .with_target(true)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let config = Config::from(Args::parse());
    let http_addr: SocketAddr = config.bind_addr.parse()?;

    info!(backend = %config.backend_url, "Dispatcher URL");
    info!(timeout_secs = config.request_timeout.as_secs(), "Backend request timeout");

    let backend = BackendClient::new(&config)?;
    let router = http::create_router(AppState::new(backend));

    let listener = TcpListener::bind(http_addr).await?;
    info!("HTTP server listening on {}", http_addr);
    axum::serve(listener, router).await?;

    Ok(())
}
