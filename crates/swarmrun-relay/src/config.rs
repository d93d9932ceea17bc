//! Relay configuration.

use std::time::Duration;

use clap::Parser;

/// Command-line arguments, each with an environment fallback.
#[derive(Parser)]
#[command(name = "swarmrun-relay")]
#[command(about = "Forward prompt submissions to the SwarmRun dispatcher", long_about = None)]
pub struct Args {
    /// Address to bind the HTTP server to
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Port to bind the HTTP server to
    #[arg(short, long, env = "PORT", default_value_t = 5000)]
    pub port: u16,

    /// Dispatcher base URL
    #[arg(
        long,
        env = "BACKEND_URL",
        default_value = "http://orchestrator-service.backend.svc.cluster.local:8080"
    )]
    pub backend_url: String,

    /// Seconds to wait for the dispatcher before giving up
    #[arg(long, env = "BACKEND_TIMEOUT_SECS", default_value_t = 300)]
    pub backend_timeout_secs: u64,
}

/// Relay configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server bind address.
    pub bind_addr: String,

    /// Dispatcher base URL, without trailing slash.
    pub backend_url: String,

    /// Upper bound on a forwarded request, including a streamed body.
    pub request_timeout: Duration,

    /// Upper bound on the readiness probe of the dispatcher.
    pub probe_timeout: Duration,
}

impl From<Args> for Config {
    fn from(args: Args) -> Self {
        Self {
            bind_addr: format!("{}:{}", args.host, args.port),
            backend_url: args.backend_url.trim_end_matches('/').to_string(),
            request_timeout: Duration::from_secs(args.backend_timeout_secs),
            probe_timeout: Duration::from_secs(5),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:5000".to_string(),
            backend_url: "http://orchestrator-service.backend.svc.cluster.local:8080".to_string(),
            request_timeout: Duration::from_secs(300),
            probe_timeout: Duration::from_secs(5),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_url_trailing_slash_removed() {
        let args = Args::parse_from(["swarmrun-relay", "--backend-url", "http://localhost:8080/"]);
        assert_eq!(Config::from(args).backend_url, "http://localhost:8080");
    }
}
