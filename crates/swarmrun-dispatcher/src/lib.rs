//! SwarmRun Dispatcher Library
//!
//! Fans a single prompt out to N concurrently running agents, collects one
//! terminal result per agent, and serves the aggregate over HTTP either as a
//! single JSON document or as a newline-delimited event stream.

pub mod config;
pub mod dispatcher;
pub mod error;
pub mod http;
pub mod runtime;
pub mod state;

#[cfg(test)]
mod testing;

pub use config::{Args, Config};
pub use dispatcher::Dispatcher;
pub use error::DispatchError;
pub use runtime::{AgentRuntime, ClaudeRuntime};
pub use state::AppState;
