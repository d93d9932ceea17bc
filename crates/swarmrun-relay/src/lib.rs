//! SwarmRun Relay Library
//!
//! The user-facing tier: validates submissions with the same rules as the
//! dispatcher, forwards them, and relays the answer back as JSON or as
//! Server-Sent Events.

pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod lines;
pub mod state;

pub use client::BackendClient;
pub use config::{Args, Config};
pub use error::RelayError;
pub use state::AppState;
