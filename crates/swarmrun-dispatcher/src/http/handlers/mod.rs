//! HTTP request handlers.

mod health;
mod orchestrate;

pub use health::{health_check, index, readiness_check};
pub use orchestrate::{orchestrate, orchestrate_stream};
