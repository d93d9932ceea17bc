//! Shared application state.

use std::sync::Arc;

use crate::dispatcher::Dispatcher;

/// Shared application state.
pub struct AppState {
    /// Agent fan-out and aggregation.
    pub dispatcher: Dispatcher,
}

impl AppState {
    /// Create a new AppState wrapped in Arc.
    pub fn new(dispatcher: Dispatcher) -> Arc<Self> {
        Arc::new(Self { dispatcher })
    }
}
