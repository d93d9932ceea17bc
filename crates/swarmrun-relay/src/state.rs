//! Shared application state.

use std::sync::Arc;

use crate::client::BackendClient;

/// Shared application state.
pub struct AppState {
    /// Client for the dispatcher.
    pub backend: BackendClient,
}

impl AppState {
    /// Create a new AppState wrapped in Arc.
    pub fn new(backend: BackendClient) -> Arc<Self> {
        Arc::new(Self { backend })
    }
}
