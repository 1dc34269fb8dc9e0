//! Application state shared across handlers

use std::sync::Arc;

use application::GatewayService;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Gateway service orchestrating cache and upstream
    pub gateway: Arc<GatewayService>,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("gateway", &self.gateway)
            .finish()
    }
}
