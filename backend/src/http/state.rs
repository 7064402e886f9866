//! Application state for the HTTP server.

use std::sync::Arc;

use crate::config::AppConfig;
use crate::services::storage::ChartStore;

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Loaded configuration, including the chart settings for every render
    pub config: Arc<AppConfig>,
    /// Directory of generated charts
    pub store: ChartStore,
}

impl AppState {
    /// Create a new application state from configuration.
    pub fn new(config: AppConfig) -> Self {
        let store = ChartStore::new(config.storage.output_dir.clone());
        Self {
            config: Arc::new(config),
            store,
        }
    }
}
