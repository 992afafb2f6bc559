//! Application state shared across all handlers.

use std::sync::Arc;
use std::time::Instant;

use fcserve_core::config::AppConfig;
use fcserve_engine::Pipeline;

/// Application state passed to every handler via `State<AppState>`.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// Engine pipeline serving the list/info/build flows
    pub pipeline: Arc<Pipeline>,
    /// Process start, for uptime reporting
    pub started_at: Instant,
}

impl AppState {
    /// Bundle configuration and pipeline into handler state.
    pub fn new(config: AppConfig, pipeline: Pipeline) -> Self {
        Self {
            config: Arc::new(config),
            pipeline: Arc::new(pipeline),
            started_at: Instant::now(),
        }
    }
}
