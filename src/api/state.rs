//! Application State
//!
//! Shared state accessible by all API handlers. The dataset is read-only, so
//! handlers share it without locking; each request brings its own view state.

use crate::config::ChartsConfig;
use crate::dataset::Dataset;
use crate::pipeline::Dashboard;
use std::sync::Arc;
use std::time::Instant;

/// Shared application state for all handlers
#[derive(Clone)]
pub struct AppState {
    /// Dataset loaded at startup
    pub dataset: Arc<Dataset>,
    /// Chart renderer settings
    pub dashboard: Dashboard,
    /// Server start time for uptime tracking
    pub start_time: Instant,
}

impl AppState {
    /// Create state with default chart settings
    pub fn new(dataset: Arc<Dataset>) -> Self {
        Self {
            dataset,
            dashboard: Dashboard::new(),
            start_time: Instant::now(),
        }
    }

    /// Create state with chart settings from config
    pub fn with_charts(dataset: Arc<Dataset>, charts: &ChartsConfig) -> Self {
        Self {
            dataset,
            dashboard: Dashboard::new()
                .with_bin_count(charts.bin_count)
                .with_governorate_level_only(charts.governorate_level_only),
            start_time: Instant::now(),
        }
    }

    /// Get server uptime in seconds
    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }
}
