//! Application state for the geodata server.

use crate::config::AppConfig;
use crate::db::Storage;
use std::sync::Arc;

/// Shared application state.
///
/// Holds the shared resources handlers need access to. Cloning is cheap;
/// the storage and config are reference counted.
#[derive(Clone)]
pub struct AppState {
    /// Database storage handle
    pub storage: Arc<Storage>,

    /// Application configuration
    pub config: Arc<AppConfig>,

    /// Server start time for uptime calculation
    pub start_time: std::time::Instant,
}

impl AppState {
    /// Create a new application state.
    pub fn new(storage: Arc<Storage>, config: AppConfig) -> Self {
        Self {
            storage,
            config: Arc::new(config),
            start_time: std::time::Instant::now(),
        }
    }

    /// Get the server uptime in seconds.
    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }
}
