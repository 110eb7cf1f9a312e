//! Shared application state for request handlers.

use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::config::AppConfig;

/// Shared application state, cloneable across handlers via Arc-wrapped fields.
///
/// Everything in here is fixed at startup; handlers only read it.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    started_at: Instant,
}

impl AppState {
    /// Creates a new application state, marking now as the process start.
    pub fn new(config: AppConfig) -> Self {
        Self::with_start(config, Instant::now())
    }

    /// Creates a new application state with an explicit process start instant.
    ///
    /// `main` captures the instant before doing anything else so uptime covers
    /// configuration and logging setup too.
    pub fn with_start(config: AppConfig, started_at: Instant) -> Self {
        Self {
            config: Arc::new(config),
            started_at,
        }
    }

    /// Time elapsed since the recorded process start.
    pub fn uptime(&self) -> Duration {
        self.started_at.elapsed()
    }
}
