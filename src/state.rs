//! Shared application state

use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::config::Config;
use crate::storage::ArtifactStore;

/// Shared application state
///
/// Constructed once at startup and cloned into every handler. The only
/// process-wide values are the configuration, the backend handle, and the
/// process start timestamp; all are read-only after construction.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: Config,
    store: Arc<dyn ArtifactStore>,
    started_at: DateTime<Utc>,
}

impl AppState {
    /// Create a new application state
    pub fn new(config: Config, store: Arc<dyn ArtifactStore>) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                config,
                store,
                started_at: Utc::now(),
            }),
        }
    }

    /// Get the configuration
    pub fn config(&self) -> &Config {
        &self.inner.config
    }

    /// Get the artifact store
    pub fn store(&self) -> &Arc<dyn ArtifactStore> {
        &self.inner.store
    }

    /// Process start time, fixed at construction
    pub fn started_at(&self) -> DateTime<Utc> {
        self.inner.started_at
    }
}
