//! Application state shared across handlers.

use std::sync::Arc;

use crate::config::PosConfig;
use crate::docstore::DocumentStore;

/// Application state shared across all handlers.
///
/// Cheaply cloneable via `Arc`. The document store is held as a trait object
/// so the HTTP client and the in-memory test store are interchangeable.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: PosConfig,
    store: Arc<dyn DocumentStore>,
}

impl AppState {
    /// Create a new application state.
    #[must_use]
    pub fn new(config: PosConfig, store: Arc<dyn DocumentStore>) -> Self {
        Self {
            inner: Arc::new(AppStateInner { config, store }),
        }
    }

    /// Get a reference to the application configuration.
    #[must_use]
    pub fn config(&self) -> &PosConfig {
        &self.inner.config
    }

    /// Get a reference to the document store.
    #[must_use]
    pub fn store(&self) -> &dyn DocumentStore {
        &*self.inner.store
    }
}
