//! Application state shared across handlers.

use std::sync::Arc;

use crate::config::ServerConfig;
use crate::store::Store;

/// Application state shared across all handlers.
///
/// Cheaply cloneable via `Arc`.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: ServerConfig,
    store: Store,
}

impl AppState {
    /// Create a new application state around an empty store.
    #[must_use]
    pub fn new(config: ServerConfig) -> Self {
        Self::with_store(config, Store::new())
    }

    /// Create a new application state around an existing store (used by
    /// tests to pre-seed data).
    #[must_use]
    pub fn with_store(config: ServerConfig, store: Store) -> Self {
        Self {
            inner: Arc::new(AppStateInner { config, store }),
        }
    }

    /// Get a reference to the configuration.
    #[must_use]
    pub fn config(&self) -> &ServerConfig {
        &self.inner.config
    }

    /// Get a reference to the entity store.
    #[must_use]
    pub fn store(&self) -> &Store {
        &self.inner.store
    }
}
