use std::sync::Arc;

use dappdir::store::DocumentStore;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (the store shares one backend handle and the
/// configuration is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// The document store, possibly disconnected.
    pub store: DocumentStore,
    /// Server configuration (read by the diagnostics endpoint).
    pub config: Arc<ServerConfig>,
}

impl AppState {
    pub fn new(store: DocumentStore, config: ServerConfig) -> Self {
        Self {
            store,
            config: Arc::new(config),
        }
    }
}
