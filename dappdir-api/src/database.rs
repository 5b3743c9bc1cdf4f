//! Opens the document store selected by the server configuration.

use dappdir::{
    backend::StoreBackendBuilder,
    error::DocumentStoreResult,
    memory::InMemoryStore,
    mongodb::MongoDbStore,
    store::DocumentStore,
};

use crate::config::{DatabaseBackend, ServerConfig};

/// Connects the configured backend.
///
/// Never fails: missing or unusable database configuration is logged and a
/// disconnected store is returned, so the server still starts and the
/// diagnostics endpoint can report the problem.
pub async fn connect(config: &ServerConfig) -> DocumentStore {
    let backend = match config.database_backend() {
        Ok(backend) => backend,
        Err(e) => {
            tracing::warn!(error = %e, "Database not configured, running without storage");
            return DocumentStore::disconnected();
        }
    };

    match open(&backend).await {
        Ok(store) => {
            tracing::info!(
                database = store.database_name().unwrap_or_default(),
                "Document store connected"
            );
            store
        }
        Err(e) => {
            tracing::warn!(error = %e, "Failed to open document store, running without storage");
            DocumentStore::disconnected()
        }
    }
}

async fn open(backend: &DatabaseBackend) -> DocumentStoreResult<DocumentStore> {
    Ok(match backend {
        DatabaseBackend::Memory { name } => {
            let mut builder = InMemoryStore::builder();
            if let Some(name) = name {
                builder = builder.database_name(name.clone());
            }

            DocumentStore::new(builder.build().await?)
        }
        DatabaseBackend::MongoDb { url, name } => {
            DocumentStore::new(MongoDbStore::builder(url, name).build().await?)
        }
    })
}
