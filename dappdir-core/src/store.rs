//! The generic document store adapter.
//!
//! [`DocumentStore`] is the single entry point the HTTP layer uses for storage.
//! It is keyed by [`Kind`] rather than per-entity code, and it is cheap to clone:
//! every clone shares the same backend handle.
//!
//! A store may be *disconnected* (no backend configured), in which case every
//! storage operation fails with [`DocumentStoreError::StorageUnavailable`].
//!
//! # Example
//!
//! ```ignore
//! use dappdir_core::{store::DocumentStore, schema::Kind, query::Filter};
//!
//! let store = DocumentStore::new(backend);
//! let id = store.create_document(&dapp).await?;
//! let dapps = store
//!     .get_documents(Kind::Dapp, Some(Filter::eq("category", "DeFi")), 100)
//!     .await?;
//! ```

use std::sync::Arc;

use bson::{DateTime, Document as BsonDocument};

use crate::{
    backend::StoreBackend,
    collection::Collection,
    document::{Document, DocumentExt},
    error::{DocumentStoreError, DocumentStoreResult},
    query::{Expr, Query},
    schema::Kind,
};

/// Field stamped with the creation time of every document.
pub const CREATED_AT: &str = "created_at";
/// Field stamped on creation and on every in-place mutation.
pub const UPDATED_AT: &str = "updated_at";

#[derive(Debug, Clone, Default)]
pub struct DocumentStore {
    backend: Option<Arc<dyn StoreBackend>>,
}

impl DocumentStore {
    /// Creates a connected document store over the given backend.
    pub fn new(backend: impl StoreBackend + 'static) -> Self {
        Self {
            backend: Some(Arc::new(backend)),
        }
    }

    /// Creates a store with no database connection.
    pub fn disconnected() -> Self {
        Self { backend: None }
    }

    pub fn is_connected(&self) -> bool {
        self.backend.is_some()
    }

    /// The name of the connected database, if any.
    pub fn database_name(&self) -> Option<&str> {
        self.backend.as_deref().map(|backend| backend.database_name())
    }

    /// Gets the collection that stores records of `kind`.
    ///
    /// # Errors
    ///
    /// Returns [`DocumentStoreError::StorageUnavailable`] when disconnected.
    pub fn collection(&self, kind: Kind) -> DocumentStoreResult<Collection<'_>> {
        Ok(Collection::new(kind.collection_name(), self.backend()?))
    }

    /// Persists a validated record and returns its new identifier.
    ///
    /// `created_at` and `updated_at` are stamped with the current time.
    pub async fn create_document<D: Document>(&self, record: &D) -> DocumentStoreResult<String> {
        let collection = self.collection(D::KIND)?;

        let mut document = record.to_document()?;
        let now = DateTime::now();
        document.insert(CREATED_AT, now);
        document.insert(UPDATED_AT, now);

        let id = collection.insert(document).await?;
        tracing::debug!(collection = collection.name(), %id, "Created document");

        Ok(id)
    }

    /// Returns up to `limit` documents of `kind` matching `filter`.
    pub async fn get_documents(
        &self,
        kind: Kind,
        filter: Option<Expr>,
        limit: usize,
    ) -> DocumentStoreResult<Vec<BsonDocument>> {
        self.collection(kind)?
            .query(Query { filter, limit: Some(limit) })
            .await
    }

    /// Looks up one document of `kind` by its public identifier.
    pub async fn get_by_id(&self, kind: Kind, id: &str) -> DocumentStoreResult<BsonDocument> {
        self.collection(kind)?.get(id).await
    }

    /// Atomically increments a numeric field and stamps `updated_at`.
    pub async fn increment_field(
        &self,
        kind: Kind,
        id: &str,
        field: &str,
        delta: i64,
    ) -> DocumentStoreResult<()> {
        let collection = self.collection(kind)?;
        collection.increment(id, field, delta).await?;
        tracing::debug!(collection = collection.name(), %id, field, delta, "Incremented field");

        Ok(())
    }

    /// Lists all collections in the connected database.
    pub async fn list_collections(&self) -> DocumentStoreResult<Vec<String>> {
        self.backend()?.list_collections().await
    }

    /// Releases backend resources. A disconnected store has nothing to release.
    pub async fn shutdown(&self) -> DocumentStoreResult<()> {
        match &self.backend {
            Some(backend) => backend.shutdown().await,
            None => Ok(()),
        }
    }

    fn backend(&self) -> DocumentStoreResult<&dyn StoreBackend> {
        self.backend
            .as_deref()
            .ok_or(DocumentStoreError::StorageUnavailable)
    }
}
