//! Storage backend abstraction for the document store.
//!
//! [`StoreBackend`] is the seam between the generic [`DocumentStore`](crate::store::DocumentStore)
//! adapter and a concrete database. Every method is a single storage call, so
//! implementations only need to be atomic per call; nothing spans two calls.
//!
//! # Examples
//!
//! ```ignore
//! use dappdir_core::backend::StoreBackend;
//! use bson::doc;
//!
//! let backend = MyBackendImpl::new();
//! let id = backend.insert_document(doc! { "name": "Foo" }, "dapp").await?;
//! let stored = backend.find_by_id(id, "dapp").await?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use async_trait::async_trait;
use bson::{DateTime, Document, oid::ObjectId};
use std::fmt::Debug;

use crate::{error::DocumentStoreResult, query::Query};

/// Abstract interface for document storage backends.
///
/// # Thread Safety
///
/// Implementations are shared by every in-flight request and must support
/// concurrent access.
///
/// # Stored documents
///
/// Documents returned by a backend carry the storage identifier under `_id`
/// alongside their fields. Turning that into a transport shape is the job of
/// [`crate::serialize`], not the backend's.
#[async_trait]
pub trait StoreBackend: Send + Sync + Debug {
    /// The name of the database this backend is bound to.
    fn database_name(&self) -> &str;

    /// Inserts one document and returns its newly generated identifier.
    ///
    /// # Errors
    ///
    /// Returns [`DocumentStoreError::Write`](crate::error::DocumentStoreError::Write) if the insert fails.
    async fn insert_document(&self, document: Document, collection: &str) -> DocumentStoreResult<ObjectId>;

    /// Looks up a single document by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`DocumentStoreError::Read`](crate::error::DocumentStoreError::Read) if the lookup fails.
    async fn find_by_id(&self, id: ObjectId, collection: &str) -> DocumentStoreResult<Option<Document>>;

    /// Returns documents matching the query filter, at most `query.limit` of them,
    /// in natural storage order.
    ///
    /// # Errors
    ///
    /// Returns [`DocumentStoreError::Read`](crate::error::DocumentStoreError::Read) if the query fails.
    async fn query_documents(&self, query: Query, collection: &str) -> DocumentStoreResult<Vec<Document>>;

    /// Atomically adds `delta` to a numeric field and sets `updated_at` to `modified_at`.
    ///
    /// A missing field is treated as zero. Returns the number of documents matched
    /// (zero or one).
    ///
    /// # Errors
    ///
    /// Returns [`DocumentStoreError::Write`](crate::error::DocumentStoreError::Write) if the update fails.
    async fn increment_field(
        &self,
        id: ObjectId,
        field: &str,
        delta: i64,
        modified_at: DateTime,
        collection: &str,
    ) -> DocumentStoreResult<u64>;

    /// Lists the names of all collections in the database.
    ///
    /// # Errors
    ///
    /// Returns [`DocumentStoreError::Read`](crate::error::DocumentStoreError::Read) if listing fails.
    async fn list_collections(&self) -> DocumentStoreResult<Vec<String>>;

    /// Releases connections and other resources held by the backend.
    ///
    /// The default implementation is a no-op.
    async fn shutdown(&self) -> DocumentStoreResult<()> {
        Ok(())
    }
}

/// Factory trait for creating backend instances.
#[async_trait]
pub trait StoreBackendBuilder {
    type Backend: StoreBackend;

    async fn build(self) -> DocumentStoreResult<Self::Backend>;
}
