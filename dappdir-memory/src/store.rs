//! Process-local backend for development, tests and `DATABASE_URL=memory://`.
//!
//! Documents are kept as BSON documents in hash maps guarded by an async-aware
//! read-write lock.

use std::{collections::HashMap, sync::Arc};
use async_trait::async_trait;
use mea::rwlock::RwLock;
use bson::{Bson, DateTime, Document, oid::ObjectId};

use dappdir_core::{
    query::Query,
    error::{DocumentStoreError, DocumentStoreResult},
    backend::{StoreBackend, StoreBackendBuilder},
    serialize::STORAGE_ID,
    store::UPDATED_AT,
};

use crate::evaluator::DocumentEvaluator;

type CollectionMap = HashMap<ObjectId, Document>;
type StoreMap = HashMap<String, CollectionMap>;

/// Database name reported when none is configured.
pub const DEFAULT_DATABASE_NAME: &str = "memory";


/// In-memory backend keyed by collection name, then object id.
///
/// # Concurrency
///
/// Clones share one map behind an async `RwLock`. Every write, including
/// [`StoreBackend::increment_field`], holds the write guard for its whole
/// read-modify-write, so concurrent votes never lose an update.
///
/// # Performance
///
/// Queries scan every document in a collection. Suitable for development and tests.
///
/// # Example
///
/// ```ignore
/// use dappdir_memory::InMemoryStore;
/// use dappdir_core::backend::StoreBackend;
/// use bson::doc;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let store = InMemoryStore::new();
///
///     let id = store.insert_document(doc! { "name": "Foo" }, "dapp").await?;
///     let found = store.find_by_id(id, "dapp").await?;
///     assert!(found.is_some());
///
///     Ok(())
/// }
/// ```
#[derive(Clone, Debug)]
pub struct InMemoryStore {
    /// collection_name -> (document_id -> document)
    store: Arc<RwLock<StoreMap>>,
    database: String,
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryStore {
    /// An empty store reporting [`DEFAULT_DATABASE_NAME`].
    pub fn new() -> Self {
        Self::with_database_name(DEFAULT_DATABASE_NAME)
    }

    /// Creates a new empty store that reports `database` as its database name.
    pub fn with_database_name(database: impl Into<String>) -> Self {
        Self {
            store: Arc::new(RwLock::new(StoreMap::new())),
            database: database.into(),
        }
    }

    /// Creates a builder for constructing an `InMemoryStore`.
    ///
    /// # Example
    ///
    /// ```ignore
    /// use dappdir_memory::InMemoryStore;
    ///
    /// let store = InMemoryStore::builder().database_name("dapps").build().await.unwrap();
    /// ```
    pub fn builder() -> InMemoryStoreBuilder {
        InMemoryStoreBuilder::default()
    }
}


#[async_trait]
impl StoreBackend for InMemoryStore {
    fn database_name(&self) -> &str {
        &self.database
    }

    async fn insert_document(&self, mut document: Document, collection: &str) -> DocumentStoreResult<ObjectId> {
        let id = ObjectId::new();
        document.insert(STORAGE_ID, id);

        self.store
            .write()
            .await
            .entry(collection.to_string())
            .or_default()
            .insert(id, document);

        Ok(id)
    }

    async fn find_by_id(&self, id: ObjectId, collection: &str) -> DocumentStoreResult<Option<Document>> {
        Ok(
            self.store
                .read()
                .await
                .get(collection)
                .and_then(|collection_map| collection_map.get(&id))
                .cloned()
        )
    }

    async fn query_documents(&self, query: Query, collection: &str) -> DocumentStoreResult<Vec<Document>> {
        let store = self.store.read().await;
        let collection_map = match store.get(collection) {
            Some(col) => col,
            None => return Ok(vec![]),
        };
        let limit = query.limit.unwrap_or(usize::MAX);

        Ok(match &query.filter {
            Some(filter) => DocumentEvaluator::filter_documents(
                collection_map.values(),
                filter,
                limit,
            ),
            None => collection_map
                .values()
                .take(limit)
                .cloned()
                .collect::<Vec<_>>(),
        })
    }

    async fn increment_field(
        &self,
        id: ObjectId,
        field: &str,
        delta: i64,
        modified_at: DateTime,
        collection: &str,
    ) -> DocumentStoreResult<u64> {
        let mut store = self.store.write().await;
        let Some(document) = store
            .get_mut(collection)
            .and_then(|collection_map| collection_map.get_mut(&id))
        else {
            return Ok(0);
        };

        let overflow = || DocumentStoreError::Write(format!(
            "incrementing '{field}' by {delta} would overflow a 64-bit integer"
        ));
        let incremented = match document.get(field) {
            None | Some(Bson::Null) => Bson::Int64(delta),
            Some(Bson::Int32(value)) => Bson::Int64(i64::from(*value).checked_add(delta).ok_or_else(overflow)?),
            Some(Bson::Int64(value)) => Bson::Int64(value.checked_add(delta).ok_or_else(overflow)?),
            Some(Bson::Double(value)) => Bson::Double(value + delta as f64),
            Some(other) => {
                return Err(DocumentStoreError::Write(format!(
                    "cannot increment non-numeric field '{field}' of type {:?}",
                    other.element_type()
                )));
            }
        };

        document.insert(field, incremented);
        document.insert(UPDATED_AT, modified_at);

        Ok(1)
    }

    async fn list_collections(&self) -> DocumentStoreResult<Vec<String>> {
        Ok(
            self.store
                .read()
                .await
                .keys()
                .cloned()
                .collect()
        )
    }
}


/// Builder for constructing [`InMemoryStore`] instances.
///
/// # Example
///
/// ```ignore
/// use dappdir_memory::InMemoryStore;
/// use dappdir_core::backend::StoreBackendBuilder;
///
/// #[tokio::main]
/// async fn main() {
///     let store = InMemoryStore::builder().build().await.unwrap();
/// }
/// ```
#[derive(Default)]
pub struct InMemoryStoreBuilder {
    database: Option<String>,
}

impl InMemoryStoreBuilder {
    /// Sets the database name reported by the store.
    pub fn database_name(mut self, database: impl Into<String>) -> Self {
        self.database = Some(database.into());
        self
    }
}

#[async_trait]
impl StoreBackendBuilder for InMemoryStoreBuilder {
    type Backend = InMemoryStore;

    /// Never fails.
    async fn build(self) -> DocumentStoreResult<Self::Backend> {
        let store = match self.database {
            Some(database) => InMemoryStore::with_database_name(database),
            None => InMemoryStore::new(),
        };
        tracing::debug!(database = %store.database, "In-memory store created");

        Ok(store)
    }
}
