//! A handle binding a storage backend to one collection.
//!
//! [`Collection`] turns public string identifiers into storage identifiers and
//! translates "nothing matched" into [`DocumentStoreError::NotFound`]. It is the
//! only path through which [`DocumentStore`](crate::store::DocumentStore)
//! touches a backend.

use std::borrow::Cow;

use bson::{DateTime, Document, oid::ObjectId};

use crate::{
    backend::StoreBackend,
    error::{DocumentStoreError, DocumentStoreResult},
    query::Query,
};

/// Parses a public identifier into a storage identifier.
///
/// # Errors
///
/// Returns [`DocumentStoreError::InvalidId`] unless `id` is 24 hexadecimal characters.
pub fn parse_id(id: &str) -> DocumentStoreResult<ObjectId> {
    ObjectId::parse_str(id).map_err(|_| DocumentStoreError::InvalidId(id.to_string()))
}

#[derive(Debug)]
pub struct Collection<'a> {
    name: Cow<'static, str>,
    backend: &'a dyn StoreBackend,
}

impl<'a> Collection<'a> {
    pub(crate) fn new(name: Cow<'static, str>, backend: &'a dyn StoreBackend) -> Self {
        Self { name, backend }
    }

    /// Returns the name of this collection.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Inserts a document and returns its identifier as a hex string.
    pub async fn insert(&self, document: Document) -> DocumentStoreResult<String> {
        let id = self.backend.insert_document(document, self.name()).await?;

        Ok(id.to_hex())
    }

    /// Runs a query against the collection.
    pub async fn query(&self, query: Query) -> DocumentStoreResult<Vec<Document>> {
        self.backend.query_documents(query, self.name()).await
    }

    /// Fetches one document by its public identifier.
    ///
    /// # Errors
    ///
    /// [`DocumentStoreError::InvalidId`] for a malformed identifier,
    /// [`DocumentStoreError::NotFound`] if no document has it.
    pub async fn get(&self, id: &str) -> DocumentStoreResult<Document> {
        self.backend
            .find_by_id(parse_id(id)?, self.name())
            .await?
            .ok_or_else(|| self.not_found(id))
    }

    /// Atomically increments `field` by `delta` and stamps `updated_at`.
    ///
    /// # Errors
    ///
    /// [`DocumentStoreError::InvalidId`] for a malformed identifier,
    /// [`DocumentStoreError::NotFound`] if no document was matched.
    pub async fn increment(&self, id: &str, field: &str, delta: i64) -> DocumentStoreResult<()> {
        let matched = self
            .backend
            .increment_field(parse_id(id)?, field, delta, DateTime::now(), self.name())
            .await?;

        if matched == 0 {
            return Err(self.not_found(id));
        }

        Ok(())
    }

    fn not_found(&self, id: &str) -> DocumentStoreError {
        DocumentStoreError::NotFound {
            collection: self.name.to_string(),
            id: id.to_string(),
        }
    }
}
