//! Error types and result types for document store operations.
//!
//! Every fallible operation in the persistence layer returns
//! [`DocumentStoreResult<T>`]. The HTTP layer maps each variant onto a status code.

use bson::error::Error as BsonError;
use serde_json::Error as SerdeJsonError;
use thiserror::Error;

use crate::schema::ValidationErrors;

/// Represents all possible errors that can occur when interacting with a document store.
#[derive(Error, Debug)]
pub enum DocumentStoreError {
    /// The record was rejected by its schema before reaching storage.
    #[error("Validation error: {0}")]
    Validation(ValidationErrors),
    /// No document with the given identifier exists in the collection.
    #[error("Document {id} not found in collection {collection}")]
    NotFound { collection: String, id: String },
    /// The identifier is not a 24 character hexadecimal object id.
    #[error("Invalid document id '{0}': expected a 24 character hex string")]
    InvalidId(String),
    /// No database connection has been established.
    #[error("Storage unavailable: no database connection")]
    StorageUnavailable,
    /// A write against the underlying storage failed.
    #[error("Write error: {0}")]
    Write(String),
    /// A read against the underlying storage failed.
    #[error("Read error: {0}")]
    Read(String),
    /// Serialization/deserialization error when converting between document formats (BSON, JSON).
    #[error("Serialization error: {0}")]
    Serialization(String),
    /// Error during store initialization or connection setup.
    #[error("Initialization error: {0}")]
    Initialization(String),
}

/// A specialized `Result` type for document store operations.
pub type DocumentStoreResult<T> = Result<T, DocumentStoreError>;

impl From<BsonError> for DocumentStoreError {
    fn from(err: BsonError) -> Self {
        DocumentStoreError::Serialization(err.to_string())
    }
}

impl From<SerdeJsonError> for DocumentStoreError {
    fn from(err: SerdeJsonError) -> Self {
        DocumentStoreError::Serialization(err.to_string())
    }
}

impl From<ValidationErrors> for DocumentStoreError {
    fn from(errors: ValidationErrors) -> Self {
        DocumentStoreError::Validation(errors)
    }
}
