//! Core traits for records stored in the directory.
//!
//! A [`Document`] is a typed record bound to a [`Kind`]. [`DocumentExt`] adds the
//! conversions between typed records, validated JSON bodies and BSON storage
//! documents.

use std::borrow::Cow;

use bson::{Bson, de::deserialize_from_bson, ser::serialize_to_bson};
use serde::{Serialize, de::DeserializeOwned};
use serde_json::{Value, from_value};

use crate::{
    error::{DocumentStoreError, DocumentStoreResult},
    schema::Kind,
};

/// Field names that only exist on the transport side and are never persisted.
const TRANSPORT_ONLY_FIELDS: [&str; 2] = ["id", "_id"];

/// Core trait that all records stored in a document store must implement.
///
/// # Example
///
/// ```ignore
/// use dappdir_core::{document::Document, schema::Kind};
/// use serde::{Serialize, Deserialize};
///
/// #[derive(Debug, Clone, Serialize, Deserialize)]
/// pub struct User {
///     pub name: String,
/// }
///
/// impl Document for User {
///     const KIND: Kind = Kind::User;
/// }
/// ```
pub trait Document: Serialize + DeserializeOwned + Send + Sync + Clone + 'static {
    /// The schema kind this record belongs to.
    const KIND: Kind;

    /// Returns the name of the collection this record is stored in.
    fn collection_name() -> Cow<'static, str> {
        Self::KIND.collection_name()
    }
}

/// Extension trait providing conversion utilities for documents.
///
/// Automatically implemented for every [`Document`].
pub trait DocumentExt: Document {
    /// Validates a JSON body against this record's schema and builds the record.
    ///
    /// # Errors
    ///
    /// Returns [`DocumentStoreError::Validation`] with every offending field.
    fn from_json_validated(body: &Value) -> DocumentStoreResult<Self>;

    /// Converts this record into a storage document, dropping transport-only id fields.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails or the record is not a map.
    fn to_document(&self) -> DocumentStoreResult<bson::Document>;

    /// Builds a record from a stored document. Storage-only fields are ignored.
    ///
    /// # Errors
    ///
    /// Returns an error if deserialization fails or the structure is invalid.
    fn from_document(document: bson::Document) -> DocumentStoreResult<Self>;
}

impl<D: Document> DocumentExt for D {
    fn from_json_validated(body: &Value) -> DocumentStoreResult<Self> {
        let fields = D::KIND.validate(body)?;

        Ok(from_value(Value::Object(fields))?)
    }

    fn to_document(&self) -> DocumentStoreResult<bson::Document> {
        match serialize_to_bson(self)? {
            Bson::Document(mut document) => {
                for field in TRANSPORT_ONLY_FIELDS {
                    document.remove(field);
                }
                Ok(document)
            }
            other => Err(DocumentStoreError::Serialization(format!(
                "{} did not serialize to a document (got {:?})",
                D::KIND,
                other.element_type()
            ))),
        }
    }

    fn from_document(document: bson::Document) -> DocumentStoreResult<Self> {
        Ok(deserialize_from_bson(Bson::Document(document))?)
    }
}
