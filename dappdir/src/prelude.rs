//! Convenient re-exports of commonly used types from dappdir.
//!
//! Import this prelude module to quickly access the most frequently used types
//! and traits without needing to import from multiple sub-modules:
//!
//! ```ignore
//! use dappdir::prelude::*;
//! ```
//!
//! This provides access to:
//! - Record kinds, records and validation errors
//! - Store backends and builders
//! - Filter construction
//! - The document store and serialization helpers

pub use dappdir_core::{
    collection::Collection,
    store::DocumentStore,
    document::{Document, DocumentExt},
    backend::{StoreBackend, StoreBackendBuilder},
    query::{Query, QueryVisitor, Expr, FieldOp, QueryBuilder, Filter},
    record::{Comment, Dapp, Product, User},
    schema::{Kind, FieldError, ValidationErrors, schema_registry},
    serialize::{to_transport, to_transport_opt},
    error::{DocumentStoreError, DocumentStoreResult},
};
