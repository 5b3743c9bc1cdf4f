//! Main dappdir crate providing a unified interface to the dapp directory's storage.
//!
//! This crate is the primary entry point for the HTTP service and any other consumer.
//! It re-exports the core types from `dappdir-core` and gives access to the storage
//! backends.
//!
//! # Features
//!
//! - **Schema registry** - Declarative field tables for every record kind, with validation and JSON-Schema output
//! - **Multiple backends** - In-memory and MongoDB storage behind one object-safe trait
//! - **Kind-keyed store** - A single generic adapter instead of per-entity storage code
//! - **Transport serialization** - Stored documents rendered as plain JSON
//!
//! # Quick Start
//!
//! ```ignore
//! use dappdir::{prelude::*, memory::InMemoryStore};
//! use serde_json::json;
//!
//! #[tokio::main]
//! async fn main() {
//!     // Create an in-memory store backend
//!     let store = DocumentStore::new(InMemoryStore::builder().build().await.unwrap());
//!
//!     // Validate an incoming body against the Dapp schema
//!     let dapp = Dapp::from_json_validated(&json!({ "name": "Foo", "tagline": "Bar" })).unwrap();
//!
//!     // Persist it and read it back
//!     let id = store.create_document(&dapp).await.unwrap();
//!     let stored = store.get_by_id(Kind::Dapp, &id).await.unwrap();
//!
//!     println!("Stored dapp: {:?}", to_transport(stored));
//!
//!     // Vote and list
//!     store.increment_field(Kind::Dapp, &id, "votes", 1).await.unwrap();
//!     let defi = store
//!         .get_documents(Kind::Dapp, Some(Filter::eq("category", "DeFi")), 100)
//!         .await
//!         .unwrap();
//!
//!     println!("DeFi dapps: {}", defi.len());
//!
//!     store.shutdown().await.unwrap();
//! }
//! ```
//!
//! # Backends
//!
//! - [`memory`] - Fast in-memory storage for development and testing
//! - [`mongodb`] - Persistent MongoDB backend (requires `mongodb` feature)

pub mod prelude;

pub use dappdir_core::{backend, collection, document, error, query, record, schema, serialize, store};

// Re-export BSON types for convenience
pub use bson;

/// In-memory storage backend implementations.
pub mod memory {
    pub use dappdir_memory::{InMemoryStore, InMemoryStoreBuilder};
}

/// MongoDB storage backend implementations.
///
/// This module is only available when the `mongodb` feature is enabled.
#[cfg(feature = "mongodb")]
pub mod mongodb {
    pub use dappdir_mongodb::{MongoDbStore, MongoDbStoreBuilder};
}
