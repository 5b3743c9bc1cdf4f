//! In-memory document storage backend for dappdir.
//!
//! This crate provides a thread-safe, in-memory implementation of the `StoreBackend` trait.
//! It uses async-aware read-write locks for concurrent access and backs local
//! development (`DATABASE_URL=memory://`) and the test suites.
//!
//! # Quick Start
//!
//! ```ignore
//! use dappdir_core::{document::DocumentExt, record::Dapp, schema::Kind, store::DocumentStore};
//! use dappdir_memory::InMemoryStore;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let store = DocumentStore::new(InMemoryStore::new());
//!
//!     let dapp = Dapp::from_json_validated(&serde_json::json!({ "name": "Foo", "tagline": "Bar" }))?;
//!     let id = store.create_document(&dapp).await?;
//!     store.increment_field(Kind::Dapp, &id, "votes", 1).await?;
//!
//!     Ok(())
//! }
//! ```

#[allow(unused_extern_crates)]
extern crate self as dappdir_memory;

pub mod store;
pub mod evaluator;

pub use store::{InMemoryStore, InMemoryStoreBuilder};
