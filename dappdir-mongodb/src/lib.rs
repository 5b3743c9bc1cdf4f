//! MongoDB backend implementation for dappdir.
//!
//! [`MongoDbStore`] implements `StoreBackend` over the official driver. Filters
//! are translated to `$and`/`$eq`/`$in` query documents in [`query`].
//!
//! The facade only exposes it with the `mongodb` feature:
//!
//! ```toml
//! [dependencies]
//! dappdir = { version = "x.y.z", features = ["mongodb"] }
//! ```
//!
//! Votes rely on MongoDB's `$inc` operator, so concurrent increments of the same
//! document are applied atomically by the server.
//!
//! # Example
//!
//! ```ignore
//! use dappdir::{backend::StoreBackendBuilder, mongodb::MongoDbStore};
//!
//! #[tokio::main]
//! async fn main() -> dappdir::error::DocumentStoreResult<()> {
//!     let store = MongoDbStore::builder("mongodb://localhost:27017", "dapps")
//!         .build()
//!         .await?;
//!
//!     Ok(())
//! }
//! ```

#[allow(unused_extern_crates)]
extern crate self as dappdir_mongodb;

pub mod store;
pub mod query;

pub use store::{MongoDbStore, MongoDbStoreBuilder};
