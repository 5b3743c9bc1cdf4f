//! The persistence and serialization layer of the dapp directory.
//!
//! This crate is the core of the dappdir project and provides:
//!
//! - **Schema registry** ([`schema`]) - Record kinds, field tables, validation and JSON-Schema output
//! - **Records** ([`record`]) - Typed `User`, `Dapp`, `Comment` and `Product` records
//! - **Document traits** ([`document`]) - Conversions between records, JSON bodies and storage documents
//! - **Store backend abstraction** ([`backend`]) - The trait concrete databases implement
//! - **Query and filtering API** ([`query`]) - Equality and value-in-set predicates
//! - **Collections interface** ([`collection`]) - One backend bound to one collection
//! - **Document store** ([`store`]) - The generic, kind-keyed storage adapter
//! - **Serialization** ([`serialize`]) - Stored documents to transport-safe JSON
//! - **Error handling** ([`error`]) - The storage error taxonomy
//!
//! # Example
//!
//! ```ignore
//! use dappdir_core::{document::DocumentExt, record::Dapp, serialize::to_transport, schema::Kind};
//!
//! let dapp = Dapp::from_json_validated(&body)?;
//! let id = store.create_document(&dapp).await?;
//! let stored = store.get_by_id(Kind::Dapp, &id).await?;
//! let json = to_transport(stored);
//! ```

#[allow(unused_extern_crates)]
extern crate self as dappdir_core;

pub mod backend;
pub mod collection;
pub mod document;
pub mod error;
pub mod query;
pub mod record;
pub mod schema;
pub mod serialize;
pub mod store;
