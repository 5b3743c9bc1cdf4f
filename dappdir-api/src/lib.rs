//! Dapp directory API server library.
//!
//! Exposes the building blocks (config, store connection, state, error
//! handling, routes) so integration tests and the binary entrypoint can both
//! access them.

pub mod config;
pub mod database;
pub mod error;
pub mod router;
pub mod routes;
pub mod state;
