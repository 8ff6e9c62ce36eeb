//! # Local File Store
//!
//! Durable, asynchronous persistence of binary blobs within a single client
//! context, backed by SQLite.
//!
//! The store is deliberately minimal: one table, three operations
//! ([`save`](FileStore::save), [`get`](FileStore::get),
//! [`remove`](FileStore::remove)), a fixed schema version, no indexing, no
//! eviction and no cross-key transactions. It exists so the development
//! backend client has somewhere real to put uploaded files between runs.

pub mod error;
pub mod store;

pub use error::{Result, StoreError};
pub use store::FileStore;
