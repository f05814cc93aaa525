//! Key-value backend for the revue catalog.
//!
//! Both collections live as whole JSON documents under two fixed keys of a
//! [`KeyValueStore`]. Two hosts are provided: [`MemoryStore`] for tests and
//! embedding, and [`SqliteStore`] for a durable single-file store.

mod encode;
mod schema;
mod seed;
mod sqlite;
mod store;

pub mod error;
pub mod kv;

pub use error::{Error, Result};
pub use kv::{KeyValueStore, MemoryError, MemoryStore};
pub use seed::{default_items, default_reviews};
pub use sqlite::SqliteStore;
pub use store::KvCatalog;
