//! Durable key-value slots for the Lumiere storefront.
//!
//! Provides a small, ergonomic API for keeping client-side state (the
//! favorites list, mostly) in a key-value store with automatic JSON
//! serialization. Two backends ship with the crate:
//!
//! - [`MemoryStore`] - process-local, used by tests and ephemeral sessions
//! - [`FileStore`] - one JSON file per key under a data directory
//!
//! # Example
//!
//! ```rust
//! use lumiere_cache::{Cache, MemoryStore};
//!
//! let cache = Cache::new(MemoryStore::new());
//!
//! cache.set("favorites:ids", &vec!["ring-aurora"]).unwrap();
//! let ids: Option<Vec<String>> = cache.get("favorites:ids").unwrap();
//! assert_eq!(ids, Some(vec!["ring-aurora".to_string()]));
//!
//! cache.delete("favorites:ids").unwrap();
//! ```

mod error;
mod kv;
mod store;

pub use error::CacheError;
pub use kv::Cache;
pub use store::{FileStore, KeyValueStore, MemoryStore};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{Cache, CacheError, FileStore, KeyValueStore, MemoryStore};
}
