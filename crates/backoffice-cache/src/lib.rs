//! Durable key-value storage and the active store selection.
//!
//! Provides a typed JSON cache over pluggable backends (in-memory or a JSON
//! file on disk) and the [`SelectionStore`] that remembers which store the
//! operator is working on across restarts.
//!
//! # Example
//!
//! ```rust,ignore
//! use backoffice_cache::{ActiveStoreSelection, Cache, SelectionStore};
//!
//! let cache = Cache::open(".backoffice/state.json")?;
//! let selection = SelectionStore::open_default(cache)?;
//!
//! // Switch store
//! selection.set(ActiveStoreSelection::new(3, "Acme", None))?;
//!
//! // Read it back (also after a restart)
//! assert_eq!(selection.get().name, "Acme");
//! ```

mod error;
mod kv;
mod selection;

pub use error::CacheError;
pub use kv::{Cache, FileStore, KeyValueStore, MemoryStore};
pub use selection::{ActiveStoreSelection, SelectionStore, DEFAULT_NAMESPACE};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{ActiveStoreSelection, Cache, CacheError, SelectionStore};
}
