//! Prelude for convenient imports.
//!
//! ```rust,ignore
//! use backoffice_sdk::prelude::*;
//! ```

// Session
pub use crate::config::DashboardConfig;
pub use crate::session::{AdminSession, Dashboard};

// Selection
pub use backoffice_cache::{ActiveStoreSelection, CacheError};

// Dispatcher
pub use backoffice_data::{FetchClient, FetchError};

// Records and services
pub use backoffice_commerce::prelude::*;
