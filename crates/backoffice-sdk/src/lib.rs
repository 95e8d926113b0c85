//! # Back-office SDK
//!
//! Client for the back-office REST API of a multi-store commerce platform.
//! An operator selects one store at a time; every request made through the
//! SDK is scoped to that store with a header, and the choice survives
//! restarts.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use backoffice_sdk::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     backoffice_sdk::logging::init()?;
//!
//!     let session = AdminSession::connect(DashboardConfig::default())?;
//!     let dashboard = session.load_dashboard().await?;
//!
//!     if let Some(store) = session.active_store(&dashboard.stores) {
//!         session.switch_store(store)?;
//!     }
//!
//!     let lamps = session.categories().create_category("Lamps").await?;
//!     session
//!         .categories()
//!         .create_addon(
//!             StoreId::new(session.selection().id),
//!             lamps.id,
//!             &AddonPayload::new("Gift wrap", 2.5),
//!         )
//!         .await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! - [`backoffice_cache`]: durable key-value storage and the selection
//! - [`backoffice_data`]: the request dispatcher and transports
//! - [`backoffice_commerce`]: records, payload validation and services
//!
//! The API base defaults to `http://localhost:8001/api/`; set
//! `BACKOFFICE_API_URL` at build time or `api.base_url` in the config file
//! to change it.

pub mod config;
pub mod logging;
pub mod prelude;
mod session;

// Re-export the underlying crates
pub use backoffice_cache;
pub use backoffice_commerce;
pub use backoffice_data;

pub use config::{ApiConfig, DashboardConfig, StorageConfig};
pub use logging::{LogConfig, LogFormat};
pub use session::{AdminSession, Dashboard};
