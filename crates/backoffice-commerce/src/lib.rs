//! Back-office domain records and service facades.
//!
//! This crate provides the typed view of the back-office REST API:
//!
//! - **Stores**: the tenants an operator manages
//! - **Catalog**: categories, category attributes, addons, variant
//!   attributes and products
//! - **Services**: one facade per resource group, each a thin wrapper over a
//!   shared [`backoffice_data::FetchClient`]
//!
//! Payloads are checked locally before anything is sent; the server remains
//! the authority for ids and timestamps, and records it returns are passed
//! through untouched.
//!
//! # Example
//!
//! ```rust,ignore
//! use backoffice_commerce::prelude::*;
//!
//! let categories = CategoryService::new(client.clone());
//!
//! let color = categories
//!     .create_attribute(
//!         CategoryId::new(5),
//!         &AttributePayload::new("Color", AttributeType::Select)
//!             .required(true)
//!             .with_values(["Red", "Blue"]),
//!     )
//!     .await?;
//!
//! println!("created attribute {}", color.id);
//! ```

pub mod error;
pub mod ids;
pub mod upload;

pub mod catalog;
pub mod service;
pub mod store;

pub use error::CommerceError;
pub use ids::*;
pub use service::{CategoryService, ProductService, StoreService};
pub use store::{resolve_logo_url, Store, StoreForm};
pub use upload::ImageUpload;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::CommerceError;
    pub use crate::ids::*;
    pub use crate::upload::ImageUpload;

    // Stores
    pub use crate::store::{Store, StoreForm};

    // Catalog
    pub use crate::catalog::{
        Addon, AddonPayload, AttributePayload, AttributeType, AttributeValue, Category,
        CategoryAttribute, CategoryPayload, PredefinedValue, Product, ProductForm,
        VariantAttribute, VariantDetails,
    };

    // Services
    pub use crate::service::{CategoryService, ProductService, StoreService};
}
