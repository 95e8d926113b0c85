//! Catalog records and payloads.
//!
//! Categories, their attributes and addons, variant attributes and products.

mod addon;
mod attribute;
mod category;
mod product;
mod variant;

pub use addon::{Addon, AddonPayload};
pub use attribute::{AttributePayload, AttributeType, CategoryAttribute, PredefinedValue};
pub use category::{Category, CategoryPayload};
pub use product::{Product, ProductForm, VariantDetails};
pub use variant::{AttributeValue, VariantAttribute};
