//! Paid extras offered per store and category.

use crate::error::{ensure, CommerceError};
use crate::ids::{AddonId, CategoryId, StoreId};
use serde::{Deserialize, Serialize};

/// An addon as returned by the server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Addon {
    pub id: AddonId,
    pub store_id: StoreId,
    pub category_id: CategoryId,
    pub name: String,
    pub price: f64,
    pub created_at: String,
    pub updated_at: String,
}

/// Body of addon create and update requests.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddonPayload {
    pub name: String,
    pub price: f64,
}

impl AddonPayload {
    pub fn new(name: impl Into<String>, price: f64) -> Self {
        Self {
            name: name.into(),
            price,
        }
    }

    pub fn validate(&self) -> Result<(), CommerceError> {
        ensure(!self.name.trim().is_empty(), "Addon name is required")?;
        ensure(self.price.is_finite(), "Price must be a number")?;
        ensure(self.price >= 0.0, "Price cannot be negative")
    }
}

impl From<&Addon> for AddonPayload {
    fn from(addon: &Addon) -> Self {
        Self::new(addon.name.clone(), addon.price)
    }
}
