//! Attributes that distinguish the variants of a product.

use crate::catalog::AttributeType;
use crate::error::{ensure, CommerceError};
use crate::ids::{CategoryId, VariantAttributeId};
use serde::{Deserialize, Serialize};

/// One allowed value of a `select` variant attribute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeValue {
    pub value: String,
    pub display_order: i32,
}

impl AttributeValue {
    pub fn new(value: impl Into<String>, display_order: i32) -> Self {
        Self {
            value: value.into(),
            display_order,
        }
    }
}

/// A variant attribute.
///
/// The same shape is used for requests and responses; `id` and
/// `category_id` are only present once the server has stored it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariantAttribute {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<VariantAttributeId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_id: Option<CategoryId>,
    pub name: String,
    #[serde(rename = "type")]
    pub attribute_type: AttributeType,
    #[serde(default)]
    pub unit: Option<String>,
    pub display_order: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub predefined_values: Option<Vec<AttributeValue>>,
}

impl VariantAttribute {
    /// A new, unsaved variant attribute.
    pub fn new(name: impl Into<String>, attribute_type: AttributeType) -> Self {
        Self {
            id: None,
            category_id: None,
            name: name.into(),
            attribute_type,
            unit: None,
            display_order: 0,
            predefined_values: None,
        }
    }

    pub fn with_unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = Some(unit.into());
        self
    }

    pub fn with_display_order(mut self, display_order: i32) -> Self {
        self.display_order = display_order;
        self
    }

    pub fn with_values(mut self, values: Vec<AttributeValue>) -> Self {
        self.predefined_values = Some(values);
        self
    }

    pub fn validate(&self) -> Result<(), CommerceError> {
        ensure(!self.name.trim().is_empty(), "Attribute name is required")?;
        ensure(self.display_order >= 0, "Display order cannot be negative")
    }
}
