//! Category types for product organization.

use crate::error::{ensure, CommerceError};
use crate::ids::CategoryId;
use serde::{Deserialize, Serialize};

/// A product category.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Category {
    /// Unique category identifier.
    pub id: CategoryId,
    /// Category name.
    pub name: String,
    /// Server timestamp of creation.
    pub created_at: String,
    /// Server timestamp of last update.
    pub updated_at: String,
}

/// Body of category create and update requests.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CategoryPayload {
    pub name: String,
}

impl CategoryPayload {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    pub fn validate(&self) -> Result<(), CommerceError> {
        ensure(!self.name.trim().is_empty(), "Category name is required")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_deserialize() {
        let json = r#"{"id": 1, "name": "Lamps", "created_at": "2024-01-01T00:00:00Z", "updated_at": "2024-01-02T00:00:00Z"}"#;
        let category: Category = serde_json::from_str(json).unwrap();

        assert_eq!(category.id, CategoryId::new(1));
        assert_eq!(category.name, "Lamps");
        assert_eq!(category.updated_at, "2024-01-02T00:00:00Z");
    }

    #[test]
    fn test_payload_serializes_name_only() {
        let json = serde_json::to_string(&CategoryPayload::new("Chairs")).unwrap();
        assert_eq!(json, r#"{"name":"Chairs"}"#);
    }

    #[test]
    fn test_payload_rejects_blank_name() {
        assert!(CategoryPayload::new("   ").validate().is_err());
        assert!(CategoryPayload::new("Chairs").validate().is_ok());
    }
}
