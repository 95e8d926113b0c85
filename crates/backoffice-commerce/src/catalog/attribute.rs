//! Attributes describing the products of a category.

use crate::error::{ensure, CommerceError};
use crate::ids::{AttributeId, CategoryId};
use serde::{Deserialize, Serialize};

/// Kind of value an attribute holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum AttributeType {
    #[default]
    Text,
    Number,
    Select,
}

impl AttributeType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AttributeType::Text => "text",
            AttributeType::Number => "number",
            AttributeType::Select => "select",
        }
    }
}

/// One allowed value of a `select` attribute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PredefinedValue {
    pub value: String,
}

impl PredefinedValue {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
        }
    }
}

/// An attribute attached to a category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryAttribute {
    pub id: AttributeId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_id: Option<CategoryId>,
    pub name: String,
    #[serde(rename = "type")]
    pub attribute_type: AttributeType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    pub is_required: bool,
    pub display_order: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub predefined_values: Option<Vec<PredefinedValue>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

/// Body of attribute create and update requests.
///
/// The full edited attribute is sent on update, not a patch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributePayload {
    pub name: String,
    #[serde(rename = "type")]
    pub attribute_type: AttributeType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    pub is_required: bool,
    pub display_order: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub predefined_values: Option<Vec<PredefinedValue>>,
}

impl AttributePayload {
    pub fn new(name: impl Into<String>, attribute_type: AttributeType) -> Self {
        Self {
            name: name.into(),
            attribute_type,
            unit: None,
            is_required: false,
            display_order: 0,
            predefined_values: None,
        }
    }

    pub fn required(mut self, is_required: bool) -> Self {
        self.is_required = is_required;
        self
    }

    pub fn with_unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = Some(unit.into());
        self
    }

    pub fn with_display_order(mut self, display_order: i32) -> Self {
        self.display_order = display_order;
        self
    }

    pub fn with_values<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.predefined_values = Some(values.into_iter().map(PredefinedValue::new).collect());
        self
    }

    pub fn validate(&self) -> Result<(), CommerceError> {
        ensure(!self.name.trim().is_empty(), "Attribute name is required")?;
        ensure(self.display_order >= 0, "Display order cannot be negative")
    }
}

impl From<&CategoryAttribute> for AttributePayload {
    fn from(attribute: &CategoryAttribute) -> Self {
        Self {
            name: attribute.name.clone(),
            attribute_type: attribute.attribute_type,
            unit: attribute.unit.clone(),
            is_required: attribute.is_required,
            display_order: attribute.display_order,
            predefined_values: attribute.predefined_values.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_wire_names() {
        assert_eq!(serde_json::to_string(&AttributeType::Select).unwrap(), r#""select""#);
        let t: AttributeType = serde_json::from_str(r#""number""#).unwrap();
        assert_eq!(t, AttributeType::Number);
        assert_eq!(AttributeType::Text.as_str(), "text");
    }

    #[test]
    fn test_payload_wire_shape() {
        let payload = AttributePayload::new("Color", AttributeType::Select)
            .required(true)
            .with_values(["Red"]);

        let value = serde_json::to_value(&payload).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "name": "Color",
                "type": "select",
                "is_required": true,
                "display_order": 0,
                "predefined_values": [{"value": "Red"}]
            })
        );
    }

    #[test]
    fn test_attribute_without_optional_fields() {
        let json = r#"{"id": 4, "name": "Width", "type": "number", "is_required": false, "display_order": 2}"#;
        let attribute: CategoryAttribute = serde_json::from_str(json).unwrap();

        assert_eq!(attribute.category_id, None);
        assert_eq!(attribute.predefined_values, None);
        assert_eq!(attribute.display_order, 2);
    }

    #[test]
    fn test_payload_from_attribute() {
        let json = r#"{"id": 4, "category_id": 2, "name": "Width", "type": "number", "unit": "cm", "is_required": true, "display_order": 1}"#;
        let attribute: CategoryAttribute = serde_json::from_str(json).unwrap();
        let payload = AttributePayload::from(&attribute);

        assert_eq!(payload.unit.as_deref(), Some("cm"));
        assert!(payload.is_required);
    }

    #[test]
    fn test_payload_validation() {
        assert!(AttributePayload::new("", AttributeType::Text).validate().is_err());
        assert!(AttributePayload::new("Size", AttributeType::Text)
            .with_display_order(-1)
            .validate()
            .is_err());
        assert!(AttributePayload::new("Size", AttributeType::Text)
            .with_unit("cm")
            .validate()
            .is_ok());
    }
}
