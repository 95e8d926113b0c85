//! Product records and the product creation form.

use crate::error::{ensure, CommerceError};
use crate::ids::ProductId;
use crate::upload::ImageUpload;
use backoffice_data::MultipartForm;
use serde::{Deserialize, Serialize};

/// A product as returned by the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    /// Merchant reference (SKU-like).
    #[serde(rename = "ref")]
    pub reference: String,
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub picture: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

/// Physical and pricing data of one product variant.
///
/// Dimensions are in centimetres, weight in kilograms. Unset fields are
/// left out of the request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VariantDetails {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub depth: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fabric_cost: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chaine_cost: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub electrical_cost: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shipping_cost: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selling_price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cost_of_revenue: Option<f64>,
}

impl VariantDetails {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn dimensions(mut self, width: f64, height: f64, depth: f64) -> Self {
        self.width = Some(width);
        self.height = Some(height);
        self.depth = Some(depth);
        self
    }

    pub fn weight(mut self, weight: f64) -> Self {
        self.weight = Some(weight);
        self
    }

    pub fn selling_price(mut self, price: f64) -> Self {
        self.selling_price = Some(price);
        self
    }

    pub fn validate(&self) -> Result<(), CommerceError> {
        let measures = [
            (self.width, "Width must be at least 0.1cm"),
            (self.height, "Height must be at least 0.1cm"),
            (self.depth, "Depth must be at least 0.1cm"),
            (self.weight, "Weight must be at least 0.1kg"),
        ];
        for (value, message) in measures {
            check_min(value, 0.1, message)?;
        }

        let costs = [
            self.fabric_cost,
            self.chaine_cost,
            self.electrical_cost,
            self.shipping_cost,
            self.cost_of_revenue,
        ];
        for cost in costs {
            check_min(cost, 0.0, "Cost cannot be negative")?;
        }

        check_min(self.selling_price, 0.01, "Price must be at least 0.01")
    }
}

fn check_min(value: Option<f64>, min: f64, message: &str) -> Result<(), CommerceError> {
    match value {
        // NaN fails the comparison and is rejected too
        Some(v) => ensure(v >= min, message),
        None => Ok(()),
    }
}

/// Data entered in the create product form.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductForm {
    pub reference: String,
    pub name: String,
    pub description: String,
    pub tags: Vec<String>,
    pub picture: Option<ImageUpload>,
    pub variants: Vec<VariantDetails>,
}

impl ProductForm {
    pub fn new(
        reference: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            reference: reference.into(),
            name: name.into(),
            description: description.into(),
            tags: Vec::new(),
            picture: None,
            variants: Vec::new(),
        }
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    pub fn with_picture(mut self, picture: ImageUpload) -> Self {
        self.picture = Some(picture);
        self
    }

    pub fn with_variant(mut self, variant: VariantDetails) -> Self {
        self.variants.push(variant);
        self
    }

    pub fn validate(&self) -> Result<(), CommerceError> {
        ensure(!self.reference.is_empty(), "Reference is required")?;
        ensure(!self.name.is_empty(), "Name is required")?;
        ensure(
            self.description.chars().count() >= 10,
            "Description must be at least 10 characters",
        )?;
        ensure(!self.tags.is_empty(), "At least one tag is required")?;
        ensure(!self.variants.is_empty(), "At least one variant is required")?;
        for variant in &self.variants {
            variant.validate()?;
        }
        if let Some(picture) = &self.picture {
            picture.validate()?;
        }
        Ok(())
    }

    /// Encode as the multipart body the products endpoint expects.
    ///
    /// `tags` and `variants` travel as JSON-encoded text fields.
    pub fn to_multipart(&self) -> Result<MultipartForm, CommerceError> {
        let mut form = MultipartForm::new()
            .text("reference", self.reference.clone())
            .text("name", self.name.clone())
            .text("description", self.description.clone())
            .json("tags", &self.tags)?;

        if let Some(picture) = &self.picture {
            form = form.file(
                "picture",
                picture.file_name.clone(),
                picture.content_type.clone(),
                picture.bytes.clone(),
            );
        }

        Ok(form.json("variants", &self.variants)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_form() -> ProductForm {
        ProductForm::new("LMP-001", "Desk lamp", "A brass desk lamp with linen shade")
            .with_tag("lighting")
            .with_variant(VariantDetails::new().dimensions(20.0, 45.0, 20.0).selling_price(89.0))
    }

    // === Product record ===

    #[test]
    fn test_product_reference_wire_name() {
        let json = r#"{"id": 7, "ref": "LMP-001", "name": "Desk lamp", "description": "Brass", "tags": ["lighting"]}"#;
        let product: Product = serde_json::from_str(json).unwrap();

        assert_eq!(product.reference, "LMP-001");
        assert_eq!(product.picture, None);

        let value = serde_json::to_value(&product).unwrap();
        assert_eq!(value["ref"], "LMP-001");
        assert!(value.get("reference").is_none());
    }

    // === Validation ===

    #[test]
    fn test_valid_form() {
        assert!(valid_form().validate().is_ok());
    }

    #[test]
    fn test_short_description() {
        let mut form = valid_form();
        form.description = "Too short".into();
        assert!(form.validate().is_err());
    }

    #[test]
    fn test_requires_tag_and_variant() {
        let mut form = valid_form();
        form.tags.clear();
        assert!(form.validate().is_err());

        let mut form = valid_form();
        form.variants.clear();
        assert!(form.validate().is_err());
    }

    #[test]
    fn test_variant_bounds() {
        assert!(VariantDetails::new().validate().is_ok());
        assert!(VariantDetails::new().weight(0.05).validate().is_err());
        assert!(VariantDetails::new().selling_price(0.0).validate().is_err());
        assert!(VariantDetails::new().selling_price(0.01).validate().is_ok());

        let negative_cost = VariantDetails {
            shipping_cost: Some(-2.0),
            ..VariantDetails::default()
        };
        assert!(negative_cost.validate().is_err());

        let free_fabric = VariantDetails {
            fabric_cost: Some(0.0),
            ..VariantDetails::default()
        };
        assert!(free_fabric.validate().is_ok());
    }

    #[test]
    fn test_bad_picture_rejected() {
        let form = valid_form().with_picture(ImageUpload::new("a.gif", "image/gif", vec![1]));
        assert!(form.validate().is_err());
    }

    // === Multipart ===

    #[test]
    fn test_multipart_fields() {
        let form = valid_form()
            .with_picture(ImageUpload::new("lamp.jpg", "image/jpeg", vec![1, 2]))
            .to_multipart()
            .unwrap();

        assert_eq!(form.text_value("reference"), Some("LMP-001"));
        assert_eq!(form.text_value("tags"), Some(r#"["lighting"]"#));
        assert_eq!(form.file_value("picture").unwrap().file_name, "lamp.jpg");

        let variants: serde_json::Value =
            serde_json::from_str(form.text_value("variants").unwrap()).unwrap();
        assert_eq!(variants[0]["selling_price"], 89.0);
        assert!(variants[0].get("weight").is_none());
    }
}
