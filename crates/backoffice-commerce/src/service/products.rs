use super::send_json;
use crate::catalog::{Product, ProductForm};
use crate::error::CommerceError;
use backoffice_data::FetchClient;
use std::sync::Arc;

/// Products of the active store.
#[derive(Debug, Clone)]
pub struct ProductService {
    client: Arc<FetchClient>,
}

impl ProductService {
    pub fn new(client: Arc<FetchClient>) -> Self {
        Self { client }
    }

    pub async fn get_products(&self) -> Result<Vec<Product>, CommerceError> {
        tracing::debug!("listing products");
        send_json(self.client.get("/products").dispatch()).await
    }

    /// Create a product with its variants in a single multipart request.
    pub async fn create_product(&self, form: &ProductForm) -> Result<Product, CommerceError> {
        form.validate()?;
        tracing::debug!(
            reference = %form.reference,
            variants = form.variants.len(),
            "creating product"
        );
        let body = form.to_multipart()?;
        send_json(self.client.post("/products").multipart(body).dispatch()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::VariantDetails;
    use crate::ids::ProductId;
    use crate::service::testing::Fixture;
    use backoffice_data::Method;
    use serde_json::json;

    fn lamp_form() -> ProductForm {
        ProductForm::new("LMP-001", "Desk lamp", "A brass desk lamp with linen shade")
            .with_tag("lighting")
            .with_tag("brass")
            .with_variant(VariantDetails::new().dimensions(20.0, 45.0, 20.0).weight(1.2))
    }

    #[tokio::test]
    async fn test_create_product_multipart() {
        let fx = Fixture::new();
        fx.select(3, "Acme");
        fx.mock.on_json(
            Method::Post,
            "/products",
            201,
            &json!({"id": 12, "ref": "LMP-001", "name": "Desk lamp",
                    "description": "A brass desk lamp with linen shade", "tags": ["lighting", "brass"]}),
        );

        let product = ProductService::new(fx.client.clone())
            .create_product(&lamp_form())
            .await
            .unwrap();

        assert_eq!(product.id, ProductId::new(12));
        let request = fx.mock.last_request().unwrap();
        assert_eq!(request.header("X-Store-Id"), Some("3"));

        let body = request.multipart().unwrap();
        assert_eq!(body.text_value("name"), Some("Desk lamp"));
        assert_eq!(body.text_value("tags"), Some(r#"["lighting","brass"]"#));
        assert!(body.file_value("picture").is_none());
        let variants: serde_json::Value =
            serde_json::from_str(body.text_value("variants").unwrap()).unwrap();
        assert_eq!(variants.as_array().unwrap().len(), 1);
        assert_eq!(variants[0]["weight"], 1.2);
    }

    #[tokio::test]
    async fn test_create_product_validation() {
        let fx = Fixture::new();
        let mut form = lamp_form();
        form.tags.clear();

        let err = ProductService::new(fx.client.clone())
            .create_product(&form)
            .await
            .unwrap_err();

        assert!(err.is_validation());
        assert_eq!(fx.mock.request_count(), 0);
    }

    #[tokio::test]
    async fn test_get_products_in_server_order() {
        let fx = Fixture::new();
        fx.mock.on_json(
            Method::Get,
            "/products",
            200,
            &json!([
                {"id": 2, "ref": "B", "name": "Bench", "description": "Oak bench for two", "tags": []},
                {"id": 1, "ref": "A", "name": "Armchair", "description": "Linen armchair", "tags": ["seating"]}
            ]),
        );

        let products = ProductService::new(fx.client.clone())
            .get_products()
            .await
            .unwrap();

        let refs: Vec<&str> = products.iter().map(|p| p.reference.as_str()).collect();
        assert_eq!(refs, vec!["B", "A"]);
    }
}
