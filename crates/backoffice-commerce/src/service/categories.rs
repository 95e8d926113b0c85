use super::{send_empty, send_json};
use crate::catalog::{
    Addon, AddonPayload, AttributePayload, Category, CategoryAttribute, CategoryPayload,
    VariantAttribute,
};
use crate::error::CommerceError;
use crate::ids::{AddonId, AttributeId, CategoryId, StoreId, VariantAttributeId};
use backoffice_data::FetchClient;
use std::sync::Arc;

/// Categories and the resources hanging off them: attributes, addons and
/// variant attributes.
///
/// Create and update return the record exactly as the server sent it.
#[derive(Debug, Clone)]
pub struct CategoryService {
    client: Arc<FetchClient>,
}

impl CategoryService {
    pub fn new(client: Arc<FetchClient>) -> Self {
        Self { client }
    }

    // Categories

    pub async fn get_categories(&self) -> Result<Vec<Category>, CommerceError> {
        tracing::debug!("listing categories");
        send_json(self.client.get("/categories").dispatch()).await
    }

    pub async fn create_category(&self, name: &str) -> Result<Category, CommerceError> {
        let payload = CategoryPayload::new(name);
        payload.validate()?;
        tracing::debug!(name, "creating category");
        let pending = self.client.post("/categories").json(&payload)?.dispatch();
        send_json(pending).await
    }

    pub async fn update_category(
        &self,
        id: CategoryId,
        name: &str,
    ) -> Result<Category, CommerceError> {
        let payload = CategoryPayload::new(name);
        payload.validate()?;
        tracing::debug!(category_id = %id, "updating category");
        let pending = self
            .client
            .put(format!("/categories/{}", id))
            .json(&payload)?
            .dispatch();
        send_json(pending).await
    }

    pub async fn delete_category(&self, id: CategoryId) -> Result<(), CommerceError> {
        tracing::debug!(category_id = %id, "deleting category");
        send_empty(self.client.delete(format!("/categories/{}", id)).dispatch()).await
    }

    // Attributes

    pub async fn get_category_attributes(
        &self,
        category_id: CategoryId,
    ) -> Result<Vec<CategoryAttribute>, CommerceError> {
        tracing::debug!(%category_id, "listing attributes");
        let path = format!("/categories/{}/attributes", category_id);
        send_json(self.client.get(path).dispatch()).await
    }

    pub async fn create_attribute(
        &self,
        category_id: CategoryId,
        payload: &AttributePayload,
    ) -> Result<CategoryAttribute, CommerceError> {
        payload.validate()?;
        tracing::debug!(%category_id, name = %payload.name, "creating attribute");
        let path = format!("/categories/{}/attributes", category_id);
        send_json(self.client.post(path).json(payload)?.dispatch()).await
    }

    pub async fn update_attribute(
        &self,
        id: AttributeId,
        payload: &AttributePayload,
    ) -> Result<CategoryAttribute, CommerceError> {
        payload.validate()?;
        tracing::debug!(attribute_id = %id, "updating attribute");
        let path = format!("/attributes/{}", id);
        send_json(self.client.put(path).json(payload)?.dispatch()).await
    }

    pub async fn delete_attribute(&self, id: AttributeId) -> Result<(), CommerceError> {
        tracing::debug!(attribute_id = %id, "deleting attribute");
        send_empty(self.client.delete(format!("/attributes/{}", id)).dispatch()).await
    }

    // Addons

    pub async fn get_addons(
        &self,
        store_id: StoreId,
        category_id: CategoryId,
    ) -> Result<Vec<Addon>, CommerceError> {
        tracing::debug!(%store_id, %category_id, "listing addons");
        let path = addons_path(store_id, category_id);
        send_json(self.client.get(path).dispatch()).await
    }

    pub async fn create_addon(
        &self,
        store_id: StoreId,
        category_id: CategoryId,
        payload: &AddonPayload,
    ) -> Result<Addon, CommerceError> {
        payload.validate()?;
        tracing::debug!(%store_id, %category_id, name = %payload.name, "creating addon");
        let path = addons_path(store_id, category_id);
        send_json(self.client.post(path).json(payload)?.dispatch()).await
    }

    pub async fn update_addon(
        &self,
        id: AddonId,
        payload: &AddonPayload,
    ) -> Result<Addon, CommerceError> {
        payload.validate()?;
        tracing::debug!(addon_id = %id, "updating addon");
        let path = format!("/addons/{}", id);
        send_json(self.client.put(path).json(payload)?.dispatch()).await
    }

    pub async fn delete_addon(&self, id: AddonId) -> Result<(), CommerceError> {
        tracing::debug!(addon_id = %id, "deleting addon");
        send_empty(self.client.delete(format!("/addons/{}", id)).dispatch()).await
    }

    // Variant attributes

    pub async fn get_variant_attributes(
        &self,
        category_id: CategoryId,
    ) -> Result<Vec<VariantAttribute>, CommerceError> {
        tracing::debug!(%category_id, "listing variant attributes");
        let path = format!("/categories/{}/variant-attributes", category_id);
        send_json(self.client.get(path).dispatch()).await
    }

    pub async fn create_variant_attribute(
        &self,
        category_id: CategoryId,
        info: &VariantAttribute,
    ) -> Result<VariantAttribute, CommerceError> {
        info.validate()?;
        tracing::debug!(%category_id, name = %info.name, "creating variant attribute");
        let path = format!("/categories/{}/variant-attributes", category_id);
        send_json(self.client.post(path).json(info)?.dispatch()).await
    }

    pub async fn update_variant_attribute(
        &self,
        id: VariantAttributeId,
        info: &VariantAttribute,
    ) -> Result<VariantAttribute, CommerceError> {
        info.validate()?;
        tracing::debug!(variant_attribute_id = %id, "updating variant attribute");
        let path = format!("/variant-attributes/{}", id);
        send_json(self.client.put(path).json(info)?.dispatch()).await
    }

    pub async fn delete_variant_attribute(
        &self,
        id: VariantAttributeId,
    ) -> Result<(), CommerceError> {
        tracing::debug!(variant_attribute_id = %id, "deleting variant attribute");
        let path = format!("/variant-attributes/{}", id);
        send_empty(self.client.delete(path).dispatch()).await
    }
}

fn addons_path(store_id: StoreId, category_id: CategoryId) -> String {
    format!("/stores/{}/categories/{}/addons", store_id, category_id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{AttributeType, AttributeValue};
    use crate::service::testing::{Fixture, BASE};
    use backoffice_data::{Method, Response};
    use serde_json::json;
    use std::sync::Mutex;

    fn category(id: i64, name: &str) -> serde_json::Value {
        json!({"id": id, "name": name, "created_at": "2024-05-01T10:00:00Z", "updated_at": "2024-05-01T10:00:00Z"})
    }

    // === Categories ===

    #[tokio::test]
    async fn test_get_categories_scoped_to_selected_store() {
        let fx = Fixture::new();
        fx.select(3, "Acme");
        fx.mock.on_json(
            Method::Get,
            "/categories",
            200,
            &json!([category(2, "Lamps"), category(1, "Chairs")]),
        );

        let categories = CategoryService::new(fx.client.clone())
            .get_categories()
            .await
            .unwrap();

        let names: Vec<&str> = categories.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Lamps", "Chairs"]);
        assert_eq!(fx.last_store_header().as_deref(), Some("3"));
    }

    #[tokio::test]
    async fn test_create_category_body() {
        let fx = Fixture::new();
        fx.mock
            .on_json(Method::Post, "/categories", 201, &category(5, "Tables"));

        let created = CategoryService::new(fx.client.clone())
            .create_category("Tables")
            .await
            .unwrap();

        assert_eq!(created.id, CategoryId::new(5));
        let sent: serde_json::Value = fx.mock.last_request().unwrap().json().unwrap();
        assert_eq!(sent, json!({"name": "Tables"}));
    }

    #[tokio::test]
    async fn test_blank_category_name_rejected_locally() {
        let fx = Fixture::new();
        let service = CategoryService::new(fx.client.clone());

        assert!(service.create_category("  ").await.unwrap_err().is_validation());
        assert!(service
            .update_category(CategoryId::new(1), "")
            .await
            .unwrap_err()
            .is_validation());
        assert_eq!(fx.mock.request_count(), 0);
    }

    /// A tiny stateful server: POST appends, DELETE removes, GET lists.
    fn stateful_categories(fx: &Fixture) {
        let rows: Arc<Mutex<Vec<serde_json::Value>>> = Arc::new(Mutex::new(Vec::new()));
        let next_id = Arc::new(Mutex::new(1i64));
        let prefix = BASE.trim_end_matches('/').to_string();

        fx.mock.handle(move |req| {
            let path = req.url().strip_prefix(prefix.as_str()).unwrap_or(req.url());
            let mut rows = rows.lock().unwrap();
            match (req.method(), path) {
                (Method::Get, "/categories") => Response::with_json(200, &*rows).unwrap(),
                (Method::Post, "/categories") => {
                    let body: serde_json::Value = req.json().unwrap();
                    let mut id = next_id.lock().unwrap();
                    let row = category(*id, body["name"].as_str().unwrap());
                    *id += 1;
                    rows.push(row.clone());
                    Response::with_json(201, &row).unwrap()
                }
                (Method::Delete, p) if p.starts_with("/categories/") => {
                    let id: i64 = p["/categories/".len()..].parse().unwrap();
                    rows.retain(|r| r["id"] != id);
                    Response::empty(204)
                }
                _ => Response::empty(404),
            }
        });
    }

    #[tokio::test]
    async fn test_create_then_list_then_delete() {
        let fx = Fixture::new();
        stateful_categories(&fx);
        let service = CategoryService::new(fx.client.clone());

        let lamps = service.create_category("Lamps").await.unwrap();
        service.create_category("Chairs").await.unwrap();
        let listed = service.get_categories().await.unwrap();
        assert!(listed.contains(&lamps));
        assert_eq!(listed.len(), 2);

        service.delete_category(lamps.id).await.unwrap();
        let listed = service.get_categories().await.unwrap();
        assert!(listed.iter().all(|c| c.id != lamps.id));
        assert_eq!(listed.len(), 1);
    }

    #[tokio::test]
    async fn test_server_error_message_surfaces() {
        let fx = Fixture::new();
        fx.mock.on_json(
            Method::Put,
            "/categories/2",
            422,
            &json!({"error": "Category name already exists"}),
        );

        let err = CategoryService::new(fx.client.clone())
            .update_category(CategoryId::new(2), "Lamps")
            .await
            .unwrap_err();

        assert_eq!(err.status(), Some(422));
        assert_eq!(err.server_message(), Some("Category name already exists"));
    }

    #[tokio::test]
    async fn test_generic_message_without_error_body() {
        let fx = Fixture::new();
        fx.mock.on(Method::Delete, "/categories/2", Response::empty(500));

        let err = CategoryService::new(fx.client.clone())
            .delete_category(CategoryId::new(2))
            .await
            .unwrap_err();

        assert_eq!(err.server_message(), Some("Request failed with status 500"));
    }

    #[tokio::test]
    async fn test_transport_failure() {
        let fx = Fixture::new();
        fx.mock.fail_with("connection refused");

        let err = CategoryService::new(fx.client.clone())
            .get_categories()
            .await
            .unwrap_err();

        assert_eq!(err.status(), None);
        assert!(matches!(err, CommerceError::Fetch(ref e) if e.is_transport()));
    }

    // === Attributes ===

    #[tokio::test]
    async fn test_create_attribute_returns_server_record_unmodified() {
        let fx = Fixture::new();
        let echoed = json!({
            "id": 42,
            "category_id": 5,
            "name": "Color",
            "type": "select",
            "is_required": true,
            "display_order": 0,
            "predefined_values": [{"value": "Red"}],
            "created_at": "2024-05-01T10:00:00Z"
        });
        fx.mock
            .on_json(Method::Post, "/categories/5/attributes", 201, &echoed);

        let payload = AttributePayload::new("Color", AttributeType::Select)
            .required(true)
            .with_values(["Red"]);
        let created = CategoryService::new(fx.client.clone())
            .create_attribute(CategoryId::new(5), &payload)
            .await
            .unwrap();

        assert_eq!(created.id, AttributeId::new(42));
        assert_eq!(serde_json::to_value(&created).unwrap(), echoed);

        let sent: serde_json::Value = fx.mock.last_request().unwrap().json().unwrap();
        assert_eq!(sent["type"], "select");
        assert_eq!(sent["predefined_values"], json!([{"value": "Red"}]));
    }

    #[tokio::test]
    async fn test_attribute_routes() {
        let fx = Fixture::new();
        let attribute = json!({"id": 7, "name": "Width", "type": "number", "unit": "cm", "is_required": false, "display_order": 1});
        fx.mock
            .on_json(Method::Get, "/categories/5/attributes", 200, &json!([attribute]));
        fx.mock.on_json(Method::Put, "/attributes/7", 200, &attribute);
        fx.mock.on(Method::Delete, "/attributes/7", Response::empty(204));
        let service = CategoryService::new(fx.client.clone());

        let listed = service
            .get_category_attributes(CategoryId::new(5))
            .await
            .unwrap();
        assert_eq!(listed[0].unit.as_deref(), Some("cm"));

        let updated = service
            .update_attribute(listed[0].id, &AttributePayload::from(&listed[0]))
            .await
            .unwrap();
        assert_eq!(updated, listed[0]);

        service.delete_attribute(AttributeId::new(7)).await.unwrap();
        assert_eq!(fx.mock.request_count(), 3);
    }

    // === Addons ===

    #[tokio::test]
    async fn test_addon_routes() {
        let fx = Fixture::new();
        fx.select(3, "Acme");
        let addon = json!({"id": 9, "store_id": 3, "category_id": 5, "name": "Gift wrap", "price": 2.5, "created_at": "t0", "updated_at": "t0"});
        fx.mock
            .on_json(Method::Get, "/stores/3/categories/5/addons", 200, &json!([addon]));
        fx.mock
            .on_json(Method::Post, "/stores/3/categories/5/addons", 201, &addon);
        fx.mock.on_json(Method::Put, "/addons/9", 200, &addon);
        fx.mock.on(Method::Delete, "/addons/9", Response::empty(200));
        let service = CategoryService::new(fx.client.clone());
        let (store, cat) = (StoreId::new(3), CategoryId::new(5));

        assert_eq!(service.get_addons(store, cat).await.unwrap().len(), 1);

        let payload = AddonPayload::new("Gift wrap", 2.5);
        let created = service.create_addon(store, cat, &payload).await.unwrap();
        let sent: serde_json::Value = fx.mock.last_request().unwrap().json().unwrap();
        assert_eq!(sent, json!({"name": "Gift wrap", "price": 2.5}));

        service.update_addon(created.id, &payload).await.unwrap();
        service.delete_addon(created.id).await.unwrap();
        assert!(fx
            .mock
            .requests()
            .iter()
            .all(|r| r.header("X-Store-Id") == Some("3")));
    }

    #[tokio::test]
    async fn test_negative_addon_price_rejected() {
        let fx = Fixture::new();
        let err = CategoryService::new(fx.client.clone())
            .create_addon(
                StoreId::new(3),
                CategoryId::new(5),
                &AddonPayload::new("Refund", -5.0),
            )
            .await
            .unwrap_err();

        assert!(err.is_validation());
        assert_eq!(fx.mock.request_count(), 0);
    }

    // === Variant attributes ===

    #[tokio::test]
    async fn test_variant_attribute_routes() {
        let fx = Fixture::new();
        let saved = json!({"id": 11, "category_id": 5, "name": "Size", "type": "select", "unit": null, "display_order": 0,
            "predefined_values": [{"value": "S", "display_order": 0}]});
        fx.mock.on_json(
            Method::Post,
            "/categories/5/variant-attributes",
            201,
            &saved,
        );
        fx.mock.on_json(
            Method::Get,
            "/categories/5/variant-attributes",
            200,
            &json!([saved]),
        );
        fx.mock
            .on_json(Method::Put, "/variant-attributes/11", 200, &saved);
        fx.mock
            .on(Method::Delete, "/variant-attributes/11", Response::empty(204));
        let service = CategoryService::new(fx.client.clone());

        let info = VariantAttribute::new("Size", AttributeType::Select)
            .with_values(vec![AttributeValue::new("S", 0)]);
        let created = service
            .create_variant_attribute(CategoryId::new(5), &info)
            .await
            .unwrap();
        assert_eq!(created.id, Some(VariantAttributeId::new(11)));

        let listed = service
            .get_variant_attributes(CategoryId::new(5))
            .await
            .unwrap();
        assert_eq!(listed, vec![created.clone()]);

        service
            .update_variant_attribute(VariantAttributeId::new(11), &created)
            .await
            .unwrap();
        service
            .delete_variant_attribute(VariantAttributeId::new(11))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_variant_attribute_validation() {
        let fx = Fixture::new();
        let info = VariantAttribute::new("Size", AttributeType::Text).with_display_order(-1);

        let err = CategoryService::new(fx.client.clone())
            .update_variant_attribute(VariantAttributeId::new(1), &info)
            .await
            .unwrap_err();

        assert!(err.is_validation());
        assert_eq!(fx.mock.request_count(), 0);
    }
}
