use super::{send_empty, send_json};
use crate::error::CommerceError;
use crate::ids::StoreId;
use crate::store::{Store, StoreForm};
use backoffice_data::FetchClient;
use std::sync::Arc;

/// CRUD over `/stores`.
#[derive(Debug, Clone)]
pub struct StoreService {
    client: Arc<FetchClient>,
}

impl StoreService {
    pub fn new(client: Arc<FetchClient>) -> Self {
        Self { client }
    }

    /// All stores visible to the operator, in server order.
    pub async fn get_stores(&self) -> Result<Vec<Store>, CommerceError> {
        tracing::debug!("listing stores");
        send_json(self.client.get("/stores").dispatch()).await
    }

    /// Create a store from the form; the logo, if any, is uploaded with it.
    pub async fn create_store(&self, form: &StoreForm) -> Result<Store, CommerceError> {
        form.validate()?;
        tracing::debug!(name = %form.name, "creating store");
        let pending = self
            .client
            .post("/stores")
            .multipart(form.to_multipart())
            .dispatch();
        send_json(pending).await
    }

    pub async fn update_store(&self, id: StoreId, form: &StoreForm) -> Result<Store, CommerceError> {
        form.validate()?;
        tracing::debug!(store_id = %id, "updating store");
        let pending = self
            .client
            .put(format!("/stores/{}", id))
            .multipart(form.to_multipart())
            .dispatch();
        send_json(pending).await
    }

    pub async fn delete_store(&self, id: StoreId) -> Result<(), CommerceError> {
        tracing::debug!(store_id = %id, "deleting store");
        send_empty(self.client.delete(format!("/stores/{}", id)).dispatch()).await
    }
}
