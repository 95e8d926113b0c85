//! Service facades over the REST resources.
//!
//! Each service holds nothing but a shared [`FetchClient`]; the store
//! scoping is applied by the client on every call.

mod categories;
mod products;
mod stores;

pub use categories::CategoryService;
pub use products::ProductService;
pub use stores::StoreService;

use crate::error::CommerceError;
use backoffice_data::PendingRequest;
use serde::de::DeserializeOwned;

/// Send a dispatched request and decode the JSON body of a 2xx answer.
pub(crate) async fn send_json<T: DeserializeOwned>(
    pending: PendingRequest,
) -> Result<T, CommerceError> {
    let response = pending.send().await?.error_for_status()?;
    Ok(response.json()?)
}

/// Send a dispatched request, discarding the body of a 2xx answer.
pub(crate) async fn send_empty(pending: PendingRequest) -> Result<(), CommerceError> {
    pending.send().await?.error_for_status()?;
    Ok(())
}
