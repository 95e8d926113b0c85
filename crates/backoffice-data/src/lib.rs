//! Store-scoped HTTP request dispatch for the back office.
//!
//! Every outbound call goes through one [`FetchClient`]. The client is built
//! once with a fixed base URL and the shared [`SelectionStore`]; whenever a
//! request is dispatched it reads the active store and, if one is selected,
//! attaches its id as the store-scoping header.
//!
//! # Example
//!
//! ```rust,ignore
//! use backoffice_data::{FetchClient, HttpTransport};
//! use std::sync::Arc;
//!
//! let client = FetchClient::new(
//!     "http://localhost:8001/api/",
//!     selection.clone(),
//!     Arc::new(HttpTransport::new()),
//! );
//!
//! // GET {base}/categories with X-Store-Id set from the selection
//! let categories: Vec<Category> = client
//!     .get("/categories")
//!     .send()
//!     .await?
//!     .error_for_status()?
//!     .json()?;
//!
//! // POST with JSON body
//! let created: Category = client
//!     .post("/categories")
//!     .json(&serde_json::json!({ "name": "Lamps" }))?
//!     .send()
//!     .await?
//!     .error_for_status()?
//!     .json()?;
//! ```
//!
//! The store id is read when the request is dispatched, not when the calling
//! action started. A request already dispatched keeps the id it was given
//! even if the operator switches stores before it completes.

mod error;
#[cfg(any(test, feature = "mock"))]
pub mod mock;
mod multipart;
mod pending;
mod request;
mod response;
mod transport;

pub use error::FetchError;
pub use multipart::{FilePart, MultipartForm, PartValue};
pub use pending::{PendingRequest, RequestId};
pub use request::{Body, Method, Request, RequestBuilder};
pub use response::Response;
pub use transport::{HttpTransport, Transport};

use backoffice_cache::SelectionStore;
use std::collections::HashMap;
use std::sync::Arc;

/// Header carrying the active store id unless configured otherwise.
pub const DEFAULT_STORE_HEADER: &str = "X-Store-Id";

/// HTTP client that scopes every request to the active store.
pub struct FetchClient {
    base_url: String,
    store_header: String,
    default_headers: HashMap<String, String>,
    selection: Arc<SelectionStore>,
    transport: Arc<dyn Transport>,
}

impl std::fmt::Debug for FetchClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FetchClient")
            .field("base_url", &self.base_url)
            .field("store_header", &self.store_header)
            .field("default_headers", &self.default_headers)
            .finish_non_exhaustive()
    }
}

impl FetchClient {
    /// Create a client rooted at `base_url`.
    pub fn new(
        base_url: impl Into<String>,
        selection: Arc<SelectionStore>,
        transport: Arc<dyn Transport>,
    ) -> Self {
        Self {
            base_url: base_url.into(),
            store_header: DEFAULT_STORE_HEADER.to_string(),
            default_headers: HashMap::from([(
                "Accept".to_string(),
                "application/json".to_string(),
            )]),
            selection,
            transport,
        }
    }

    /// Use a different name for the store-scoping header.
    pub fn with_store_header(mut self, name: impl Into<String>) -> Self {
        self.store_header = name.into();
        self
    }

    /// Add a default header that will be included in all requests.
    pub fn with_default_header(
        mut self,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.default_headers.insert(key.into(), value.into());
        self
    }

    /// Base URL every relative path is appended to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Name of the store-scoping header.
    pub fn store_header(&self) -> &str {
        &self.store_header
    }

    /// The selection this client reads from.
    pub fn selection(&self) -> &Arc<SelectionStore> {
        &self.selection
    }

    /// Create a GET request.
    pub fn get(&self, path: impl AsRef<str>) -> ClientRequestBuilder<'_> {
        self.request(Method::Get, path)
    }

    /// Create a POST request.
    pub fn post(&self, path: impl AsRef<str>) -> ClientRequestBuilder<'_> {
        self.request(Method::Post, path)
    }

    /// Create a PUT request.
    pub fn put(&self, path: impl AsRef<str>) -> ClientRequestBuilder<'_> {
        self.request(Method::Put, path)
    }

    /// Create a PATCH request.
    pub fn patch(&self, path: impl AsRef<str>) -> ClientRequestBuilder<'_> {
        self.request(Method::Patch, path)
    }

    /// Create a DELETE request.
    pub fn delete(&self, path: impl AsRef<str>) -> ClientRequestBuilder<'_> {
        self.request(Method::Delete, path)
    }

    /// Create a request with a custom method.
    pub fn request(&self, method: Method, path: impl AsRef<str>) -> ClientRequestBuilder<'_> {
        let builder = RequestBuilder::new(method, self.url_for(path.as_ref()))
            .headers(self.default_headers.clone());

        ClientRequestBuilder {
            client: self,
            builder,
        }
    }

    /// Resolve `path` against the base URL.
    pub fn url_for(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            return path.to_string();
        }
        let base = self.base_url.trim_end_matches('/');
        if path.starts_with('/') {
            format!("{}{}", base, path)
        } else {
            format!("{}/{}", base, path)
        }
    }

    fn dispatch(&self, builder: RequestBuilder) -> PendingRequest {
        let id = RequestId::next();
        let store_id = self.selection.store_id();

        let builder = match store_id {
            Some(store_id) => builder.header(self.store_header.clone(), store_id.to_string()),
            None => builder,
        };
        let request = builder.build();

        tracing::debug!(
            request_id = %id,
            method = %request.method(),
            url = %request.url(),
            store_id = ?store_id,
            "dispatching request"
        );

        PendingRequest::new(id, store_id, request, self.transport.clone())
    }
}

/// A request builder bound to a client.
pub struct ClientRequestBuilder<'a> {
    client: &'a FetchClient,
    builder: RequestBuilder,
}

impl<'a> ClientRequestBuilder<'a> {
    /// Add a header to the request.
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.builder = self.builder.header(key, value);
        self
    }

    /// Set the request body as raw bytes.
    pub fn body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.builder = self.builder.body(body);
        self
    }

    /// Set the request body as JSON.
    pub fn json<T: serde::Serialize>(mut self, value: &T) -> Result<Self, FetchError> {
        self.builder = self.builder.json(value)?;
        Ok(self)
    }

    /// Set the request body as a multipart form.
    pub fn multipart(mut self, form: MultipartForm) -> Self {
        self.builder = self.builder.multipart(form);
        self
    }

    /// Read the active store, attach the scoping header and return a handle
    /// for the outstanding request.
    pub fn dispatch(self) -> PendingRequest {
        self.client.dispatch(self.builder)
    }

    /// Dispatch and wait for the response.
    pub async fn send(self) -> Result<Response, FetchError> {
        self.dispatch().send().await
    }
}

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{FetchClient, FetchError, Method, MultipartForm, PendingRequest, Response};
}
