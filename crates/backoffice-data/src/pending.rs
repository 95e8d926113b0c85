//! Handles for dispatched requests.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use crate::request::Request;
use crate::transport::Transport;
use crate::{FetchError, Response};

/// Process-unique identifier of a dispatched request, used to correlate logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RequestId(u64);

impl RequestId {
    /// Allocate the next id.
    pub fn next() -> Self {
        static COUNTER: AtomicU64 = AtomicU64::new(1);
        Self(COUNTER.fetch_add(1, Ordering::Relaxed))
    }

    /// Numeric value.
    pub fn get(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "req-{}", self.0)
    }
}

/// A request whose scoping has been decided and which is waiting to be sent.
///
/// Everything the server will see, including the store-scoping header, is
/// frozen when the handle is created. Changing the active store afterwards
/// does not affect it.
pub struct PendingRequest {
    id: RequestId,
    store_id: Option<i64>,
    request: Request,
    transport: Arc<dyn Transport>,
}

impl fmt::Debug for PendingRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PendingRequest")
            .field("id", &self.id)
            .field("store_id", &self.store_id)
            .field("request", &self.request)
            .finish_non_exhaustive()
    }
}

impl PendingRequest {
    pub(crate) fn new(
        id: RequestId,
        store_id: Option<i64>,
        request: Request,
        transport: Arc<dyn Transport>,
    ) -> Self {
        Self {
            id,
            store_id,
            request,
            transport,
        }
    }

    /// Request id.
    pub fn id(&self) -> RequestId {
        self.id
    }

    /// Store id injected into the request, if any.
    pub fn store_id(&self) -> Option<i64> {
        self.store_id
    }

    /// The request exactly as it will be sent.
    pub fn request(&self) -> &Request {
        &self.request
    }

    /// Perform the round-trip.
    ///
    /// Non-2xx answers are returned as responses; only transport failures
    /// are errors.
    pub async fn send(self) -> Result<Response, FetchError> {
        let Self {
            id,
            request,
            transport,
            ..
        } = self;
        let method = request.method();
        let url = request.url().to_string();

        match transport.send(request).await {
            Ok(response) => {
                if response.is_success() {
                    tracing::debug!(request_id = %id, %method, %url, status = response.status, "request completed");
                } else {
                    tracing::warn!(request_id = %id, %method, %url, status = response.status, "request rejected by server");
                }
                Ok(response)
            }
            Err(e) => {
                tracing::warn!(request_id = %id, %method, %url, error = %e, "request failed");
                Err(e)
            }
        }
    }
}
