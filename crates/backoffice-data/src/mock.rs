//! In-memory transport standing in for the REST server in tests.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use tokio::sync::Semaphore;

use crate::request::{Method, Request};
use crate::transport::Transport;
use crate::{FetchError, Response};

type Handler = dyn Fn(&Request) -> Response + Send + Sync;

struct Inner {
    base_url: String,
    routes: Mutex<HashMap<(Method, String), Response>>,
    handler: Mutex<Option<Arc<Handler>>>,
    failure: Mutex<Option<String>>,
    requests: Mutex<Vec<Request>>,
    gate: Option<Arc<Semaphore>>,
}

/// Releases responses held by a gated [`MockTransport`].
#[derive(Clone)]
pub struct MockGate(Arc<Semaphore>);

impl MockGate {
    /// Let `n` held requests complete.
    pub fn release(&self, n: usize) {
        self.0.add_permits(n);
    }
}

/// Transport that records every request and answers from canned routes.
///
/// Routes are matched on method and on the URL with the base stripped, so
/// `on(Method::Get, "/categories", ..)` answers `GET {base}/categories`.
/// Unmatched requests go to the handler if one is installed, else get a 404
/// with a JSON `error` body.
///
/// # Example
///
/// ```rust,ignore
/// let mock = MockTransport::new("http://mock/api");
/// mock.on_json(Method::Get, "/categories", 200, &categories);
///
/// let client = FetchClient::new("http://mock/api", selection, Arc::new(mock.clone()));
/// client.get("/categories").send().await?;
///
/// assert_eq!(mock.last_request().unwrap().header("X-Store-Id"), Some("3"));
/// ```
#[derive(Clone)]
pub struct MockTransport {
    inner: Arc<Inner>,
}

impl MockTransport {
    /// Create a mock server rooted at `base_url`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::build(base_url.into(), None)
    }

    /// Create a mock server whose responses are held until released through
    /// the returned gate. Requests are recorded as soon as they are sent.
    pub fn gated(base_url: impl Into<String>) -> (Self, MockGate) {
        let semaphore = Arc::new(Semaphore::new(0));
        let mock = Self::build(base_url.into(), Some(semaphore.clone()));
        (mock, MockGate(semaphore))
    }

    fn build(base_url: String, gate: Option<Arc<Semaphore>>) -> Self {
        Self {
            inner: Arc::new(Inner {
                base_url: base_url.trim_end_matches('/').to_string(),
                routes: Mutex::new(HashMap::new()),
                handler: Mutex::new(None),
                failure: Mutex::new(None),
                requests: Mutex::new(Vec::new()),
                gate,
            }),
        }
    }

    /// Answer `method path` with `response`.
    pub fn on(&self, method: Method, path: impl Into<String>, response: Response) {
        lock(&self.inner.routes).insert((method, path.into()), response);
    }

    /// Answer `method path` with a JSON body.
    pub fn on_json<T: serde::Serialize>(
        &self,
        method: Method,
        path: impl Into<String>,
        status: u16,
        value: &T,
    ) {
        let response = match Response::with_json(status, value) {
            Ok(response) => response,
            Err(e) => panic!("mock fixture is not serializable: {}", e),
        };
        self.on(method, path, response);
    }

    /// Answer every unmatched request with `handler`.
    pub fn handle<F>(&self, handler: F)
    where
        F: Fn(&Request) -> Response + Send + Sync + 'static,
    {
        *lock(&self.inner.handler) = Some(Arc::new(handler));
    }

    /// Fail every subsequent request as if the network were down.
    pub fn fail_with(&self, message: impl Into<String>) {
        *lock(&self.inner.failure) = Some(message.into());
    }

    /// Path of `url` relative to the mock's base.
    pub fn path_of<'a>(&self, url: &'a str) -> &'a str {
        url.strip_prefix(self.inner.base_url.as_str()).unwrap_or(url)
    }

    /// Every request received so far, in arrival order.
    pub fn requests(&self) -> Vec<Request> {
        lock(&self.inner.requests).clone()
    }

    /// The most recent request.
    pub fn last_request(&self) -> Option<Request> {
        lock(&self.inner.requests).last().cloned()
    }

    /// Number of requests received.
    pub fn request_count(&self) -> usize {
        lock(&self.inner.requests).len()
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    match mutex.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn send(&self, request: Request) -> Result<Response, FetchError> {
        lock(&self.inner.requests).push(request.clone());

        if let Some(gate) = &self.inner.gate {
            let permit = gate
                .acquire()
                .await
                .map_err(|e| FetchError::RequestError(e.to_string()))?;
            permit.forget();
        }

        if let Some(message) = lock(&self.inner.failure).clone() {
            return Err(FetchError::RequestError(message));
        }

        let path = self.path_of(request.url()).to_string();
        let route = lock(&self.inner.routes)
            .get(&(request.method(), path.clone()))
            .cloned();
        if let Some(response) = route {
            return Ok(response);
        }

        let handler = lock(&self.inner.handler).clone();
        if let Some(handler) = handler {
            return Ok(handler(&request));
        }

        Response::with_json(
            404,
            &serde_json::json!({ "error": format!("no route for {} {}", request.method(), path) }),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::RequestBuilder;

    fn get(url: &str) -> Request {
        RequestBuilder::new(Method::Get, url).build()
    }

    #[tokio::test]
    async fn test_route_match() {
        let mock = MockTransport::new("http://mock/api/");
        mock.on_json(Method::Get, "/stores", 200, &serde_json::json!([]));

        let resp = mock.send(get("http://mock/api/stores")).await.unwrap();
        assert_eq!(resp.status, 200);
        assert_eq!(mock.request_count(), 1);
    }

    #[tokio::test]
    async fn test_unmatched_is_404() {
        let mock = MockTransport::new("http://mock/api");
        let resp = mock.send(get("http://mock/api/nowhere")).await.unwrap();

        assert_eq!(resp.status, 404);
        assert_eq!(
            resp.server_message().as_deref(),
            Some("no route for GET /nowhere")
        );
    }

    #[tokio::test]
    async fn test_handler_fallback() {
        let mock = MockTransport::new("http://mock/api");
        mock.handle(|_req| Response::empty(204));

        let resp = mock.send(get("http://mock/api/anything")).await.unwrap();
        assert_eq!(resp.status, 204);
    }

    #[tokio::test]
    async fn test_failure() {
        let mock = MockTransport::new("http://mock/api");
        mock.fail_with("connection refused");

        let err = mock.send(get("http://mock/api/stores")).await.unwrap_err();
        assert!(err.is_transport());
        // Still recorded
        assert_eq!(mock.request_count(), 1);
    }

    #[tokio::test]
    async fn test_gate_holds_response() {
        let (mock, gate) = MockTransport::gated("http://mock/api");
        mock.on(Method::Get, "/stores", Response::empty(200));

        let task = {
            let mock = mock.clone();
            tokio::spawn(async move { mock.send(get("http://mock/api/stores")).await })
        };

        while mock.request_count() == 0 {
            tokio::task::yield_now().await;
        }
        assert!(!task.is_finished());

        gate.release(1);
        let resp = task.await.unwrap().unwrap();
        assert_eq!(resp.status, 200);
    }
}
