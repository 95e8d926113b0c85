//! Egress seam between the dispatcher and the network.

use async_trait::async_trait;
use std::collections::HashMap;

use crate::request::{Body, Request};
use crate::{FetchError, Response};

/// Sends prepared requests.
///
/// The transport performs exactly one round-trip per call: no retries, no
/// caching, and non-2xx answers are returned as ordinary responses.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send the request and return whatever the server answered.
    async fn send(&self, request: Request) -> Result<Response, FetchError>;
}

/// Network transport backed by `reqwest`.
#[derive(Debug, Clone, Default)]
pub struct HttpTransport {
    http: reqwest::Client,
}

impl HttpTransport {
    /// Create a transport with a default `reqwest` client.
    pub fn new() -> Self {
        Self::default()
    }

    /// Use an existing `reqwest` client (shared connection pool, proxies...).
    pub fn with_client(http: reqwest::Client) -> Self {
        Self { http }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: Request) -> Result<Response, FetchError> {
        let Request {
            method,
            url,
            headers,
            body,
        } = request;

        let mut builder = self.http.request(method.as_http(), url.as_str());
        for (key, value) in &headers {
            builder = builder.header(key.as_str(), value.as_str());
        }
        builder = match body {
            Some(Body::Bytes(bytes)) => builder.body(bytes),
            Some(Body::Multipart(form)) => builder.multipart(form.into_reqwest()?),
            None => builder,
        };

        let response = builder.send().await?;

        let status = response.status().as_u16();
        let headers: HashMap<String, String> = response
            .headers()
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_str().unwrap_or("").to_string()))
            .collect();
        let body = response.bytes().await?.to_vec();

        Ok(Response::new(status, headers, body))
    }
}
