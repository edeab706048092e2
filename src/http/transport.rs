//! Transport seam
//!
//! A [`Transport`] performs exactly one HTTP round trip and hands back the
//! fully buffered response. It does not look at status codes; classifying
//! them is the [`ServiceClient`](super::ServiceClient)'s job.

use crate::error::{Error, Result};
use async_trait::async_trait;
use bytes::Bytes;
use reqwest::header::HeaderMap;
use reqwest::{Client, Method, StatusCode};
use std::time::Duration;
use url::Url;

/// An outgoing HTTP request described as plain data
#[derive(Debug, Clone)]
pub struct HttpRequest {
    /// HTTP method
    pub method: Method,
    /// Absolute request URL, query included
    pub url: Url,
    /// Headers to send
    pub headers: HeaderMap,
    /// Encoded request body
    pub body: Option<Bytes>,
}

/// A completed HTTP exchange with the body already read into memory
#[derive(Debug, Clone)]
pub struct HttpResponse {
    /// Response status
    pub status: StatusCode,
    /// Response headers
    pub headers: HeaderMap,
    /// Full response body
    pub body: Bytes,
}

/// The HTTP collaborator the client delegates I/O to
///
/// Implementations surface connection, DNS and timeout failures as
/// [`Error::Transport`] and return every received response as `Ok`,
/// whatever its status.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Execute one request
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse>;
}

/// Default transport backed by `reqwest`
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    /// Create a transport with a per-request timeout and user agent
    pub fn new(timeout: Duration, user_agent: &str) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()
            .map_err(|e| Error::config(format!("Failed to build HTTP client: {e}")))?;
        Ok(Self { client })
    }

    /// Wrap an already configured `reqwest` client
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }

    /// Get the underlying reqwest client
    pub fn inner(&self) -> &Client {
        &self.client
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse> {
        let mut req = self
            .client
            .request(request.method, request.url)
            .headers(request.headers);
        if let Some(body) = request.body {
            req = req.body(body);
        }

        let response = req.send().await?;
        let status = response.status();
        let headers = response.headers().clone();
        let body = response.bytes().await?;

        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}
