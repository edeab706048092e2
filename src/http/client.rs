//! Service client
//!
//! A [`ServiceClient`] binds one resolved service endpoint to a transport
//! and a token provider. It is cheap to clone and safe to share across tasks:
//! everything it holds is read-only after construction.

use super::transport::{HttpRequest, HttpResponse, ReqwestTransport, Transport};
use crate::auth::{StaticToken, TokenProvider, AUTH_TOKEN_HEADER};
use crate::config::ClientConfig;
use crate::decode::RequestResult;
use crate::error::{Error, Result};
use crate::pagination::{Pager, Paginator};
use bytes::Bytes;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT, CONTENT_TYPE, USER_AGENT};
use reqwest::Method;
use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, warn};
use url::Url;

/// Configuration for a single request
#[derive(Debug, Clone, Default)]
pub struct RequestConfig {
    /// Query parameters, appended in order
    pub query: Vec<(String, String)>,
    /// Request headers
    pub headers: HashMap<String, String>,
    /// Request body (JSON)
    pub body: Option<Value>,
    /// Accepted status codes; empty means any 2xx
    pub ok_codes: Vec<u16>,
}

impl RequestConfig {
    /// Create a new request config
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a query parameter
    #[must_use]
    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    /// Add a header
    #[must_use]
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    /// Set JSON body
    #[must_use]
    pub fn json(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Set JSON body from any serializable value
    pub fn try_json<T: Serialize + ?Sized>(self, body: &T) -> Result<Self> {
        let value =
            serde_json::to_value(body).map_err(|e| Error::serialization(e.to_string()))?;
        Ok(self.json(value))
    }

    /// Restrict the accepted status codes
    #[must_use]
    pub fn ok_codes(mut self, codes: &[u16]) -> Self {
        self.ok_codes = codes.to_vec();
        self
    }

    /// Check whether a response status counts as success
    pub fn accepts(&self, status: u16) -> bool {
        if self.ok_codes.is_empty() {
            (200..300).contains(&status)
        } else {
            self.ok_codes.contains(&status)
        }
    }
}

struct Inner {
    endpoint: Url,
    transport: Arc<dyn Transport>,
    token: Arc<dyn TokenProvider>,
    default_headers: HeaderMap,
}

/// Client for one versioned API service
#[derive(Clone)]
pub struct ServiceClient {
    inner: Arc<Inner>,
}

impl ServiceClient {
    /// Start building a client for `endpoint`
    pub fn builder(endpoint: impl Into<String>) -> ServiceClientBuilder {
        ServiceClientBuilder::new(endpoint)
    }

    /// Build a client with the default transport from a config
    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        config.validate()?;
        let transport = ReqwestTransport::new(config.timeout(), &config.user_agent)?;
        let mut builder = Self::builder(config.endpoint.clone())
            .transport(transport)
            .user_agent(config.user_agent.clone());
        if let Some(token) = &config.token {
            builder = builder.token(StaticToken::new(token.clone()));
        }
        for (key, value) in &config.headers {
            builder = builder.header(key.clone(), value.clone());
        }
        builder.build()
    }

    /// The resolved service endpoint (always ends with `/`)
    pub fn endpoint(&self) -> &Url {
        &self.inner.endpoint
    }

    /// Join path segments onto the endpoint
    ///
    /// Each part becomes exactly one path segment: `/`, `?`, `#` and `%`
    /// inside a part are percent-encoded rather than interpreted, and empty
    /// parts are skipped so the result never ends with a stray slash. With
    /// no non-empty parts the endpoint itself is returned.
    pub fn service_url<I>(&self, parts: I) -> Url
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let mut url = self.inner.endpoint.clone();
        let mut parts = parts
            .into_iter()
            .filter(|p| !str::is_empty(p.as_ref()))
            .peekable();
        if parts.peek().is_none() {
            return url;
        }
        // The endpoint was checked to be a base URL, so this always succeeds.
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty();
            for part in parts {
                segments.push(part.as_ref());
            }
        }
        url
    }

    /// Issue a request and return the buffered response
    ///
    /// Statuses not accepted by `config` are turned into errors carrying the
    /// status code and the response body.
    pub async fn request(
        &self,
        method: Method,
        mut url: Url,
        config: RequestConfig,
    ) -> Result<HttpResponse> {
        if !config.query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in &config.query {
                pairs.append_pair(key, value);
            }
        }

        let mut headers = self.inner.default_headers.clone();
        for (key, value) in &config.headers {
            insert_header(&mut headers, key, value)?;
        }
        if let Some(token) = self.inner.token.token().await? {
            insert_header(&mut headers, AUTH_TOKEN_HEADER, &token)?;
        }

        let body = match &config.body {
            Some(value) => {
                headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
                let bytes =
                    serde_json::to_vec(value).map_err(|e| Error::serialization(e.to_string()))?;
                Some(Bytes::from(bytes))
            }
            None => None,
        };

        debug!("{} {}", method, url);
        let response = self
            .inner
            .transport
            .send(HttpRequest {
                method: method.clone(),
                url: url.clone(),
                headers,
                body,
            })
            .await?;

        let status = response.status.as_u16();
        if config.accepts(status) {
            debug!("{} {} -> {}", method, url, status);
            return Ok(response);
        }

        let body = String::from_utf8_lossy(&response.body).into_owned();
        warn!("{} {} failed with status {}", method, url, status);
        Err(Error::from_status(status, url.as_str(), body))
    }

    /// GET a single resource
    pub async fn get(&self, url: Url, config: RequestConfig) -> RequestResult {
        self.request(Method::GET, url, config).await.into()
    }

    /// POST to a collection
    pub async fn post(&self, url: Url, config: RequestConfig) -> RequestResult {
        self.request(Method::POST, url, config).await.into()
    }

    /// PUT a resource
    pub async fn put(&self, url: Url, config: RequestConfig) -> RequestResult {
        self.request(Method::PUT, url, config).await.into()
    }

    /// PATCH a resource
    pub async fn patch(&self, url: Url, config: RequestConfig) -> RequestResult {
        self.request(Method::PATCH, url, config).await.into()
    }

    /// DELETE a resource
    pub async fn delete(&self, url: Url, config: RequestConfig) -> RequestResult {
        self.request(Method::DELETE, url, config).await.into()
    }

    /// Create a pager over the collection starting at `url`
    pub fn list(&self, url: Url, paginator: impl Paginator + 'static) -> Pager {
        Pager::new(self.clone(), url, paginator)
    }
}

impl std::fmt::Debug for ServiceClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceClient")
            .field("endpoint", &self.inner.endpoint.as_str())
            .field("default_headers", &self.inner.default_headers.len())
            .finish_non_exhaustive()
    }
}

/// Builder for [`ServiceClient`]
pub struct ServiceClientBuilder {
    endpoint: String,
    transport: Option<Arc<dyn Transport>>,
    token: Arc<dyn TokenProvider>,
    user_agent: String,
    headers: Vec<(String, String)>,
}

impl ServiceClientBuilder {
    fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            transport: None,
            token: Arc::new(StaticToken::none()),
            user_agent: format!("{}/{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION")),
            headers: Vec::new(),
        }
    }

    /// Use a specific transport instead of the default reqwest one
    #[must_use]
    pub fn transport(mut self, transport: impl Transport + 'static) -> Self {
        self.transport = Some(Arc::new(transport));
        self
    }

    /// Use a shared transport
    #[must_use]
    pub fn shared_transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Set the token provider
    #[must_use]
    pub fn token(mut self, provider: impl TokenProvider + 'static) -> Self {
        self.token = Arc::new(provider);
        self
    }

    /// Set the user agent
    #[must_use]
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = agent.into();
        self
    }

    /// Add a header sent with every request
    #[must_use]
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((key.into(), value.into()));
        self
    }

    /// Validate the endpoint and build the client
    pub fn build(self) -> Result<ServiceClient> {
        let endpoint = parse_endpoint(&self.endpoint)?;

        let mut default_headers = HeaderMap::new();
        default_headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        let agent = HeaderValue::from_str(&self.user_agent)
            .map_err(|e| Error::config(format!("Invalid user agent: {e}")))?;
        default_headers.insert(USER_AGENT, agent);
        for (key, value) in &self.headers {
            insert_header(&mut default_headers, key, value)?;
        }

        let transport = match self.transport {
            Some(transport) => transport,
            None => Arc::new(ReqwestTransport::new(
                std::time::Duration::from_secs(30),
                &self.user_agent,
            )?),
        };

        Ok(ServiceClient {
            inner: Arc::new(Inner {
                endpoint,
                transport,
                token: self.token,
                default_headers,
            }),
        })
    }
}

/// Parse and normalize a service endpoint
///
/// The endpoint must be an absolute http(s) URL without query or fragment.
/// A trailing slash is added so that joined segments land under it.
fn parse_endpoint(raw: &str) -> Result<Url> {
    let mut url = Url::parse(raw.trim())
        .map_err(|e| Error::invalid_endpoint(raw, e.to_string()))?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(Error::invalid_endpoint(
            raw,
            format!("unsupported scheme '{}'", url.scheme()),
        ));
    }
    if url.cannot_be_a_base() {
        return Err(Error::invalid_endpoint(raw, "not a base URL"));
    }
    if url.query().is_some() || url.fragment().is_some() {
        return Err(Error::invalid_endpoint(
            raw,
            "query strings and fragments are not allowed",
        ));
    }

    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

fn insert_header(headers: &mut HeaderMap, key: &str, value: &str) -> Result<()> {
    let name = HeaderName::from_bytes(key.as_bytes())
        .map_err(|e| Error::config(format!("Invalid header name '{key}': {e}")))?;
    let value = HeaderValue::from_str(value)
        .map_err(|e| Error::config(format!("Invalid value for header '{key}': {e}")))?;
    headers.insert(name, value);
    Ok(())
}
