//! Pagination types and traits
//!
//! Defines the page abstraction and the strategy trait used by the pager.

use crate::decode::lookup;
use crate::error::{Error, Result};
use crate::http::HttpResponse;
use bytes::Bytes;
use reqwest::header::HeaderMap;
use serde::de::DeserializeOwned;
use serde_json::Value;
use url::Url;

/// One fetched page of a collection
///
/// Immutable once built. The pager drops it after the visitor returns;
/// cloning is cheap because the body is reference counted.
#[derive(Debug, Clone)]
pub struct Page {
    url: Url,
    status: u16,
    headers: HeaderMap,
    body: Bytes,
}

impl Page {
    /// Create a page from its parts
    pub fn new(url: Url, status: u16, headers: HeaderMap, body: impl Into<Bytes>) -> Self {
        Self {
            url,
            status,
            headers,
            body: body.into(),
        }
    }

    pub(crate) fn from_response(url: Url, response: HttpResponse) -> Self {
        Self {
            url,
            status: response.status.as_u16(),
            headers: response.headers,
            body: response.body,
        }
    }

    /// URL this page was fetched from
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// HTTP status of the response
    pub fn status(&self) -> u16 {
        self.status
    }

    /// Response headers
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Raw response body
    pub fn body(&self) -> &Bytes {
        &self.body
    }

    /// Parse the body as JSON
    pub fn json(&self) -> Result<Value> {
        serde_json::from_slice(&self.body)
            .map_err(|e| Error::decode(format!("Failed to parse page from {}: {e}", self.url)))
    }

    /// Decode the whole body into `T`
    pub fn decode<T: DeserializeOwned>(&self) -> Result<T> {
        serde_json::from_slice(&self.body)
            .map_err(|e| Error::decode(format!("Failed to decode page from {}: {e}", self.url)))
    }

    /// Items of the array found at `path` (empty path = the whole body)
    ///
    /// A missing or `null` field counts as no items.
    pub fn items(&self, path: &str) -> Result<Vec<Value>> {
        let body = self.json()?;
        match lookup(&body, path) {
            Some(Value::Array(items)) => Ok(items.clone()),
            Some(Value::Null) | None => Ok(Vec::new()),
            Some(other) => Err(Error::decode(format!(
                "Expected an array at '{path}', found {}",
                kind(other)
            ))),
        }
    }
}

pub(crate) fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Core trait for pagination strategies
///
/// Chosen by the resource package, never hardcoded in the pager.
pub trait Paginator: Send + Sync {
    /// Whether the page holds no items; an empty page ends iteration
    fn is_empty(&self, page: &Page) -> Result<bool>;

    /// URL of the page after `page`, or `None` when the collection is exhausted
    fn next_page_url(&self, page: &Page) -> Result<Option<Url>>;
}
