//! Deferred decoding of single-exchange results

use crate::error::{Error, Result};
use crate::http::HttpResponse;
use bytes::Bytes;
use reqwest::header::HeaderMap;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Outcome of one HTTP exchange, decoded on demand
///
/// Holds either the buffered response or the error that ended the exchange.
/// Every accessor can be called any number of times: the body was read in
/// full before this value was built, and a stored error is cloned out.
#[derive(Debug, Clone)]
pub struct RequestResult {
    inner: std::result::Result<HttpResponse, Error>,
}

impl From<Result<HttpResponse>> for RequestResult {
    fn from(inner: Result<HttpResponse>) -> Self {
        Self { inner }
    }
}

impl RequestResult {
    /// Wrap a buffered response
    pub fn from_response(response: HttpResponse) -> Self {
        Self { inner: Ok(response) }
    }

    /// Wrap an error raised before or during the exchange
    pub fn from_error(err: Error) -> Self {
        Self { inner: Err(err) }
    }

    /// HTTP status, when a response was accepted
    pub fn status(&self) -> Option<u16> {
        self.inner.as_ref().ok().map(|r| r.status.as_u16())
    }

    /// Response headers, when a response was accepted
    pub fn headers(&self) -> Option<&HeaderMap> {
        self.inner.as_ref().ok().map(|r| &r.headers)
    }

    /// A single response header as a string
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers()?.get(name)?.to_str().ok()
    }

    /// Raw response body
    pub fn body(&self) -> Result<&Bytes> {
        self.inner.as_ref().map(|r| &r.body).map_err(Clone::clone)
    }

    /// The stored error, if the exchange failed
    pub fn err(&self) -> Option<&Error> {
        self.inner.as_ref().err()
    }

    /// Check whether the exchange succeeded
    pub fn is_ok(&self) -> bool {
        self.inner.is_ok()
    }

    /// Decode the whole body into `T`
    ///
    /// A failed exchange returns its own error, never a decode error.
    pub fn extract<T: DeserializeOwned>(&self) -> Result<T> {
        let body = self.body()?;
        serde_json::from_slice(body).map_err(|e| Error::decode(e.to_string()))
    }

    /// Decode the field named `label` of a JSON object body into `T`
    ///
    /// Single-resource responses wrap the resource: `{"keypair": {...}}`.
    pub fn extract_into<T: DeserializeOwned>(&self, label: &str) -> Result<T> {
        let mut body: Value = self.extract()?;
        let field = body
            .get_mut(label)
            .map(Value::take)
            .ok_or_else(|| Error::decode(format!("Response has no '{label}' field")))?;
        serde_json::from_value(field)
            .map_err(|e| Error::decode(format!("Failed to decode '{label}': {e}")))
    }

    /// Only report whether the exchange failed, ignoring the body
    ///
    /// For operations whose response carries nothing of interest, such as
    /// deletes answered with 202 or 204.
    pub fn extract_err(&self) -> Result<()> {
        match &self.inner {
            Ok(_) => Ok(()),
            Err(err) => Err(err.clone()),
        }
    }

    /// Take the buffered response out
    pub fn into_result(self) -> Result<HttpResponse> {
        self.inner
    }
}
