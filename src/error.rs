//! Error types for eclcloud
//!
//! This module defines the error hierarchy for the whole crate.
//! All public APIs return `Result<T, Error>` where Error is defined here.
//!
//! `Error` is `Clone`: a [`RequestResult`](crate::decode::RequestResult) that
//! holds a failed exchange hands out the same error on every extraction.

use std::sync::Arc;
use thiserror::Error;

/// Boxed error type carried by transport and visitor failures
pub type BoxError = Arc<dyn std::error::Error + Send + Sync + 'static>;

/// The main error type for eclcloud
#[derive(Error, Debug, Clone)]
pub enum Error {
    // ============================================================================
    // Construction Errors
    // ============================================================================
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Invalid service endpoint '{endpoint}': {message}")]
    InvalidEndpoint { endpoint: String, message: String },

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    // ============================================================================
    // Transport Errors
    // ============================================================================
    #[error("HTTP request failed: {message}")]
    Transport {
        message: String,
        #[source]
        source: BoxError,
    },

    // ============================================================================
    // HTTP Status Errors
    // ============================================================================
    #[error("Authentication failed (HTTP {status}) for {url}: {body}")]
    Auth {
        status: u16,
        url: String,
        body: String,
    },

    #[error("Resource not found: {url}")]
    NotFound { url: String, body: String },

    #[error("HTTP {status}: {body}")]
    HttpStatus {
        status: u16,
        url: String,
        body: String,
    },

    // ============================================================================
    // Data Processing Errors
    // ============================================================================
    #[error("Failed to decode response: {message}")]
    Decode { message: String },

    #[error("Failed to encode request body: {message}")]
    Serialization { message: String },

    // ============================================================================
    // Caller Errors
    // ============================================================================
    #[error("Page visitor failed: {source}")]
    Visitor {
        #[source]
        source: BoxError,
    },

    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create an invalid endpoint error
    pub fn invalid_endpoint(endpoint: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidEndpoint {
            endpoint: endpoint.into(),
            message: message.into(),
        }
    }

    /// Wrap a failure reported by the HTTP collaborator
    pub fn transport<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Transport {
            message: err.to_string(),
            source: Arc::new(err),
        }
    }

    /// Classify a non-accepted HTTP status
    ///
    /// 401/403 become [`Error::Auth`], 404 becomes [`Error::NotFound`], and
    /// everything else is [`Error::HttpStatus`].
    pub fn from_status(status: u16, url: impl Into<String>, body: impl Into<String>) -> Self {
        let url = url.into();
        let body = body.into();
        match status {
            401 | 403 => Self::Auth { status, url, body },
            404 => Self::NotFound { url, body },
            _ => Self::HttpStatus { status, url, body },
        }
    }

    /// Create a decode error
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }

    /// Create a serialization error
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::Serialization {
            message: message.into(),
        }
    }

    /// Wrap a caller-defined error raised inside a page visitor
    pub fn visitor<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Visitor {
            source: Arc::new(err),
        }
    }

    /// HTTP status code carried by this error, if any
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Auth { status, .. } | Error::HttpStatus { status, .. } => Some(*status),
            Error::NotFound { .. } => Some(404),
            _ => None,
        }
    }

    /// Raw response body carried by this error, if any
    pub fn body(&self) -> Option<&str> {
        match self {
            Error::Auth { body, .. }
            | Error::NotFound { body, .. }
            | Error::HttpStatus { body, .. } => Some(body),
            _ => None,
        }
    }

    /// Check if this is an authentication failure (401/403)
    pub fn is_auth(&self) -> bool {
        matches!(self, Error::Auth { .. })
    }

    /// Check if this is a 404
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound { .. })
    }

    /// Check if the server answered but the body had the wrong shape
    pub fn is_decode(&self) -> bool {
        matches!(self, Error::Decode { .. })
    }

    /// Check if the server never answered
    pub fn is_transport(&self) -> bool {
        matches!(self, Error::Transport { .. })
    }

    /// Check if this error is retryable
    ///
    /// Nothing in this crate retries; layers above it use this to decide.
    pub fn is_retryable(&self) -> bool {
        match self {
            Error::Transport { .. } => true,
            Error::HttpStatus { status, .. } => is_retryable_status(*status),
            _ => false,
        }
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Self::transport(err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::decode(err.to_string())
    }
}

impl From<serde_yaml::Error> for Error {
    fn from(err: serde_yaml::Error) -> Self {
        Self::config(format!("Failed to parse YAML: {err}"))
    }
}

/// Check if an HTTP status code is retryable
fn is_retryable_status(status: u16) -> bool {
    matches!(status, 408 | 429 | 500 | 502 | 503 | 504)
}

/// Result type alias for eclcloud
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test]
    fn test_error_display() {
        let err = Error::config("test message");
        assert_eq!(err.to_string(), "Configuration error: test message");

        let err = Error::from_status(500, "https://api.example.com/v2/servers", "boom");
        assert_eq!(err.to_string(), "HTTP 500: boom");

        let err = Error::from_status(404, "https://api.example.com/v2/servers/x", "");
        assert_eq!(
            err.to_string(),
            "Resource not found: https://api.example.com/v2/servers/x"
        );
    }

    #[test_case(401, true, false ; "unauthorized")]
    #[test_case(403, true, false ; "forbidden")]
    #[test_case(404, false, true ; "not found")]
    #[test_case(400, false, false ; "bad request")]
    #[test_case(409, false, false ; "conflict")]
    #[test_case(503, false, false ; "unavailable")]
    fn test_status_classification(status: u16, auth: bool, not_found: bool) {
        let err = Error::from_status(status, "http://localhost/x", "body");
        assert_eq!(err.is_auth(), auth);
        assert_eq!(err.is_not_found(), not_found);
        assert_eq!(err.status(), Some(status));
        assert_eq!(err.body(), Some("body"));
        assert!(!err.is_decode());
    }

    #[test]
    fn test_is_retryable() {
        assert!(Error::from_status(429, "", "").is_retryable());
        assert!(Error::from_status(500, "", "").is_retryable());
        assert!(Error::from_status(503, "", "").is_retryable());
        let io = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused");
        assert!(Error::transport(io).is_retryable());

        assert!(!Error::from_status(400, "", "").is_retryable());
        assert!(!Error::from_status(401, "", "").is_retryable());
        assert!(!Error::from_status(404, "", "").is_retryable());
        assert!(!Error::decode("bad json").is_retryable());
        assert!(!Error::config("test").is_retryable());
    }

    #[test]
    fn test_clone_keeps_source() {
        let io = std::io::Error::new(std::io::ErrorKind::TimedOut, "timed out");
        let err = Error::transport(io);
        let copy = err.clone();
        assert!(copy.is_transport());
        assert_eq!(copy.to_string(), err.to_string());
        assert!(std::error::Error::source(&copy).is_some());
    }

    #[test]
    fn test_visitor_error_downcasts() {
        #[derive(Debug)]
        struct Quota;
        impl std::fmt::Display for Quota {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "quota reached")
            }
        }
        impl std::error::Error for Quota {}

        let err = Error::visitor(Quota);
        assert_eq!(err.to_string(), "Page visitor failed: quota reached");
        match err {
            Error::Visitor { source } => assert!(source.downcast_ref::<Quota>().is_some()),
            other => panic!("Expected Visitor, got {other:?}"),
        }
    }
}
