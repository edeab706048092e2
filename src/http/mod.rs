//! HTTP module
//!
//! Provides the [`ServiceClient`] and the transport seam underneath it.
//!
//! # Features
//!
//! - **Resolved endpoint**: validated once at construction, immutable after
//! - **Injected transport**: anything implementing [`Transport`]; the default
//!   is [`ReqwestTransport`]
//! - **Authentication**: `X-Auth-Token` from a [`TokenProvider`](crate::auth::TokenProvider)
//! - **Status classification**: auth (401/403), not found (404), generic API errors
//!
//! There is no retry, backoff or rate limiting here. Those belong to the
//! transport or to layers above this crate.

mod client;
mod transport;

pub use client::{RequestConfig, ServiceClient, ServiceClientBuilder};
pub use transport::{HttpRequest, HttpResponse, ReqwestTransport, Transport};
