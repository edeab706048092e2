//! Authentication token accessor
//!
//! The core never acquires tokens. It asks a [`TokenProvider`] for the
//! current token right before each request and sends it as `X-Auth-Token`.
//! Re-authentication lives above this crate: a caller that sees
//! [`Error::Auth`](crate::Error::Auth) can refresh a [`SharedToken`] and retry.

mod types;

pub use types::{SharedToken, StaticToken, TokenProvider, AUTH_TOKEN_HEADER};
