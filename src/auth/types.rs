//! Token provider trait and the built-in providers

use crate::error::Result;
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Header carrying the auth token on every request
pub const AUTH_TOKEN_HEADER: &str = "X-Auth-Token";

/// Supplies the token attached to outgoing requests
#[async_trait]
pub trait TokenProvider: Send + Sync {
    /// Current token, or `None` to send the request unauthenticated
    async fn token(&self) -> Result<Option<String>>;
}

/// A fixed token (or none at all)
#[derive(Debug, Clone, Default)]
pub struct StaticToken {
    token: Option<String>,
}

impl StaticToken {
    /// Create a provider that always returns `token`
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: Some(token.into()),
        }
    }

    /// Create a provider that never authenticates
    pub fn none() -> Self {
        Self { token: None }
    }
}

#[async_trait]
impl TokenProvider for StaticToken {
    async fn token(&self) -> Result<Option<String>> {
        Ok(self.token.clone())
    }
}

/// A token that can be replaced while requests are in flight
///
/// Clones share the same slot, so an outer re-auth layer can hold one clone
/// and swap the token that every client using the other clones sends.
#[derive(Debug, Clone, Default)]
pub struct SharedToken {
    slot: Arc<RwLock<Option<String>>>,
}

impl SharedToken {
    /// Create a shared token with an initial value
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            slot: Arc::new(RwLock::new(Some(token.into()))),
        }
    }

    /// Replace the token
    pub async fn set(&self, token: impl Into<String>) {
        *self.slot.write().await = Some(token.into());
    }

    /// Drop the token so subsequent requests go out unauthenticated
    pub async fn clear(&self) {
        *self.slot.write().await = None;
    }
}

#[async_trait]
impl TokenProvider for SharedToken {
    async fn token(&self) -> Result<Option<String>> {
        Ok(self.slot.read().await.clone())
    }
}
