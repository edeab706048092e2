//! Client configuration
//!
//! A [`ClientConfig`] carries everything needed to build a
//! [`ServiceClient`](crate::http::ServiceClient): the resolved service
//! endpoint, an optional auth token, and the transport knobs that are passed
//! through to the HTTP collaborator untouched.
//!
//! Configs can be built in code or loaded from YAML:
//!
//! ```yaml
//! endpoint: https://compute.example.com/v2/
//! token: 0123456789abcdef
//! timeout_secs: 30
//! headers:
//!   X-Request-Source: ci
//! ```

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;

/// Configuration for a service client
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Absolute service endpoint, including any API version segment
    pub endpoint: String,

    /// Auth token sent as `X-Auth-Token`
    #[serde(default)]
    pub token: Option<String>,

    /// User agent string
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Per-request timeout in seconds, enforced by the transport
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Headers added to every request
    #[serde(default)]
    pub headers: HashMap<String, String>,
}

fn default_user_agent() -> String {
    format!("{}/{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"))
}

fn default_timeout_secs() -> u64 {
    30
}

impl ClientConfig {
    /// Create a config for an endpoint with all other fields defaulted
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            token: None,
            user_agent: default_user_agent(),
            timeout_secs: default_timeout_secs(),
            headers: HashMap::new(),
        }
    }

    /// Create a new config builder
    pub fn builder(endpoint: impl Into<String>) -> ClientConfigBuilder {
        ClientConfigBuilder {
            config: Self::new(endpoint),
        }
    }

    /// Parse a config from a YAML document
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a config from a YAML file
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let yaml = std::fs::read_to_string(path).map_err(|e| {
            Error::config(format!("Failed to read {}: {e}", path.display()))
        })?;
        Self::from_yaml_str(&yaml)
    }

    /// Request timeout as a `Duration`
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Check the fields that do not depend on URL parsing
    pub fn validate(&self) -> Result<()> {
        if self.endpoint.trim().is_empty() {
            return Err(Error::config("endpoint must not be empty"));
        }
        if self.timeout_secs == 0 {
            return Err(Error::config("timeout_secs must be greater than zero"));
        }
        Ok(())
    }
}

/// Builder for client config
#[derive(Debug)]
pub struct ClientConfigBuilder {
    config: ClientConfig,
}

impl ClientConfigBuilder {
    /// Set the auth token
    pub fn token(mut self, token: impl Into<String>) -> Self {
        self.config.token = Some(token.into());
        self
    }

    /// Set the user agent
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.config.user_agent = agent.into();
        self
    }

    /// Set the request timeout
    ///
    /// The timeout is kept in whole seconds. A fractional part rounds up, so
    /// 1.5s becomes 2s and anything under a second becomes 1s.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        let secs = timeout.as_secs() + u64::from(timeout.subsec_nanos() > 0);
        self.config.timeout_secs = secs.max(1);
        self
    }

    /// Add a default header
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.config.headers.insert(key.into(), value.into());
        self
    }

    /// Build the config
    pub fn build(self) -> ClientConfig {
        self.config
    }
}
