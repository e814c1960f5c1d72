//! Content service configuration

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Transport and cache settings for content service access
///
/// Timeouts live here and nowhere else; retrieval code imposes none.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContentServiceConfig {
    /// GraphQL endpoint of the content service
    pub endpoint: String,
    /// Transport timeout in seconds (0 disables it)
    pub timeout_secs: u64,
    /// Bearer token sent with every request
    pub api_token: Option<String>,
    /// User agent header
    pub user_agent: String,
    /// Maximum entries per factory cache agent
    pub cache_capacity: u64,
    /// Factory cache entry lifetime in seconds
    pub cache_ttl_secs: u64,
}

impl ContentServiceConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With endpoint
    #[inline]
    #[must_use]
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// With transport timeout
    #[inline]
    #[must_use]
    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// With bearer token
    #[inline]
    #[must_use]
    pub fn with_api_token(mut self, token: impl Into<String>) -> Self {
        self.api_token = Some(token.into());
        self
    }

    /// With cache settings
    #[inline]
    #[must_use]
    pub fn with_cache(mut self, capacity: u64, ttl_secs: u64) -> Self {
        self.cache_capacity = capacity;
        self.cache_ttl_secs = ttl_secs;
        self
    }

    /// Transport timeout, `None` when disabled
    #[inline]
    #[must_use]
    pub fn timeout(&self) -> Option<Duration> {
        (self.timeout_secs > 0).then(|| Duration::from_secs(self.timeout_secs))
    }

    /// Cache entry lifetime
    #[inline]
    #[must_use]
    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }
}

impl Default for ContentServiceConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://localhost:8081/cd/api".to_string(),
            timeout_secs: 30,
            api_token: None,
            user_agent: concat!("dxa-content/", env!("CARGO_PKG_VERSION")).to_string(),
            cache_capacity: 10_000,
            cache_ttl_secs: 300,
        }
    }
}
