//! Client configuration
//!
//! An immutable [`ClientConfig`] is injected into each [`crate::Client`] at
//! construction. There is no process-wide mutable configuration: callers
//! that need different settings construct another client, and clients are
//! cheap to clone and share.

use std::time::Duration;

use once_cell::sync::Lazy;

/// Production API base URL.
pub const DEFAULT_BASE_URL: &str = "https://api.trakt.tv";

/// Protocol version sent in the `trakt-api-version` header.
pub const API_VERSION: &str = "2";

/// Header carrying the application's client id (API key).
pub(crate) const API_KEY_HEADER: &str = "trakt-api-key";

/// Header carrying the protocol version.
pub(crate) const API_VERSION_HEADER: &str = "trakt-api-version";

/// User agent encoding binding and protocol versions.
pub(crate) static DEFAULT_USER_AGENT: Lazy<String> = Lazy::new(|| {
    format!(
        "trakt-client/{} (api-version {})",
        env!("CARGO_PKG_VERSION"),
        API_VERSION
    )
});

/// Configuration for a [`crate::Client`].
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL for all requests.
    pub base_url: String,
    /// Application client id, sent as the API key header on every request.
    pub client_id: String,
    /// User agent string.
    pub user_agent: String,
    /// Default per-attempt request timeout.
    pub timeout: Duration,
    /// Maximum number of resend attempts for one logical call.
    pub max_retries: u32,
    /// Backoff floor.
    pub initial_backoff: Duration,
    /// Backoff ceiling.
    pub max_backoff: Duration,
    /// Skip backoff sleeps entirely. Test mode only.
    pub fast_retries: bool,
}

impl ClientConfig {
    /// Configuration with production defaults for the given client id.
    pub fn new(client_id: impl Into<String>) -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            client_id: client_id.into(),
            user_agent: DEFAULT_USER_AGENT.clone(),
            timeout: Duration::from_secs(30),
            max_retries: 3,
            initial_backoff: Duration::from_millis(100),
            max_backoff: Duration::from_secs(60),
            fast_retries: false,
        }
    }

    /// Create a new config builder.
    pub fn builder(client_id: impl Into<String>) -> ClientConfigBuilder {
        ClientConfigBuilder {
            config: Self::new(client_id),
        }
    }
}

/// Builder for [`ClientConfig`].
pub struct ClientConfigBuilder {
    config: ClientConfig,
}

impl ClientConfigBuilder {
    /// Set the base URL.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.config.base_url = url.into();
        self
    }

    /// Set the per-attempt request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Set the retry budget.
    pub fn max_retries(mut self, retries: u32) -> Self {
        self.config.max_retries = retries;
        self
    }

    /// Set the backoff floor and ceiling.
    pub fn backoff(mut self, initial: Duration, max: Duration) -> Self {
        self.config.initial_backoff = initial;
        self.config.max_backoff = max;
        self
    }

    /// Set the user agent.
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.config.user_agent = agent.into();
        self
    }

    /// Disable backoff sleeps. Test mode only.
    pub fn fast_retries(mut self) -> Self {
        self.config.fast_retries = true;
        self
    }

    /// Build the config.
    pub fn build(self) -> ClientConfig {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = ClientConfig::new("client-id");
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.client_id, "client-id");
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert_eq!(config.max_retries, 3);
        assert!(!config.fast_retries);
        assert!(config.user_agent.starts_with("trakt-client/"));
        assert!(config.user_agent.contains("api-version 2"));
    }

    #[test]
    fn test_config_builder() {
        let config = ClientConfig::builder("client-id")
            .base_url("https://api.staging.trakt.tv")
            .timeout(Duration::from_secs(5))
            .max_retries(5)
            .backoff(Duration::from_millis(10), Duration::from_secs(1))
            .user_agent("custom-agent/1.0")
            .fast_retries()
            .build();

        assert_eq!(config.base_url, "https://api.staging.trakt.tv");
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert_eq!(config.max_retries, 5);
        assert_eq!(config.initial_backoff, Duration::from_millis(10));
        assert_eq!(config.max_backoff, Duration::from_secs(1));
        assert_eq!(config.user_agent, "custom-agent/1.0");
        assert!(config.fast_retries);
    }
}
