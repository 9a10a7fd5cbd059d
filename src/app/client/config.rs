//! HTTP client configuration and building logic
//!
//! Two clients are built from one configuration: a probing client that never
//! follows redirects, so only a direct 200 confirms existence, and a fetching
//! client that does.

use std::time::Duration;

use reqwest::redirect::Policy;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::constants::{http, limits};
use crate::errors::{FetchError, FetchResult};

/// Configuration for the HTTP transport
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Request timeout
    #[serde(with = "humantime_serde")]
    pub request_timeout: Duration,
    /// Connect timeout
    #[serde(with = "humantime_serde")]
    pub connect_timeout: Duration,
    /// User agent sent with every request
    pub user_agent: String,
    /// Retries for transport failures (0 = single attempt)
    pub max_retries: u32,
    /// Base delay for exponential backoff between retries
    #[serde(with = "humantime_serde")]
    pub retry_base_delay: Duration,
    /// Redirects followed when fetching content
    pub max_redirects: usize,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            request_timeout: http::DEFAULT_TIMEOUT,
            connect_timeout: http::CONNECT_TIMEOUT,
            user_agent: http::USER_AGENT.to_string(),
            max_retries: limits::MAX_RETRIES,
            retry_base_delay: Duration::from_millis(limits::RETRY_BASE_DELAY_MS),
            max_redirects: http::MAX_REDIRECTS,
        }
    }
}

impl ClientConfig {
    fn builder(&self) -> reqwest::ClientBuilder {
        Client::builder()
            .timeout(self.request_timeout)
            .connect_timeout(self.connect_timeout)
            .user_agent(self.user_agent.as_str())
    }

    /// Builds the client used for content fetches
    pub fn build_http_client(&self) -> FetchResult<Client> {
        self.builder()
            .redirect(Policy::limited(self.max_redirects))
            .build()
            .map_err(FetchError::Http)
    }

    /// Builds the client used for existence checks
    pub fn build_head_client(&self) -> FetchResult<Client> {
        self.builder()
            .redirect(Policy::none())
            .build()
            .map_err(FetchError::Http)
    }

    /// Backoff delay before the given retry attempt (1-based)
    pub fn retry_delay(&self, attempt: u32) -> Duration {
        self.retry_base_delay
            .saturating_mul(2_u32.saturating_pow(attempt.saturating_sub(1)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_config_default() {
        let config = ClientConfig::default();
        assert_eq!(config.max_retries, 0);
        assert_eq!(config.request_timeout, http::DEFAULT_TIMEOUT);
        assert!(config.user_agent.contains("OPenn-Resolver"));
    }

    #[test]
    fn test_http_client_creation() {
        let config = ClientConfig::default();
        assert!(config.build_http_client().is_ok());
        assert!(config.build_head_client().is_ok());
    }

    #[test]
    fn test_retry_delay_doubles() {
        let config = ClientConfig {
            retry_base_delay: Duration::from_millis(100),
            ..Default::default()
        };

        assert_eq!(config.retry_delay(1), Duration::from_millis(100));
        assert_eq!(config.retry_delay(2), Duration::from_millis(200));
        assert_eq!(config.retry_delay(3), Duration::from_millis(400));
    }

    #[test]
    fn test_humantime_fields() {
        let config: ClientConfig = toml::from_str(
            r#"
request_timeout = "15s"
retry_base_delay = "250ms"
max_retries = 2
"#,
        )
        .unwrap();

        assert_eq!(config.request_timeout, Duration::from_secs(15));
        assert_eq!(config.retry_base_delay, Duration::from_millis(250));
        assert_eq!(config.max_retries, 2);
        assert_eq!(config.connect_timeout, http::CONNECT_TIMEOUT);
    }
}
