//! HTTP client for the hedgehog mint-storage endpoint

use crate::error::{FeedError, Result};
use crate::feed::HedgehogData;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

pub const DEFAULT_FEED_URL: &str = "https://127.0.0.1:52884";
pub const DEFAULT_FEED_PATH: &str = "/gridspork/mint-storage";
pub const DEFAULT_REFRESH_INTERVAL_SECS: u64 = 15;
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedConfig {
    /// Base URL of the local hedgehog daemon
    pub url: String,
    pub path: String,
    pub refresh_interval_secs: u64,
    pub request_timeout_secs: u64,
    /// Mints for addresses without this prefix are ignored
    pub address_prefix: String,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_FEED_URL.to_string(),
            path: DEFAULT_FEED_PATH.to_string(),
            refresh_interval_secs: DEFAULT_REFRESH_INTERVAL_SECS,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            address_prefix: "unigrid".to_string(),
        }
    }
}

impl FeedConfig {
    pub fn endpoint(&self) -> String {
        format!(
            "{}/{}",
            self.url.trim_end_matches('/'),
            self.path.trim_start_matches('/')
        )
    }

    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs(self.refresh_interval_secs.max(1))
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.max(1))
    }
}

#[derive(Debug, Clone)]
pub struct HedgehogClient {
    endpoint: reqwest::Url,
    client: reqwest::Client,
}

impl HedgehogClient {
    /// Builds a client for `config.endpoint()`.
    ///
    /// Certificate verification is disabled: hedgehog runs beside the node
    /// with a self-signed certificate and is trusted by network placement,
    /// not PKI.
    pub fn new(config: &FeedConfig) -> Result<Self> {
        let endpoint = config.endpoint();
        let endpoint = reqwest::Url::parse(&endpoint)
            .map_err(|e| FeedError::InvalidUrl(format!("{}: {}", endpoint, e)))?;

        let client = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .danger_accept_invalid_certs(true)
            .build()
            .map_err(|e| FeedError::Http(format!("Failed to build client: {}", e)))?;

        Ok(HedgehogClient { endpoint, client })
    }

    pub fn endpoint(&self) -> &str {
        self.endpoint.as_str()
    }

    /// Fetches the current mint-storage snapshot
    pub async fn fetch(&self) -> Result<HedgehogData> {
        let response = self
            .client
            .get(self.endpoint.clone())
            .send()
            .await
            .map_err(|e| FeedError::Http(e.to_string()))?;

        if !response.status().is_success() {
            return Err(FeedError::Status(response.status().as_u16()));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| FeedError::Http(format!("Failed to read body: {}", e)))?;

        let data: HedgehogData =
            serde_json::from_slice(&body).map_err(|e| FeedError::Decode(e.to_string()))?;

        debug!(
            endpoint = %self.endpoint,
            entries = data.data.mints.len(),
            "fetched hedgehog mint storage"
        );
        Ok(data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_endpoint() {
        let config = FeedConfig::default();
        assert_eq!(
            config.endpoint(),
            "https://127.0.0.1:52884/gridspork/mint-storage"
        );
        assert_eq!(config.refresh_interval(), Duration::from_secs(15));
        assert_eq!(config.request_timeout(), Duration::from_secs(10));
    }

    #[test]
    fn test_endpoint_joins_slashes() {
        let config = FeedConfig {
            url: "http://localhost:8080/".to_string(),
            path: "mint-storage".to_string(),
            ..FeedConfig::default()
        };
        assert_eq!(config.endpoint(), "http://localhost:8080/mint-storage");
    }

    #[test]
    fn test_rejects_invalid_url() {
        let config = FeedConfig {
            url: "not a url".to_string(),
            ..FeedConfig::default()
        };
        assert!(matches!(
            HedgehogClient::new(&config),
            Err(FeedError::InvalidUrl(_))
        ));
    }
}
