//! Public IP detection.

use crate::error::Result;

const DEFAULT_SERVICE: &str = "https://api.ipify.org";

/// Asks an IP echo service for the caller's public address.
pub struct IpDetector {
    client: reqwest::Client,
    url: String,
}

impl IpDetector {
    /// Create a detector using ipify.
    pub fn new() -> Result<Self> {
        Self::with_url(DEFAULT_SERVICE.to_string())
    }

    /// Create a detector against a custom echo endpoint.
    pub fn with_url(url: String) -> Result<Self> {
        let client = reqwest::Client::builder()
            .pool_max_idle_per_host(0)
            .build()?;

        Ok(Self { client, url })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Fetch the public IP. The body is returned exactly as served.
    pub async fn detect(&self) -> Result<String> {
        let response = self.client.get(&self.url).send().await?;

        if !response.status().is_success() {
            tracing::warn!("HTTP {} from {}", response.status(), self.url);
        }

        let ip = response.text().await?;
        tracing::debug!("Detected IP {:?} from {}", ip, self.url);
        Ok(ip)
    }
}
