//! Fetch seam for listing pages

use std::time::Duration;

#[cfg(test)]
use mockall::automock;

use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, warn};

use crate::config::{DEFAULT_FETCH_TIMEOUT_SECS, USER_AGENT};
use crate::scan::error::ScanError;

/// Trait for fetching the raw HTML of a listing page
#[cfg_attr(test, automock)]
#[async_trait]
pub trait PageSource: Send + Sync {
    /// Fetches the body of `url`
    ///
    /// # Returns
    /// * `Ok(String)` - The page body
    /// * `Err(ScanError)` - Transport failure or a non-success status
    async fn fetch(&self, url: &str) -> Result<String, ScanError>;
}

/// Page source backed by a shared reqwest client
pub struct HttpPageSource {
    client: Client,
}

impl HttpPageSource {
    pub fn new(timeout: Duration) -> Result<Self, ScanError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl PageSource for HttpPageSource {
    async fn fetch(&self, url: &str) -> Result<String, ScanError> {
        debug!("Fetching listing page: {}", url);

        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            warn!("Listing page returned status {}: {}", status, url);
            return Err(ScanError::UpstreamStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        Ok(response.text().await?)
    }
}
