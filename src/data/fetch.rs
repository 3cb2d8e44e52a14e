//! HTTP client for the AMFI NAV listing
//!
//! Downloads the plain-text listing and splits it into lines for the parser.

use std::time::Duration;

use reqwest::{Client, StatusCode};
use thiserror::Error;
use tracing::{debug, info};

use crate::config::{Config, DEFAULT_NAV_URL, DEFAULT_TIMEOUT_SECS};

/// Errors that can occur when fetching the NAV listing
#[derive(Debug, Error)]
pub enum FetchError {
    /// Transport failure, including timeouts
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Server answered with a non-success status
    #[error("Server returned HTTP {0}")]
    Status(StatusCode),
}

impl FetchError {
    /// Whether the request was abandoned because the timeout elapsed
    pub fn is_timeout(&self) -> bool {
        matches!(self, FetchError::Request(e) if e.is_timeout())
    }
}

/// Client for downloading the NAV listing
#[derive(Debug, Clone)]
pub struct NavClient {
    /// HTTP client with the request timeout applied
    http_client: Client,
    /// Listing URL (overridable for testing)
    url: String,
}

impl NavClient {
    /// Creates a client for `url` whose requests give up after `timeout`
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, FetchError> {
        let http_client = Client::builder()
            .user_agent(concat!("amfinav/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()?;

        Ok(Self {
            http_client,
            url: url.into(),
        })
    }

    /// Creates a client from the URL and timeout in `config`
    pub fn from_config(config: &Config) -> Result<Self, FetchError> {
        Self::new(config.url.clone(), config.timeout)
    }

    /// The URL this client downloads from
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Fetches the listing and returns its body split on `\n`
    ///
    /// Empty lines are preserved, so a body ending in a newline yields a
    /// trailing empty element. Carriage returns are left for the parser.
    pub async fn fetch_lines(&self) -> Result<Vec<String>, FetchError> {
        info!(url = %self.url, "Fetching NAV listing");

        let response = self.http_client.get(&self.url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status));
        }

        let body = response.text().await?;
        let lines = split_lines(&body);
        debug!(bytes = body.len(), lines = lines.len(), "Downloaded NAV listing");
        Ok(lines)
    }
}

impl Default for NavClient {
    fn default() -> Self {
        Self {
            http_client: Client::builder()
                .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
                .build()
                .unwrap_or_default(),
            url: DEFAULT_NAV_URL.to_string(),
        }
    }
}

/// Splits a response body on line feeds, keeping empty elements
fn split_lines(body: &str) -> Vec<String> {
    body.split('\n').map(str::to_owned).collect()
}
