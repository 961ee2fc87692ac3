//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the scraper:
//! - Building HTTP clients with proper user agent strings
//! - Pacing requests through the [`Throttle`]
//! - GET requests returning the page body as text
//!
//! There is no retry logic. A transport failure aborts the run; a non-2xx
//! status is logged and the body is handed back as-is, so the caller sees
//! it as a page without the expected tables.

use crate::config::{Config, UserAgentConfig};
use crate::crawler::scheduler::Throttle;
use crate::ScrapeError;
use reqwest::Client;
use std::time::Duration;
use url::Url;

/// Builds an HTTP client with proper configuration
///
/// # Arguments
///
/// * `config` - The user agent configuration
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
///
/// # Example
///
/// ```no_run
/// use match_stats::config::UserAgentConfig;
/// use match_stats::crawler::build_http_client;
///
/// let client = build_http_client(&UserAgentConfig::default()).unwrap();
/// ```
pub fn build_http_client(config: &UserAgentConfig) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.header_value())
        .timeout(Duration::from_secs(30))
        .connect_timeout(Duration::from_secs(10))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Sequential, throttled page fetcher
#[derive(Debug)]
pub struct Fetcher {
    client: Client,
    throttle: Throttle,
    requests: u64,
}

impl Fetcher {
    /// Creates a fetcher from a client and the minimum request interval
    pub fn new(client: Client, min_interval: Duration) -> Self {
        Self {
            client,
            throttle: Throttle::new(min_interval),
            requests: 0,
        }
    }

    /// Creates a fetcher using the user agent and delay from `config`
    pub fn from_config(config: &Config) -> Result<Self, ScrapeError> {
        let client = build_http_client(&config.user_agent)?;
        Ok(Self::new(
            client,
            Duration::from_millis(config.scraper.request_delay_ms),
        ))
    }

    /// Fetches `url` and returns the response body as text
    ///
    /// Waits for the throttle first, and restarts its delay once the body
    /// has been read or the request has failed. Fails with
    /// [`ScrapeError::Http`] when the request cannot be sent or the body
    /// cannot be read.
    pub async fn fetch_page(&mut self, url: &Url) -> Result<String, ScrapeError> {
        self.throttle.wait().await;
        self.requests += 1;

        tracing::debug!("Fetching {}", url);
        let result = self.read_body(url).await;
        self.throttle.mark_done();

        result.map_err(|source| ScrapeError::Http {
            url: url.to_string(),
            source,
        })
    }

    async fn read_body(&self, url: &Url) -> Result<String, reqwest::Error> {
        let response = self.client.get(url.clone()).send().await?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!("HTTP {} for {}", status.as_u16(), url);
        }

        response.text().await
    }

    /// Number of requests issued so far
    pub fn requests_made(&self) -> u64 {
        self.requests
    }
}
