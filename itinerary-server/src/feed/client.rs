//! Itinerary feed HTTP client.

use std::future::Future;

use reqwest::header::{ACCEPT, CACHE_CONTROL, HeaderMap, HeaderValue};
use tracing::info;

use crate::domain::LineId;

use super::error::FeedError;

/// Placeholder replaced by the line identifier in the path template.
pub const LINE_PLACEHOLDER: &str = "$$";

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Raw provider response: status code and undecoded body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedResponse {
    pub status: u16,
    pub body: String,
}

impl FeedResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }
}

/// Source of raw itinerary feeds.
///
/// This abstraction allows the itinerary service to be tested with mock
/// providers.
pub trait FeedSource {
    /// Fetch the raw feed for a line.
    ///
    /// Returns the provider's status and body as-is; only transport failures
    /// are errors.
    fn fetch(
        &self,
        line: &LineId,
    ) -> impl Future<Output = Result<FeedResponse, FeedError>> + Send;
}

/// Configuration for the feed client.
#[derive(Debug, Clone)]
pub struct FeedConfig {
    /// Provider host, optionally with a port (e.g. `data.example.org:8080`)
    pub host: String,
    /// Request path containing the `$$` line placeholder
    pub path_template: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl FeedConfig {
    /// Create a new config for the given host and path template.
    pub fn new(host: impl Into<String>, path_template: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            path_template: path_template.into(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// Build the provider URL for a line.
    pub fn itinerary_url(&self, line: &LineId) -> String {
        format!(
            "http://{}{}",
            self.host,
            self.path_template.replace(LINE_PLACEHOLDER, line.as_str())
        )
    }

    fn validate(&self) -> Result<(), FeedError> {
        if self.host.trim().is_empty() {
            return Err(FeedError::InvalidConfig {
                message: "provider host is empty".to_string(),
            });
        }
        if !self.path_template.contains(LINE_PLACEHOLDER) {
            return Err(FeedError::InvalidConfig {
                message: format!("path template has no {LINE_PLACEHOLDER} placeholder"),
            });
        }
        Ok(())
    }
}

/// HTTP client for the itinerary feed provider.
#[derive(Debug, Clone)]
pub struct FeedClient {
    http: reqwest::Client,
    config: FeedConfig,
}

impl FeedClient {
    /// Create a new feed client.
    ///
    /// Every request asks intermediaries not to cache and accepts any
    /// content type. Redirects are not followed, so a 302 reaches the decoder.
    pub fn new(config: FeedConfig) -> Result<Self, FeedError> {
        config.validate()?;

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("*/*"));
        headers.insert(CACHE_CONTROL, HeaderValue::from_static("no-cache"));

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .redirect(reqwest::redirect::Policy::none())
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { http, config })
    }

    pub fn config(&self) -> &FeedConfig {
        &self.config
    }
}

impl FeedSource for FeedClient {
    async fn fetch(&self, line: &LineId) -> Result<FeedResponse, FeedError> {
        let url = self.config.itinerary_url(line);
        info!(%line, %url, "requesting itinerary feed");

        let response = self.http.get(&url).send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;

        Ok(FeedResponse { status, body })
    }
}
