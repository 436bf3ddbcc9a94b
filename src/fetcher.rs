//! HTTP transport
//!
//! This module wraps a pooled `reqwest` client behind the small surface the
//! scraper needs: a redirect-following GET that returns body text, and a
//! best-effort probe used for favicon discovery. The client sends a fixed
//! browser-like User-Agent by default to reduce anti-bot blocking.

use std::collections::HashMap;
use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::redirect::Policy;
use tracing::{debug, instrument};

use crate::error::FetchError;

/// The fixed User-Agent sent with every request unless overridden
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/74.0.3729.169 Safari/537.36";

/// Maximum number of redirects followed when redirects are enabled
const MAX_REDIRECTS: usize = 10;

/// Constructor-time configuration for a [`Fetcher`]
///
/// Passing options to [`Scraper::with_options`](crate::Scraper::with_options)
/// replaces the defaults wholesale rather than merging with them.
#[derive(Debug, Clone)]
pub struct ScrapeOptions {
    /// Whether to follow HTTP redirects
    pub follow_redirects: bool,
    /// Headers sent with every request
    pub headers: HashMap<String, String>,
    /// External deadline for each network operation. When it fires on the main
    /// fetch the scrape fails; on the favicon probe the icon stays empty.
    pub timeout: Option<Duration>,
}

impl Default for ScrapeOptions {
    fn default() -> Self {
        let mut headers = HashMap::new();
        headers.insert("User-Agent".to_string(), DEFAULT_USER_AGENT.to_string());

        Self {
            follow_redirects: true,
            headers,
            timeout: None,
        }
    }
}

/// HTTP fetcher shared by all scrape calls
///
/// Holds a single connection-pooled client; concurrent scrapes may share one
/// fetcher safely.
#[derive(Debug, Clone)]
pub struct Fetcher {
    client: reqwest::Client,
}

impl Fetcher {
    /// Build a fetcher from the given options
    pub fn new(options: &ScrapeOptions) -> Result<Self, FetchError> {
        let mut headers = HeaderMap::new();
        for (name, value) in &options.headers {
            let name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|e| FetchError::ClientBuild(format!("invalid header name: {e}")))?;
            let value = HeaderValue::from_str(value)
                .map_err(|e| FetchError::ClientBuild(format!("invalid header value: {e}")))?;
            headers.insert(name, value);
        }

        let redirect = if options.follow_redirects {
            Policy::limited(MAX_REDIRECTS)
        } else {
            Policy::none()
        };

        let mut builder = reqwest::Client::builder()
            .default_headers(headers)
            .redirect(redirect);

        if let Some(timeout) = options.timeout {
            builder = builder.timeout(timeout);
        }

        let client = builder
            .build()
            .map_err(|e| FetchError::ClientBuild(e.to_string()))?;

        Ok(Self { client })
    }

    /// GET a URL and return its body as text
    ///
    /// A 4xx/5xx response is treated the same as a transport failure: the
    /// whole scrape aborts. Bodies that are not valid UTF-8 are re-encoded
    /// lossily rather than rejected.
    #[instrument(skip(self))]
    pub async fn fetch_text(&self, url: &str) -> Result<String, FetchError> {
        let response = self.client.get(url).send().await?;

        let status = response.status();
        if status.is_client_error() || status.is_server_error() {
            return Err(FetchError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let bytes = response.bytes().await?;
        debug!("fetched {} bytes from {}", bytes.len(), url);
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    /// Best-effort existence check for a URL
    ///
    /// Returns `true` iff the request completed and the final status is not a
    /// client or server error. Never fails; used for the favicon probe.
    #[instrument(skip(self))]
    pub async fn probe(&self, url: &str) -> bool {
        match self.client.get(url).send().await {
            Ok(response) => {
                let status = response.status();
                !status.is_client_error() && !status.is_server_error()
            }
            Err(err) => {
                debug!("probe of {} failed: {}", url, err);
                false
            }
        }
    }
}
