//! Error types for pagemeta
//!
//! Two failure tiers exist. Transport-level failure of the initial page fetch
//! is fatal and surfaces as [`Error::Fetch`]; no record is produced. Every
//! per-field extraction problem (missing element, malformed attribute) and any
//! favicon-probe failure is recoverable: it is logged and swallowed, and the
//! scrape still succeeds with whatever fields were gathered.

use thiserror::Error;

/// The main error type for pagemeta operations
#[derive(Error, Debug)]
pub enum Error {
    /// Transport-level failure of a page fetch
    #[error("Fetch error: {0}")]
    Fetch(#[from] FetchError),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// HTTP transport errors
#[derive(Error, Debug)]
pub enum FetchError {
    /// Failed to construct the HTTP client
    #[error("Failed to build HTTP client: {0}")]
    ClientBuild(String),

    /// Request failed in transit (connection refused, DNS, timeout, TLS)
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The server answered with a client or server error status
    #[error("HTTP error {status} for {url}")]
    Status {
        /// HTTP status code
        status: u16,
        /// The URL that was fetched
        url: String,
    },
}

/// Result type alias for pagemeta operations
pub type Result<T> = std::result::Result<T, Error>;
