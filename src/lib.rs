//! Pagemeta - Web Page Metadata Extraction
//!
//! This crate fetches an arbitrary web page and distills it into a normalized,
//! content-addressable [`Metadata`] record suitable for caching or display
//! (e.g., link previews).
//!
//! # Features
//!
//! - **Precedence-based extraction**: picks the best value among conflicting
//!   sources (`<title>` vs. `og:title`, meta description vs. `og:description`)
//! - **URL normalization**: page-relative icon/image references are resolved
//!   against the canonical URL's scheme, host, and path
//! - **Favicon discovery**: falls back to probing `/favicon.ico` when the page
//!   declares no icon
//! - **Stable identity**: a deterministic 128-bit content hash over every field
//!   except the scrape timestamp
//!
//! # Architecture
//!
//! ```text
//! URL ──▶ Fetcher ──▶ Markup Parser ──▶ Field Extractor
//!                                            │
//!                                            ▼
//!                                      URL Resolver
//!                                            │
//!                                            ▼
//!                                     Favicon Prober ──▶ Metadata + hash
//! ```
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use pagemeta::Scraper;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let scraper = Scraper::new()?;
//!     let meta = scraper.scrape("https://example.com").await?;
//!
//!     println!("{}: {}", meta.hash(), meta.title);
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod error;
pub mod extraction;
pub mod fetcher;
pub mod metadata;
pub mod scrape;

// Re-exports for convenience
pub use error::{Error, FetchError, Result};
pub use fetcher::{Fetcher, ScrapeOptions, DEFAULT_USER_AGENT};
pub use metadata::{Image, Metadata};
pub use scrape::Scraper;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
