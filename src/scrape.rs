//! Scrape orchestration
//!
//! [`Scraper`] wires the pipeline together: fetch the page, parse it, extract
//! fields, resolve relative icon/image URLs, probe for a default favicon when
//! none was declared, and stamp the finished [`Metadata`] record. Only the
//! initial fetch can fail the call; everything downstream degrades to empty
//! fields.

use chrono::Utc;
use scraper::Html;
use tracing::{debug, info, instrument};

use crate::error::Result;
use crate::extraction::{extract_fields, resolve_relative, ExtractedFields, UrlParts};
use crate::fetcher::{Fetcher, ScrapeOptions};
use crate::metadata::Metadata;

/// Web page metadata scraper
///
/// Construct once and reuse: all scrape calls share one connection-pooled
/// HTTP client, and each call's intermediate state is call-local, so a single
/// `Scraper` is safe to share across tasks.
#[derive(Debug, Clone)]
pub struct Scraper {
    fetcher: Fetcher,
}

impl Scraper {
    /// Create a scraper with default options
    pub fn new() -> Result<Self> {
        Self::with_options(ScrapeOptions::default())
    }

    /// Create a scraper with the given options, replacing the defaults
    pub fn with_options(options: ScrapeOptions) -> Result<Self> {
        let fetcher = Fetcher::new(&options)?;
        Ok(Self { fetcher })
    }

    /// Create a scraper around an existing fetcher
    pub fn with_fetcher(fetcher: Fetcher) -> Self {
        Self { fetcher }
    }

    /// Scrape a URL into a [`Metadata`] record
    ///
    /// Fails only when the initial fetch fails; a page that yields few or no
    /// fields is still a success. The favicon probe runs only when the page
    /// declared no icon, and its failure leaves `icon` empty.
    #[instrument(skip(self))]
    pub async fn scrape(&self, url: &str) -> Result<Metadata> {
        info!("scraping {}", url);
        let body = self.fetcher.fetch_text(url).await?;

        // The parse tree is not Send; keep it scoped so the future stays
        // spawnable.
        let mut fields = {
            let document = Html::parse_document(&body);
            extract_fields(&document)
        };
        fields.normalize();

        if fields.canonical.is_empty() {
            fields.canonical = url.trim().to_string();
        }

        let parts = UrlParts::parse(&fields.canonical).or_else(|| UrlParts::parse(url));
        let record = self.finish(fields, parts).await;

        debug!(
            "scraped {}: title={:?}, icon={:?}",
            url, record.title, record.icon
        );
        Ok(record)
    }

    /// Resolve URLs, probe for a favicon, and assemble the record
    async fn finish(&self, fields: ExtractedFields, parts: Option<UrlParts>) -> Metadata {
        let mut site = String::new();
        let mut icon = fields.icon;
        let mut image = fields.image;

        if let Some(parts) = &parts {
            site = parts.host.clone();

            if !icon.is_empty() {
                icon = resolve_relative(&icon, parts);
            }

            image = image.map(|img| {
                img.map_url(|url| {
                    if url.is_empty() {
                        url
                    } else {
                        resolve_relative(&url, parts)
                    }
                })
            });

            if icon.is_empty() {
                let favicon = format!("{}://{}/favicon.ico", parts.scheme, parts.host);
                if self.fetcher.probe(&favicon).await {
                    icon = favicon;
                } else {
                    debug!("no favicon at {}", favicon);
                }
            }
        }

        Metadata {
            site,
            title: fields.title,
            image,
            description: fields.description,
            keywords: fields.keywords,
            canonical: fields.canonical,
            icon,
            author: fields.author,
            copyright: fields.copyright,
            amphtml: fields.amphtml,
            language: fields.language,
            scraped: Utc::now(),
        }
    }
}
