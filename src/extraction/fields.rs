//! Field extractor
//!
//! Walks the parsed document once per tag family, applying a fixed precedence
//! order: plain HTML sources first (`<title>`, first `<img>`, heading/paragraph
//! fallback), then meta tags in document order (so the last matching meta
//! wins), then `<link>` relations. A failure to read any single source leaves
//! that field alone; extraction itself never fails.

use std::sync::LazyLock;

use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use tracing::debug;

use crate::metadata::Image;

/// Tags tried, in order, when no description meta tag is present
const DESCRIPTION_FALLBACK_TAGS: [&str; 4] = ["h1", "h2", "h3", "p"];

// C0 control characters, DEL, and the non-breaking space.
static CONTROL_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\x00-\x1F\x7F\u{A0}]").unwrap());

/// The raw field set gathered from a document, before URL resolution
///
/// String fields hold empty strings (not options) so the later normalization
/// and precedence checks reduce to simple emptiness tests.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExtractedFields {
    /// Best available title
    pub title: String,
    /// Preview image; guessed from `<img>` or confirmed via `og:image`
    pub image: Option<Image>,
    /// Best available description
    pub description: String,
    /// Comma-split keywords
    pub keywords: Vec<String>,
    /// `link[rel=canonical]` href, possibly empty
    pub canonical: String,
    /// `link[rel=icon]` / `link[rel=apple-touch-icon]` href, possibly relative
    pub icon: String,
    /// `meta[name=author]` content
    pub author: String,
    /// `meta[name=copyright]` content
    pub copyright: String,
    /// `link[rel=amphtml]` href
    pub amphtml: String,
    /// `lang` attribute of the root `<html>` element
    pub language: String,
}

impl ExtractedFields {
    /// Strip embedded newlines and surrounding whitespace from every field
    pub fn normalize(&mut self) {
        for field in [
            &mut self.title,
            &mut self.description,
            &mut self.canonical,
            &mut self.icon,
            &mut self.author,
            &mut self.copyright,
            &mut self.amphtml,
            &mut self.language,
        ] {
            *field = strip_newlines(field).trim().to_string();
        }

        if let Some(image) = self.image.take() {
            self.image = Some(image.map_url(|url| strip_newlines(&url).trim().to_string()));
        }

        for keyword in &mut self.keywords {
            *keyword = keyword.trim().to_string();
        }
    }
}

/// Extract all recognized fields from a parsed document
pub fn extract_fields(document: &Html) -> ExtractedFields {
    let mut fields = ExtractedFields::default();

    if let Some(lang) = first_attr(document, "html", "lang") {
        fields.language = lang;
    }

    if let Some(title) = first_element(document, "title") {
        fields.title = title.text().collect();
    }

    if let Some(src) = first_attr(document, "img", "src") {
        fields.image = Some(Image::Guessed(src));
    }

    // Heading/paragraph fallback runs before the meta pass, so it compares
    // against the <title> value, not a later og:title override.
    for tag in DESCRIPTION_FALLBACK_TAGS {
        if let Some(element) = first_element(document, tag) {
            let text: String = element.text().collect();
            let cleaned = clean_fallback_text(&text);
            if !cleaned.is_empty() && cleaned != fields.title {
                debug!("description fallback matched <{}>", tag);
                fields.description = cleaned;
                break;
            }
        }
    }

    apply_meta_tags(document, &mut fields);
    apply_link_tags(document, &mut fields);

    fields
}

/// Meta tag pass, in document order; the last matching tag of a kind wins
fn apply_meta_tags(document: &Html, fields: &mut ExtractedFields) {
    let Ok(selector) = Selector::parse("meta") else {
        return;
    };

    for node in document.select(&selector) {
        let content = node.value().attr("content").unwrap_or("");

        match node.value().attr("name") {
            Some("description") => {
                if !content.trim().is_empty() {
                    fields.description = content.to_string();
                }
            }
            Some("keywords") => {
                if !content.trim().is_empty() {
                    fields.keywords = content
                        .split(',')
                        .map(|keyword| keyword.trim().to_string())
                        .collect();
                }
            }
            Some("author") => {
                if !content.trim().is_empty() {
                    fields.author = content.to_string();
                }
            }
            Some("copyright") => {
                if !content.trim().is_empty() {
                    fields.copyright = content.to_string();
                }
            }
            _ => match node.value().attr("property") {
                Some("og:image") => {
                    fields.image = Some(Image::Confirmed(content.to_string()));
                }
                Some("og:description") => {
                    let description = content.trim();
                    if !description.is_empty() {
                        fields.description = description.to_string();
                    }
                }
                Some("og:title") => {
                    let title = strip_newlines(content);
                    let title = title.trim();
                    if !title.is_empty() {
                        fields.title = title.to_string();
                    }
                }
                _ => {}
            },
        }
    }
}

/// Link relation pass, in document order; later relations win
fn apply_link_tags(document: &Html, fields: &mut ExtractedFields) {
    let Ok(selector) = Selector::parse("link") else {
        return;
    };

    for node in document.select(&selector) {
        let (Some(rel), Some(href)) = (node.value().attr("rel"), node.value().attr("href"))
        else {
            continue;
        };

        match rel {
            "icon" | "apple-touch-icon" => fields.icon = href.to_string(),
            "canonical" => fields.canonical = href.to_string(),
            "amphtml" => fields.amphtml = href.to_string(),
            _ => {}
        }
    }
}

fn first_element<'a>(document: &'a Html, tag: &str) -> Option<ElementRef<'a>> {
    let selector = Selector::parse(tag).ok()?;
    document.select(&selector).next()
}

fn first_attr(document: &Html, tag: &str, attr: &str) -> Option<String> {
    let element = first_element(document, tag)?;
    element.value().attr(attr).map(str::to_string)
}

fn strip_newlines(text: &str) -> String {
    text.replace(['\n', '\r'], "")
}

/// Clean a heading/paragraph candidate: strip newlines, decode HTML entities,
/// drop control characters and non-breaking spaces, trim.
fn clean_fallback_text(text: &str) -> String {
    let flattened = strip_newlines(text);
    let trimmed = flattened.trim();
    let decoded = htmlescape::decode_html(trimmed).unwrap_or_else(|_| trimmed.to_string());
    CONTROL_CHARS.replace_all(&decoded, "").trim().to_string()
}
