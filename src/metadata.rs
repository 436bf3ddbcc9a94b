//! The scraped metadata record
//!
//! [`Metadata`] is the sole entity this crate produces: one immutable record
//! per scrape, holding every extracted field plus the scrape timestamp. Its
//! identity is a derived 128-bit content hash over all fields except
//! `scraped`, computed over a fixed canonical field order so the same field
//! set always yields the same hash regardless of how it was assembled.

use chrono::{DateTime, Utc};
use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};
use xxhash_rust::xxh3::xxh3_128;

/// A page's preview image reference
///
/// Distinguishes an image the page explicitly declared for previews
/// (`og:image`) from one guessed by grabbing the first `<img>` on the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Image {
    /// First `<img src>` found in the document; a guess
    Guessed(String),
    /// Declared via `og:image`; trustworthy for previews
    Confirmed(String),
}

impl Image {
    /// The image URL, whichever variant holds it
    pub fn url(&self) -> &str {
        match self {
            Image::Guessed(url) | Image::Confirmed(url) => url,
        }
    }

    /// Whether the page explicitly declared this image via `og:image`
    pub fn is_confirmed(&self) -> bool {
        matches!(self, Image::Confirmed(_))
    }

    /// Rewrite the wrapped URL, preserving the variant
    pub(crate) fn map_url<F>(self, f: F) -> Self
    where
        F: FnOnce(String) -> String,
    {
        match self {
            Image::Guessed(url) => Image::Guessed(f(url)),
            Image::Confirmed(url) => Image::Confirmed(f(url)),
        }
    }
}

// A guessed image serializes as a bare URL string, a confirmed one as
// `{"url": ...}`. Consumers can tell provenance apart from the JSON shape
// alone, and the encoding feeds the identity hash, so it must stay stable.
impl Serialize for Image {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Image::Guessed(url) => serializer.serialize_str(url),
            Image::Confirmed(url) => {
                let mut state = serializer.serialize_struct("Image", 1)?;
                state.serialize_field("url", url)?;
                state.end()
            }
        }
    }
}

impl<'de> Deserialize<'de> for Image {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Confirmed {
                url: String,
            },
            Guessed(String),
        }

        Ok(match Repr::deserialize(deserializer)? {
            Repr::Confirmed { url } => Image::Confirmed(url),
            Repr::Guessed(url) => Image::Guessed(url),
        })
    }
}

/// Normalized metadata extracted from a single web page
///
/// String fields are empty (rather than absent) when the page offered
/// nothing; `canonical` is never empty once a scrape succeeds.
#[derive(Debug, Clone, PartialEq)]
pub struct Metadata {
    /// Host component of the canonical URL
    pub site: String,
    /// Best available page title
    pub title: String,
    /// Preview image, if any
    pub image: Option<Image>,
    /// Best available summary text
    pub description: String,
    /// Keywords from the keywords meta tag, comma-split and trimmed
    pub keywords: Vec<String>,
    /// The page's preferred URL, falling back to the requested URL
    pub canonical: String,
    /// Absolute favicon URL, or empty if none was found or probed
    pub icon: String,
    /// Document author
    pub author: String,
    /// Document copyright notice
    pub copyright: String,
    /// Link to the AMP version of the page
    pub amphtml: String,
    /// Document language code
    pub language: String,
    /// When this record was extracted; excluded from the identity hash
    pub scraped: DateTime<Utc>,
}

/// Hash input with the canonical field order fixed by declaration order.
///
/// `scraped` is deliberately absent so re-scrapes of unchanged pages hash
/// identically.
#[derive(Serialize)]
struct HashFields<'a> {
    site: &'a str,
    title: &'a str,
    image: &'a Option<Image>,
    description: &'a str,
    keywords: &'a [String],
    canonical: &'a str,
    icon: &'a str,
    author: &'a str,
    copyright: &'a str,
    amphtml: &'a str,
    language: &'a str,
}

impl Metadata {
    /// Deterministic 128-bit content hash over every field except `scraped`
    ///
    /// Stable across calls and across serialization of the record itself.
    pub fn hash(&self) -> String {
        let fields = HashFields {
            site: &self.site,
            title: &self.title,
            image: &self.image,
            description: &self.description,
            keywords: &self.keywords,
            canonical: &self.canonical,
            icon: &self.icon,
            author: &self.author,
            copyright: &self.copyright,
            amphtml: &self.amphtml,
            language: &self.language,
        };

        // String-only payload; encoding cannot fail.
        let encoded = serde_json::to_string(&fields).unwrap_or_default();
        format!("{:032x}", xxh3_128(encoded.as_bytes()))
    }

    /// Alias for [`hash`](Self::hash)
    pub fn id(&self) -> String {
        self.hash()
    }

    /// Serialize the record to a JSON string, including `hash` and `id`
    pub fn to_json(&self) -> crate::Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

impl Default for Metadata {
    fn default() -> Self {
        Self {
            site: String::new(),
            title: String::new(),
            image: None,
            description: String::new(),
            keywords: Vec::new(),
            canonical: String::new(),
            icon: String::new(),
            author: String::new(),
            copyright: String::new(),
            amphtml: String::new(),
            language: String::new(),
            scraped: Utc::now(),
        }
    }
}

// The external form is a flat object carrying the derived `hash` and `id`
// alongside every stored field, `scraped` included.
impl Serialize for Metadata {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let hash = self.hash();
        let mut state = serializer.serialize_struct("Metadata", 14)?;
        state.serialize_field("hash", &hash)?;
        state.serialize_field("id", &hash)?;
        state.serialize_field("site", &self.site)?;
        state.serialize_field("title", &self.title)?;
        state.serialize_field("image", &self.image)?;
        state.serialize_field("description", &self.description)?;
        state.serialize_field("keywords", &self.keywords)?;
        state.serialize_field("canonical", &self.canonical)?;
        state.serialize_field("icon", &self.icon)?;
        state.serialize_field("author", &self.author)?;
        state.serialize_field("copyright", &self.copyright)?;
        state.serialize_field("amphtml", &self.amphtml)?;
        state.serialize_field("language", &self.language)?;
        state.serialize_field("scraped", &self.scraped)?;
        state.end()
    }
}

impl<'de> Deserialize<'de> for Metadata {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        // `hash` and `id` are derived, not stored; unknown fields are ignored.
        #[derive(Deserialize)]
        struct Repr {
            #[serde(default)]
            site: String,
            #[serde(default)]
            title: String,
            #[serde(default)]
            image: Option<Image>,
            #[serde(default)]
            description: String,
            #[serde(default)]
            keywords: Vec<String>,
            #[serde(default)]
            canonical: String,
            #[serde(default)]
            icon: String,
            #[serde(default)]
            author: String,
            #[serde(default)]
            copyright: String,
            #[serde(default)]
            amphtml: String,
            #[serde(default)]
            language: String,
            scraped: DateTime<Utc>,
        }

        let repr = Repr::deserialize(deserializer)?;
        Ok(Metadata {
            site: repr.site,
            title: repr.title,
            image: repr.image,
            description: repr.description,
            keywords: repr.keywords,
            canonical: repr.canonical,
            icon: repr.icon,
            author: repr.author,
            copyright: repr.copyright,
            amphtml: repr.amphtml,
            language: repr.language,
            scraped: repr.scraped,
        })
    }
}
