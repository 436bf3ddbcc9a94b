//! Relative URL resolution
//!
//! Icon and image references frequently come out of the document as
//! page-relative paths. They are resolved against the scheme, host, and path
//! of the canonical URL so every non-empty URL in the finished record is
//! absolute.

use url::Url;

/// Scheme, host, and path of the page's canonical URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlParts {
    /// URL scheme, e.g. `https`
    pub scheme: String,
    /// Host component
    pub host: String,
    /// Path component, always starting with `/`
    pub path: String,
}

impl UrlParts {
    /// Parse an absolute URL into its components
    ///
    /// Returns `None` for unparseable input or URLs without a host, in which
    /// case resolution and the favicon probe are skipped.
    pub fn parse(input: &str) -> Option<Self> {
        let parsed = Url::parse(input).ok()?;

        // Non-default ports stay part of the host so resolved URLs and the
        // favicon probe land on the same origin as the page.
        let host = match parsed.port() {
            Some(port) => format!("{}:{}", parsed.host_str()?, port),
            None => parsed.host_str()?.to_string(),
        };

        Some(Self {
            scheme: parsed.scheme().to_string(),
            host,
            path: parsed.path().to_string(),
        })
    }
}

/// Resolve a possibly page-relative URL against the canonical URL's parts
///
/// Values already starting with `http` pass through unchanged. Root-relative
/// values (`/...`) attach to the host; everything else attaches to the
/// trailing-slash-trimmed canonical path.
pub fn resolve_relative(value: &str, parts: &UrlParts) -> String {
    if value.starts_with("http") {
        return value.to_string();
    }

    if value.starts_with('/') {
        return format!("{}://{}{}", parts.scheme, parts.host, value);
    }

    let path = parts.path.trim_end_matches('/');
    format!("{}://{}{}/{}", parts.scheme, parts.host, path, value)
}
