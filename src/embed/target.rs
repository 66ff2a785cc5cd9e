//! Embed target: the URL and title to display.

use std::fmt;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{Error, Result};

// ============================================================================
// EmbedTarget
// ============================================================================

/// A third-party page to show inline.
///
/// Immutable once created. Two targets are equal when their URLs are equal;
/// the title is presentation only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbedTarget {
    /// Absolute http(s) URL of the page.
    url: Url,
    /// Display title.
    title: String,
}

impl EmbedTarget {
    /// Parses a target from a URL string.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidUrl`] if the URL is relative, malformed, or
    /// not http(s).
    pub fn new(url: &str, title: impl Into<String>) -> Result<Self> {
        let parsed = Url::parse(url).map_err(|e| Error::invalid_url(url, e.to_string()))?;
        Self::from_url(parsed, title)
    }

    /// Creates a target from an already parsed URL.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidUrl`] if the scheme is not http(s).
    pub fn from_url(url: Url, title: impl Into<String>) -> Result<Self> {
        match url.scheme() {
            "http" | "https" => Ok(Self {
                url,
                title: title.into(),
            }),
            other => Err(Error::invalid_url(
                url.as_str(),
                format!("unsupported scheme '{other}'"),
            )),
        }
    }

    /// Returns the target URL.
    #[inline]
    #[must_use]
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Returns the display title.
    #[inline]
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }
}

impl PartialEq for EmbedTarget {
    fn eq(&self, other: &Self) -> bool {
        self.url == other.url
    }
}

impl Eq for EmbedTarget {}

impl Hash for EmbedTarget {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.url.hash(state);
    }
}

impl fmt::Display for EmbedTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} <{}>", self.title, self.url)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_parses_absolute_url() {
        let target = EmbedTarget::new("https://www.y8.com/games/foo", "Foo").expect("target");
        assert_eq!(target.url().host_str(), Some("www.y8.com"));
        assert_eq!(target.title(), "Foo");
    }

    #[test]
    fn test_relative_url_rejected() {
        let err = EmbedTarget::new("/games/foo", "Foo").unwrap_err();
        assert!(matches!(err, Error::InvalidUrl { .. }));
    }

    #[test]
    fn test_script_scheme_rejected() {
        let err = EmbedTarget::new("javascript:alert(1)", "Foo").unwrap_err();
        assert!(err.to_string().contains("unsupported scheme"));
    }

    #[test]
    fn test_identity_is_url() {
        let a = EmbedTarget::new("https://example.org/game", "A").expect("target");
        let b = EmbedTarget::new("https://example.org/game", "B").expect("target");
        let c = EmbedTarget::new("https://example.org/other", "A").expect("target");
        assert_eq!(a, b);
        assert_ne!(a, c);
    }
}
