//! Host classification types.

// ============================================================================
// Imports
// ============================================================================

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

// ============================================================================
// ProviderKind
// ============================================================================

/// Known provider behavior when embedded in a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProviderKind {
    /// Usually refuses framing (X-Frame-Options / frame-ancestors).
    ///
    /// Refusal is near-instant, so the suspicion timeout is short.
    FrameBlocking,

    /// Embeddable, but slow to fire its load event.
    SlowLoading,
}

impl ProviderKind {
    /// Returns the string representation used in config and logs.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::FrameBlocking => "frame_blocking",
            Self::SlowLoading => "slow_loading",
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// HostClass
// ============================================================================

/// Classification of a target URL's host.
///
/// Derived on demand from the URL; never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum HostClass {
    /// No rule matched.
    #[default]
    Generic,

    /// Host matched a rule for a known provider.
    KnownRestrictive(ProviderKind),
}

impl HostClass {
    /// Returns the provider kind, if the host is known.
    #[inline]
    #[must_use]
    pub fn provider_kind(&self) -> Option<ProviderKind> {
        match self {
            Self::Generic => None,
            Self::KnownRestrictive(kind) => Some(*kind),
        }
    }

    /// Returns `true` if no rule matched.
    #[inline]
    #[must_use]
    pub fn is_generic(&self) -> bool {
        matches!(self, Self::Generic)
    }
}

impl fmt::Display for HostClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Generic => f.write_str("generic"),
            Self::KnownRestrictive(kind) => write!(f, "known_restrictive({kind})"),
        }
    }
}

// ============================================================================
// HostRule
// ============================================================================

/// A host rule: a domain and the provider kind it maps to.
///
/// A rule for `y8.com` matches `y8.com` and any subdomain such as
/// `www.y8.com`, but not `notmy8.com`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostRule {
    /// Domain the rule applies to.
    pub host: String,

    /// Provider behavior for the domain.
    pub kind: ProviderKind,
}

impl HostRule {
    /// Creates a new host rule.
    #[inline]
    #[must_use]
    pub fn new(host: impl Into<String>, kind: ProviderKind) -> Self {
        Self {
            host: host.into(),
            kind,
        }
    }

    /// Creates a rule for a provider that blocks framing.
    #[inline]
    #[must_use]
    pub fn frame_blocking(host: impl Into<String>) -> Self {
        Self::new(host, ProviderKind::FrameBlocking)
    }

    /// Creates a rule for a slow but embeddable provider.
    #[inline]
    #[must_use]
    pub fn slow_loading(host: impl Into<String>) -> Self {
        Self::new(host, ProviderKind::SlowLoading)
    }

    /// Returns the normalized domain for this rule.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the host is empty or looks like a URL.
    pub fn normalized_host(&self) -> Result<String> {
        normalize_host(&self.host)
            .ok_or_else(|| Error::config(format!("Invalid host rule: '{}'", self.host)))
    }
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Lower-cases a bare domain and strips a trailing dot.
///
/// Returns `None` for anything that is not a bare domain.
pub(crate) fn normalize_host(host: &str) -> Option<String> {
    let host = host.trim().trim_end_matches('.').to_ascii_lowercase();

    let valid = !host.is_empty()
        && !host.starts_with('.')
        && !host.contains("..")
        && host
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '.');

    valid.then_some(host)
}

// ============================================================================
// Tests
// ============================================================================
