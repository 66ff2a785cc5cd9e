//! Resolver options and configuration file loading.
//!
//! Options are plain serde data so they can live in a JSON config file:
//!
//! ```json
//! {
//!   "generic_timeout_ms": 5000,
//!   "frame_blocking_timeout_ms": 3000,
//!   "slow_loading_timeout_ms": 10000,
//!   "rules": [
//!     { "host": "y8.com", "kind": "frame_blocking" },
//!     { "host": "itch.zone", "kind": "slow_loading" }
//!   ]
//! }
//! ```
//!
//! Omitted fields take their defaults. An explicit `rules` array replaces
//! the built-in table.
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//! use game_embed::{HostRule, ResolverOptions};
//!
//! let options = ResolverOptions::new()
//!     .with_rule(HostRule::frame_blocking("example-arcade.com"))
//!     .with_generic_timeout(Duration::from_secs(6));
//!
//! assert!(options.validate().is_ok());
//! ```

// ============================================================================
// Imports
// ============================================================================

use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};
use crate::policy::{
    DEFAULT_FRAME_BLOCKING_TIMEOUT, DEFAULT_GENERIC_TIMEOUT, DEFAULT_RULES,
    DEFAULT_SLOW_LOADING_TIMEOUT, HostRule,
};

// ============================================================================
// ResolverOptions
// ============================================================================

/// Classification table and suspicion timeouts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverOptions {
    /// Timeout for hosts with no rule, in milliseconds.
    pub generic_timeout_ms: u64,

    /// Timeout for frame-blocking providers, in milliseconds.
    pub frame_blocking_timeout_ms: u64,

    /// Timeout for slow-loading providers, in milliseconds.
    pub slow_loading_timeout_ms: u64,

    /// Host rules.
    pub rules: Vec<HostRule>,
}

impl Default for ResolverOptions {
    fn default() -> Self {
        Self {
            generic_timeout_ms: duration_ms(DEFAULT_GENERIC_TIMEOUT),
            frame_blocking_timeout_ms: duration_ms(DEFAULT_FRAME_BLOCKING_TIMEOUT),
            slow_loading_timeout_ms: duration_ms(DEFAULT_SLOW_LOADING_TIMEOUT),
            rules: DEFAULT_RULES
                .iter()
                .map(|(host, kind)| HostRule::new(*host, *kind))
                .collect(),
        }
    }
}

// ============================================================================
// Constructors
// ============================================================================

impl ResolverOptions {
    /// Creates options with the built-in table and timeouts.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses options from a JSON string.
    ///
    /// # Errors
    ///
    /// - [`Error::Json`] if the JSON is malformed
    /// - [`Error::Config`] if the options fail validation
    pub fn from_json_str(json: &str) -> Result<Self> {
        let options: Self = serde_json::from_str(json)?;
        options.validate()?;
        Ok(options)
    }

    /// Loads options from a JSON file.
    ///
    /// # Errors
    ///
    /// - [`Error::Io`] if the file cannot be read
    /// - [`Error::Json`] if the JSON is malformed
    /// - [`Error::Config`] if the options fail validation
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!(path = %path.display(), "Loading resolver options");

        let contents = fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }
}

// ============================================================================
// Builder Methods
// ============================================================================

impl ResolverOptions {
    /// Adds a host rule.
    #[inline]
    #[must_use]
    pub fn with_rule(mut self, rule: HostRule) -> Self {
        self.rules.push(rule);
        self
    }

    /// Adds multiple host rules.
    #[inline]
    #[must_use]
    pub fn with_rules(mut self, rules: impl IntoIterator<Item = HostRule>) -> Self {
        self.rules.extend(rules);
        self
    }

    /// Removes all host rules, including the built-in ones.
    #[inline]
    #[must_use]
    pub fn without_rules(mut self) -> Self {
        self.rules.clear();
        self
    }

    /// Sets the timeout for unmatched hosts.
    #[inline]
    #[must_use]
    pub fn with_generic_timeout(mut self, timeout: Duration) -> Self {
        self.generic_timeout_ms = duration_ms(timeout);
        self
    }

    /// Sets the timeout for frame-blocking providers.
    #[inline]
    #[must_use]
    pub fn with_frame_blocking_timeout(mut self, timeout: Duration) -> Self {
        self.frame_blocking_timeout_ms = duration_ms(timeout);
        self
    }

    /// Sets the timeout for slow-loading providers.
    #[inline]
    #[must_use]
    pub fn with_slow_loading_timeout(mut self, timeout: Duration) -> Self {
        self.slow_loading_timeout_ms = duration_ms(timeout);
        self
    }
}

// ============================================================================
// Accessors
// ============================================================================

impl ResolverOptions {
    /// Returns the generic timeout.
    #[inline]
    #[must_use]
    pub fn generic_timeout(&self) -> Duration {
        Duration::from_millis(self.generic_timeout_ms)
    }

    /// Returns the frame-blocking timeout.
    #[inline]
    #[must_use]
    pub fn frame_blocking_timeout(&self) -> Duration {
        Duration::from_millis(self.frame_blocking_timeout_ms)
    }

    /// Returns the slow-loading timeout.
    #[inline]
    #[must_use]
    pub fn slow_loading_timeout(&self) -> Duration {
        Duration::from_millis(self.slow_loading_timeout_ms)
    }

    /// Validates the options.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if a timeout is zero or a rule host is not
    /// a bare domain.
    pub fn validate(&self) -> Result<()> {
        let timeouts = [
            ("generic_timeout_ms", self.generic_timeout_ms),
            ("frame_blocking_timeout_ms", self.frame_blocking_timeout_ms),
            ("slow_loading_timeout_ms", self.slow_loading_timeout_ms),
        ];

        for (name, value) in timeouts {
            if value == 0 {
                return Err(Error::config(format!("{name} must be greater than zero")));
            }
        }

        for rule in &self.rules {
            rule.normalized_host()?;
        }

        Ok(())
    }
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Converts a duration to whole milliseconds, saturating.
fn duration_ms(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

// ============================================================================
// Tests
// ============================================================================
