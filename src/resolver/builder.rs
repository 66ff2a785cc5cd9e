//! Builder pattern for resolver configuration.
//!
//! Provides a fluent API for configuring and creating [`EmbedResolver`]
//! instances.
//!
//! # Example
//!
//! ```ignore
//! use game_embed::{EmbedResolver, HostRule};
//!
//! let resolver = EmbedResolver::builder()
//!     .host(my_host)
//!     .navigator(my_navigator)
//!     .rule(HostRule::frame_blocking("example-arcade.com"))
//!     .build()?;
//! ```

// ============================================================================
// Imports
// ============================================================================

use std::fmt;
use std::path::Path;
use std::sync::Arc;

use crate::environment::{FrameHost, Navigator};
use crate::error::{Error, Result};
use crate::policy::{HostPolicy, HostRule};

use super::core::EmbedResolver;
use super::options::ResolverOptions;

// ============================================================================
// ResolverBuilder
// ============================================================================

/// Builder for configuring an [`EmbedResolver`].
///
/// Use [`EmbedResolver::builder()`] to create a new builder.
#[derive(Default, Clone)]
pub struct ResolverBuilder {
    /// Frame mounting primitive.
    host: Option<Arc<dyn FrameHost>>,
    /// New-context navigation primitive.
    navigator: Option<Arc<dyn Navigator>>,
    /// Classification table and timeouts.
    options: ResolverOptions,
}

impl fmt::Debug for ResolverBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResolverBuilder")
            .field("host", &self.host.is_some())
            .field("navigator", &self.navigator.is_some())
            .field("options", &self.options)
            .finish()
    }
}

// ============================================================================
// ResolverBuilder Implementation
// ============================================================================

impl ResolverBuilder {
    /// Creates a new builder with default options.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the frame host.
    #[inline]
    #[must_use]
    pub fn host(self, host: impl FrameHost + 'static) -> Self {
        self.host_arc(Arc::new(host))
    }

    /// Sets a shared frame host.
    #[inline]
    #[must_use]
    pub fn host_arc(mut self, host: Arc<dyn FrameHost>) -> Self {
        self.host = Some(host);
        self
    }

    /// Sets the navigator.
    #[inline]
    #[must_use]
    pub fn navigator(self, navigator: impl Navigator + 'static) -> Self {
        self.navigator_arc(Arc::new(navigator))
    }

    /// Sets a shared navigator.
    #[inline]
    #[must_use]
    pub fn navigator_arc(mut self, navigator: Arc<dyn Navigator>) -> Self {
        self.navigator = Some(navigator);
        self
    }

    /// Replaces the options.
    #[inline]
    #[must_use]
    pub fn options(mut self, options: ResolverOptions) -> Self {
        self.options = options;
        self
    }

    /// Adds a host rule.
    #[inline]
    #[must_use]
    pub fn rule(mut self, rule: HostRule) -> Self {
        self.options.rules.push(rule);
        self
    }

    /// Loads options from a JSON config file.
    ///
    /// # Errors
    ///
    /// See [`ResolverOptions::from_json_file`].
    pub fn config_file(mut self, path: impl AsRef<Path>) -> Result<Self> {
        self.options = ResolverOptions::from_json_file(path)?;
        Ok(self)
    }

    /// Builds the resolver with validation.
    ///
    /// # Errors
    ///
    /// - [`Error::Config`] if the host or navigator is not set
    /// - [`Error::Config`] if the options are invalid
    pub fn build(self) -> Result<EmbedResolver> {
        let host = self.host.ok_or_else(|| {
            Error::config(
                "Frame host is required. Use .host() to set it.\n\
                 Example: EmbedResolver::builder().host(MyHost::new())",
            )
        })?;

        let navigator = self.navigator.ok_or_else(|| {
            Error::config(
                "Navigator is required. Use .navigator() to set it.\n\
                 Example: EmbedResolver::builder().navigator(MyNavigator::new())",
            )
        })?;

        let policy = HostPolicy::from_options(&self.options)?;

        Ok(EmbedResolver::new(policy, host, navigator))
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    use std::io::Write;

    use crate::testing::{RecordingHost, RecordingNavigator};

    #[test]
    fn test_build_fails_without_host() {
        let err = ResolverBuilder::new()
            .navigator(RecordingNavigator::default())
            .build()
            .unwrap_err();
        assert!(err.to_string().contains("Frame host"));
    }

    #[test]
    fn test_build_fails_without_navigator() {
        let err = ResolverBuilder::new()
            .host(RecordingHost::default())
            .build()
            .unwrap_err();
        assert!(err.to_string().contains("Navigator"));
    }

    #[test]
    fn test_build_with_defaults() {
        let resolver = ResolverBuilder::new()
            .host(RecordingHost::default())
            .navigator(RecordingNavigator::default())
            .build()
            .expect("resolver");
        assert_eq!(resolver.policy().rule_count(), 3);
        assert_eq!(resolver.active_mounts(), 0);
    }

    #[test]
    fn test_rule_is_added() {
        let resolver = ResolverBuilder::new()
            .host(RecordingHost::default())
            .navigator(RecordingNavigator::default())
            .rule(HostRule::frame_blocking("arcade.test"))
            .build()
            .expect("resolver");
        assert_eq!(resolver.policy().rule_count(), 4);
    }

    #[test]
    fn test_invalid_options_rejected() {
        let err = ResolverBuilder::new()
            .host(RecordingHost::default())
            .navigator(RecordingNavigator::default())
            .rule(HostRule::frame_blocking(""))
            .build()
            .unwrap_err();
        assert!(matches!(err, Error::Config { .. }));
    }

    #[test]
    fn test_config_file() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        write!(file, r#"{{"rules": []}}"#).expect("write config");

        let resolver = ResolverBuilder::new()
            .config_file(file.path())
            .expect("config")
            .host(RecordingHost::default())
            .navigator(RecordingNavigator::default())
            .build()
            .expect("resolver");
        assert_eq!(resolver.policy().rule_count(), 0);
    }

    #[test]
    fn test_builder_is_clone() {
        let builder = ResolverBuilder::new().host(RecordingHost::default());
        let cloned = builder.clone();
        assert!(cloned.host.is_some());
    }
}
