//! Error types for game embedding.
//!
//! This module defines all error types used throughout the crate.
//!
//! # Usage
//!
//! All fallible operations return [`Result<T>`] which uses [`Error`]:
//!
//! ```ignore
//! use game_embed::{EmbedTarget, Result};
//!
//! fn example(resolver: &EmbedResolver) -> Result<()> {
//!     let target = EmbedTarget::new("https://www.y8.com/games/foo", "Foo")?;
//!     let handle = resolver.mount(target)?;
//!     Ok(())
//! }
//! ```
//!
//! # Error Categories
//!
//! | Category | Variants |
//! |----------|----------|
//! | Configuration | [`Error::Config`], [`Error::InvalidUrl`] |
//! | Embedding | [`Error::EmbedUnavailable`] |
//! | Mount lifecycle | [`Error::MountNotFound`], [`Error::Unmounted`], [`Error::InvalidState`] |
//! | Protocol | [`Error::Protocol`] |
//! | Environment | [`Error::FrameHost`], [`Error::Navigation`] |
//! | External | [`Error::Io`], [`Error::Json`] |

// ============================================================================
// Imports
// ============================================================================

use std::io::Error as IoError;
use std::result::Result as StdResult;

use thiserror::Error;

use crate::identifiers::MountId;

// ============================================================================
// Result Alias
// ============================================================================

/// Result type alias using crate [`enum@Error`].
///
/// All fallible operations in this crate return this type.
pub type Result<T> = StdResult<T, Error>;

// ============================================================================
// Error Enum
// ============================================================================

/// Main error type for the crate.
///
/// Each variant includes relevant context for debugging.
#[derive(Error, Debug)]
pub enum Error {
    // ========================================================================
    // Configuration Errors
    // ========================================================================
    /// Configuration error.
    ///
    /// Returned when resolver options or host rules are invalid.
    #[error("Configuration error: {message}")]
    Config {
        /// Description of the configuration error.
        message: String,
    },

    /// URL could not be parsed as an absolute URL.
    #[error("Invalid URL '{url}': {message}")]
    InvalidUrl {
        /// The rejected input.
        url: String,
        /// Parser message.
        message: String,
    },

    // ========================================================================
    // Embedding Errors
    // ========================================================================
    /// The target could not be embedded.
    ///
    /// Covers both an explicit frame load error and suspicion-timeout
    /// expiry; the two are not distinguished.
    #[error("Embedding unavailable for {url}")]
    EmbedUnavailable {
        /// The target URL.
        url: String,
    },

    // ========================================================================
    // Mount Lifecycle Errors
    // ========================================================================
    /// No live mount with this ID.
    ///
    /// Returned when routing an event to a mount that was unmounted or
    /// never existed.
    #[error("Mount not found: {mount_id}")]
    MountNotFound {
        /// The missing mount ID.
        mount_id: MountId,
    },

    /// Mount was unmounted before it resolved.
    #[error("Mount {mount_id} was unmounted")]
    Unmounted {
        /// The unmounted mount ID.
        mount_id: MountId,
    },

    /// Operation not valid in the current embed state.
    #[error("Invalid state: {message}")]
    InvalidState {
        /// Description of the state conflict.
        message: String,
    },

    // ========================================================================
    // Protocol Errors
    // ========================================================================
    /// Malformed frame event from a browser bridge.
    #[error("Protocol error: {message}")]
    Protocol {
        /// Description of the protocol violation.
        message: String,
    },

    // ========================================================================
    // Environment Errors
    // ========================================================================
    /// The frame host failed to mount or drive a frame.
    #[error("Frame host error: {message}")]
    FrameHost {
        /// Description of the host failure.
        message: String,
    },

    /// Opening a new browsing context failed.
    #[error("Navigation failed: {message}")]
    Navigation {
        /// Description of the navigation failure.
        message: String,
    },

    // ========================================================================
    // External Errors
    // ========================================================================
    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] IoError),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

// ============================================================================
// Error Constructors
// ============================================================================

impl Error {
    /// Creates a configuration error.
    #[inline]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Creates an invalid URL error.
    #[inline]
    pub fn invalid_url(url: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidUrl {
            url: url.into(),
            message: message.into(),
        }
    }

    /// Creates an embed unavailable error.
    #[inline]
    pub fn embed_unavailable(url: impl Into<String>) -> Self {
        Self::EmbedUnavailable { url: url.into() }
    }

    /// Creates a mount not found error.
    #[inline]
    pub fn mount_not_found(mount_id: MountId) -> Self {
        Self::MountNotFound { mount_id }
    }

    /// Creates an unmounted error.
    #[inline]
    pub fn unmounted(mount_id: MountId) -> Self {
        Self::Unmounted { mount_id }
    }

    /// Creates an invalid state error.
    #[inline]
    pub fn invalid_state(message: impl Into<String>) -> Self {
        Self::InvalidState {
            message: message.into(),
        }
    }

    /// Creates a protocol error.
    #[inline]
    pub fn protocol(message: impl Into<String>) -> Self {
        Self::Protocol {
            message: message.into(),
        }
    }

    /// Creates a frame host error.
    #[inline]
    pub fn frame_host(message: impl Into<String>) -> Self {
        Self::FrameHost {
            message: message.into(),
        }
    }

    /// Creates a navigation error.
    #[inline]
    pub fn navigation(message: impl Into<String>) -> Self {
        Self::Navigation {
            message: message.into(),
        }
    }
}

// ============================================================================
// Error Predicates
// ============================================================================

impl Error {
    /// Returns `true` if this is an embedding failure.
    #[inline]
    #[must_use]
    pub fn is_embed_unavailable(&self) -> bool {
        matches!(self, Self::EmbedUnavailable { .. })
    }

    /// Returns `true` if this error concerns a mount that is no longer live.
    #[inline]
    #[must_use]
    pub fn is_mount_gone(&self) -> bool {
        matches!(
            self,
            Self::MountNotFound { .. } | Self::Unmounted { .. }
        )
    }

    /// Returns `true` if this error came from the environment.
    #[inline]
    #[must_use]
    pub fn is_environment_error(&self) -> bool {
        matches!(self, Self::FrameHost { .. } | Self::Navigation { .. })
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    use std::io::ErrorKind;

    #[test]
    fn test_error_display() {
        let err = Error::embed_unavailable("https://www.y8.com/games/foo");
        assert_eq!(
            err.to_string(),
            "Embedding unavailable for https://www.y8.com/games/foo"
        );
    }

    #[test]
    fn test_config_error() {
        let err = Error::config("timeout must be positive");
        assert_eq!(err.to_string(), "Configuration error: timeout must be positive");
    }

    #[test]
    fn test_invalid_url_display() {
        let err = Error::invalid_url("games/foo", "relative URL without a base");
        assert_eq!(
            err.to_string(),
            "Invalid URL 'games/foo': relative URL without a base"
        );
    }

    #[test]
    fn test_is_mount_gone() {
        let id = MountId::generate();
        assert!(Error::mount_not_found(id).is_mount_gone());
        assert!(Error::unmounted(id).is_mount_gone());
        assert!(!Error::invalid_state("blocked").is_mount_gone());
    }

    #[test]
    fn test_is_environment_error() {
        assert!(Error::frame_host("detached").is_environment_error());
        assert!(Error::navigation("popup blocked").is_environment_error());
        assert!(!Error::config("test").is_environment_error());
    }

    #[test]
    fn test_is_embed_unavailable() {
        assert!(Error::embed_unavailable("https://a.test/").is_embed_unavailable());
        assert!(!Error::config("test").is_embed_unavailable());
    }

    #[test]
    fn test_from_io_error() {
        let io_err = IoError::new(ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn test_from_json_error() {
        let json_err = serde_json::from_str::<String>("invalid").unwrap_err();
        let err: Error = json_err.into();
        assert!(matches!(err, Error::Json(_)));
    }
}
