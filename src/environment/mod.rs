//! Environment primitives the resolver depends on.
//!
//! The resolver never touches a DOM or a browser directly. The embedding
//! application supplies:
//!
//! | Trait | Provides |
//! |-------|----------|
//! | [`FrameHost`] | Mount / unmount a frame element, fullscreen |
//! | [`Navigator`] | Open a URL in a new top-level browsing context |
//!
//! Load and error signals flow back through
//! [`EmbedHandle::signals`](crate::EmbedHandle::signals) or
//! [`EmbedResolver::dispatch`](crate::EmbedResolver::dispatch). Timers come
//! from `tokio::time`.

// ============================================================================
// Imports
// ============================================================================

use async_trait::async_trait;
use url::Url;

use crate::embed::EmbedTarget;
use crate::error::Result;
use crate::identifiers::MountId;

// ============================================================================
// FrameHost
// ============================================================================

/// Mounts embedded frames.
///
/// Implementations render a frame element with `src = target.url()` and
/// report its load/error signals back to the resolver under `mount_id`.
pub trait FrameHost: Send + Sync {
    /// Mounts a frame for the target.
    ///
    /// # Errors
    ///
    /// Any error resolves the mount as blocked.
    fn mount_frame(&self, mount_id: MountId, target: &EmbedTarget) -> Result<()>;

    /// Removes the frame. Must tolerate unknown IDs.
    fn unmount_frame(&self, mount_id: MountId);

    /// Requests fullscreen for a mounted frame. Must tolerate unknown IDs:
    /// the frame may have been unmounted concurrently.
    ///
    /// # Errors
    ///
    /// Returns an error if the environment refuses fullscreen.
    fn request_fullscreen(&self, mount_id: MountId) -> Result<()>;
}

// ============================================================================
// Navigator
// ============================================================================

/// Opens URLs outside the current browsing context.
#[async_trait]
pub trait Navigator: Send + Sync {
    /// Opens `url` in a new top-level browsing context.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Navigation`](crate::Error::Navigation) if the
    /// environment refuses (e.g. popup blocked).
    async fn open_new_context(&self, url: &Url) -> Result<()>;
}
