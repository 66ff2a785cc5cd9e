//! Host classification module.
//!
//! Maps a target URL to a [`HostClass`] and a suspicion timeout: how long
//! a mount waits for a load signal before treating the frame as blocked.
//!
//! | Host | Class | Timeout |
//! |------|-------|---------|
//! | unmatched | [`HostClass::Generic`] | 5000 ms |
//! | `y8.com` | [`ProviderKind::FrameBlocking`] | 3000 ms |
//! | `itch.zone`, `gamedistribution.com` | [`ProviderKind::SlowLoading`] | 10000 ms |
//!
//! The table is a heuristic built from observed provider behavior, not a
//! network probe.
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//! use game_embed::HostPolicy;
//! use url::Url;
//!
//! let policy = HostPolicy::default();
//! let url = Url::parse("https://www.y8.com/games/foo").unwrap();
//! assert_eq!(policy.suspicion_timeout(&url), Duration::from_millis(3000));
//! ```

// ============================================================================
// Submodules
// ============================================================================

/// Classification types and host rules.
pub mod host;

/// Rule table and timeouts.
pub mod table;

// ============================================================================
// Re-exports
// ============================================================================

pub use host::{HostClass, HostRule, ProviderKind};
pub use table::{
    DEFAULT_FRAME_BLOCKING_TIMEOUT, DEFAULT_GENERIC_TIMEOUT, DEFAULT_RULES,
    DEFAULT_SLOW_LOADING_TIMEOUT, HostPolicy,
};
