//! Embed resolver: mounting, timers and event routing.
//!
//! | Type | Role |
//! |------|------|
//! | [`EmbedResolver`] | Classifies targets and starts mounts |
//! | [`ResolverBuilder`] | Wires the environment and options |
//! | [`ResolverOptions`] | Host rules and suspicion timeouts |
//! | [`EmbedHandle`] | One mount: state, view, fallback, fullscreen |
//! | [`FrameSignalSender`] | Feeds load and error signals to a mount |

// ============================================================================
// Submodules
// ============================================================================

mod builder;
mod core;
mod event_loop;
mod handle;
mod options;

// ============================================================================
// Re-exports
// ============================================================================

pub use builder::ResolverBuilder;
pub use core::EmbedResolver;
pub use handle::{EmbedHandle, FrameSignalSender};
pub use options::ResolverOptions;
