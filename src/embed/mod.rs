//! Embed targets and the per-mount state machine.
//!
//! | Type | Description |
//! |------|-------------|
//! | [`EmbedTarget`] | URL + title to display |
//! | [`EmbedState`] | `Loading`, `Embedded` or `Blocked` |
//! | [`FrameSignal`] | Load / error signal from the frame |
//! | [`EmbedMachine`] | Pure transition core |

// ============================================================================
// Submodules
// ============================================================================

/// State machine and signals.
pub mod state;

/// Embed target.
pub mod target;

// ============================================================================
// Re-exports
// ============================================================================

pub use state::{BlockCause, EmbedMachine, EmbedState, FrameSignal, Transition};
pub use target::EmbedTarget;
