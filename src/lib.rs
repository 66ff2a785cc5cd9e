//! Game Embed - Inline display of third-party game pages with fallback.
//!
//! This library decides whether a third-party page can be shown inside an
//! inline frame and, when it cannot, swaps the frame for a panel that opens
//! the page in a new browsing context.
//!
//! # Architecture
//!
//! Embeddability cannot be observed directly: a frame refused by the
//! publisher's framing policy often fires no error at all. Each mount
//! therefore races the frame's load signal against a suspicion timer whose
//! length depends on the target's host:
//!
//! - **Loading**: frame mounted, spinner overlaid, timer armed
//! - **Embedded**: the frame reported a load before the timer fired
//! - **Blocked**: the frame errored or the timer fired; the frame is
//!   removed and the fallback is shown
//!
//! Key design principles:
//!
//! - Each [`EmbedHandle`] owns one tokio task and one state machine
//! - The first resolving input wins; later signals are ignored
//! - The host environment is injected through [`FrameHost`] and [`Navigator`]
//! - Frame signals arrive as typed calls or `frame.*` JSON events
//!
//! # Quick Start
//!
//! ```ignore
//! use game_embed::{EmbedResolver, EmbedState, EmbedTarget, Result};
//!
//! async fn show(resolver: &EmbedResolver) -> Result<()> {
//!     let target = EmbedTarget::new("https://www.y8.com/games/foo", "Foo")?;
//!     let handle = resolver.mount(target)?;
//!
//!     // Forward the real frame's load event:
//!     // handle.signals().load()?;
//!
//!     if handle.wait_resolved().await? == EmbedState::Blocked {
//!         println!("{}", handle.view().to_html());
//!     }
//!     Ok(())
//! }
//! ```
//!
//! # Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`embed`] | Targets, states and the state machine |
//! | [`environment`] | Host traits: [`FrameHost`], [`Navigator`] |
//! | [`error`] | Error types and [`Result`] alias |
//! | [`identifiers`] | Type-safe ID wrappers |
//! | [`policy`] | Host classification and suspicion timeouts |
//! | [`protocol`] | Frame event messages |
//! | [`resolver`] | [`EmbedResolver`] and [`EmbedHandle`] |
//! | [`view`] | Render model and HTML output |

// ============================================================================
// Modules
// ============================================================================

/// Embed targets and the per-mount state machine.
pub mod embed;

/// Environment primitives supplied by the embedding application.
pub mod environment;

/// Error types and result aliases.
///
/// All fallible operations return [`Result<T>`] which uses [`Error`].
pub mod error;

/// Type-safe identifiers.
pub mod identifiers;

/// Host classification table.
pub mod policy;

/// Frame event messages.
///
/// JSON structures reported by whatever observes the real frame.
pub mod protocol;

/// Resolver, mount handles and configuration.
///
/// Use [`EmbedResolver::builder()`] to create a configured resolver.
pub mod resolver;

/// Render model for the display region.
pub mod view;

#[cfg(test)]
mod testing;

// ============================================================================
// Re-exports
// ============================================================================

// Embed types
pub use embed::{BlockCause, EmbedMachine, EmbedState, EmbedTarget, FrameSignal, Transition};

// Environment traits
pub use environment::{FrameHost, Navigator};

// Error types
pub use error::{Error, Result};

// Identifier types
pub use identifiers::MountId;

// Policy types
pub use policy::{HostClass, HostPolicy, HostRule, ProviderKind};

// Protocol types
pub use protocol::{FrameEvent, ParsedFrameEvent};

// Resolver types
pub use resolver::{
    EmbedHandle, EmbedResolver, FrameSignalSender, ResolverBuilder, ResolverOptions,
};

// View types
pub use view::{AspectRatio, EmbedView, FallbackView, FrameView};
