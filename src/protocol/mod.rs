//! Frame event protocol.
//!
//! Browser bridges report frame signals as JSON messages; the resolver
//! routes them to the matching mount by ID.
//!
//! | Message Type | Direction | Purpose |
//! |--------------|-----------|---------|
//! | [`FrameEvent`] | Bridge → Resolver | Frame load / error notification |
//!
//! Methods follow `module.eventName` format: `frame.load`, `frame.error`.

// ============================================================================
// Submodules
// ============================================================================

/// Frame event message types.
pub mod event;

// ============================================================================
// Re-exports
// ============================================================================

pub use event::{FrameEvent, METHOD_FRAME_ERROR, METHOD_FRAME_LOAD, ParsedFrameEvent};
