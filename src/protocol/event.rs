//! Frame event message types.
//!
//! Events are notifications sent from a browser bridge (the code that owns
//! the real frame elements) to the resolver when a frame fires `load` or
//! `error`.
//!
//! # Event Types
//!
//! | Method | Params |
//! |--------|--------|
//! | `frame.load` | `mountId` |
//! | `frame.error` | `mountId`, `error` |

// ============================================================================
// Imports
// ============================================================================

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::error::{Error, Result};
use crate::identifiers::MountId;

// ============================================================================
// Constants
// ============================================================================

/// Method name for frame load events.
pub const METHOD_FRAME_LOAD: &str = "frame.load";

/// Method name for frame error events.
pub const METHOD_FRAME_ERROR: &str = "frame.error";

// ============================================================================
// FrameEvent
// ============================================================================

/// An event notification from a browser bridge.
///
/// # Format
///
/// ```json
/// {
///   "type": "event",
///   "method": "frame.load",
///   "params": { "mountId": "550e8400-e29b-41d4-a716-446655440000" }
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FrameEvent {
    /// Event type marker (always "event").
    #[serde(rename = "type")]
    pub event_type: String,

    /// Event name in `module.eventName` format.
    pub method: String,

    /// Event-specific data.
    pub params: Value,
}

impl FrameEvent {
    /// Creates a `frame.load` event.
    #[must_use]
    pub fn load(mount_id: MountId) -> Self {
        Self::new(METHOD_FRAME_LOAD, json!({ "mountId": mount_id }))
    }

    /// Creates a `frame.error` event.
    #[must_use]
    pub fn error(mount_id: MountId, error: impl Into<String>) -> Self {
        Self::new(
            METHOD_FRAME_ERROR,
            json!({ "mountId": mount_id, "error": error.into() }),
        )
    }

    /// Parses an event from JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Json`] if the text is not a valid event.
    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Returns the module name from the method.
    #[inline]
    #[must_use]
    pub fn module(&self) -> &str {
        self.method.split('.').next().unwrap_or_default()
    }

    /// Returns the event name from the method.
    #[inline]
    #[must_use]
    pub fn event_name(&self) -> &str {
        self.method.split('.').nth(1).unwrap_or_default()
    }

    /// Parses the event into a typed variant.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Protocol`] if a known event lacks a valid `mountId`.
    pub fn parse(&self) -> Result<ParsedFrameEvent> {
        match self.method.as_str() {
            METHOD_FRAME_LOAD => Ok(ParsedFrameEvent::Load {
                mount_id: self.mount_id()?,
            }),

            METHOD_FRAME_ERROR => Ok(ParsedFrameEvent::Error {
                mount_id: self.mount_id()?,
                error: self.get_string_or("error", "frame error"),
            }),

            _ => Ok(ParsedFrameEvent::Unknown {
                method: self.method.clone(),
                params: self.params.clone(),
            }),
        }
    }

    fn new(method: &str, params: Value) -> Self {
        Self {
            event_type: "event".to_string(),
            method: method.to_string(),
            params,
        }
    }

    /// Gets the mount ID from params.
    fn mount_id(&self) -> Result<MountId> {
        self.params
            .get("mountId")
            .and_then(|v| v.as_str())
            .ok_or_else(|| Error::protocol(format!("{} without mountId", self.method)))?
            .parse()
    }

    /// Gets a string from params with default.
    #[inline]
    fn get_string_or(&self, key: &str, default: &str) -> String {
        self.params
            .get(key)
            .and_then(|v| v.as_str())
            .unwrap_or(default)
            .to_string()
    }
}

// ============================================================================
// ParsedFrameEvent
// ============================================================================

/// Parsed event types for type-safe handling.
#[derive(Debug, Clone, PartialEq)]
pub enum ParsedFrameEvent {
    /// Frame finished loading.
    Load {
        /// Mount the frame belongs to.
        mount_id: MountId,
    },

    /// Frame failed to load.
    Error {
        /// Mount the frame belongs to.
        mount_id: MountId,
        /// Error message.
        error: String,
    },

    /// Unknown event type.
    Unknown {
        /// Event method.
        method: String,
        /// Event params.
        params: Value,
    },
}

// ============================================================================
// Tests
// ============================================================================
