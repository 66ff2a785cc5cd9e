//! Embed state machine.
//!
//! [`EmbedMachine`] is the synchronous transition core. It has no notion of
//! time or I/O; the resolver's event loop feeds it signals and timer
//! expiry.
//!
//! ```text
//!            load
//!   Loading ──────────▶ Embedded
//!      │
//!      │ error | timeout | mount failed
//!      ▼
//!   Blocked
//! ```
//!
//! Both `Embedded` and `Blocked` are terminal for the mount.

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

// ============================================================================
// EmbedState
// ============================================================================

/// State of one mount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmbedState {
    /// Frame mounted, waiting for a load signal.
    #[default]
    Loading,

    /// Frame reported load complete.
    Embedded,

    /// Frame errored or the suspicion timeout elapsed.
    Blocked,
}

impl EmbedState {
    /// Returns `true` once the mount has left `Loading`.
    #[inline]
    #[must_use]
    pub fn is_resolved(&self) -> bool {
        !matches!(self, Self::Loading)
    }

    /// Returns `true` if the frame element is on screen.
    #[inline]
    #[must_use]
    pub fn frame_visible(&self) -> bool {
        matches!(self, Self::Loading | Self::Embedded)
    }

    /// Returns `true` if the fallback panel is on screen.
    #[inline]
    #[must_use]
    pub fn fallback_visible(&self) -> bool {
        matches!(self, Self::Blocked)
    }

    /// Returns the string representation.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Loading => "loading",
            Self::Embedded => "embedded",
            Self::Blocked => "blocked",
        }
    }
}

impl fmt::Display for EmbedState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// FrameSignal
// ============================================================================

/// A signal observed on the embedded frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FrameSignal {
    /// The frame's load-complete event fired.
    Load,

    /// The frame reported a load error.
    Error {
        /// Message reported by the environment.
        message: String,
    },
}

impl FrameSignal {
    /// Creates an error signal.
    #[inline]
    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self::Error {
            message: message.into(),
        }
    }
}

// ============================================================================
// BlockCause
// ============================================================================

/// Why a mount was blocked.
///
/// Only used for logging; [`EmbedState::Blocked`] carries no cause.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlockCause {
    /// The frame reported a load error.
    LoadError(String),

    /// No load signal within the suspicion timeout.
    SuspicionTimeout(Duration),

    /// The host could not mount the frame.
    MountFailed(String),
}

impl fmt::Display for BlockCause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LoadError(message) => write!(f, "load error: {message}"),
            Self::SuspicionTimeout(timeout) => {
                write!(f, "no load signal within {}ms", timeout.as_millis())
            }
            Self::MountFailed(message) => write!(f, "mount failed: {message}"),
        }
    }
}

// ============================================================================
// Transition
// ============================================================================

/// A committed state change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    /// State before the change.
    pub from: EmbedState,
    /// State after the change.
    pub to: EmbedState,
    /// Cause, when the change is to `Blocked`.
    pub cause: Option<BlockCause>,
}

// ============================================================================
// EmbedMachine
// ============================================================================

/// Transition core for one mount.
///
/// Every input returns `Some(Transition)` only if it committed a change.
/// Once resolved, all further inputs are ignored.
#[derive(Debug, Clone, Default)]
pub struct EmbedMachine {
    state: EmbedState,
}

impl EmbedMachine {
    /// Creates a machine in `Loading`.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the current state.
    #[inline]
    #[must_use]
    pub fn state(&self) -> EmbedState {
        self.state
    }

    /// Returns `true` once a terminal state is committed.
    #[inline]
    #[must_use]
    pub fn is_resolved(&self) -> bool {
        self.state.is_resolved()
    }

    /// Feeds a frame signal.
    pub fn on_signal(&mut self, signal: &FrameSignal) -> Option<Transition> {
        match signal {
            FrameSignal::Load => self.commit(EmbedState::Embedded, None),
            FrameSignal::Error { message } => self.commit(
                EmbedState::Blocked,
                Some(BlockCause::LoadError(message.clone())),
            ),
        }
    }

    /// Feeds suspicion-timeout expiry.
    pub fn on_timeout(&mut self, timeout: Duration) -> Option<Transition> {
        self.commit(
            EmbedState::Blocked,
            Some(BlockCause::SuspicionTimeout(timeout)),
        )
    }

    /// Feeds a host mount failure.
    pub fn on_mount_failed(&mut self, message: impl Into<String>) -> Option<Transition> {
        self.commit(
            EmbedState::Blocked,
            Some(BlockCause::MountFailed(message.into())),
        )
    }

    fn commit(&mut self, to: EmbedState, cause: Option<BlockCause>) -> Option<Transition> {
        if self.is_resolved() {
            return None;
        }

        let from = self.state;
        self.state = to;
        Some(Transition { from, to, cause })
    }
}

// ============================================================================
// Tests
// ============================================================================
