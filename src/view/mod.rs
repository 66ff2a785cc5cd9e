//! Render model for a mount.
//!
//! [`EmbedView`] is derived from an [`EmbedTarget`] and an [`EmbedState`]
//! and names exactly one of the three views:
//!
//! | State | View | Frame | Spinner | Fallback |
//! |-------|------|-------|---------|----------|
//! | `Loading` | [`EmbedView::Loading`] | yes | yes | no |
//! | `Embedded` | [`EmbedView::Embedded`] | yes | no | no |
//! | `Blocked` | [`EmbedView::Blocked`] | no | no | yes |
//!
//! Use [`EmbedView::to_html`] for a static HTML fragment.

// ============================================================================
// Submodules
// ============================================================================

mod html;

// ============================================================================
// Imports
// ============================================================================

use serde::Serialize;

use crate::embed::{EmbedState, EmbedTarget};

// ============================================================================
// Constants
// ============================================================================

/// Call-to-action label on the fallback panel.
pub const FALLBACK_CTA_LABEL: &str = "Play Game";

/// Notice shown when the publisher prevents inline play.
pub const FALLBACK_NOTICE: &str =
    "This game can't be played here because its publisher restricts embedding.";

/// Hint shown under the call-to-action.
pub const FALLBACK_HINT: &str = "Game will open in a new tab";

/// Browsing context the fallback link opens in.
pub const FALLBACK_LINK_TARGET: &str = "_blank";

/// Link relation that detaches the new context from this page.
pub const FALLBACK_LINK_REL: &str = "noopener noreferrer";

// ============================================================================
// AspectRatio
// ============================================================================

/// Fixed aspect ratio of the display region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AspectRatio {
    /// Horizontal units.
    pub width: u32,
    /// Vertical units.
    pub height: u32,
}

impl AspectRatio {
    /// Widescreen video ratio.
    pub const WIDESCREEN: Self = Self {
        width: 16,
        height: 9,
    };

    /// Returns the CSS `aspect-ratio` value.
    #[must_use]
    pub fn css(&self) -> String {
        format!("{} / {}", self.width, self.height)
    }
}

impl Default for AspectRatio {
    fn default() -> Self {
        Self::WIDESCREEN
    }
}

// ============================================================================
// FrameView
// ============================================================================

/// The inline frame.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FrameView {
    /// Frame source, the target URL.
    pub src: String,
    /// Accessible frame title.
    pub title: String,
    /// Whether the frame may enter fullscreen.
    pub allow_fullscreen: bool,
    /// Region aspect ratio.
    pub aspect: AspectRatio,
}

impl FrameView {
    fn new(target: &EmbedTarget) -> Self {
        Self {
            src: target.url().to_string(),
            title: target.title().to_string(),
            allow_fullscreen: true,
            aspect: AspectRatio::WIDESCREEN,
        }
    }
}

// ============================================================================
// FallbackView
// ============================================================================

/// The panel shown instead of a blocked frame.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FallbackView {
    /// Game title shown as the panel heading.
    pub title: String,
    /// Always the target URL, unmodified.
    pub href: String,
    /// Link target, always `_blank`.
    pub target: &'static str,
    /// Link relation, always `noopener noreferrer`.
    pub rel: &'static str,
    /// Call-to-action label.
    pub cta_label: &'static str,
    /// Why the game is not shown inline.
    pub notice: &'static str,
    /// Hint under the call-to-action.
    pub hint: &'static str,
    /// Region aspect ratio.
    pub aspect: AspectRatio,
}

impl FallbackView {
    fn new(target: &EmbedTarget) -> Self {
        Self {
            title: target.title().to_string(),
            href: target.url().to_string(),
            target: FALLBACK_LINK_TARGET,
            rel: FALLBACK_LINK_REL,
            cta_label: FALLBACK_CTA_LABEL,
            notice: FALLBACK_NOTICE,
            hint: FALLBACK_HINT,
            aspect: AspectRatio::WIDESCREEN,
        }
    }
}

// ============================================================================
// EmbedView
// ============================================================================

/// What the display region shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "view", rename_all = "snake_case")]
pub enum EmbedView {
    /// Frame mounted, spinner overlaid.
    Loading { frame: FrameView },
    /// Frame mounted and visible.
    Embedded { frame: FrameView },
    /// Frame removed, fallback panel shown.
    Blocked { fallback: FallbackView },
}

impl EmbedView {
    /// Derives the view for a target in a state.
    #[must_use]
    pub fn new(target: &EmbedTarget, state: EmbedState) -> Self {
        match state {
            EmbedState::Loading => Self::Loading {
                frame: FrameView::new(target),
            },
            EmbedState::Embedded => Self::Embedded {
                frame: FrameView::new(target),
            },
            EmbedState::Blocked => Self::Blocked {
                fallback: FallbackView::new(target),
            },
        }
    }

    /// Returns the state this view renders.
    #[inline]
    #[must_use]
    pub fn state(&self) -> EmbedState {
        match self {
            Self::Loading { .. } => EmbedState::Loading,
            Self::Embedded { .. } => EmbedState::Embedded,
            Self::Blocked { .. } => EmbedState::Blocked,
        }
    }

    /// Returns the frame, if one is on screen.
    #[inline]
    #[must_use]
    pub fn frame(&self) -> Option<&FrameView> {
        match self {
            Self::Loading { frame } | Self::Embedded { frame } => Some(frame),
            Self::Blocked { .. } => None,
        }
    }

    /// Returns the fallback panel, if shown.
    #[inline]
    #[must_use]
    pub fn fallback(&self) -> Option<&FallbackView> {
        match self {
            Self::Blocked { fallback } => Some(fallback),
            _ => None,
        }
    }

    /// Returns `true` if the loading spinner is shown.
    #[inline]
    #[must_use]
    pub fn shows_spinner(&self) -> bool {
        matches!(self, Self::Loading { .. })
    }
}

// ============================================================================
// Tests
// ============================================================================
