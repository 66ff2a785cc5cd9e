//! Static HTML rendering.
//!
//! All dynamic content is escaped by `maud`.

use maud::{Markup, html};

use super::{AspectRatio, EmbedView, FallbackView, FrameView};

impl EmbedView {
    /// Renders the display region as an HTML fragment.
    ///
    /// The spinner overlay is only emitted while loading.
    #[must_use]
    pub fn to_html(&self) -> String {
        self.markup().into_string()
    }

    /// Renders the display region as `maud` markup.
    #[must_use]
    pub fn markup(&self) -> Markup {
        match self {
            Self::Loading { frame } => html! {
                div class="embed-region" data-state="loading" style=(region_style(frame.aspect)) {
                    (frame_markup(frame))
                    div class="embed-spinner" role="status" aria-live="polite" { "Loading…" }
                }
            },
            Self::Embedded { frame } => html! {
                div class="embed-region" data-state="embedded" style=(region_style(frame.aspect)) {
                    (frame_markup(frame))
                }
            },
            Self::Blocked { fallback } => html! {
                div class="embed-region" data-state="blocked" style=(region_style(fallback.aspect)) {
                    (fallback_markup(fallback))
                }
            },
        }
    }
}

fn region_style(aspect: AspectRatio) -> String {
    format!("aspect-ratio: {}; position: relative", aspect.css())
}

fn frame_markup(frame: &FrameView) -> Markup {
    html! {
        iframe
            src=(frame.src)
            title=(frame.title)
            style="width: 100%; height: 100%; border: 0"
            allowfullscreen[frame.allow_fullscreen] {}
    }
}

fn fallback_markup(fallback: &FallbackView) -> Markup {
    html! {
        div class="embed-fallback" {
            h3 { (fallback.title) }
            p { (fallback.notice) }
            a href=(fallback.href) target=(fallback.target) rel=(fallback.rel) { (fallback.cta_label) }
            p class="embed-hint" { (fallback.hint) }
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    use crate::embed::{EmbedState, EmbedTarget};

    fn target() -> EmbedTarget {
        EmbedTarget::new("https://www.y8.com/games/foo?a=1&b=2", "Tom & \"Jerry\" <3")
            .expect("target")
    }

    #[test]
    fn test_loading_html() {
        let html = EmbedView::new(&target(), EmbedState::Loading).to_html();
        assert!(html.contains(r#"data-state="loading""#));
        assert!(html.contains("embed-spinner"));
        assert!(html.contains(r#"src="https://www.y8.com/games/foo?a=1&amp;b=2""#));
        assert!(html.contains("allowfullscreen"));
        assert!(html.contains("aspect-ratio: 16 / 9"));
        assert!(!html.contains("embed-fallback"));
    }

    #[test]
    fn test_embedded_html() {
        let html = EmbedView::new(&target(), EmbedState::Embedded).to_html();
        assert!(html.contains("<iframe"));
        assert!(!html.contains("embed-spinner"));
        assert!(!html.contains("embed-fallback"));
        assert!(html.contains("Tom &amp; &quot;Jerry&quot; &lt;3"));
    }

    #[test]
    fn test_fullscreen_attribute_toggles() {
        let mut view = EmbedView::new(&target(), EmbedState::Embedded);
        if let EmbedView::Embedded { frame } = &mut view {
            frame.allow_fullscreen = false;
        }
        assert!(!view.to_html().contains("allowfullscreen"));
    }

    #[test]
    fn test_blocked_html() {
        let html = EmbedView::new(&target(), EmbedState::Blocked).to_html();
        assert!(!html.contains("<iframe"));
        assert!(!html.contains("embed-spinner"));
        assert!(html.contains(r#"target="_blank""#));
        assert!(html.contains(r#"rel="noopener noreferrer""#));
        assert!(html.contains(r#"href="https://www.y8.com/games/foo?a=1&amp;b=2""#));
        assert!(html.contains(">Play Game</a>"));
        assert!(html.contains("Game will open in a new tab"));
        assert!(html.contains("<h3>Tom &amp; &quot;Jerry&quot; &lt;3</h3>"));
        assert!(html.ends_with("</div></div>"));
    }

    #[test]
    fn test_script_in_title_is_escaped() {
        let target = EmbedTarget::new("https://example.org/game", "<script>alert(1)</script>")
            .expect("target");
        for state in [EmbedState::Loading, EmbedState::Embedded, EmbedState::Blocked] {
            let html = EmbedView::new(&target, state).to_html();
            assert!(!html.contains("<script>"));
            assert!(html.contains("&lt;script&gt;"));
        }
    }
}
