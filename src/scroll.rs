//! Per-scroll recomputation of navbar colour, scroll-to-top visibility,
//! hero parallax and reveal state.
//!
//! Every output is a pure function of the current sample and theme; no
//! scroll history is kept, so coalescing scroll events is safe.

#[cfg(test)]
#[path = "scroll_test.rs"]
mod scroll_test;

use crate::consts::{
    NAVBAR_DARK_SCROLLED, NAVBAR_DARK_TOP, NAVBAR_LIGHT_SCROLLED, NAVBAR_LIGHT_TOP,
    NAVBAR_SCROLLED_PX, PARALLAX_RATE, SCROLL_TOP_VISIBLE_PX,
};
use crate::effect::Effect;
use crate::reveal::{Rect, Reveal, VisibilityObserver, WatchId};
use crate::theme::Theme;

/// One scroll notification, with measurements of still-pending elements.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScrollSample {
    pub offset_y: f64,
    pub viewport_height: f64,
    pub rects: Vec<(WatchId, Rect)>,
}

impl ScrollSample {
    /// A sample with no element measurements.
    #[must_use]
    pub fn at(offset_y: f64, viewport_height: f64) -> Self {
        Self { offset_y, viewport_height, rects: Vec::new() }
    }
}

/// Navbar background for `theme` at scroll offset `scroll_y`.
///
/// The navbar contrasts with the page: a light bar over the dark theme, a
/// dark bar over the light theme. It turns more opaque past 50px.
#[must_use]
pub fn navbar_background(theme: Theme, scroll_y: f64) -> &'static str {
    let scrolled = scroll_y > NAVBAR_SCROLLED_PX;
    match (theme, scrolled) {
        (Theme::Dark, true) => NAVBAR_LIGHT_SCROLLED,
        (Theme::Dark, false) => NAVBAR_LIGHT_TOP,
        (Theme::Light, true) => NAVBAR_DARK_SCROLLED,
        (Theme::Light, false) => NAVBAR_DARK_TOP,
    }
}

/// Whether the scroll-to-top control shows at `scroll_y`.
#[must_use]
pub fn scroll_top_visible(scroll_y: f64) -> bool {
    scroll_y > SCROLL_TOP_VISIBLE_PX
}

/// Hero image offset for `scroll_y`.
#[must_use]
pub fn parallax_offset(scroll_y: f64) -> f64 {
    scroll_y * PARALLAX_RATE
}

/// Reacts to scroll samples.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScrollReactor {
    offset_y: f64,
}

impl ScrollReactor {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A reactor that starts at `offset_y`, such as a restored scroll position.
    #[must_use]
    pub fn at(offset_y: f64) -> Self {
        Self { offset_y }
    }

    /// Offset of the most recent sample.
    #[must_use]
    pub fn offset(&self) -> f64 {
        self.offset_y
    }

    /// Recompute scroll-driven paint and delegate reveal checks to `observer`.
    pub fn react(
        &mut self,
        sample: &ScrollSample,
        theme: Theme,
        observer: &mut VisibilityObserver,
    ) -> (Vec<Effect>, Vec<Reveal>) {
        self.offset_y = sample.offset_y;
        let reveals = observer.check(sample.viewport_height, &sample.rects);

        let mut effects = vec![
            Effect::SetNavbarBackground(navbar_background(theme, sample.offset_y)),
            Effect::SetScrollTopVisible(scroll_top_visible(sample.offset_y)),
            Effect::SetParallax(parallax_offset(sample.offset_y)),
        ];
        effects.extend(reveals.iter().map(|r| Effect::MarkRevealed(r.id)));
        (effects, reveals)
    }
}
