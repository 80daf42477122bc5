//! DOM mutations described as data.
//!
//! Every handler in [`crate::engine::PageCore`] returns a list of
//! [`Effect`]s. The browser host applies them in order; tests inspect them.

use crate::reveal::WatchId;
use crate::theme::Theme;

/// Which family of bars a width change targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BarFamily {
    /// `.skill-progress` bars, sized from `data-width`.
    Skill,
    /// `.progress-fill` education bars, sized from `data-progress`.
    Progress,
}

/// One decorative hero particle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    /// Horizontal position in percent of the hero box.
    pub left_pct: f64,
    /// Vertical position in percent of the hero box.
    pub top_pct: f64,
    /// Length of one float cycle in seconds.
    pub duration_s: f64,
    /// Animation start delay in seconds.
    pub delay_s: f64,
}

/// A single DOM mutation.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Set `data-theme` on `<body>`.
    SetTheme(Theme),
    /// Set the toggle button's icon class and tooltip.
    SetToggleIcon { icon_class: &'static str, title: &'static str },
    /// Rotate the toggle button (`true`) or return it to rest.
    SpinToggle(bool),
    /// Set the navbar's inline background colour.
    SetNavbarBackground(&'static str),
    /// Show or hide the scroll-to-top control via opacity/visibility.
    SetScrollTopVisible(bool),
    /// Vertical parallax offset of the hero image, in pixels.
    SetParallax(f64),
    /// Add `animate-on-scroll` to every watched element.
    PrepareReveal(Vec<WatchId>),
    /// Add `animated` to a watched element.
    MarkRevealed(WatchId),
    /// Replace the text of the counter at `index`.
    SetCounterText { index: usize, text: String },
    /// Set the width of a bar, in percent.
    SetBarWidth { family: BarFamily, index: usize, percent: f64 },
    /// Give a skill category its animation delay and the `fade-in` class.
    StaggerCategory { index: usize, delay_ms: u64 },
    /// Loader fill width and rounded label.
    SetLoaderProgress { percent: f64, label: String },
    /// Fade the loader to opacity 0.
    FadeLoader,
    /// Remove the loader from layout.
    HideLoader,
    /// Toggle `active` on the hamburger and nav menu.
    SetMenuOpen(bool),
    /// Replace the hero title text.
    SetHeroTitle(String),
    /// Append particles to the hero section.
    SpawnParticles(Vec<Particle>),
}
