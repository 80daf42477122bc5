use super::*;
use crate::reveal::{ObserverConfig, WatchKind};

// =============================================================
// Navbar
// =============================================================

#[test]
fn navbar_dark_theme_gets_light_bar() {
    assert_eq!(navbar_background(Theme::Dark, 0.0), "rgba(255, 255, 255, 0.95)");
    assert_eq!(navbar_background(Theme::Dark, 51.0), "rgba(255, 255, 255, 0.98)");
}

#[test]
fn navbar_light_theme_gets_dark_bar() {
    assert_eq!(navbar_background(Theme::Light, 0.0), "rgba(15, 23, 42, 0.95)");
    assert_eq!(navbar_background(Theme::Light, 51.0), "rgba(15, 23, 42, 0.98)");
}

#[test]
fn navbar_threshold_is_strictly_greater_than_fifty() {
    assert_eq!(navbar_background(Theme::Dark, 50.0), NAVBAR_LIGHT_TOP);
    assert_eq!(navbar_background(Theme::Dark, 50.5), NAVBAR_LIGHT_SCROLLED);
}

// =============================================================
// Scroll-to-top and parallax
// =============================================================

#[test]
fn scroll_top_visible_only_past_three_hundred() {
    assert!(!scroll_top_visible(0.0));
    assert!(!scroll_top_visible(300.0));
    assert!(scroll_top_visible(300.1));
    assert!(!scroll_top_visible(299.0));
}

#[test]
fn parallax_is_a_tenth_of_offset() {
    assert!((parallax_offset(450.0) - 45.0).abs() < 1e-9);
    assert!(parallax_offset(0.0).abs() < f64::EPSILON);
}

// =============================================================
// Reactor
// =============================================================

#[test]
fn react_emits_navbar_button_and_parallax() {
    let mut reactor = ScrollReactor::new();
    let mut observer = VisibilityObserver::new(ObserverConfig::default());
    let (effects, reveals) = reactor.react(&ScrollSample::at(400.0, 800.0), Theme::Light, &mut observer);
    assert_eq!(
        effects,
        vec![
            Effect::SetNavbarBackground(NAVBAR_DARK_SCROLLED),
            Effect::SetScrollTopVisible(true),
            Effect::SetParallax(40.0),
        ]
    );
    assert!(reveals.is_empty());
    assert!((reactor.offset() - 400.0).abs() < f64::EPSILON);
}

#[test]
fn react_marks_revealed_elements() {
    let mut reactor = ScrollReactor::new();
    let mut observer = VisibilityObserver::new(ObserverConfig::default());
    let id = observer.watch(Some("skills".into()), WatchKind::Section);
    observer.arm();

    let sample = ScrollSample {
        offset_y: 900.0,
        viewport_height: 800.0,
        rects: vec![(id, Rect { top: 200.0, height: 500.0 })],
    };
    let (effects, reveals) = reactor.react(&sample, Theme::Dark, &mut observer);
    assert!(effects.contains(&Effect::MarkRevealed(id)));
    assert_eq!(reveals.len(), 1);

    let (effects, reveals) = reactor.react(&sample, Theme::Dark, &mut observer);
    assert!(!effects.contains(&Effect::MarkRevealed(id)));
    assert!(reveals.is_empty());
}

#[test]
fn reactor_starts_at_given_offset() {
    assert!((ScrollReactor::at(500.0).offset() - 500.0).abs() < f64::EPSILON);
    assert!(ScrollReactor::new().offset().abs() < f64::EPSILON);
}
