//! Property tests for the browser-free page logic.

use std::collections::HashSet;

use folio::consts::{NAVBAR_SCROLLED_PX, SCROLL_TOP_VISIBLE_PX};
use folio::loader::PageLoader;
use folio::prefs::{MemoryStore, PreferenceStore};
use folio::reveal::{ObserverConfig, Rect, VisibilityObserver, WatchId, WatchKind};
use folio::scroll::{navbar_background, scroll_top_visible};
use folio::stage::counter_frames;
use folio::theme::{Theme, ThemeController};
use proptest::prelude::*;

fn any_theme() -> impl Strategy<Value = Theme> {
    prop_oneof![Just(Theme::Dark), Just(Theme::Light)]
}

fn frame_value(text: &str) -> u64 {
    text.trim_end_matches('+').parse().unwrap()
}

proptest! {
    #[test]
    fn stored_theme_reads_back(theme in any_theme()) {
        let mut prefs = PreferenceStore::new(MemoryStore::new());
        prefs.set(theme);
        prop_assert_eq!(prefs.get(), theme);
    }

    #[test]
    fn toggling_twice_is_identity(start in any_theme(), scroll_y in 0.0f64..5000.0) {
        let mut prefs = PreferenceStore::new(MemoryStore::new());
        prefs.set(start);
        let mut controller = ThemeController::load(prefs);
        controller.toggle(scroll_y);
        controller.toggle(scroll_y);
        prop_assert_eq!(controller.current(), start);
        prop_assert_eq!(controller.prefs().get(), start);
    }

    #[test]
    fn navbar_depends_only_on_theme_and_threshold(theme in any_theme(), a in 0.0f64..5000.0, b in 0.0f64..5000.0) {
        let same_side = (a > NAVBAR_SCROLLED_PX) == (b > NAVBAR_SCROLLED_PX);
        prop_assert_eq!(navbar_background(theme, a) == navbar_background(theme, b), same_side);
    }

    #[test]
    fn scroll_top_shows_past_threshold(y in 0.0f64..5000.0) {
        prop_assert_eq!(scroll_top_visible(y), y > SCROLL_TOP_VISIBLE_PX);
    }

    #[test]
    fn counter_frames_climb_to_target(target in 0u64..1_000_000) {
        let frames = counter_frames(target);
        let values: Vec<u64> = frames.iter().map(|(_, text)| frame_value(text)).collect();
        prop_assert!(values.windows(2).all(|w| w[0] < w[1]));
        prop_assert!(frames.windows(2).all(|w| w[0].0 < w[1].0));
        prop_assert_eq!(frames.last().map(|(_, t)| t.clone()), Some(format!("{target}+")));
    }

    #[test]
    fn reveal_line_is_monotone(vh in 200.0f64..2000.0, top in -500.0f64..3000.0, height in 0.0f64..2000.0, lift in 0.0f64..500.0) {
        let config = ObserverConfig::default();
        if config.crossed(vh, Rect { top, height }) {
            let lifted = Rect { top: top - lift, height };
            prop_assert!(config.crossed(vh, lifted));
        }
    }

    #[test]
    fn each_element_reveals_at_most_once(
        samples in prop::collection::vec(prop::collection::vec((0usize..6, -200.0f64..1500.0, 0.0f64..800.0), 0..6), 1..12)
    ) {
        let mut observer = VisibilityObserver::new(ObserverConfig::default());
        for _ in 0..6 {
            observer.watch(None, WatchKind::ServiceCard);
        }
        observer.arm();

        let mut seen = HashSet::new();
        for sample in samples {
            let rects: Vec<(WatchId, Rect)> = sample
                .into_iter()
                .map(|(id, top, height)| (WatchId(id), Rect { top, height }))
                .collect();
            for reveal in observer.check(800.0, &rects) {
                prop_assert!(seen.insert(reveal.id), "{:?} revealed twice", reveal.id);
                prop_assert!(observer.is_revealed(reveal.id));
            }
        }
    }

    #[test]
    fn loader_progress_is_monotone_and_capped(draws in prop::collection::vec(0.0f64..1.0, 1..40)) {
        let mut loader = PageLoader::new();
        let mut last = 0.0;
        for r in draws {
            let Some(_) = loader.tick(r) else { break };
            prop_assert!(loader.progress() >= last);
            prop_assert!(loader.progress() <= 100.0);
            last = loader.progress();
        }
    }
}
