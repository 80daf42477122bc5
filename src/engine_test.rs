use super::*;
use crate::effect::BarFamily;
use crate::loader::LoaderPhase;
use crate::prefs::MemoryStore;
use crate::reveal::{Rect, WatchId};

const VIEWPORT: f64 = 800.0;
const ABOUT: WatchId = WatchId(1);
const SKILLS: WatchId = WatchId(2);

// With a constant random of 1.0 the loader fills 15% per tick: seven ticks,
// the last at 700ms, fade at 1200ms, hidden and armed at 1700ms.
const LOADER_DONE_MS: u64 = 1700;

fn model() -> PageModel {
    PageModel {
        watched: vec![
            (Some("home".into()), WatchKind::Section),
            (Some("about".into()), WatchKind::Section),
            (Some("skills".into()), WatchKind::Section),
            (None, WatchKind::ServiceCard),
        ],
        stage: StageModel {
            counters: vec![Some(150), None],
            skill_bars: vec![Some(90.0), Some(80.0)],
            progress_bars: vec![Some(75.0)],
            categories: 2,
        },
        hero_title: Some("Hi".into()),
    }
}

fn core_with(config: FolioConfig, store: MemoryStore) -> PageCore<MemoryStore> {
    PageCore::new(config, store, model()).with_random(|| 1.0)
}

fn core() -> PageCore<MemoryStore> {
    core_with(FolioConfig::default(), MemoryStore::new())
}

fn in_view(id: WatchId) -> ScrollSample {
    ScrollSample { offset_y: 600.0, viewport_height: VIEWPORT, rects: vec![(id, Rect { top: 100.0, height: 500.0 })] }
}

fn booted() -> PageCore<MemoryStore> {
    let mut core = core();
    core.boot(0.0);
    core.advance(LOADER_DONE_MS);
    core
}

fn counter_texts(effects: &[Effect], wanted: usize) -> Vec<String> {
    effects
        .iter()
        .filter_map(|e| match e {
            Effect::SetCounterText { index, text } if *index == wanted => Some(text.clone()),
            _ => None,
        })
        .collect()
}

fn skill_bars(effects: &[Effect]) -> usize {
    effects.iter().filter(|e| matches!(e, Effect::SetBarWidth { family: BarFamily::Skill, .. })).count()
}

// =============================================================
// Boot and theme
// =============================================================

#[test]
fn boot_paints_stored_theme() {
    let mut store = MemoryStore::new();
    store.set("theme", "light").unwrap();
    let mut core = core_with(FolioConfig::default(), store);

    let effects = core.boot(0.0);

    assert_eq!(core.theme(), Theme::Light);
    assert_eq!(effects[0], Effect::SetTheme(Theme::Light));
    assert!(effects.contains(&Effect::SetNavbarBackground(crate::consts::NAVBAR_DARK_TOP)));
}

#[test]
fn boot_defaults_to_dark() {
    let mut core = core();
    assert_eq!(core.boot(0.0)[0], Effect::SetTheme(Theme::Dark));
}

#[test]
fn toggle_spins_then_settles() {
    let mut core = booted();
    let start = core.now();

    let effects = core.toggle_theme();
    assert!(effects.contains(&Effect::SetTheme(Theme::Light)));
    assert!(effects.contains(&Effect::SpinToggle(true)));
    assert_eq!(core.store().get("theme").as_deref(), Some("light"));

    assert!(core.advance(start + 299).is_empty());
    assert_eq!(core.advance(start + 300), vec![Effect::SpinToggle(false)]);
}

#[test]
fn toggling_twice_restores_theme_and_storage() {
    let mut core = booted();
    core.toggle_theme();
    core.toggle_theme();
    assert_eq!(core.theme(), Theme::Dark);
    assert_eq!(core.store().get("theme").as_deref(), Some("dark"));
}

// =============================================================
// Loader
// =============================================================

#[test]
fn loader_fills_fades_and_arms_reveals() {
    let mut core = core();
    core.boot(0.0);

    let fill = core.advance(700);
    let labels: Vec<_> = fill
        .iter()
        .filter_map(|e| match e {
            Effect::SetLoaderProgress { label, .. } => Some(label.as_str()),
            _ => None,
        })
        .collect();
    assert_eq!(labels, ["15%", "30%", "45%", "60%", "75%", "90%", "100%"]);
    assert_eq!(core.loader().phase(), LoaderPhase::Fading);
    assert!(!core.observer().is_armed());

    assert_eq!(core.advance(1200), vec![Effect::FadeLoader]);

    let hide = core.advance(LOADER_DONE_MS);
    assert_eq!(hide[0], Effect::HideLoader);
    assert_eq!(hide[1], Effect::PrepareReveal((0..4).map(WatchId).collect()));
    assert!(core.observer().is_armed());
    assert_eq!(core.loader().phase(), LoaderPhase::Hidden);
}

#[test]
fn nothing_reveals_before_loader_finishes() {
    let mut core = core();
    core.boot(0.0);
    core.advance(500);
    let effects = core.on_scroll(&in_view(ABOUT));
    assert!(!effects.iter().any(|e| matches!(e, Effect::MarkRevealed(_))));
}

#[test]
fn disabled_loader_arms_at_boot() {
    let config = FolioConfig { loader: false, ..FolioConfig::default() };
    let mut core = core_with(config, MemoryStore::new());

    let effects = core.boot(0.0);

    assert!(effects.contains(&Effect::HideLoader));
    assert!(effects.iter().any(|e| matches!(e, Effect::PrepareReveal(_))));
    assert!(core.observer().is_armed());
    assert_eq!(core.pending_steps(), 0);
}

// =============================================================
// Reveal-triggered animation
// =============================================================

#[test]
fn about_reveal_runs_counters_after_delay() {
    let mut core = booted();
    let t = core.now();

    let effects = core.on_scroll(&in_view(ABOUT));
    assert!(effects.contains(&Effect::MarkRevealed(ABOUT)));
    assert!(counter_texts(&effects, 0).is_empty());

    assert!(counter_texts(&core.advance(t + 499), 0).is_empty());
    let frames = counter_texts(&core.advance(t + 500 + 2000), 0);
    assert_eq!(frames.first().map(String::as_str), Some("2+"));
    assert_eq!(frames.last().map(String::as_str), Some("150+"));
    assert!(counter_texts(&core.advance(t + 10_000), 1).is_empty());
}

#[test]
fn revisiting_about_does_not_restart_counters() {
    let mut core = booted();
    let t = core.now();
    core.on_scroll(&in_view(ABOUT));
    core.advance(t + 3000);

    let again = core.on_scroll(&in_view(ABOUT));
    assert!(!again.contains(&Effect::MarkRevealed(ABOUT)));
    assert!(counter_texts(&core.advance(t + 10_000), 0).is_empty());
}

#[test]
fn skills_reveal_and_load_fallback_fire_once() {
    let mut core = core();
    core.boot(0.0);
    core.on_load();

    // Load fallback at 1000ms fills the skill bars before reveals arm.
    let early = core.advance(1000 + 200);
    assert_eq!(skill_bars(&early), 2);

    core.advance(LOADER_DONE_MS);
    let now = core.now();
    let effects = core.on_scroll(&in_view(SKILLS));
    assert!(effects.contains(&Effect::MarkRevealed(SKILLS)));
    assert_eq!(skill_bars(&core.advance(now + 5000)), 0);
}

#[test]
fn load_schedules_progress_categories_and_flourishes() {
    let config = FolioConfig { loader: false, ..FolioConfig::default() };
    let mut core = core_with(config, MemoryStore::new());
    core.boot(0.0);
    core.on_load();

    let at_skills = core.advance(1000);
    assert!(at_skills.contains(&Effect::StaggerCategory { index: 1, delay_ms: 200 }));

    let at_progress = core.advance(1500);
    assert!(at_progress.contains(&Effect::SetBarWidth { family: BarFamily::Progress, index: 0, percent: 75.0 }));

    let at_title = core.advance(3000);
    assert!(at_title.contains(&Effect::SetHeroTitle(String::new())));

    let rest = core.advance(3500);
    assert!(rest.contains(&Effect::SetHeroTitle("Hi".into())));
    assert!(rest.iter().any(|e| matches!(e, Effect::SpawnParticles(p) if p.len() == 50)));
}

// =============================================================
// Menu and teardown
// =============================================================

#[test]
fn menu_toggles_and_link_closes() {
    let mut core = core();
    assert_eq!(core.toggle_menu(), vec![Effect::SetMenuOpen(true)]);
    assert!(core.menu_open());
    assert_eq!(core.close_menu(), vec![Effect::SetMenuOpen(false)]);
    assert!(!core.menu_open());
}

#[test]
fn teardown_cancels_everything_pending() {
    let mut core = core();
    core.boot(0.0);
    core.on_load();
    core.toggle_theme();
    assert!(core.pending_steps() > 0);

    core.teardown();

    assert_eq!(core.pending_steps(), 0);
    assert_eq!(core.next_deadline(), None);
    assert!(core.advance(60_000).is_empty());
}

#[test]
fn scroll_paint_tracks_offset() {
    let mut core = booted();
    let effects = core.on_scroll(&ScrollSample::at(400.0, VIEWPORT));
    assert!(effects.contains(&Effect::SetScrollTopVisible(true)));
    assert!(effects.contains(&Effect::SetNavbarBackground(crate::consts::NAVBAR_LIGHT_SCROLLED)));
}

#[test]
fn restored_scroll_position_drives_navbar_until_first_scroll() {
    let mut core = core();
    let boot = core.boot(500.0);
    assert!(boot.contains(&Effect::SetNavbarBackground(crate::consts::NAVBAR_LIGHT_SCROLLED)));

    assert_eq!(core.on_load(), vec![Effect::SetNavbarBackground(crate::consts::NAVBAR_LIGHT_SCROLLED)]);

    let toggled = core.toggle_theme();
    assert!(toggled.contains(&Effect::SetNavbarBackground(crate::consts::NAVBAR_DARK_SCROLLED)));
}
