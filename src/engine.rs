//! The page coordinator.
//!
//! [`PageCore`] is the single application-state object: it owns the theme,
//! scroll, reveal, animation, loader and nav state plus the scheduler that
//! sequences them. Every entry point returns the [`Effect`]s to paint.
//! Nothing here touches the browser, so the whole page lifecycle can be
//! replayed in tests on a virtual clock.

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

use crate::config::FolioConfig;
use crate::consts::{
    LOADER_FADE_MS, LOADER_TICK_MS, PARTICLE_COUNT, PARTICLES_DELAY_MS, TOGGLE_SPIN_MS, TYPEWRITER_DELAY_MS,
};
use crate::effect::Effect;
use crate::flourish::{particles, typewriter_plan};
use crate::loader::PageLoader;
use crate::nav::MobileNav;
use crate::prefs::{KeyValueStore, PreferenceStore};
use crate::reveal::{Checkpoint, VisibilityObserver, WatchKind};
use crate::schedule::Scheduler;
use crate::scroll::{ScrollReactor, ScrollSample, navbar_background};
use crate::stage::{Family, Plan, StageModel, StagedPlayer};
use crate::theme::{Theme, ThemeController};

/// Section whose reveal starts the counters.
pub const COUNTERS_SECTION: &str = "about";

/// Section whose reveal starts the skill bars.
pub const SKILLS_SECTION: &str = "skills";

/// Deferred work queued on the scheduler.
#[derive(Debug, Clone, PartialEq)]
pub enum Step {
    /// Paint a precomputed effect.
    Emit(Effect),
    /// Start an animation family (no-op if already started).
    Start(Family),
    /// Advance the loader bar.
    LoaderTick,
    /// Remove the loader and arm reveals.
    LoaderHide,
    /// Retype the hero title.
    Typewriter,
    /// Spawn hero particles.
    Particles,
}

/// Static page structure the host reads from the DOM once.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageModel {
    /// Elements to watch for reveal, in document order per kind.
    pub watched: Vec<(Option<String>, WatchKind)>,
    pub stage: StageModel,
    /// Original hero title text, if the page has one.
    pub hero_title: Option<String>,
}

/// Browser-free page state and logic.
pub struct PageCore<S> {
    config: FolioConfig,
    theme: ThemeController<S>,
    scroll: ScrollReactor,
    observer: VisibilityObserver,
    reveal_cursor: Checkpoint,
    player: StagedPlayer,
    loader: PageLoader,
    nav: MobileNav,
    scheduler: Scheduler<Step>,
    hero_title: Option<String>,
    random: Box<dyn FnMut() -> f64>,
}

impl<S: KeyValueStore> PageCore<S> {
    /// Build the page state. Watched elements are registered immediately
    /// but nothing reveals until the loader finishes.
    pub fn new(config: FolioConfig, store: S, model: PageModel) -> Self {
        let prefs = PreferenceStore::with_key(store, config.storage_key.clone());
        let mut observer = VisibilityObserver::new(config.observer);
        for (name, kind) in model.watched {
            observer.watch(name, kind);
        }
        Self {
            theme: ThemeController::load(prefs),
            scroll: ScrollReactor::new(),
            observer,
            reveal_cursor: Checkpoint::default(),
            player: StagedPlayer::new(model.stage),
            loader: PageLoader::new(),
            nav: MobileNav::default(),
            scheduler: Scheduler::new(),
            hero_title: model.hero_title,
            random: Box::new(|| 0.5),
            config,
        }
    }

    /// Replace the randomness source (values in `[0, 1)`).
    #[must_use]
    pub fn with_random(mut self, random: impl FnMut() -> f64 + 'static) -> Self {
        self.random = Box::new(random);
        self
    }

    // --- Lifecycle ---

    /// Paint the stored theme and start the loader from offset `scroll_y`.
    pub fn boot(&mut self, scroll_y: f64) -> Vec<Effect> {
        let theme = self.theme.current();
        log::info!("booting with {theme} theme, {} watched elements", self.observer.len());
        self.scroll = ScrollReactor::at(scroll_y);
        let mut effects = self.theme.apply(theme, scroll_y);
        if self.config.loader {
            self.scheduler.schedule(LOADER_TICK_MS, Step::LoaderTick);
        } else {
            self.loader.hide();
            effects.push(Effect::HideLoader);
            effects.extend(self.arm());
        }
        effects
    }

    /// Window `load`: refresh the navbar and queue the load-time fallbacks.
    pub fn on_load(&mut self) -> Vec<Effect> {
        let skills = self.config.load_skills_delay_ms;
        self.scheduler.schedule(skills, Step::Start(Family::Categories));
        self.scheduler.schedule(skills, Step::Start(Family::SkillBars));
        self.scheduler.schedule(self.config.load_progress_delay_ms, Step::Start(Family::ProgressBars));
        if self.hero_title.is_some() {
            self.scheduler.schedule(TYPEWRITER_DELAY_MS, Step::Typewriter);
        }
        self.scheduler.schedule(PARTICLES_DELAY_MS, Step::Particles);
        vec![Effect::SetNavbarBackground(navbar_background(self.theme.current(), self.scroll.offset()))]
    }

    /// Drop all queued work. Nothing scheduled before this runs afterwards.
    pub fn teardown(&mut self) {
        log::debug!("teardown: dropping {} queued steps", self.scheduler.len());
        self.scheduler.clear();
    }

    // --- Events ---

    /// A scroll notification.
    pub fn on_scroll(&mut self, sample: &ScrollSample) -> Vec<Effect> {
        let (effects, _) = self.scroll.react(sample, self.theme.current(), &mut self.observer);
        self.dispatch_reveals();
        effects
    }

    /// Theme toggle click.
    pub fn toggle_theme(&mut self) -> Vec<Effect> {
        let (_, mut effects) = self.theme.toggle(self.scroll.offset());
        effects.push(Effect::SpinToggle(true));
        self.scheduler.schedule(TOGGLE_SPIN_MS, Step::Emit(Effect::SpinToggle(false)));
        effects
    }

    /// Hamburger click.
    pub fn toggle_menu(&mut self) -> Vec<Effect> {
        vec![self.nav.toggle()]
    }

    /// Nav link click.
    pub fn close_menu(&mut self) -> Vec<Effect> {
        vec![self.nav.close()]
    }

    // --- Time ---

    /// Run every step due at or before `now_ms`.
    pub fn advance(&mut self, now_ms: u64) -> Vec<Effect> {
        let mut effects = Vec::new();
        while let Some(step) = self.scheduler.pop_due(now_ms) {
            self.run(step, &mut effects);
        }
        effects
    }

    /// When the next step is due, if any.
    pub fn next_deadline(&mut self) -> Option<u64> {
        self.scheduler.next_deadline()
    }

    /// Current virtual time.
    #[must_use]
    pub fn now(&self) -> u64 {
        self.scheduler.now()
    }

    // --- Queries ---

    #[must_use]
    pub fn theme(&self) -> Theme {
        self.theme.current()
    }

    #[must_use]
    pub fn observer(&self) -> &VisibilityObserver {
        &self.observer
    }

    #[must_use]
    pub fn player(&self) -> &StagedPlayer {
        &self.player
    }

    #[must_use]
    pub fn loader(&self) -> &PageLoader {
        &self.loader
    }

    #[must_use]
    pub fn menu_open(&self) -> bool {
        self.nav.is_open()
    }

    #[must_use]
    pub fn pending_steps(&self) -> usize {
        self.scheduler.len()
    }

    /// The backing preference store.
    pub fn store(&self) -> &S {
        self.theme.prefs().store()
    }

    // --- Internals ---

    fn run(&mut self, step: Step, effects: &mut Vec<Effect>) {
        match step {
            Step::Emit(effect) => effects.push(effect),
            Step::Start(family) => {
                if let Some(plan) = self.player.start(family) {
                    self.schedule_plan(plan);
                }
            }
            Step::LoaderTick => {
                let random = (self.random)();
                let Some(tick) = self.loader.tick(random) else {
                    return;
                };
                effects.push(tick.effect);
                if tick.complete {
                    self.scheduler.schedule(LOADER_FADE_MS, Step::Emit(Effect::FadeLoader));
                    self.scheduler.schedule(LOADER_FADE_MS * 2, Step::LoaderHide);
                } else {
                    self.scheduler.schedule(LOADER_TICK_MS, Step::LoaderTick);
                }
            }
            Step::LoaderHide => {
                self.loader.hide();
                effects.push(Effect::HideLoader);
                effects.extend(self.arm());
            }
            Step::Typewriter => {
                if let Some(title) = self.hero_title.as_deref() {
                    let plan = typewriter_plan(title);
                    self.schedule_plan(plan);
                }
            }
            Step::Particles => {
                let spawned = particles(PARTICLE_COUNT, &mut self.random);
                effects.push(Effect::SpawnParticles(spawned));
            }
        }
    }

    fn arm(&mut self) -> Option<Effect> {
        self.observer.arm().map(Effect::PrepareReveal)
    }

    fn schedule_plan(&mut self, plan: Plan) {
        for (delay, effect) in plan {
            self.scheduler.schedule(delay, Step::Emit(effect));
        }
    }

    fn dispatch_reveals(&mut self) {
        let delay = self.config.section_delay_ms;
        let mut starts = Vec::new();
        for reveal in self.observer.revealed_since(self.reveal_cursor) {
            match reveal.name.as_deref() {
                Some(COUNTERS_SECTION) => starts.push(Family::Counters),
                Some(SKILLS_SECTION) => starts.push(Family::SkillBars),
                _ => {}
            }
        }
        self.reveal_cursor = self.observer.checkpoint();
        for family in starts {
            if !self.player.has_started(family) {
                self.scheduler.schedule(delay, Step::Start(family));
            }
        }
    }
}
