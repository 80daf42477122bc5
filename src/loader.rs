//! Page loader progress.
//!
//! The bar advances by a random amount every tick until it reaches 100%,
//! after which the engine fades and hides the overlay.

#[cfg(test)]
#[path = "loader_test.rs"]
mod loader_test;

use crate::consts::LOADER_MAX_STEP;
use crate::effect::Effect;

/// Where the loader is in its lifecycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LoaderPhase {
    #[default]
    Filling,
    Fading,
    Hidden,
}

/// Result of one loader tick.
#[derive(Debug, Clone, PartialEq)]
pub struct LoaderTick {
    pub effect: Effect,
    /// `true` once the bar has reached 100%.
    pub complete: bool,
}

/// Loader fill state.
#[derive(Debug, Clone, Default)]
pub struct PageLoader {
    progress: f64,
    phase: LoaderPhase,
}

impl PageLoader {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn progress(&self) -> f64 {
        self.progress
    }

    #[must_use]
    pub fn phase(&self) -> LoaderPhase {
        self.phase
    }

    /// Advance by `random * 15` percent, where `random` is in `[0, 1)`.
    ///
    /// Returns `None` once the loader has left the filling phase.
    pub fn tick(&mut self, random: f64) -> Option<LoaderTick> {
        if self.phase != LoaderPhase::Filling {
            return None;
        }
        self.progress += random.clamp(0.0, 1.0) * LOADER_MAX_STEP;
        let complete = self.progress >= 100.0;
        if complete {
            self.progress = 100.0;
            self.phase = LoaderPhase::Fading;
        }
        let effect = Effect::SetLoaderProgress {
            percent: self.progress,
            label: format!("{:.0}%", self.progress.round()),
        };
        Some(LoaderTick { effect, complete })
    }

    /// Record that the overlay has been removed.
    pub fn hide(&mut self) {
        self.phase = LoaderPhase::Hidden;
    }
}
