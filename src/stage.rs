//! Staged cosmetic animations: counters, skill bars, progress bars and the
//! skill category stagger.
//!
//! Each family produces a [`Plan`], a list of `(delay, effect)` steps the
//! engine hands to its scheduler. A family plans once; later starts return
//! `None`, so the reveal trigger and the page-load fallback can both fire
//! without doubling the animation.

#[cfg(test)]
#[path = "stage_test.rs"]
mod stage_test;

use crate::consts::{COUNTER_STEPS, COUNTER_STEP_MS, STAGGER_MS};
use crate::effect::{BarFamily, Effect};

/// Time-ordered animation steps, delays relative to the start call.
pub type Plan = Vec<(u64, Effect)>;

/// Animation family, one guard each.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Family {
    Counters,
    SkillBars,
    ProgressBars,
    Categories,
}

/// Static facts about the animated elements, read once from the page.
///
/// `None` entries are elements whose data attribute did not parse; they keep
/// their index so effects still address the right element.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StageModel {
    pub counters: Vec<Option<u64>>,
    pub skill_bars: Vec<Option<f64>>,
    pub progress_bars: Vec<Option<f64>>,
    pub categories: usize,
}

/// Runs each animation family at most once.
#[derive(Debug, Clone, Default)]
pub struct StagedPlayer {
    model: StageModel,
    started: Vec<Family>,
}

impl StagedPlayer {
    #[must_use]
    pub fn new(model: StageModel) -> Self {
        Self { model, started: Vec::new() }
    }

    /// Whether `family` has already been started.
    #[must_use]
    pub fn has_started(&self, family: Family) -> bool {
        self.started.contains(&family)
    }

    /// Start a family. Returns `None` if it was started before.
    pub fn start(&mut self, family: Family) -> Option<Plan> {
        if self.has_started(family) {
            return None;
        }
        self.started.push(family);
        let plan = match family {
            Family::Counters => self.counters_plan(),
            Family::SkillBars => bars_plan(BarFamily::Skill, &self.model.skill_bars, STAGGER_MS),
            Family::ProgressBars => bars_plan(BarFamily::Progress, &self.model.progress_bars, 0),
            Family::Categories => categories_plan(self.model.categories),
        };
        log::debug!("starting {family:?} with {} steps", plan.len());
        Some(plan)
    }

    fn counters_plan(&self) -> Plan {
        let mut plan = Plan::new();
        for (index, target) in self.model.counters.iter().enumerate() {
            match target {
                Some(target) => plan.extend(
                    counter_frames(*target)
                        .into_iter()
                        .map(|(delay, text)| (delay, Effect::SetCounterText { index, text })),
                ),
                None => log::warn!("counter {index} has no numeric data-target"),
            }
        }
        plan.sort_by_key(|(delay, _)| *delay);
        plan
    }
}

/// Displayed frames for a counter counting up to `target`.
///
/// Step `k` (1-based) runs at `(k - 1) * 20` ms and shows
/// `ceil(k * target / 100)`. Repeated values are dropped, so the shown
/// numbers strictly increase and the last frame is exactly `"{target}+"`.
#[must_use]
pub fn counter_frames(target: u64) -> Vec<(u64, String)> {
    if target == 0 {
        return vec![(0, "0+".to_owned())];
    }
    // ceil(k * target / steps) without forming k * target.
    let (whole, rest) = (target / COUNTER_STEPS, target % COUNTER_STEPS);
    let mut frames = Vec::new();
    let mut last = 0;
    for k in 1..=COUNTER_STEPS {
        let value = whole * k + (rest * k).div_ceil(COUNTER_STEPS);
        if value > last {
            frames.push(((k - 1) * COUNTER_STEP_MS, format!("{value}+")));
            last = value;
        }
    }
    frames
}

fn bars_plan(family: BarFamily, widths: &[Option<f64>], stagger_ms: u64) -> Plan {
    let mut plan = Plan::new();
    for (index, width) in widths.iter().enumerate() {
        let Some(percent) = width else {
            log::warn!("{family:?} bar {index} has no numeric width");
            continue;
        };
        let delay = stagger_ms * index as u64;
        plan.push((delay, Effect::SetBarWidth { family, index, percent: *percent }));
    }
    plan
}

fn categories_plan(count: usize) -> Plan {
    (0..count)
        .map(|index| {
            let delay_ms = STAGGER_MS * index as u64;
            (0, Effect::StaggerCategory { index, delay_ms })
        })
        .collect()
}

/// Parse an integer data attribute the way the page markup writes them.
///
/// Leading digits are taken (`"150+"` reads as 150); anything without a
/// leading digit is `None`.
#[must_use]
pub fn parse_counter_target(raw: &str) -> Option<u64> {
    let trimmed = raw.trim();
    let digits: String = trimmed.chars().take_while(char::is_ascii_digit).collect();
    match digits.parse() {
        Ok(value) => Some(value),
        Err(_) => None,
    }
}

/// Parse a percentage data attribute, clamped to `0..=100`.
#[must_use]
pub fn parse_percent(raw: &str) -> Option<f64> {
    match raw.trim().trim_end_matches('%').parse::<f64>() {
        Ok(value) if value.is_finite() => Some(value.clamp(0.0, 100.0)),
        _ => None,
    }
}
