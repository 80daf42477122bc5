//! Decorative hero effects: the typewriter title and floating particles.

#[cfg(test)]
#[path = "flourish_test.rs"]
mod flourish_test;

use crate::consts::TYPEWRITER_CHAR_MS;
use crate::effect::{Effect, Particle};
use crate::stage::Plan;

/// Frames that clear the hero title and retype `text` one character at a
/// time.
#[must_use]
pub fn typewriter_plan(text: &str) -> Plan {
    let mut plan = vec![(0, Effect::SetHeroTitle(String::new()))];
    let mut typed = String::with_capacity(text.len());
    for (i, ch) in text.chars().enumerate() {
        typed.push(ch);
        plan.push((TYPEWRITER_CHAR_MS * i as u64, Effect::SetHeroTitle(typed.clone())));
    }
    plan
}

/// Build `count` particles drawing randomness from `random` (values in `[0, 1)`).
pub fn particles(count: usize, mut random: impl FnMut() -> f64) -> Vec<Particle> {
    (0..count)
        .map(|_| Particle {
            left_pct: random() * 100.0,
            top_pct: random() * 100.0,
            duration_s: random() * 3.0 + 2.0,
            delay_s: random() * 2.0,
        })
        .collect()
}
