//! Mobile navigation menu state.

#[cfg(test)]
#[path = "nav_test.rs"]
mod nav_test;

use crate::effect::Effect;

/// Open/closed state of the hamburger menu.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MobileNav {
    open: bool,
}

impl MobileNav {
    #[must_use]
    pub fn is_open(self) -> bool {
        self.open
    }

    /// Hamburger click.
    pub fn toggle(&mut self) -> Effect {
        self.open = !self.open;
        Effect::SetMenuOpen(self.open)
    }

    /// Nav link click. Always emits, so a menu opened outside this state
    /// (stale markup) still closes.
    pub fn close(&mut self) -> Effect {
        self.open = false;
        Effect::SetMenuOpen(false)
    }
}
