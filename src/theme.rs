//! Theme value and the controller that paints it.
//!
//! DESIGN
//! ======
//! The controller keeps the single authoritative in-memory theme and writes
//! it through to the preference store. The document attribute is an output
//! only; nothing reads it back.

#[cfg(test)]
#[path = "theme_test.rs"]
mod theme_test;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::effect::Effect;
use crate::prefs::{KeyValueStore, PreferenceStore};
use crate::scroll::navbar_background;

/// Binary light/dark visual mode of the page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    /// The stored and attribute string for this theme.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Dark => "dark",
            Self::Light => "light",
        }
    }

    /// The other theme.
    #[must_use]
    pub fn flipped(self) -> Self {
        match self {
            Self::Dark => Self::Light,
            Self::Light => Self::Dark,
        }
    }

    /// Font Awesome class for the toggle icon.
    #[must_use]
    pub fn icon_class(self) -> &'static str {
        match self {
            Self::Dark => "fas fa-moon",
            Self::Light => "fas fa-sun",
        }
    }

    /// Tooltip for the toggle button.
    #[must_use]
    pub fn toggle_title(self) -> &'static str {
        match self {
            Self::Dark => "Switch to Light Mode",
            Self::Light => "Switch to Dark Mode",
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error for strings that are neither `"dark"` nor `"light"`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown theme: {0:?}")]
pub struct ParseThemeError(pub String);

impl FromStr for Theme {
    type Err = ParseThemeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "dark" => Ok(Self::Dark),
            "light" => Ok(Self::Light),
            other => Err(ParseThemeError(other.to_owned())),
        }
    }
}

/// Applies and toggles the page theme.
pub struct ThemeController<S> {
    current: Theme,
    prefs: PreferenceStore<S>,
}

impl<S: KeyValueStore> ThemeController<S> {
    /// Build a controller holding the stored theme (or `Dark`).
    pub fn load(prefs: PreferenceStore<S>) -> Self {
        let current = prefs.get();
        Self { current, prefs }
    }

    /// The active theme.
    #[must_use]
    pub fn current(&self) -> Theme {
        self.current
    }

    /// Borrow the preference store.
    pub fn prefs(&self) -> &PreferenceStore<S> {
        &self.prefs
    }

    /// Make `theme` active and describe the resulting paint.
    ///
    /// Sets the document attribute, the toggle icon and tooltip, and the
    /// navbar background for the given scroll offset.
    pub fn apply(&mut self, theme: Theme, scroll_y: f64) -> Vec<Effect> {
        self.current = theme;
        vec![
            Effect::SetTheme(theme),
            Effect::SetToggleIcon { icon_class: theme.icon_class(), title: theme.toggle_title() },
            Effect::SetNavbarBackground(navbar_background(theme, scroll_y)),
        ]
    }

    /// Flip the theme, paint it, persist it, and return the new value.
    pub fn toggle(&mut self, scroll_y: f64) -> (Theme, Vec<Effect>) {
        let next = self.current.flipped();
        let effects = self.apply(next, scroll_y);
        self.prefs.set(next);
        log::debug!("theme toggled to {next}");
        (next, effects)
    }
}
