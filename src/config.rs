//! Runtime configuration.
//!
//! Defaults come from [`crate::consts`]. A page may override any subset by
//! putting JSON in a `data-folio-config` attribute on `<body>`; missing
//! fields keep their defaults.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use serde::{Deserialize, Serialize};

use crate::consts::{
    LOAD_PROGRESS_DELAY_MS, LOAD_SKILLS_DELAY_MS, SECTION_TRIGGER_DELAY_MS, SUBMIT_ENDPOINT,
    THEME_STORAGE_KEY,
};
use crate::reveal::ObserverConfig;

/// Body attribute holding the JSON overrides.
pub const CONFIG_ATTRIBUTE: &str = "data-folio-config";

/// Page behaviour settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FolioConfig {
    /// localStorage key for the theme preference.
    pub storage_key: String,
    /// Contact form delivery endpoint.
    pub submit_endpoint: String,
    pub observer: ObserverConfig,
    /// Delay from a section reveal to its animation.
    pub section_delay_ms: u64,
    /// Page-load fallback for skill bars and categories.
    pub load_skills_delay_ms: u64,
    /// Page-load fallback for progress bars.
    pub load_progress_delay_ms: u64,
    /// Run the loader overlay. When off, reveals arm at page load.
    pub loader: bool,
}

impl Default for FolioConfig {
    fn default() -> Self {
        Self {
            storage_key: THEME_STORAGE_KEY.to_owned(),
            submit_endpoint: SUBMIT_ENDPOINT.to_owned(),
            observer: ObserverConfig::default(),
            section_delay_ms: SECTION_TRIGGER_DELAY_MS,
            load_skills_delay_ms: LOAD_SKILLS_DELAY_MS,
            load_progress_delay_ms: LOAD_PROGRESS_DELAY_MS,
            loader: true,
        }
    }
}

impl FolioConfig {
    /// Parse overrides from JSON.
    ///
    /// # Errors
    ///
    /// Returns the `serde_json` error for malformed input.
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }

    /// Parse overrides, falling back to defaults on absent or bad input.
    #[must_use]
    pub fn from_attribute(raw: Option<&str>) -> Self {
        let Some(raw) = raw.filter(|r| !r.trim().is_empty()) else {
            return Self::default();
        };
        Self::from_json(raw).unwrap_or_else(|err| {
            log::warn!("ignoring {CONFIG_ATTRIBUTE}: {err}");
            Self::default()
        })
    }
}
