//! Durable storage for the single theme preference.
//!
//! Reads fall back to the default theme and writes are best-effort: a page
//! whose storage is blocked still works, it just forgets the choice on
//! reload.

#[cfg(test)]
#[path = "prefs_test.rs"]
mod prefs_test;

use std::collections::HashMap;

use crate::consts::THEME_STORAGE_KEY;
use crate::error::StoreError;
use crate::theme::Theme;

/// Minimal string key-value storage.
pub trait KeyValueStore {
    /// Read a value. `None` covers both "absent" and "unreadable".
    fn get(&self, key: &str) -> Option<String>;

    /// Write a value, replacing any previous one.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the backing storage rejects the write.
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
}

/// In-memory store. Used in tests and when browser storage is denied.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries.insert(key.to_owned(), value.to_owned());
        Ok(())
    }
}

/// `window.localStorage`, scoped to the page origin.
#[cfg(feature = "hydrate")]
pub struct LocalStore {
    storage: Option<web_sys::Storage>,
}

#[cfg(feature = "hydrate")]
impl LocalStore {
    /// Open local storage; a denied or missing store degrades to no-ops.
    #[must_use]
    pub fn open() -> Self {
        let storage = match web_sys::window().map(|w| w.local_storage()) {
            Some(Ok(storage)) => storage,
            Some(Err(err)) => {
                log::warn!("localStorage unavailable: {err:?}");
                None
            }
            None => None,
        };
        Self { storage }
    }
}

#[cfg(feature = "hydrate")]
impl KeyValueStore for LocalStore {
    fn get(&self, key: &str) -> Option<String> {
        let storage = self.storage.as_ref()?;
        storage.get_item(key).unwrap_or_default()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        let storage = self.storage.as_ref().ok_or(StoreError::Unavailable)?;
        storage
            .set_item(key, value)
            .map_err(|err| StoreError::Write(format!("{err:?}")))
    }
}

/// Theme preference backed by a [`KeyValueStore`].
pub struct PreferenceStore<S> {
    store: S,
    key: String,
}

impl<S: KeyValueStore> PreferenceStore<S> {
    /// Use the standard `"theme"` key.
    pub fn new(store: S) -> Self {
        Self::with_key(store, THEME_STORAGE_KEY)
    }

    /// Use a custom storage key.
    pub fn with_key(store: S, key: impl Into<String>) -> Self {
        Self { store, key: key.into() }
    }

    /// The stored theme, or `Dark` if absent or unparsable.
    pub fn get(&self) -> Theme {
        match self.store.get(&self.key) {
            Some(raw) => raw.parse().unwrap_or_else(|err| {
                log::warn!("ignoring stored preference: {err}");
                Theme::default()
            }),
            None => Theme::default(),
        }
    }

    /// Persist `theme`. Failures are logged and swallowed.
    pub fn set(&mut self, theme: Theme) {
        if let Err(err) = self.store.set(&self.key, theme.as_str()) {
            log::warn!("theme preference not saved: {err}");
        }
    }

    /// Borrow the backing store.
    pub fn store(&self) -> &S {
        &self.store
    }
}
