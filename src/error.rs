//! Error types for the storage, submission and DOM boundaries.
//!
//! ERROR HANDLING
//! ==============
//! None of these are fatal to the page. Storage errors degrade to the default
//! theme, submission errors become a user-visible message, and DOM errors are
//! logged while the rest of the page keeps working.

/// Error returned by [`crate::prefs::KeyValueStore::set`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// The browser refused access to storage (private mode, disabled, sandboxed).
    #[error("storage unavailable")]
    Unavailable,
    /// The write itself threw (quota exceeded and similar).
    #[error("storage write failed: {0}")]
    Write(String),
}

/// Error returned by a contact form [`crate::contact::Transport`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SubmitError {
    /// The request never produced a response.
    #[error("request failed: {0}")]
    Transport(String),
    /// The endpoint answered with an error status and no readable body.
    #[error("endpoint returned HTTP {0}")]
    Status(u16),
    /// The response body was not the expected JSON.
    #[error("invalid response body: {0}")]
    Decode(String),
}

/// Error raised while binding to or mutating the page.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomError {
    /// No `window` or `document` (not running in a browser).
    #[error("no browser window")]
    NoWindow,
    /// A required element id was not present in the document.
    #[error("missing element #{0}")]
    MissingElement(&'static str),
    /// A browser API threw; the payload is the stringified JS value.
    #[error("browser call failed: {0}")]
    Js(String),
}
