//! # folio
//!
//! Behaviour layer for a single-page personal portfolio, compiled to
//! WebAssembly and attached to server-rendered markup.
//!
//! All decisions (theme, reveal, staged animation, scroll paint, loader,
//! contact form) live in browser-free modules that return [`effect::Effect`]
//! lists. With the `hydrate` feature, [`host`] binds them to the page.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | [`engine::PageCore`], the application-state object |
//! | [`theme`] | Theme value and controller |
//! | [`prefs`] | Theme preference storage |
//! | [`reveal`] | One-shot visibility observer |
//! | [`stage`] | Counters, bars and category stagger |
//! | [`scroll`] | Navbar, scroll-to-top and parallax rules |
//! | [`schedule`] | Virtual-clock scheduler |
//! | [`loader`] | Page loader progress |
//! | [`nav`] | Mobile menu |
//! | [`flourish`] | Typewriter and particles |
//! | [`contact`] | Contact form validation and submission |
//! | [`config`] | Runtime configuration |
//! | [`effect`] | DOM mutations as data |
//! | [`error`] | Error types |
//! | [`consts`] | Shared constants |

pub mod config;
pub mod consts;
pub mod contact;
pub mod effect;
pub mod engine;
pub mod error;
pub mod flourish;
pub mod loader;
pub mod nav;
pub mod prefs;
pub mod reveal;
pub mod schedule;
pub mod scroll;
pub mod stage;
pub mod theme;

#[cfg(feature = "hydrate")]
pub mod dom;
#[cfg(feature = "hydrate")]
pub mod host;
