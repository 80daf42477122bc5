//! Shared constants for page behaviour: scroll thresholds, trigger delays,
//! animation pacing and navbar colours.

// ── Scroll ──────────────────────────────────────────────────────

/// Scroll offset past which the navbar switches to its "scrolled" colour.
pub const NAVBAR_SCROLLED_PX: f64 = 50.0;

/// Scroll offset past which the scroll-to-top control becomes visible.
pub const SCROLL_TOP_VISIBLE_PX: f64 = 300.0;

/// Hero image moves at this fraction of the scroll offset.
pub const PARALLAX_RATE: f64 = 0.1;

// ── Navbar colours ──────────────────────────────────────────────

/// Light navbar shown over the dark theme once scrolled.
pub const NAVBAR_LIGHT_SCROLLED: &str = "rgba(255, 255, 255, 0.98)";

/// Light navbar shown over the dark theme at the top of the page.
pub const NAVBAR_LIGHT_TOP: &str = "rgba(255, 255, 255, 0.95)";

/// Dark navbar shown over the light theme once scrolled.
pub const NAVBAR_DARK_SCROLLED: &str = "rgba(15, 23, 42, 0.98)";

/// Dark navbar shown over the light theme at the top of the page.
pub const NAVBAR_DARK_TOP: &str = "rgba(15, 23, 42, 0.95)";

// ── Reveal ──────────────────────────────────────────────────────

/// Fraction of an element's height that must be inside the root box.
pub const REVEAL_THRESHOLD: f64 = 0.1;

/// Bottom margin applied to the viewport when testing intersection.
pub const REVEAL_BOTTOM_MARGIN_PX: f64 = -50.0;

/// An element reveals once its top edge is this far above the viewport bottom.
pub const REVEAL_OFFSET_PX: f64 = 150.0;

// ── Staged animation ────────────────────────────────────────────

/// Delay between a section reveal and its animation start.
pub const SECTION_TRIGGER_DELAY_MS: u64 = 500;

/// Counters advance in this many steps.
pub const COUNTER_STEPS: u64 = 100;

/// Interval between counter steps.
pub const COUNTER_STEP_MS: u64 = 20;

/// Per-index stagger for skill bars and skill categories.
pub const STAGGER_MS: u64 = 200;

/// Page-load fallback for skill bars and the category stagger.
pub const LOAD_SKILLS_DELAY_MS: u64 = 1000;

/// Page-load fallback for education progress bars.
pub const LOAD_PROGRESS_DELAY_MS: u64 = 1500;

// ── Loader ──────────────────────────────────────────────────────

/// Interval between loader progress ticks.
pub const LOADER_TICK_MS: u64 = 100;

/// Largest progress increment a single tick may add, in percent.
pub const LOADER_MAX_STEP: f64 = 15.0;

/// Pause at 100% before fading, and again before hiding.
pub const LOADER_FADE_MS: u64 = 500;

// ── Theme toggle ────────────────────────────────────────────────

/// How long the toggle button stays rotated after a click.
pub const TOGGLE_SPIN_MS: u64 = 300;

// ── Decorative ──────────────────────────────────────────────────

/// Delay before the hero title is retyped.
pub const TYPEWRITER_DELAY_MS: u64 = 3000;

/// Interval between typed characters.
pub const TYPEWRITER_CHAR_MS: u64 = 150;

/// Delay before hero particles are spawned.
pub const PARTICLES_DELAY_MS: u64 = 3500;

/// Number of hero particles.
pub const PARTICLE_COUNT: usize = 50;

// ── Contact form ────────────────────────────────────────────────

/// How long a success message stays on screen.
pub const FORM_MESSAGE_HIDE_MS: u64 = 5000;

/// Default submission endpoint.
pub const SUBMIT_ENDPOINT: &str = "https://api.web3forms.com/submit";

/// localStorage key for the theme preference.
pub const THEME_STORAGE_KEY: &str = "theme";
