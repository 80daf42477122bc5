//! One-shot reveal tracking for page sections and cards.
//!
//! A single rule decides visibility, replacing the pair of intersection- and
//! scroll-based checks an element could otherwise be subject to. An element
//! has crossed once its top edge is above
//! `viewport_height - max(reveal_offset, -bottom_margin + threshold * height)`.
//! The top-edge form is monotone in scroll position, so an element the user
//! jumps past (anchor links, fast flings) still reveals.
//!
//! Each element reveals at most once. Reveals are appended to a log so
//! consumers can ask what happened since their last checkpoint.

#[cfg(test)]
#[path = "reveal_test.rs"]
mod reveal_test;

use serde::{Deserialize, Serialize};

use crate::consts::{REVEAL_BOTTOM_MARGIN_PX, REVEAL_OFFSET_PX, REVEAL_THRESHOLD};

/// Index of a watched element, assigned in watch order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WatchId(pub usize);

/// What sort of element is being watched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WatchKind {
    Section,
    ServiceCard,
    PortfolioItem,
    SkillCategory,
    SkillIcon,
}

impl WatchKind {
    /// The CSS class that selects elements of this kind (sections use the tag).
    #[must_use]
    pub fn selector(self) -> &'static str {
        match self {
            Self::Section => "section",
            Self::ServiceCard => ".service-card",
            Self::PortfolioItem => ".portfolio-item",
            Self::SkillCategory => ".skill-category",
            Self::SkillIcon => ".skill-icon",
        }
    }

    /// All kinds, in the order the page watches them.
    pub const ALL: [Self; 5] =
        [Self::Section, Self::ServiceCard, Self::PortfolioItem, Self::SkillCategory, Self::SkillIcon];
}

/// Vertical extent of an element relative to the viewport top.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub top: f64,
    pub height: f64,
}

/// Observer tuning. Defaults match the page's stylesheet timings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ObserverConfig {
    /// Fraction of the element that must be inside the root box.
    pub threshold: f64,
    /// Margin added to the viewport bottom (negative shrinks it).
    pub bottom_margin_px: f64,
    /// Minimum distance of the top edge above the viewport bottom.
    pub reveal_offset_px: f64,
}

impl Default for ObserverConfig {
    fn default() -> Self {
        Self {
            threshold: REVEAL_THRESHOLD,
            bottom_margin_px: REVEAL_BOTTOM_MARGIN_PX,
            reveal_offset_px: REVEAL_OFFSET_PX,
        }
    }
}

impl ObserverConfig {
    /// Whether an element with `rect` has crossed the reveal line.
    #[must_use]
    pub fn crossed(&self, viewport_height: f64, rect: Rect) -> bool {
        let intersect_line = -self.bottom_margin_px + self.threshold * rect.height.max(0.0);
        let line = self.reveal_offset_px.max(intersect_line);
        rect.top < viewport_height - line
    }
}

/// A reveal transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reveal {
    pub id: WatchId,
    /// The element's DOM id, if it has one (sections do).
    pub name: Option<String>,
    pub kind: WatchKind,
}

/// Position in the reveal log.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct Checkpoint(usize);

#[derive(Debug, Clone)]
struct Record {
    name: Option<String>,
    kind: WatchKind,
    revealed: bool,
}

/// Tracks which watched elements have been revealed.
#[derive(Debug, Clone, Default)]
pub struct VisibilityObserver {
    config: ObserverConfig,
    records: Vec<Record>,
    log: Vec<Reveal>,
    armed: bool,
}

impl VisibilityObserver {
    #[must_use]
    pub fn new(config: ObserverConfig) -> Self {
        Self { config, ..Self::default() }
    }

    /// Register an element. Returns its id.
    pub fn watch(&mut self, name: Option<String>, kind: WatchKind) -> WatchId {
        let id = WatchId(self.records.len());
        self.records.push(Record { name, kind, revealed: false });
        id
    }

    /// Start evaluating reveals. Before this, [`Self::check`] does nothing.
    ///
    /// Returns the ids of all watched elements the first time it is called.
    pub fn arm(&mut self) -> Option<Vec<WatchId>> {
        if self.armed {
            return None;
        }
        self.armed = true;
        Some((0..self.records.len()).map(WatchId).collect())
    }

    #[must_use]
    pub fn is_armed(&self) -> bool {
        self.armed
    }

    /// Ids of watched elements that have not revealed yet.
    #[must_use]
    pub fn pending(&self) -> Vec<WatchId> {
        self.records
            .iter()
            .enumerate()
            .filter(|(_, r)| !r.revealed)
            .map(|(i, _)| WatchId(i))
            .collect()
    }

    /// Whether `id` has revealed.
    #[must_use]
    pub fn is_revealed(&self, id: WatchId) -> bool {
        self.records.get(id.0).is_some_and(|r| r.revealed)
    }

    /// Evaluate measured rects and reveal every element that crossed.
    ///
    /// Rects for unknown or already-revealed ids are ignored.
    pub fn check(&mut self, viewport_height: f64, rects: &[(WatchId, Rect)]) -> Vec<Reveal> {
        if !self.armed {
            return Vec::new();
        }
        let mut fresh = Vec::new();
        for &(id, rect) in rects {
            let Some(record) = self.records.get_mut(id.0) else {
                continue;
            };
            if record.revealed || !self.config.crossed(viewport_height, rect) {
                continue;
            }
            record.revealed = true;
            let reveal = Reveal { id, name: record.name.clone(), kind: record.kind };
            log::debug!("revealed {:?} {:?}", reveal.kind, reveal.name);
            self.log.push(reveal.clone());
            fresh.push(reveal);
        }
        fresh
    }

    /// The current end of the reveal log.
    #[must_use]
    pub fn checkpoint(&self) -> Checkpoint {
        Checkpoint(self.log.len())
    }

    /// Reveals recorded after `since`.
    #[must_use]
    pub fn revealed_since(&self, since: Checkpoint) -> &[Reveal] {
        self.log.get(since.0..).unwrap_or_default()
    }

    /// Number of watched elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
