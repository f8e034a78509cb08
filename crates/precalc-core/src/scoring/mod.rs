//! Scoring backend abstraction.
//!
//! The batch driver only talks to the traits in this module, so the actual
//! difficulty/performance calculation can be swapped for a mock in tests.

mod metadata;
#[cfg(feature = "rosu")]
mod rosu;

// Mock backend for testing (always available for unit and integration tests)
#[doc(hidden)]
pub mod mock;

pub use metadata::{NO_BEATMAP_ID, parse_beatmap_id};
#[cfg(feature = "rosu")]
pub use rosu::{RosuBackend, RosuBeatmap};

#[doc(hidden)]
pub use mock::{MockBackend, MockBeatmap};

use std::path::Path;

use crate::error::Result;
use crate::mods::ModCombination;
use crate::ruleset::GameMode;

/// Difficulty and performance values for one beatmap/mods pair.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Calculation {
    /// Star rating.
    pub stars: f64,
    /// Performance points of a full combo SS.
    pub pp: f64,
    pub max_combo: u32,
}

/// Trait for accessing a loaded beatmap.
pub trait BeatmapHandle {
    /// Online beatmap id, or [`NO_BEATMAP_ID`] if the file has none.
    fn beatmap_id(&self) -> i32;

    /// Mode the beatmap was made for.
    fn mode(&self) -> GameMode;
}

/// Trait for loading beatmaps and calculating their values.
pub trait ScoringBackend {
    /// The type of beatmap handle returned by this backend.
    type Map: BeatmapHandle;

    /// Parse the beatmap file at `path`.
    fn load(&self, path: &Path) -> Result<Self::Map>;

    /// Calculate difficulty and performance for `map` with `mods` active.
    ///
    /// The play is assumed to be perfect: 100% accuracy at maximum combo.
    fn calculate(&self, path: &Path, map: &Self::Map, mods: &ModCombination) -> Result<Calculation>;
}
