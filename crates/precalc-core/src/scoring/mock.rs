//! Mock scoring backend for testing
//!
//! Serves beatmaps from an in-memory table instead of parsing files, and
//! derives values from the mod bits so tests can tell combinations apart.

use std::cell::RefCell;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use super::{BeatmapHandle, Calculation, ScoringBackend};
use crate::error::{Error, Result};
use crate::mods::ModCombination;
use crate::ruleset::GameMode;

/// Mock beatmap handle
#[derive(Debug, Clone, PartialEq)]
pub struct MockBeatmap {
    pub beatmap_id: i32,
    pub mode: GameMode,
    pub base_stars: f64,
}

impl BeatmapHandle for MockBeatmap {
    fn beatmap_id(&self) -> i32 {
        self.beatmap_id
    }

    fn mode(&self) -> GameMode {
        self.mode
    }
}

/// Mock scoring backend
///
/// Stars are `base_stars + bits / 100`, pp is ten times the stars.
#[derive(Debug, Default)]
pub struct MockBackend {
    maps: HashMap<PathBuf, MockBeatmap>,
    failing_loads: Vec<PathBuf>,
    failing_calculations: Vec<(PathBuf, ModCombination)>,
    loads: RefCell<Vec<PathBuf>>,
    calculations: RefCell<Vec<(PathBuf, ModCombination)>>,
}

impl MockBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a beatmap at `path`
    pub fn with_map<P: Into<PathBuf>>(
        mut self,
        path: P,
        beatmap_id: i32,
        mode: GameMode,
        base_stars: f64,
    ) -> Self {
        self.maps.insert(
            path.into(),
            MockBeatmap {
                beatmap_id,
                mode,
                base_stars,
            },
        );
        self
    }

    /// Make loading `path` fail
    pub fn failing_load<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.failing_loads.push(path.into());
        self
    }

    /// Make calculating `path` with `mods` fail
    pub fn failing_calculation<P: Into<PathBuf>>(mut self, path: P, mods: ModCombination) -> Self {
        self.failing_calculations.push((path.into(), mods));
        self
    }

    /// Paths passed to `load`, in call order
    pub fn loads(&self) -> Vec<PathBuf> {
        self.loads.borrow().clone()
    }

    /// Path/mods pairs passed to `calculate`, in call order
    pub fn calculations(&self) -> Vec<(PathBuf, ModCombination)> {
        self.calculations.borrow().clone()
    }

    /// Values the backend produces for `base_stars` with `mods`
    pub fn expected(base_stars: f64, mods: &ModCombination) -> Calculation {
        let stars = base_stars + f64::from(mods.legacy_bits()) / 100.0;
        Calculation {
            stars,
            pp: stars * 10.0,
            max_combo: 100,
        }
    }
}

impl ScoringBackend for MockBackend {
    type Map = MockBeatmap;

    fn load(&self, path: &Path) -> Result<MockBeatmap> {
        self.loads.borrow_mut().push(path.to_path_buf());

        if self.failing_loads.iter().any(|p| p == path) {
            return Err(Error::BeatmapLoadFailed {
                path: path.to_path_buf(),
                message: "Mock load failure".to_string(),
            });
        }

        self.maps
            .get(path)
            .cloned()
            .ok_or_else(|| Error::BeatmapLoadFailed {
                path: path.to_path_buf(),
                message: "Mock beatmap not configured".to_string(),
            })
    }

    fn calculate(
        &self,
        path: &Path,
        map: &MockBeatmap,
        mods: &ModCombination,
    ) -> Result<Calculation> {
        self.calculations
            .borrow_mut()
            .push((path.to_path_buf(), mods.clone()));

        if self
            .failing_calculations
            .iter()
            .any(|(p, m)| p == path && m == mods)
        {
            return Err(Error::CalculationFailed {
                path: path.to_path_buf(),
                mods: mods.to_string(),
                message: "Mock calculation failure".to_string(),
            });
        }

        Ok(Self::expected(map.base_stars, mods))
    }
}
