use std::fs;
use std::path::Path;

use rosu_pp::{Beatmap, Difficulty, Performance};

use super::{BeatmapHandle, Calculation, NO_BEATMAP_ID, ScoringBackend, parse_beatmap_id};
use crate::error::{Error, Result};
use crate::mods::ModCombination;
use crate::ruleset::GameMode;

/// A beatmap decoded by rosu-pp.
pub struct RosuBeatmap {
    map: Beatmap,
    beatmap_id: i32,
    mode: GameMode,
}

impl BeatmapHandle for RosuBeatmap {
    fn beatmap_id(&self) -> i32 {
        self.beatmap_id
    }

    fn mode(&self) -> GameMode {
        self.mode
    }
}

/// Scoring backend backed by the rosu-pp difficulty and performance calculators.
#[derive(Debug, Clone, Copy)]
pub struct RosuBackend {
    accuracy: f64,
}

impl RosuBackend {
    /// Create a backend that scores plays at `accuracy` percent.
    pub fn new(accuracy: f64) -> Self {
        Self { accuracy }
    }

    pub fn accuracy(&self) -> f64 {
        self.accuracy
    }
}

impl Default for RosuBackend {
    fn default() -> Self {
        Self::new(100.0)
    }
}

impl ScoringBackend for RosuBackend {
    type Map = RosuBeatmap;

    fn load(&self, path: &Path) -> Result<RosuBeatmap> {
        let load_err = |message: String| Error::BeatmapLoadFailed {
            path: path.to_path_buf(),
            message,
        };

        let bytes = fs::read(path).map_err(|e| load_err(e.to_string()))?;
        let map = Beatmap::from_bytes(&bytes).map_err(|e| load_err(e.to_string()))?;

        let mode = GameMode::from_u8(map.mode as u8)
            .ok_or_else(|| load_err(format!("unknown mode {:?}", map.mode)))?;

        let beatmap_id =
            parse_beatmap_id(&String::from_utf8_lossy(&bytes)).unwrap_or(NO_BEATMAP_ID);

        Ok(RosuBeatmap {
            map,
            beatmap_id,
            mode,
        })
    }

    fn calculate(
        &self,
        _path: &Path,
        map: &RosuBeatmap,
        mods: &ModCombination,
    ) -> Result<Calculation> {
        let bits = mods.legacy_bits();

        let diff_attrs = Difficulty::new().mods(bits).calculate(&map.map);
        let stars = diff_attrs.stars();
        let max_combo = diff_attrs.max_combo();

        let perf_attrs = Performance::new(diff_attrs)
            .mods(bits)
            .accuracy(self.accuracy)
            .combo(max_combo)
            .misses(0)
            .calculate();

        Ok(Calculation {
            stars,
            pp: perf_attrs.pp(),
            max_combo,
        })
    }
}
