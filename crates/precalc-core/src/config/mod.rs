//! Run configuration.
//!
//! Values come from an optional TOML file; the CLI overrides individual
//! fields afterwards. Missing keys fall back to the osu!standard defaults.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::discovery::DEFAULT_EXTENSION;
use crate::driver::FailurePolicy;
use crate::error::{Error, Result};
use crate::export::DEFAULT_BUFFER_SIZE;
use crate::mods::{ExclusionPair, GameMod, ModCombination, build_combinations, outside_catalog};
use crate::ruleset::{GameMode, OsuStandard, RulesetProvider, ruleset_for};

/// Fixed-play assumptions used for every calculation.
pub mod play {
    /// Accuracy (in percent) every calculation assumes.
    pub const DEFAULT_ACCURACY: f64 = 100.0;
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Beatmaps declaring another mode are skipped.
    pub target_mode: GameMode,
    /// Mods removed from the catalog before enumeration.
    pub denylist: Vec<GameMod>,
    /// Pairs of mods never combined.
    pub exclusions: Vec<ExclusionPair>,
    pub accuracy: f64,
    /// Output buffer size in bytes.
    pub buffer_size: usize,
    /// Beatmap file extension searched for.
    pub extension: String,
    pub failure_policy: FailurePolicy,
}

impl Default for Config {
    fn default() -> Self {
        let ruleset = OsuStandard;
        Self {
            target_mode: ruleset.mode(),
            denylist: ruleset.default_denylist(),
            exclusions: ruleset.exclusions(),
            accuracy: play::DEFAULT_ACCURACY,
            buffer_size: DEFAULT_BUFFER_SIZE,
            extension: DEFAULT_EXTENSION.to_string(),
            failure_policy: FailurePolicy::default(),
        }
    }
}

impl Config {
    /// Load config from a TOML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Parse config from TOML content
    pub fn parse(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.accuracy > 0.0 && self.accuracy <= 100.0) {
            return Err(Error::ConfigParseError(format!(
                "accuracy must be in (0, 100], got {}",
                self.accuracy
            )));
        }
        if self.buffer_size == 0 {
            return Err(Error::ConfigParseError(
                "buffer_size must be positive".to_string(),
            ));
        }
        if self.extension.trim_start_matches('.').is_empty() {
            return Err(Error::ConfigParseError("extension is empty".to_string()));
        }
        ruleset_for(self.target_mode)?;
        Ok(())
    }

    /// Add mods to the denylist
    pub fn deny(&mut self, mods: &[GameMod]) {
        self.warn_outside_catalog("deny", mods);
        for m in mods {
            if !self.denylist.contains(m) {
                self.denylist.push(*m);
            }
        }
    }

    /// Remove mods from the denylist
    pub fn allow(&mut self, mods: &[GameMod]) {
        self.warn_outside_catalog("allow", mods);
        self.denylist.retain(|m| !mods.contains(m));
    }

    fn warn_outside_catalog(&self, action: &str, mods: &[GameMod]) {
        let Ok(ruleset) = ruleset_for(self.target_mode) else {
            return;
        };
        for m in outside_catalog(mods, &ruleset.catalog()) {
            warn!(
                "Cannot {} {}: it is never permuted for {}",
                action,
                m,
                self.target_mode
            );
        }
    }

    /// The filtered combinations to calculate every beatmap with
    pub fn combinations(&self, ruleset: &dyn RulesetProvider) -> Vec<ModCombination> {
        build_combinations(&ruleset.catalog(), &self.denylist, &self.exclusions)
    }
}
