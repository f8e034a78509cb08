//! Batch driver: every beatmap file with every mod combination.
//!
//! Files and combinations are processed strictly in order, so output rows
//! appear as (file order x combination order). A beatmap whose declared mode
//! is not the target mode is detected once, before any calculation, and
//! produces no rows.

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, warn};

use crate::error::Result;
use crate::export::{OutputRow, RowSink};
use crate::mods::{GameMod, ModCombination};
use crate::ruleset::{GameMode, RulesetProvider};
use crate::scoring::{BeatmapHandle, ScoringBackend};

/// What to do when loading or calculating a beatmap fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FailurePolicy {
    /// Stop the run and return the error.
    #[default]
    AbortRun,
    /// Log the error and continue with the next file.
    SkipFile,
}

/// Counters reported at the end of a run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunSummary {
    pub files_processed: usize,
    pub files_skipped: usize,
    pub files_failed: usize,
    pub rows_written: usize,
    pub elapsed: Duration,
}

enum FileOutcome {
    Processed,
    WrongMode(GameMode),
}

pub struct BatchDriver {
    target_mode: GameMode,
    tracked: Vec<GameMod>,
    policy: FailurePolicy,
}

impl BatchDriver {
    pub fn new(target_mode: GameMode, tracked: Vec<GameMod>) -> Self {
        Self {
            target_mode,
            tracked,
            policy: FailurePolicy::default(),
        }
    }

    /// Driver for the ruleset's target mode and tracked columns
    pub fn for_ruleset(ruleset: &dyn RulesetProvider) -> Self {
        Self::new(ruleset.mode(), ruleset.tracked())
    }

    pub fn with_policy(mut self, policy: FailurePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn target_mode(&self) -> GameMode {
        self.target_mode
    }

    pub fn policy(&self) -> FailurePolicy {
        self.policy
    }

    /// Calculate every file with every combination and stream the rows into `sink`.
    ///
    /// With [`FailurePolicy::AbortRun`] the first failure is returned after
    /// flushing the rows written so far.
    pub fn run<B, S>(
        &self,
        files: &[PathBuf],
        combos: &[ModCombination],
        backend: &B,
        sink: &mut S,
    ) -> Result<RunSummary>
    where
        B: ScoringBackend,
        S: RowSink,
    {
        let start = Instant::now();
        let mut summary = RunSummary::default();

        if combos.is_empty() {
            warn!("No mod combinations to calculate, skipping all files");
            summary.elapsed = start.elapsed();
            return Ok(summary);
        }

        info!(
            "Calculating {} files with {} mod combinations",
            files.len(),
            combos.len()
        );

        for file in files {
            let mut rows = 0;
            match self.process_file(file, combos, backend, sink, &mut rows) {
                Ok(FileOutcome::Processed) => {
                    summary.files_processed += 1;
                }
                Ok(FileOutcome::WrongMode(mode)) => {
                    info!(
                        "Excluding {} because it is not {} but {}",
                        file.display(),
                        self.target_mode,
                        mode
                    );
                    summary.files_skipped += 1;
                }
                Err(e) => match self.policy {
                    FailurePolicy::AbortRun => {
                        error!("Aborting run at {}: {}", file.display(), e);
                        if let Err(flush_err) = sink.flush() {
                            warn!("Failed to flush rows before aborting: {}", flush_err);
                        }
                        return Err(e);
                    }
                    FailurePolicy::SkipFile => {
                        error!("Skipping rest of {}: {}", file.display(), e);
                        summary.files_failed += 1;
                    }
                },
            }
            summary.rows_written += rows;
        }

        sink.flush()?;
        summary.elapsed = start.elapsed();

        info!("Took {} seconds", summary.elapsed.as_secs_f64());

        Ok(summary)
    }

    fn process_file<B, S>(
        &self,
        file: &Path,
        combos: &[ModCombination],
        backend: &B,
        sink: &mut S,
        rows: &mut usize,
    ) -> Result<FileOutcome>
    where
        B: ScoringBackend,
        S: RowSink,
    {
        let map = backend.load(file)?;

        if map.mode() != self.target_mode {
            return Ok(FileOutcome::WrongMode(map.mode()));
        }

        let beatmap_id = map.beatmap_id();

        for mods in combos {
            info!("Working on {} with {}", file.display(), mods.acronym_list());

            let calc = backend.calculate(file, &map, mods)?;
            let row = OutputRow::build(beatmap_id, &calc, mods, &self.tracked);
            sink.write_row(&row)?;
            *rows += 1;

            debug!(
                "{} {}: {:.2} stars, {:.2}pp",
                beatmap_id,
                mods,
                calc.stars,
                calc.pp
            );
        }

        Ok(FileOutcome::Processed)
    }
}
