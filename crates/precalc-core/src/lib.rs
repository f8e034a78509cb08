pub mod config;
pub mod discovery;
pub mod driver;
pub mod error;
pub mod export;
pub mod mods;
pub mod ruleset;
pub mod scoring;

pub use config::Config;
pub use discovery::{DEFAULT_EXTENSION, discover_beatmaps};
pub use driver::{BatchDriver, FailurePolicy, RunSummary};
pub use error::{Error, Result};
pub use export::{CsvSink, OutputRow, RowSink, read_rows};
pub use mods::{ExclusionPair, GameMod, ModCombination, build_combinations, enumerate, filter};
pub use ruleset::{GameMode, OsuStandard, RulesetProvider, ruleset_for};
#[cfg(feature = "rosu")]
pub use scoring::RosuBackend;
pub use scoring::{BeatmapHandle, Calculation, ScoringBackend};
