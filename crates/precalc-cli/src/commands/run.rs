//! Run command implementation.
//!
//! Discovers the beatmaps, creates the CSV file and hands both to the batch
//! driver. Any setup failure aborts before a single row is written.

use std::path::Path;

use anyhow::{Context, Result};
use owo_colors::OwoColorize;
use precalc_core::{
    BatchDriver, CsvSink, FailurePolicy, GameMode, RosuBackend, RunSummary, discover_beatmaps,
    ruleset_for,
};
use tracing::info;

use crate::cli::ModArgs;
use crate::cli_utils;

pub struct RunOptions<'a> {
    pub config: Option<&'a Path>,
    pub maps_dir: &'a Path,
    pub output: &'a Path,
    pub mods: &'a ModArgs,
    pub mode: Option<&'a str>,
    pub accuracy: Option<f64>,
    pub keep_going: bool,
}

pub fn run(options: RunOptions<'_>) -> Result<()> {
    let mut config = cli_utils::load_config(options.config, options.mods)?;

    if let Some(mode) = options.mode {
        config.target_mode = GameMode::parse(mode)?;
    }
    if let Some(accuracy) = options.accuracy {
        config.accuracy = accuracy;
    }
    if options.keep_going {
        config.failure_policy = FailurePolicy::SkipFile;
    }
    config.validate()?;

    let ruleset = ruleset_for(config.target_mode)?;
    let combos = config.combinations(ruleset.as_ref());

    info!(
        "Permuting {} mod combinations for {}",
        combos.len(),
        config.target_mode
    );

    let files = discover_beatmaps(options.maps_dir, &config.extension)
        .with_context(|| format!("failed to scan {}", options.maps_dir.display()))?;

    info!(
        "Found {} .{} files in {}",
        files.len(),
        config.extension.trim_start_matches('.'),
        options.maps_dir.display()
    );

    let mut sink = CsvSink::create(options.output, &ruleset.tracked(), config.buffer_size)?;

    let driver =
        BatchDriver::for_ruleset(ruleset.as_ref()).with_policy(config.failure_policy);
    let backend = RosuBackend::new(config.accuracy);

    info!(
        "Scoring {} plays at {}% accuracy ({:?} on failure)",
        driver.target_mode(),
        backend.accuracy(),
        driver.policy()
    );

    let summary = driver.run(&files, &combos, &backend, &mut sink)?;

    print_summary(&summary, options.output);

    Ok(())
}

fn print_summary(summary: &RunSummary, output: &Path) {
    eprintln!(
        "{} {} rows from {} beatmaps written to {}",
        "Done:".bright_green().bold(),
        summary.rows_written,
        summary.files_processed,
        output.display()
    );

    if summary.files_skipped > 0 {
        eprintln!(
            "  {} {} beatmaps of another mode",
            "Skipped".yellow(),
            summary.files_skipped
        );
    }
    if summary.files_failed > 0 {
        eprintln!(
            "  {} {} beatmaps could not be calculated",
            "Failed".red(),
            summary.files_failed
        );
    }

    eprintln!("Took {} seconds", summary.elapsed.as_secs_f64());
}
