//! CLI argument definitions for precalc.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "precalc")]
#[command(about = "Star rating and pp for every mod combination of a beatmap folder", version)]
pub struct Args {
    /// Load settings from a TOML config file
    #[arg(short, long, global = true, value_name = "FILE", env = "PRECALC_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Calculate every beatmap with every mod combination and write a CSV file
    Run {
        /// Folder containing .osu files (searched recursively)
        maps_dir: PathBuf,
        /// Output file for CSV results
        output: PathBuf,
        #[command(flatten)]
        mods: ModArgs,
        /// Game mode to calculate; beatmaps of other modes are skipped
        #[arg(long)]
        mode: Option<String>,
        /// Accuracy in percent assumed for every play
        #[arg(long)]
        accuracy: Option<f64>,
        /// Skip a beatmap that fails to load or calculate instead of aborting
        #[arg(long)]
        keep_going: bool,
    },
    /// Print the mod combinations a run would calculate
    Combos {
        #[command(flatten)]
        mods: ModArgs,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

/// Adjustments to the mod denylist.
#[derive(clap::Args, Debug, Default, Clone)]
pub struct ModArgs {
    /// Additional mods to leave out of the permutation (e.g. HD,FL)
    #[arg(long, value_name = "MODS")]
    pub exclude: Option<String>,
    /// Denylisted mods to permute anyway (e.g. HD,FL)
    #[arg(long, value_name = "MODS")]
    pub include: Option<String>,
}
