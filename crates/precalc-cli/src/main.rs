mod cli;
mod cli_utils;
mod commands;

use anyhow::Result;
use clap::Parser;
use cli::{Args, Command};
use commands::run::RunOptions;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging (info unless RUST_LOG says otherwise)
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("precalc_cli=info,precalc_core=info"));
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    match args.command {
        Command::Run {
            maps_dir,
            output,
            mods,
            mode,
            accuracy,
            keep_going,
        } => commands::run::run(RunOptions {
            config: args.config.as_deref(),
            maps_dir: &maps_dir,
            output: &output,
            mods: &mods,
            mode: mode.as_deref(),
            accuracy,
            keep_going,
        }),
        Command::Combos { mods, json } => {
            commands::combos::run(args.config.as_deref(), &mods, json)
        }
    }
}
