//! Combos command: list the mod combinations without calculating anything.

use std::path::Path;

use anyhow::Result;
use precalc_core::ruleset_for;

use crate::cli::ModArgs;
use crate::cli_utils;

pub fn run(config: Option<&Path>, mods: &ModArgs, json: bool) -> Result<()> {
    let config = cli_utils::load_config(config, mods)?;
    let ruleset = ruleset_for(config.target_mode)?;
    let combos = config.combinations(ruleset.as_ref());

    if json {
        println!("{}", serde_json::to_string_pretty(&combos)?);
        return Ok(());
    }

    for combo in &combos {
        println!("{}", combo);
    }
    eprintln!("{} combinations", combos.len());

    Ok(())
}
