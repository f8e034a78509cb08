//! Common CLI utility functions shared across commands.

use std::path::Path;

use anyhow::{Context, Result};
use precalc_core::{Config, GameMod};
use tracing::info;

use crate::cli::ModArgs;

/// Load the config file if given, then apply the denylist adjustments.
///
/// `exclude` is applied last, so a mod named by both flags stays denied.
pub fn load_config(path: Option<&Path>, mods: &ModArgs) -> Result<Config> {
    let mut config = match path {
        Some(path) => {
            let config = Config::load(path)
                .with_context(|| format!("failed to load config {}", path.display()))?;
            info!("Loaded config from {}", path.display());
            config
        }
        None => Config::default(),
    };

    if let Some(include) = &mods.include {
        config.allow(&GameMod::parse_list(include)?);
    }
    if let Some(exclude) = &mods.exclude {
        config.deny(&GameMod::parse_list(exclude)?);
    }

    Ok(config)
}
