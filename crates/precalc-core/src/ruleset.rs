//! Rulesets and their mod catalogs.

use serde::{Deserialize, Serialize};
use strum::{EnumString, FromRepr, IntoStaticStr};

use crate::error::{Error, Result};
use crate::mods::{ExclusionPair, GameMod};

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    EnumString,
    FromRepr,
    IntoStaticStr,
)]
#[repr(u8)]
#[serde(rename_all = "lowercase")]
#[strum(ascii_case_insensitive)]
pub enum GameMode {
    #[default]
    #[strum(serialize = "osu")]
    Osu = 0,
    #[strum(serialize = "taiko")]
    Taiko = 1,
    #[serde(alias = "fruits")]
    #[strum(to_string = "catch", serialize = "fruits")]
    Catch = 2,
    #[strum(serialize = "mania")]
    Mania = 3,
}

impl GameMode {
    pub fn from_u8(value: u8) -> Option<Self> {
        Self::from_repr(value)
    }

    pub fn short_name(&self) -> &'static str {
        self.into()
    }

    pub fn parse(s: &str) -> Result<Self> {
        s.trim()
            .parse()
            .map_err(|_| Error::UnknownMode(s.trim().to_string()))
    }
}

impl std::fmt::Display for GameMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.short_name())
    }
}

/// Everything the pipeline needs to know about one ruleset.
pub trait RulesetProvider {
    /// Mode a beatmap must declare to be processed.
    fn mode(&self) -> GameMode;

    /// All toggleable mods, in the order they are enumerated.
    fn catalog(&self) -> Vec<GameMod>;

    /// Pairs of mods that are never active together.
    fn exclusions(&self) -> Vec<ExclusionPair>;

    /// Mods that get their own output column, in column order.
    fn tracked(&self) -> Vec<GameMod>;

    /// Mods removed from the catalog unless configured otherwise.
    fn default_denylist(&self) -> Vec<GameMod>;
}

/// osu!standard.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsuStandard;

impl RulesetProvider for OsuStandard {
    fn mode(&self) -> GameMode {
        GameMode::Osu
    }

    fn catalog(&self) -> Vec<GameMod> {
        vec![
            GameMod::Easy,
            GameMod::HalfTime,
            GameMod::HardRock,
            GameMod::DoubleTime,
            GameMod::Nightcore,
            GameMod::Hidden,
            GameMod::Flashlight,
            GameMod::TouchDevice,
            GameMod::Classic,
        ]
    }

    fn exclusions(&self) -> Vec<ExclusionPair> {
        vec![
            ExclusionPair::new(GameMod::HardRock, GameMod::Easy),
            ExclusionPair::new(GameMod::DoubleTime, GameMod::HalfTime),
        ]
    }

    fn tracked(&self) -> Vec<GameMod> {
        vec![
            GameMod::HardRock,
            GameMod::Easy,
            GameMod::Flashlight,
            GameMod::DoubleTime,
            GameMod::HalfTime,
            GameMod::Hidden,
        ]
    }

    fn default_denylist(&self) -> Vec<GameMod> {
        // NC duplicates DT, TD only matters on touch screens
        vec![
            GameMod::Classic,
            GameMod::Nightcore,
            GameMod::TouchDevice,
            GameMod::Flashlight,
            GameMod::Hidden,
            GameMod::Easy,
            GameMod::HalfTime,
        ]
    }
}

/// Look up the provider for a target mode.
pub fn ruleset_for(mode: GameMode) -> Result<Box<dyn RulesetProvider>> {
    match mode {
        GameMode::Osu => Ok(Box::new(OsuStandard)),
        other => Err(Error::UnsupportedMode(other.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mods::{build_combinations, remove_denied};

    #[test]
    fn test_game_mode_parse() {
        assert_eq!(GameMode::parse("osu").unwrap(), GameMode::Osu);
        assert_eq!(GameMode::parse("Mania").unwrap(), GameMode::Mania);
        assert_eq!(GameMode::parse("fruits").unwrap(), GameMode::Catch);
        assert!(matches!(GameMode::parse("ctb"), Err(Error::UnknownMode(_))));
    }

    #[test]
    fn test_game_mode_from_u8() {
        assert_eq!(GameMode::from_u8(0), Some(GameMode::Osu));
        assert_eq!(GameMode::from_u8(3), Some(GameMode::Mania));
        assert_eq!(GameMode::from_u8(4), None);
    }

    #[test]
    fn test_game_mode_display() {
        assert_eq!(GameMode::Catch.to_string(), "catch");
    }

    #[test]
    fn test_osu_tracked_columns() {
        let tracked: Vec<_> = OsuStandard.tracked().iter().map(GameMod::acronym).collect();
        assert_eq!(tracked, vec!["HR", "EZ", "FL", "DT", "HT", "HD"]);
    }

    #[test]
    fn test_osu_default_combinations() {
        let ruleset = OsuStandard;
        let combos = build_combinations(
            &ruleset.catalog(),
            &ruleset.default_denylist(),
            &ruleset.exclusions(),
        );
        let names: Vec<_> = combos.iter().map(ToString::to_string).collect();
        assert_eq!(names, vec!["HR", "DT", "HRDT", "NM"]);
    }

    #[test]
    fn test_osu_full_catalog_without_denylist() {
        let ruleset = OsuStandard;
        let unused = [GameMod::Classic, GameMod::Nightcore, GameMod::TouchDevice];
        let catalog = remove_denied(&ruleset.catalog(), &unused);
        let combos = build_combinations(&catalog, &[], &ruleset.exclusions());
        // 64 - 16 (HR+EZ) - 16 (DT+HT) + 4 (both)
        assert_eq!(combos.len(), 36);
    }

    #[test]
    fn test_ruleset_for() {
        assert_eq!(ruleset_for(GameMode::Osu).unwrap().mode(), GameMode::Osu);
        assert!(matches!(
            ruleset_for(GameMode::Taiko),
            Err(Error::UnsupportedMode(_))
        ));
    }
}
