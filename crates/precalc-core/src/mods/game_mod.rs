use std::str::FromStr;

use serde::{Deserialize, Serialize};
use strum::{EnumIter, EnumString, IntoStaticStr};

use crate::error::Error;

/// A gameplay modifier, identified by its acronym.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    EnumIter,
    EnumString,
    IntoStaticStr,
)]
#[serde(into = "&'static str", try_from = "String")]
#[strum(ascii_case_insensitive)]
pub enum GameMod {
    #[strum(serialize = "NF")]
    NoFail,
    #[strum(serialize = "EZ")]
    Easy,
    #[strum(serialize = "TD")]
    TouchDevice,
    #[strum(serialize = "HD")]
    Hidden,
    #[strum(serialize = "HR")]
    HardRock,
    #[strum(serialize = "SD")]
    SuddenDeath,
    #[strum(serialize = "DT")]
    DoubleTime,
    #[strum(serialize = "RX")]
    Relax,
    #[strum(serialize = "HT")]
    HalfTime,
    #[strum(serialize = "NC")]
    Nightcore,
    #[strum(serialize = "FL")]
    Flashlight,
    #[strum(serialize = "SO")]
    SpunOut,
    #[strum(serialize = "AP")]
    Autopilot,
    #[strum(serialize = "PF")]
    Perfect,
    #[strum(serialize = "CL")]
    Classic,
}

impl GameMod {
    pub fn acronym(&self) -> &'static str {
        self.into()
    }

    /// Bit value in the legacy mods bitflags.
    ///
    /// Nightcore and Perfect include the bits of the mods they imply.
    /// Classic has no legacy representation.
    pub fn legacy_bits(&self) -> u32 {
        match self {
            Self::NoFail => 1 << 0,
            Self::Easy => 1 << 1,
            Self::TouchDevice => 1 << 2,
            Self::Hidden => 1 << 3,
            Self::HardRock => 1 << 4,
            Self::SuddenDeath => 1 << 5,
            Self::DoubleTime => 1 << 6,
            Self::Relax => 1 << 7,
            Self::HalfTime => 1 << 8,
            Self::Nightcore => (1 << 9) | (1 << 6),
            Self::Flashlight => 1 << 10,
            Self::SpunOut => 1 << 12,
            Self::Autopilot => 1 << 13,
            Self::Perfect => (1 << 14) | (1 << 5),
            Self::Classic => 0,
        }
    }

    /// Parse a comma separated acronym list such as `"HD,FL"`.
    ///
    /// Empty segments are ignored.
    pub fn parse_list(s: &str) -> Result<Vec<Self>, Error> {
        s.split(',')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .map(Self::parse)
            .collect()
    }

    pub fn parse(s: &str) -> Result<Self, Error> {
        Self::from_str(s.trim()).map_err(|_| Error::UnknownMod(s.trim().to_string()))
    }
}

impl TryFrom<String> for GameMod {
    type Error = Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl std::fmt::Display for GameMod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.acronym())
    }
}
