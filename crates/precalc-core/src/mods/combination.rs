use std::fmt;

use serde::{Deserialize, Serialize};

use super::GameMod;

/// A set of simultaneously active mods.
///
/// Mods keep the order they were added in for display, but equality is
/// set equality. A mod is never held twice, deserialization included.
#[derive(Debug, Clone, Default, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<GameMod>", into = "Vec<GameMod>")]
pub struct ModCombination {
    mods: Vec<GameMod>,
}

impl ModCombination {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a combination from a list of mods, dropping repeats.
    pub fn from_mods<I: IntoIterator<Item = GameMod>>(mods: I) -> Self {
        mods.into_iter().fold(Self::new(), |combo, m| combo.with(m))
    }

    /// Copy of this combination with `m` added. No-op if already present.
    pub fn with(&self, m: GameMod) -> Self {
        let mut mods = self.mods.clone();
        if !mods.contains(&m) {
            mods.push(m);
        }
        Self { mods }
    }

    pub fn contains(&self, m: GameMod) -> bool {
        self.mods.contains(&m)
    }

    pub fn len(&self) -> usize {
        self.mods.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mods.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = GameMod> + '_ {
        self.mods.iter().copied()
    }

    pub fn legacy_bits(&self) -> u32 {
        self.iter().fold(0, |bits, m| bits | m.legacy_bits())
    }

    /// Acronyms joined the way progress notices print them, e.g. `HR,DT,`.
    pub fn acronym_list(&self) -> String {
        self.mods.iter().fold(String::new(), |mut s, m| {
            s.push_str(m.acronym());
            s.push(',');
            s
        })
    }
}

impl PartialEq for ModCombination {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self.iter().all(|m| other.contains(m))
            && other.iter().all(|m| self.contains(m))
    }
}

impl fmt::Display for ModCombination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.mods.is_empty() {
            return f.write_str("NM");
        }

        for m in &self.mods {
            f.write_str(m.acronym())?;
        }

        Ok(())
    }
}

impl From<Vec<GameMod>> for ModCombination {
    fn from(mods: Vec<GameMod>) -> Self {
        Self::from_mods(mods)
    }
}

impl From<ModCombination> for Vec<GameMod> {
    fn from(combo: ModCombination) -> Self {
        combo.mods
    }
}

impl FromIterator<GameMod> for ModCombination {
    fn from_iter<I: IntoIterator<Item = GameMod>>(iter: I) -> Self {
        Self::from_mods(iter)
    }
}
