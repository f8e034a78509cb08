//! Mods and mod combination enumeration.
//!
//! - `GameMod` - a single modifier and its acronym
//! - `ModCombination` - a set of active modifiers
//! - `enumerate` / `filter` - power set construction and exclusion rules

mod combination;
mod game_mod;

pub use combination::ModCombination;
pub use game_mod::GameMod;

use serde::{Deserialize, Serialize};
use tracing::debug;

/// Two mods that may not be active together.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ExclusionPair(pub GameMod, pub GameMod);

impl ExclusionPair {
    pub fn new(a: GameMod, b: GameMod) -> Self {
        Self(a, b)
    }

    /// Whether `combo` contains both members of the pair.
    pub fn violated_by(&self, combo: &ModCombination) -> bool {
        combo.contains(self.0) && combo.contains(self.1)
    }
}

impl std::fmt::Display for ExclusionPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}+{}", self.0, self.1)
    }
}

/// Build every subset of `catalog`, the empty one included.
///
/// For each mod in catalog order the singleton is added first, then the mod
/// is appended to every combination that existed before this mod's pass.
/// The empty combination comes last. For `[A, B, C]` the order is
/// `A, B, AB, C, AC, BC, ABC, NM`.
pub fn enumerate(catalog: &[GameMod]) -> Vec<ModCombination> {
    let mut result: Vec<ModCombination> = Vec::new();

    for (i, &m) in catalog.iter().enumerate() {
        if catalog[..i].contains(&m) {
            continue;
        }

        let snapshot = result.len();
        result.push(ModCombination::new().with(m));

        for j in 0..snapshot {
            if result[j].contains(m) {
                continue;
            }
            let extended = result[j].with(m);
            result.push(extended);
        }
    }

    result.push(ModCombination::new());

    result
}

/// Drop every combination that violates one of `rules`.
///
/// Keeps the relative order of the remaining combinations.
pub fn filter(combos: Vec<ModCombination>, rules: &[ExclusionPair]) -> Vec<ModCombination> {
    combos
        .into_iter()
        .filter(|combo| !rules.iter().any(|rule| rule.violated_by(combo)))
        .collect()
}

/// Remove denylisted mods from a catalog, preserving order.
pub fn remove_denied(catalog: &[GameMod], denylist: &[GameMod]) -> Vec<GameMod> {
    catalog
        .iter()
        .copied()
        .filter(|m| !denylist.contains(m))
        .collect()
}

/// Mods of `mods` that `catalog` never permutes.
pub fn outside_catalog(mods: &[GameMod], catalog: &[GameMod]) -> Vec<GameMod> {
    mods.iter()
        .copied()
        .filter(|m| !catalog.contains(m))
        .collect()
}

/// Denylist, enumerate and filter in one go.
pub fn build_combinations(
    catalog: &[GameMod],
    denylist: &[GameMod],
    rules: &[ExclusionPair],
) -> Vec<ModCombination> {
    let working = remove_denied(catalog, denylist);
    let all = enumerate(&working);
    let total = all.len();
    let combos = filter(all, rules);

    debug!(
        "Enumerated {} combinations from {} mods, {} left after exclusions",
        total,
        working.len(),
        combos.len()
    );

    combos
}
