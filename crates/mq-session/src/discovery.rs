//! What turns up when a tile is searched.
//!
//! Entries are gated by doom: the lower doom falls, the more the dark gives
//! back, and the more of it is hostile.

use mq_core::WeightedEntry;
use mq_mechanics::DoomRange;
use serde::{Deserialize, Serialize};

/// A kind of search result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Discovery {
    /// Nothing of note.
    Nothing,
    /// A usable item.
    Item,
    /// A scrap of lore.
    Lore,
    /// Someone still alive.
    Survivor,
    /// Something was waiting. Spawns an enemy.
    Ambush,
}

impl std::fmt::Display for Discovery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Nothing => write!(f, "nothing"),
            Self::Item => write!(f, "item"),
            Self::Lore => write!(f, "lore"),
            Self::Survivor => write!(f, "survivor"),
            Self::Ambush => write!(f, "ambush"),
        }
    }
}

/// A discovery that can only be drawn while doom is inside `doom`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GatedDiscovery {
    /// What is found.
    pub discovery: Discovery,
    /// Doom window in which it can be found.
    #[serde(default)]
    pub doom: DoomRange,
}

/// The built-in search table.
pub fn standard_discoveries() -> Vec<WeightedEntry<GatedDiscovery>> {
    let entry = |discovery, doom, weight| WeightedEntry {
        item: GatedDiscovery { discovery, doom },
        weight,
    };

    vec![
        entry(Discovery::Nothing, DoomRange::any(), 6),
        entry(Discovery::Item, DoomRange::any(), 3),
        entry(Discovery::Lore, DoomRange::any(), 2),
        entry(Discovery::Survivor, DoomRange::at_least(5), 1),
        entry(Discovery::Ambush, DoomRange::at_most(9), 2),
        entry(Discovery::Ambush, DoomRange::at_most(4), 3),
    ]
}
