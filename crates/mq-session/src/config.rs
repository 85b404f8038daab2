//! Configuration for a game session.

use mq_core::WeightedEntry;
use mq_mechanics::{CriticalConfig, DoomConfig};
use mq_world::TileCategory;
use serde::{Deserialize, Serialize};

use crate::discovery::{GatedDiscovery, standard_discoveries};

/// Configuration for a session. Missing JSON fields take their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// RNG seed for reproducible generation and dice.
    pub seed: u64,
    /// Category of the starting tile.
    pub start_category: TileCategory,
    /// Starting (and maximum) health.
    pub max_hp: i32,
    /// Starting (and maximum) sanity.
    pub max_sanity: i32,
    /// Doom counter settings.
    pub doom: DoomConfig,
    /// Critical hit settings.
    pub critical: CriticalConfig,
    /// Search results, gated by doom.
    pub discoveries: Vec<WeightedEntry<GatedDiscovery>>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            start_category: TileCategory::Street,
            max_hp: 5,
            max_sanity: 5,
            doom: DoomConfig::default(),
            critical: CriticalConfig::default(),
            discoveries: standard_discoveries(),
        }
    }
}

impl SessionConfig {
    /// Set the RNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set the starting category.
    pub fn with_start(mut self, category: TileCategory) -> Self {
        self.start_category = category;
        self
    }

    /// Set maximum health and sanity.
    pub fn with_vitals(mut self, max_hp: i32, max_sanity: i32) -> Self {
        self.max_hp = max_hp;
        self.max_sanity = max_sanity;
        self
    }

    /// Replace the doom settings.
    pub fn with_doom(mut self, doom: DoomConfig) -> Self {
        self.doom = doom;
        self
    }

    /// Replace the critical settings.
    pub fn with_critical(mut self, critical: CriticalConfig) -> Self {
        self.critical = critical;
        self
    }

    /// Replace the search table.
    pub fn with_discoveries(mut self, discoveries: Vec<WeightedEntry<GatedDiscovery>>) -> Self {
        self.discoveries = discoveries;
        self
    }
}
