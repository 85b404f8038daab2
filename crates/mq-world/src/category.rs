//! World zone kinds.

use serde::{Deserialize, Serialize};

use crate::error::WorldError;

/// The closed set of zone kinds a tile can belong to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TileCategory {
    /// Woods, fields, overgrown lots.
    Nature,
    /// Built-up blocks between streets.
    Urban,
    /// Roads and alleys.
    Street,
    /// The outside face of a building; the threshold between out and in.
    Facade,
    /// Entrance hall.
    Foyer,
    /// Interior passage.
    Corridor,
    /// Interior chamber.
    Room,
    /// Stairwell joining a floor to the one below.
    Stairs,
    /// Cellar level.
    Basement,
    /// Burial vaults beneath the cellars.
    Crypt,
}

impl TileCategory {
    /// Every category.
    pub const ALL: [TileCategory; 10] = [
        Self::Nature,
        Self::Urban,
        Self::Street,
        Self::Facade,
        Self::Foyer,
        Self::Corridor,
        Self::Room,
        Self::Stairs,
        Self::Basement,
        Self::Crypt,
    ];

    /// True for categories that lie inside a building.
    pub fn is_indoor(self) -> bool {
        !matches!(self, Self::Nature | Self::Urban | Self::Street)
    }

    /// Lowercase name used in rule files.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Nature => "nature",
            Self::Urban => "urban",
            Self::Street => "street",
            Self::Facade => "facade",
            Self::Foyer => "foyer",
            Self::Corridor => "corridor",
            Self::Room => "room",
            Self::Stairs => "stairs",
            Self::Basement => "basement",
            Self::Crypt => "crypt",
        }
    }
}

impl std::fmt::Display for TileCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for TileCategory {
    type Err = WorldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|c| c.as_str() == lower)
            .ok_or_else(|| WorldError::UnknownCategory(s.to_string()))
    }
}
