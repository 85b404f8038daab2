//! A placed hex tile.

use serde::{Deserialize, Serialize};

use crate::category::TileCategory;
use crate::edge::Edge;
use crate::hex::{Direction, HexCoord};
use crate::rules::TopologyRules;

/// One placed cell of the world graph.
///
/// Tiles are never removed once placed; exploration only flips flags and
/// changes edge states.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tile {
    /// Where the tile sits.
    pub coord: HexCoord,
    /// Zone kind.
    pub category: TileCategory,
    /// Vertical level, derived from the category when the tile is created.
    pub zone_level: i32,
    /// Edges indexed by [`Direction::index`].
    pub(crate) edges: [Edge; 6],
    /// Whether a player has entered the tile.
    pub explored: bool,
    /// Whether the tile has been searched.
    pub searched: bool,
}

impl Tile {
    /// A new unexplored tile with every edge open.
    pub fn new(coord: HexCoord, category: TileCategory, rules: &TopologyRules) -> Self {
        Self {
            coord,
            category,
            zone_level: rules.zone_level(category),
            edges: Default::default(),
            explored: false,
            searched: false,
        }
    }

    /// The edge on the given side.
    pub fn edge(&self, dir: Direction) -> &Edge {
        &self.edges[dir.index()]
    }

    /// All six edges paired with their side.
    pub fn edges(&self) -> impl Iterator<Item = (Direction, &Edge)> {
        Direction::ALL.into_iter().zip(self.edges.iter())
    }
}
