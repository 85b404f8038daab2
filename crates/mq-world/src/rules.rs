//! World topology rules: which zone kinds may touch, where doors are
//! mandatory, and which vertical level each zone kind sits on.
//!
//! A [`TopologyRules`] registry is built once (from [`TopologyRules::standard`]
//! or a JSON rules file) and shared read-only by every component that needs
//! it. All lookups are pure.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::category::TileCategory;
use crate::edge::EdgeType;
use crate::error::{WorldError, WorldResult};

/// Outcome of checking whether two zone kinds may share an edge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
    /// Whether the pair may be connected at all.
    pub is_valid: bool,
    /// Whether the pair must be separated by a door.
    pub requires_door: bool,
    /// The edge the caller should place between the two tiles.
    pub suggested_edge: EdgeType,
    /// Why the pair was rejected, when it was.
    pub reason: Option<String>,
}

/// Immutable adjacency, door and level tables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopologyRules {
    adjacency: BTreeMap<TileCategory, Vec<TileCategory>>,
    #[serde(default)]
    doors: Vec<(TileCategory, TileCategory)>,
    levels: BTreeMap<TileCategory, i32>,
    #[serde(default)]
    weights: BTreeMap<TileCategory, u32>,
}

impl Default for TopologyRules {
    fn default() -> Self {
        Self::standard()
    }
}

impl TopologyRules {
    /// An empty rule set, to be filled with the `with_*` builders.
    pub fn empty() -> Self {
        Self {
            adjacency: BTreeMap::new(),
            doors: Vec::new(),
            levels: BTreeMap::new(),
            weights: BTreeMap::new(),
        }
    }

    /// The built-in town-to-crypt rule set.
    pub fn standard() -> Self {
        use crate::category::TileCategory::*;

        Self::empty()
            .with_adjacency(Nature, &[Nature, Urban, Street])
            .with_adjacency(Urban, &[Urban, Street, Nature, Facade])
            .with_adjacency(Street, &[Street, Urban, Nature, Facade])
            .with_adjacency(Facade, &[Facade, Street, Urban, Foyer])
            .with_adjacency(Foyer, &[Foyer, Facade, Corridor, Room, Stairs])
            .with_adjacency(Corridor, &[Corridor, Foyer, Room, Stairs])
            .with_adjacency(Room, &[Room, Corridor, Foyer, Stairs])
            .with_adjacency(Stairs, &[Stairs, Foyer, Corridor, Room, Basement])
            .with_adjacency(Basement, &[Basement, Stairs, Crypt])
            .with_adjacency(Crypt, &[Crypt, Basement])
            .with_door(Facade, Foyer)
            .with_door(Corridor, Room)
            .with_door(Foyer, Room)
            .with_door(Basement, Crypt)
            .with_level(Nature, 0)
            .with_level(Urban, 0)
            .with_level(Street, 0)
            .with_level(Facade, 0)
            .with_level(Foyer, 0)
            .with_level(Corridor, 0)
            .with_level(Room, 0)
            .with_level(Stairs, 0)
            .with_level(Basement, -1)
            .with_level(Crypt, -1)
            .with_weight(Nature, 3)
            .with_weight(Urban, 3)
            .with_weight(Street, 4)
            .with_weight(Facade, 2)
            .with_weight(Foyer, 2)
            .with_weight(Corridor, 4)
            .with_weight(Room, 5)
            .with_weight(Stairs, 1)
            .with_weight(Basement, 3)
            .with_weight(Crypt, 1)
    }

    /// Set the neighbor list stored for `category`.
    pub fn with_adjacency(mut self, category: TileCategory, neighbors: &[TileCategory]) -> Self {
        self.adjacency.insert(category, neighbors.to_vec());
        self
    }

    /// Require a door between `a` and `b` (in either order).
    pub fn with_door(mut self, a: TileCategory, b: TileCategory) -> Self {
        if !self.requires_door(a, b) {
            self.doors.push((a, b));
        }
        self
    }

    /// Set the vertical level of `category`.
    pub fn with_level(mut self, category: TileCategory, level: i32) -> Self {
        self.levels.insert(category, level);
        self
    }

    /// Set the generation weight of `category`.
    pub fn with_weight(mut self, category: TileCategory, weight: u32) -> Self {
        self.weights.insert(category, weight);
        self
    }

    /// Parse a rules file.
    ///
    /// Every category named anywhere in the tables must have a level.
    pub fn from_json(json: &str) -> WorldResult<Self> {
        let rules: Self = serde_json::from_str(json)?;
        if let Some(missing) = rules
            .categories()
            .into_iter()
            .find(|c| !rules.levels.contains_key(c))
        {
            return Err(WorldError::InvalidRules(format!(
                "category '{missing}' has no level"
            )));
        }
        Ok(rules)
    }

    /// Serialize the rules as pretty-printed JSON.
    pub fn to_json(&self) -> WorldResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Every category mentioned by any table.
    pub fn categories(&self) -> BTreeSet<TileCategory> {
        let mut all: BTreeSet<TileCategory> = self.adjacency.keys().copied().collect();
        all.extend(self.adjacency.values().flatten().copied());
        all.extend(self.doors.iter().flat_map(|&(a, b)| [a, b]));
        all.extend(self.levels.keys().copied());
        all
    }

    /// Neighbors stored for `category` (one storage direction only).
    pub fn neighbors(&self, category: TileCategory) -> &[TileCategory] {
        self.adjacency
            .get(&category)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Whether `b` is stored as a neighbor of `a`, ignoring the reverse entry.
    pub fn stored_adjacent(&self, a: TileCategory, b: TileCategory) -> bool {
        self.neighbors(a).contains(&b)
    }

    /// Whether the two categories may share an edge. Checks both storage
    /// directions, so the answer is symmetric.
    pub fn can_connect(&self, a: TileCategory, b: TileCategory) -> bool {
        self.stored_adjacent(a, b) || self.stored_adjacent(b, a)
    }

    /// Whether the pair must be separated by a door.
    pub fn requires_door(&self, a: TileCategory, b: TileCategory) -> bool {
        self.doors
            .iter()
            .any(|&(x, y)| (x == a && y == b) || (x == b && y == a))
    }

    /// The unordered door pairs.
    pub fn door_pairs(&self) -> &[(TileCategory, TileCategory)] {
        &self.doors
    }

    /// Decide what edge belongs between `from` and `to`.
    pub fn validate_connection(
        &self,
        from: TileCategory,
        to: TileCategory,
        has_existing_door: bool,
    ) -> ValidationResult {
        if !self.can_connect(from, to) {
            return ValidationResult {
                is_valid: false,
                requires_door: false,
                suggested_edge: EdgeType::Wall,
                reason: Some(format!("{from} cannot connect to {to}")),
            };
        }

        let requires_door = self.requires_door(from, to);
        let suggested_edge = if requires_door || has_existing_door {
            EdgeType::Door
        } else {
            EdgeType::Open
        };

        ValidationResult {
            is_valid: true,
            requires_door,
            suggested_edge,
            reason: None,
        }
    }

    /// Vertical level of `category`; 0 when the table has no entry.
    pub fn zone_level(&self, category: TileCategory) -> i32 {
        self.levels.get(&category).copied().unwrap_or(0)
    }

    /// Lowest and highest level a tile of this category touches. Stairs reach
    /// one level below their own.
    pub fn level_span(&self, category: TileCategory) -> (i32, i32) {
        let level = self.zone_level(category);
        if category == TileCategory::Stairs {
            (level - 1, level)
        } else {
            (level, level)
        }
    }

    /// Whether tiles of the two categories share at least one level.
    pub fn levels_meet(&self, a: TileCategory, b: TileCategory) -> bool {
        let (a_lo, a_hi) = self.level_span(a);
        let (b_lo, b_hi) = self.level_span(b);
        a_lo <= b_hi && b_lo <= a_hi
    }

    /// Generation weight of `category`; 1 when the table has no entry.
    pub fn weight(&self, category: TileCategory) -> u32 {
        self.weights.get(&category).copied().unwrap_or(1)
    }
}

/// Free-function form of [`TopologyRules::validate_connection`], used by map
/// renderers to pick wall and door sprites.
pub fn validate_tile_connection(
    rules: &TopologyRules,
    from: TileCategory,
    to: TileCategory,
    has_door: bool,
) -> ValidationResult {
    rules.validate_connection(from, to, has_door)
}
