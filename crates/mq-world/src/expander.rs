//! Procedural frontier growth, one tile at a time.
//!
//! The expander picks a category for an empty cell next to a frontier tile,
//! checks it against the topology rules and places it with edges that match
//! every tile it touches.

use mq_core::{RandomSource, WeightedTable};
use serde::{Deserialize, Serialize};

use crate::category::TileCategory;
use crate::edge::Edge;
use crate::error::{WorldError, WorldResult};
use crate::hex::{Direction, HexCoord};
use crate::map::WorldMap;
use crate::rules::TopologyRules;
use crate::tile::Tile;

/// Which side of the walls the player wants to head toward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Preference {
    /// Prefer indoor categories.
    Indoor,
    /// Prefer outdoor categories.
    Outdoor,
    /// No preference.
    #[default]
    Any,
}

impl Preference {
    /// Whether `category` satisfies the preference.
    pub fn accepts(self, category: TileCategory) -> bool {
        match self {
            Self::Indoor => category.is_indoor(),
            Self::Outdoor => !category.is_indoor(),
            Self::Any => true,
        }
    }
}

impl std::str::FromStr for Preference {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "indoor" => Ok(Self::Indoor),
            "outdoor" => Ok(Self::Outdoor),
            "any" => Ok(Self::Any),
            other => Err(format!("unknown preference: {other}")),
        }
    }
}

/// A successfully placed tile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Expansion {
    /// Cell that was filled.
    pub coord: HexCoord,
    /// Category chosen for it.
    pub category: TileCategory,
    /// Edge placed between the frontier tile and the new tile.
    pub shared_edge: Edge,
    /// True when no candidate matched the preference and the unfiltered set
    /// was used instead.
    pub preference_relaxed: bool,
}

/// Candidate categories for a cell next to a frontier tile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidates {
    /// Categories eligible for the draw.
    pub categories: Vec<TileCategory>,
    /// The preference filter emptied the set and was dropped.
    pub preference_relaxed: bool,
    /// The frontier category has no neighbors at all and stands in for itself.
    pub used_fallback: bool,
}

/// Grows a [`WorldMap`] under a set of [`TopologyRules`].
#[derive(Debug, Clone, Copy)]
pub struct TileExpander<'r> {
    rules: &'r TopologyRules,
}

impl<'r> TileExpander<'r> {
    /// Create an expander bound to a rule set.
    pub fn new(rules: &'r TopologyRules) -> Self {
        Self { rules }
    }

    /// Gather candidates for a tile next to `from`.
    ///
    /// Zero-weight categories are dropped before the preference is applied,
    /// so relaxation always sees the set that can actually be drawn.
    pub fn candidates(&self, from: TileCategory, preference: Preference) -> Candidates {
        let mut all: Vec<TileCategory> = self.rules.neighbors(from).to_vec();
        for category in self.rules.categories() {
            if self.rules.stored_adjacent(category, from) && !all.contains(&category) {
                all.push(category);
            }
        }

        let used_fallback = all.is_empty();
        if used_fallback {
            tracing::warn!(category = %from, "category has no neighbors; falling back to itself");
            all.push(from);
        }
        all.retain(|&c| self.rules.weight(c) > 0);

        let preferred: Vec<TileCategory> = all
            .iter()
            .copied()
            .filter(|&c| preference.accepts(c))
            .collect();

        if preferred.is_empty() {
            Candidates {
                categories: all,
                preference_relaxed: preference != Preference::Any,
                used_fallback,
            }
        } else {
            Candidates {
                categories: preferred,
                preference_relaxed: false,
                used_fallback,
            }
        }
    }

    /// Fill the empty cell across side `dir` of the frontier tile at `from`.
    ///
    /// Candidates rejected by validation are discarded and the draw repeated
    /// without them; if none survive, nothing is placed and
    /// [`WorldError::NoValidCategory`] is returned.
    pub fn expand(
        &self,
        map: &mut WorldMap,
        from: HexCoord,
        dir: Direction,
        preference: Preference,
        rng: &mut impl RandomSource,
    ) -> WorldResult<Expansion> {
        let frontier = map.require(from)?;
        let from_category = frontier.category;
        let frontier_edge = frontier.edge(dir).clone();
        let target = from.neighbor(dir);

        if map.contains(target) {
            return Err(WorldError::CellOccupied(target));
        }
        if !frontier_edge.allows_expansion() {
            return Err(WorldError::EdgeClosed { coord: from, dir });
        }

        let candidates = self.candidates(from_category, preference);
        let mut pool = candidates.categories;

        let (category, validation) = loop {
            if pool.is_empty() {
                return Err(WorldError::NoValidCategory {
                    from: from_category,
                });
            }
            let table = WeightedTable::new(pool.iter().map(|&c| (c, self.rules.weight(c))))?;
            let choice = *table.pick(rng)?;
            let validation =
                self.rules
                    .validate_connection(from_category, choice, frontier_edge.is_door());
            if validation.is_valid {
                break (choice, validation);
            }
            tracing::debug!(
                from = %from_category,
                rejected = %choice,
                reason = validation.reason.as_deref().unwrap_or(""),
                "discarding candidate"
            );
            pool.retain(|&c| c != choice);
        };

        let shared_edge = if frontier_edge.is_door() {
            frontier_edge
        } else {
            Edge::from_suggestion(validation.suggested_edge)
        };

        map.insert(Tile::new(target, category, self.rules))?;
        map.set_edge(target, dir.opposite(), shared_edge.clone())?;
        self.reconcile_neighbors(map, target, category, dir.opposite())?;

        tracing::debug!(
            coord = %target,
            category = %category,
            edge = %shared_edge.edge_type(),
            "placed tile"
        );

        Ok(Expansion {
            coord: target,
            category,
            shared_edge,
            preference_relaxed: candidates.preference_relaxed,
        })
    }

    /// Bring every other edge of a freshly placed tile in line with the
    /// tiles already around it.
    fn reconcile_neighbors(
        &self,
        map: &mut WorldMap,
        coord: HexCoord,
        category: TileCategory,
        skip: Direction,
    ) -> WorldResult<()> {
        for (dir, neighbor_coord) in coord.neighbors() {
            if dir == skip {
                continue;
            }
            let Some(neighbor) = map.get(neighbor_coord) else {
                continue;
            };
            let existing = neighbor.edge(dir.opposite()).clone();
            let validation =
                self.rules
                    .validate_connection(neighbor.category, category, existing.is_door());
            let edge = if !validation.is_valid {
                Edge::Wall
            } else if validation.requires_door && !existing.is_door() && !is_blocked(&existing) {
                Edge::closed_door()
            } else {
                existing
            };
            map.set_edge(coord, dir, edge)?;
        }
        Ok(())
    }

    /// Choose a random explorable frontier side, if any remain.
    pub fn random_frontier(
        map: &WorldMap,
        rng: &mut impl RandomSource,
    ) -> Option<(HexCoord, Direction)> {
        let frontier = map.frontier();
        if frontier.is_empty() {
            return None;
        }
        let i = rng.below(frontier.len() as u64) as usize;
        Some(frontier[i])
    }
}

fn is_blocked(edge: &Edge) -> bool {
    matches!(edge, Edge::Wall | Edge::Blocked { .. })
}
