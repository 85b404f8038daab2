//! The append-only world graph.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::category::TileCategory;
use crate::edge::{DoorState, Edge, EdgeType};
use crate::error::{WorldError, WorldResult};
use crate::hex::{Direction, HexCoord};
use crate::rules::TopologyRules;
use crate::tile::Tile;

/// All placed tiles, indexed by coordinate.
///
/// Tiles are only ever added. Every edge write goes to both tiles sharing
/// the edge, so the two sides always agree. Serializes as the plain list of
/// tiles in placement order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(try_from = "Vec<Tile>", into = "Vec<Tile>")]
pub struct WorldMap {
    tiles: Vec<Tile>,
    index: HashMap<HexCoord, usize>,
}

impl WorldMap {
    /// An empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// A map holding a single explored starting tile.
    pub fn with_start(coord: HexCoord, category: TileCategory, rules: &TopologyRules) -> Self {
        let mut map = Self::new();
        let mut tile = Tile::new(coord, category, rules);
        tile.explored = true;
        map.index.insert(coord, 0);
        map.tiles.push(tile);
        map
    }

    /// Number of placed tiles.
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    /// True when nothing has been placed.
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Tiles in placement order.
    pub fn tiles(&self) -> impl Iterator<Item = &Tile> {
        self.tiles.iter()
    }

    /// The tile at `coord`, if placed.
    pub fn get(&self, coord: HexCoord) -> Option<&Tile> {
        self.index.get(&coord).map(|&i| &self.tiles[i])
    }

    /// Whether a tile occupies `coord`.
    pub fn contains(&self, coord: HexCoord) -> bool {
        self.index.contains_key(&coord)
    }

    /// The tile at `coord`, or a `TileNotFound` error.
    pub fn require(&self, coord: HexCoord) -> WorldResult<&Tile> {
        self.get(coord).ok_or(WorldError::TileNotFound(coord))
    }

    fn require_mut(&mut self, coord: HexCoord) -> WorldResult<&mut Tile> {
        let i = *self
            .index
            .get(&coord)
            .ok_or(WorldError::TileNotFound(coord))?;
        Ok(&mut self.tiles[i])
    }

    /// Place a tile. Fails if the cell is taken.
    pub(crate) fn insert(&mut self, tile: Tile) -> WorldResult<()> {
        if self.contains(tile.coord) {
            return Err(WorldError::CellOccupied(tile.coord));
        }
        self.index.insert(tile.coord, self.tiles.len());
        self.tiles.push(tile);
        Ok(())
    }

    /// Mark a tile as entered. Returns true the first time.
    pub fn mark_explored(&mut self, coord: HexCoord) -> WorldResult<bool> {
        let tile = self.require_mut(coord)?;
        let first = !tile.explored;
        tile.explored = true;
        Ok(first)
    }

    /// Mark a tile as searched. Returns true the first time.
    pub fn mark_searched(&mut self, coord: HexCoord) -> WorldResult<bool> {
        let tile = self.require_mut(coord)?;
        let first = !tile.searched;
        tile.searched = true;
        Ok(first)
    }

    /// Write an edge on both tiles that share it. The neighbor may be
    /// unplaced, in which case only `coord` changes.
    pub fn set_edge(&mut self, coord: HexCoord, dir: Direction, edge: Edge) -> WorldResult<()> {
        let neighbor = coord.neighbor(dir);
        if let Some(&i) = self.index.get(&neighbor) {
            self.tiles[i].edges[dir.opposite().index()] = edge.clone();
        }
        self.require_mut(coord)?.edges[dir.index()] = edge;
        Ok(())
    }

    /// Apply a door transition (see [`DoorState`]) to a door edge, on both
    /// sides. Returns the new state.
    pub fn update_door(
        &mut self,
        coord: HexCoord,
        dir: Direction,
        transition: impl FnOnce(DoorState) -> WorldResult<DoorState>,
    ) -> WorldResult<DoorState> {
        let state = match self.require(coord)?.edge(dir) {
            Edge::Door { state } => *state,
            _ => return Err(WorldError::NotADoor { coord, dir }),
        };
        let next = transition(state)?;
        self.set_edge(coord, dir, Edge::Door { state: next })?;
        Ok(next)
    }

    /// Sides of placed tiles that lead into empty cells and can still be
    /// explored through.
    pub fn frontier(&self) -> Vec<(HexCoord, Direction)> {
        self.tiles
            .iter()
            .flat_map(|tile| {
                tile.edges()
                    .filter(|(dir, edge)| {
                        edge.allows_expansion() && !self.contains(tile.coord.neighbor(*dir))
                    })
                    .map(|(dir, _)| (tile.coord, dir))
                    .collect::<Vec<_>>()
            })
            .collect()
    }

    /// Check every topology invariant. Returns one message per violation.
    pub fn check_invariants(&self, rules: &TopologyRules) -> Vec<String> {
        let mut violations = Vec::new();

        for tile in &self.tiles {
            let expected = rules.zone_level(tile.category);
            if tile.zone_level != expected {
                violations.push(format!(
                    "{} at {} has level {} (expected {expected})",
                    tile.category, tile.coord, tile.zone_level
                ));
            }

            for (dir, neighbor_coord) in tile.coord.neighbors() {
                // visit each shared edge once
                if neighbor_coord < tile.coord {
                    continue;
                }
                let Some(neighbor) = self.get(neighbor_coord) else {
                    continue;
                };
                let ours = tile.edge(dir);
                let theirs = neighbor.edge(dir.opposite());
                if ours != theirs {
                    violations.push(format!(
                        "edge between {} and {} disagrees ({:?} vs {:?})",
                        tile.coord, neighbor_coord, ours, theirs
                    ));
                    continue;
                }

                let (a, b) = (tile.category, neighbor.category);
                if !rules.can_connect(a, b) && ours.edge_type() != EdgeType::Wall {
                    violations.push(format!(
                        "{a} at {} and {b} at {} cannot connect but share a {} edge",
                        tile.coord,
                        neighbor_coord,
                        ours.edge_type()
                    ));
                } else if rules.requires_door(a, b) && ours.edge_type() == EdgeType::Open {
                    violations.push(format!(
                        "{a} at {} and {b} at {} require a door but are open",
                        tile.coord, neighbor_coord
                    ));
                }
            }
        }

        violations
    }

    /// Fail on the first invariant violation.
    pub fn validate(&self, rules: &TopologyRules) -> WorldResult<()> {
        match self.check_invariants(rules).into_iter().next() {
            Some(violation) => Err(WorldError::Invariant(violation)),
            None => Ok(()),
        }
    }

    /// Serialize the map as JSON.
    pub fn to_json(&self) -> WorldResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Load a map and re-validate it against `rules`.
    pub fn from_json(json: &str, rules: &TopologyRules) -> WorldResult<Self> {
        let map: Self = serde_json::from_str(json)?;
        map.validate(rules)?;
        Ok(map)
    }
}

impl TryFrom<Vec<Tile>> for WorldMap {
    type Error = WorldError;

    fn try_from(tiles: Vec<Tile>) -> Result<Self, Self::Error> {
        let mut map = Self::new();
        for tile in tiles {
            map.insert(tile)?;
        }
        Ok(map)
    }
}

impl From<WorldMap> for Vec<Tile> {
    fn from(map: WorldMap) -> Self {
        map.tiles
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::category::TileCategory::*;

    fn two_rooms() -> (WorldMap, TopologyRules) {
        let rules = TopologyRules::standard();
        let mut map = WorldMap::with_start(HexCoord::ORIGIN, Corridor, &rules);
        map.insert(Tile::new(HexCoord::ORIGIN.neighbor(Direction::N), Corridor, &rules))
            .unwrap();
        (map, rules)
    }

    #[test]
    fn start_tile_is_explored() {
        let rules = TopologyRules::standard();
        let map = WorldMap::with_start(HexCoord::ORIGIN, Street, &rules);
        assert_eq!(map.len(), 1);
        assert!(map.get(HexCoord::ORIGIN).unwrap().explored);
    }

    #[test]
    fn insert_rejects_occupied_cell() {
        let (mut map, rules) = two_rooms();
        let err = map
            .insert(Tile::new(HexCoord::ORIGIN, Room, &rules))
            .unwrap_err();
        assert!(matches!(err, WorldError::CellOccupied(_)));
        assert_eq!(map.len(), 2);
    }

    #[test]
    fn set_edge_writes_both_sides() {
        let (mut map, _) = two_rooms();
        map.set_edge(HexCoord::ORIGIN, Direction::N, Edge::Wall).unwrap();
        let north = HexCoord::ORIGIN.neighbor(Direction::N);
        assert_eq!(*map.get(north).unwrap().edge(Direction::S), Edge::Wall);
    }

    #[test]
    fn door_updates_mirror() {
        let (mut map, _) = two_rooms();
        map.set_edge(HexCoord::ORIGIN, Direction::N, Edge::closed_door())
            .unwrap();
        let state = map
            .update_door(HexCoord::ORIGIN, Direction::N, DoorState::open)
            .unwrap();
        assert_eq!(state, DoorState::Open);
        let north = HexCoord::ORIGIN.neighbor(Direction::N);
        assert!(map.get(north).unwrap().edge(Direction::S).is_passable());
    }

    #[test]
    fn update_door_rejects_non_door() {
        let (mut map, _) = two_rooms();
        let err = map
            .update_door(HexCoord::ORIGIN, Direction::N, DoorState::open)
            .unwrap_err();
        assert!(matches!(err, WorldError::NotADoor { .. }));
    }

    #[test]
    fn flags() {
        let (mut map, _) = two_rooms();
        let north = HexCoord::ORIGIN.neighbor(Direction::N);
        assert!(map.mark_explored(north).unwrap());
        assert!(!map.mark_explored(north).unwrap());
        assert!(map.mark_searched(north).unwrap());
        assert!(!map.mark_searched(north).unwrap());
        assert!(map.mark_explored(HexCoord::new(9, 9)).is_err());
    }

    #[test]
    fn frontier_skips_walls_and_placed_cells() {
        let (mut map, _) = two_rooms();
        // 6 + 6 sides, minus the shared edge counted from both tiles
        assert_eq!(map.frontier().len(), 10);
        map.set_edge(HexCoord::ORIGIN, Direction::S, Edge::Wall).unwrap();
        assert_eq!(map.frontier().len(), 9);
        assert!(!map.frontier().contains(&(HexCoord::ORIGIN, Direction::N)));
    }

    #[test]
    fn invariants_catch_disagreeing_edges() {
        let (mut map, rules) = two_rooms();
        assert!(map.validate(&rules).is_ok());
        map.require_mut(HexCoord::ORIGIN).unwrap().edges[Direction::N.index()] = Edge::Wall;
        assert!(map.validate(&rules).is_err());
    }

    #[test]
    fn invariants_catch_topology_violations() {
        let rules = TopologyRules::standard();
        let mut map = WorldMap::with_start(HexCoord::ORIGIN, Room, &rules);
        map.insert(Tile::new(HexCoord::ORIGIN.neighbor(Direction::N), Street, &rules))
            .unwrap();
        let issues = map.check_invariants(&rules);
        assert_eq!(issues.len(), 1);
        assert!(issues[0].contains("cannot connect"));

        let mut map = WorldMap::with_start(HexCoord::ORIGIN, Room, &rules);
        map.insert(Tile::new(HexCoord::ORIGIN.neighbor(Direction::N), Corridor, &rules))
            .unwrap();
        let issues = map.check_invariants(&rules);
        assert!(issues[0].contains("require a door"));
    }

    #[test]
    fn json_round_trip_revalidates() {
        let (mut map, rules) = two_rooms();
        map.set_edge(HexCoord::ORIGIN, Direction::NE, Edge::closed_door())
            .unwrap();
        let json = map.to_json().unwrap();
        let back = WorldMap::from_json(&json, &rules).unwrap();
        assert_eq!(back.len(), 2);
        assert_eq!(
            *back.get(HexCoord::ORIGIN).unwrap().edge(Direction::NE),
            Edge::closed_door()
        );
    }

    #[test]
    fn json_with_duplicate_cells_is_rejected() {
        let rules = TopologyRules::standard();
        let tile = Tile::new(HexCoord::ORIGIN, Room, &rules);
        let json = serde_json::to_string(&vec![tile.clone(), tile]).unwrap();
        assert!(WorldMap::from_json(&json, &rules).is_err());
    }
}
