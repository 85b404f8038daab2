//! Hex-tile world graph for Mythos Quest.
//!
//! The map starts as a single tile and grows at its frontier. Which zone
//! kinds may touch, where doors are mandatory and how levels stack is held by
//! a read-only [`TopologyRules`] registry; the [`TileExpander`] consults it for
//! every placement so that the two sides of a shared edge always agree.

/// Zone kinds.
pub mod category;
/// Edge kinds and door states.
pub mod edge;
/// Error types for world operations.
pub mod error;
/// Frontier expansion.
pub mod expander;
/// Axial hex coordinates.
pub mod hex;
/// Startup checks over rule sets.
pub mod lint;
/// The placed-tile graph.
pub mod map;
/// Adjacency, door and level tables.
pub mod rules;
/// Placed tiles.
pub mod tile;

/// Re-export category types.
pub use category::TileCategory;
/// Re-export edge types.
pub use edge::{BlockingKind, DoorState, Edge, EdgeType, SkillGate};
/// Re-export error types.
pub use error::{WorldError, WorldResult};
/// Re-export expander types.
pub use expander::{Candidates, Expansion, Preference, TileExpander};
/// Re-export coordinate types.
pub use hex::{Direction, HexCoord};
/// Re-export lint types.
pub use lint::{LintIssue, has_errors, lint_rules, log_issues};
/// Re-export map types.
pub use map::WorldMap;
/// Re-export rule types.
pub use rules::{TopologyRules, ValidationResult, validate_tile_connection};
/// Re-export tile types.
pub use tile::Tile;
