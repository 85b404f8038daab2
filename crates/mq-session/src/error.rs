//! Error types for game sessions.

use thiserror::Error;

use mq_world::{Direction, HexCoord};

/// Result type for session operations.
pub type SessionResult<T> = Result<T, SessionError>;

/// Errors that can occur while playing a session.
#[derive(Debug, Error)]
pub enum SessionError {
    /// The rule set failed startup linting.
    #[error("rules failed lint: {0}")]
    InvalidRules(String),

    /// The tile has already been searched.
    #[error("tile {0} has already been searched")]
    AlreadySearched(HexCoord),

    /// The tile has not been entered yet.
    #[error("tile {0} has not been explored")]
    NotExplored(HexCoord),

    /// The edge cannot be walked through.
    #[error("cannot pass edge {dir} of {coord}")]
    Impassable {
        /// Tile holding the edge.
        coord: HexCoord,
        /// Side of the tile.
        dir: Direction,
    },

    /// The edge is not a blockage.
    #[error("edge {dir} of {coord} is not blocked")]
    NotBlocked {
        /// Tile holding the edge.
        coord: HexCoord,
        /// Side of the tile.
        dir: Direction,
    },

    /// The blockage can only be removed with an item.
    #[error("blockage needs {0} to clear")]
    RequiresItem(String),

    /// A saved position does not point at a placed tile.
    #[error("snapshot position {0} is not on the map")]
    BadPosition(HexCoord),

    /// World error.
    #[error("{0}")]
    World(#[from] mq_world::WorldError),

    /// Mechanics error.
    #[error("{0}")]
    Mechanics(#[from] mq_mechanics::MechError),

    /// Table error.
    #[error("{0}")]
    Table(#[from] mq_core::CoreError),

    /// Snapshot (de)serialization failed.
    #[error("snapshot: {0}")]
    Json(#[from] serde_json::Error),
}
