use crate::category::TileCategory;
use crate::edge::DoorState;
use crate::hex::{Direction, HexCoord};

/// Alias for `Result<T, WorldError>`.
pub type WorldResult<T> = Result<T, WorldError>;

/// Errors that can occur when building or growing the world graph.
#[derive(Debug, thiserror::Error)]
pub enum WorldError {
    /// A tile already occupies the target cell.
    #[error("cell {0} is already occupied")]
    CellOccupied(HexCoord),

    /// No tile exists at the given cell.
    #[error("no tile at {0}")]
    TileNotFound(HexCoord),

    /// The side to expand through is a wall or blockage.
    #[error("edge {dir} of {coord} does not allow expansion")]
    EdgeClosed {
        /// Frontier tile.
        coord: HexCoord,
        /// Side of the frontier tile.
        dir: Direction,
    },

    /// Every candidate category was rejected by topology validation.
    #[error("no valid category can be placed next to {from}")]
    NoValidCategory {
        /// Category of the frontier tile.
        from: TileCategory,
    },

    /// An edge that is not a door was treated as one.
    #[error("edge {dir} of {coord} is not a door")]
    NotADoor {
        /// Tile holding the edge.
        coord: HexCoord,
        /// Side of the tile.
        dir: Direction,
    },

    /// A door cannot perform the requested action in its current state.
    #[error("cannot {action} a door that is {state:?}")]
    DoorTransition {
        /// Current state of the door.
        state: DoorState,
        /// Requested action.
        action: &'static str,
    },

    /// A category name could not be parsed.
    #[error("unknown tile category: {0}")]
    UnknownCategory(String),

    /// A rules table is malformed.
    #[error("invalid topology rules: {0}")]
    InvalidRules(String),

    /// A loaded map breaks a topology invariant.
    #[error("map invariant violated: {0}")]
    Invariant(String),

    /// A weighted table could not be built or drawn from.
    #[error(transparent)]
    Table(#[from] mq_core::CoreError),

    /// JSON (de)serialization failed.
    #[error("json: {0}")]
    Json(#[from] serde_json::Error),
}
