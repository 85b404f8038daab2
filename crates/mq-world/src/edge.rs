//! Tile edges: open passages, doors, walls and blockages.

use mq_core::SkillCategory;
use serde::{Deserialize, Serialize};

use crate::error::{WorldError, WorldResult};

/// The condition of a door.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DoorState {
    /// Standing open.
    Open,
    /// Shut but not secured.
    Closed,
    /// Locked; needs a key or picking.
    Locked,
    /// Barred from one side.
    Barricaded,
    /// Smashed off its hinges; permanently passable.
    Broken,
    /// Held shut by something unnatural.
    Sealed,
    /// Opens only when a puzzle is solved.
    Puzzle,
}

impl DoorState {
    /// Whether a character can walk through right now.
    pub fn is_passable(self) -> bool {
        matches!(self, Self::Open | Self::Broken)
    }

    /// Swing the door open.
    pub fn open(self) -> WorldResult<Self> {
        match self {
            Self::Open | Self::Closed => Ok(Self::Open),
            Self::Broken => Ok(Self::Broken),
            other => Err(WorldError::DoorTransition {
                state: other,
                action: "open",
            }),
        }
    }

    /// Swing the door shut.
    pub fn close(self) -> WorldResult<Self> {
        match self {
            Self::Open | Self::Closed => Ok(Self::Closed),
            other => Err(WorldError::DoorTransition {
                state: other,
                action: "close",
            }),
        }
    }

    /// Unlock a locked door, leaving it closed.
    pub fn unlock(self) -> WorldResult<Self> {
        match self {
            Self::Locked => Ok(Self::Closed),
            other => Err(WorldError::DoorTransition {
                state: other,
                action: "unlock",
            }),
        }
    }

    /// Break the door down. Sealed and puzzle doors resist force.
    pub fn force(self) -> WorldResult<Self> {
        match self {
            Self::Closed | Self::Locked | Self::Barricaded | Self::Broken => Ok(Self::Broken),
            other => Err(WorldError::DoorTransition {
                state: other,
                action: "force",
            }),
        }
    }
}

/// What physically blocks a passage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockingKind {
    /// Fallen masonry.
    Rubble,
    /// Floor or ceiling gave way.
    Collapse,
    /// Standing water.
    Flooded,
    /// Flames.
    Fire,
    /// An unseen presence bars the way.
    Ward,
}

/// A skill check that clears a blockage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillGate {
    /// Skill tested.
    pub skill: SkillCategory,
    /// Difficulty class for each die.
    pub dc: u8,
    /// Successes needed.
    pub required: u32,
}

/// The coarse edge kind suggested by topology validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EdgeType {
    /// A free passage.
    Open,
    /// A passage through a door.
    Door,
    /// No passage.
    Wall,
}

impl std::fmt::Display for EdgeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Open => write!(f, "open"),
            Self::Door => write!(f, "door"),
            Self::Wall => write!(f, "wall"),
        }
    }
}

/// One of the six sides of a tile.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Edge {
    /// Free passage.
    #[default]
    Open,
    /// A door in the given state.
    Door {
        /// Current door state.
        state: DoorState,
    },
    /// Solid wall.
    Wall,
    /// A passage blocked by something that might be removed.
    Blocked {
        /// What blocks it.
        kind: BlockingKind,
        /// Skill check that clears it, if any.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        check: Option<SkillGate>,
        /// Item that removes it, if any.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        removal: Option<String>,
    },
}

impl Edge {
    /// A freshly generated door.
    pub fn closed_door() -> Self {
        Self::Door {
            state: DoorState::Closed,
        }
    }

    /// The edge matching a validation suggestion.
    pub fn from_suggestion(edge_type: EdgeType) -> Self {
        match edge_type {
            EdgeType::Open => Self::Open,
            EdgeType::Door => Self::closed_door(),
            EdgeType::Wall => Self::Wall,
        }
    }

    /// Coarse kind. Blockages count as walls until cleared.
    pub fn edge_type(&self) -> EdgeType {
        match self {
            Self::Open => EdgeType::Open,
            Self::Door { .. } => EdgeType::Door,
            Self::Wall | Self::Blocked { .. } => EdgeType::Wall,
        }
    }

    /// True for any door, whatever its state.
    pub fn is_door(&self) -> bool {
        matches!(self, Self::Door { .. })
    }

    /// Whether a character can walk through right now.
    pub fn is_passable(&self) -> bool {
        match self {
            Self::Open => true,
            Self::Door { state } => state.is_passable(),
            Self::Wall | Self::Blocked { .. } => false,
        }
    }

    /// Whether exploration may push through this side. Doors can be dealt
    /// with later; walls and blockages cannot be explored past.
    pub fn allows_expansion(&self) -> bool {
        matches!(self, Self::Open | Self::Door { .. })
    }
}
