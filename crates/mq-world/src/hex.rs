//! Axial hex coordinates (flat-top layout).

use serde::{Deserialize, Serialize};

/// One of the six sides of a flat-top hex.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Up.
    N,
    /// Up and to the right.
    NE,
    /// Down and to the right.
    SE,
    /// Down.
    S,
    /// Down and to the left.
    SW,
    /// Up and to the left.
    NW,
}

impl Direction {
    /// All six directions, clockwise from north. Index matches [`Direction::index`].
    pub const ALL: [Direction; 6] = [
        Self::N,
        Self::NE,
        Self::SE,
        Self::S,
        Self::SW,
        Self::NW,
    ];

    /// Position of this direction in [`Direction::ALL`].
    pub fn index(self) -> usize {
        match self {
            Self::N => 0,
            Self::NE => 1,
            Self::SE => 2,
            Self::S => 3,
            Self::SW => 4,
            Self::NW => 5,
        }
    }

    /// The direction pointing back across the same edge.
    pub fn opposite(self) -> Self {
        Self::ALL[(self.index() + 3) % 6]
    }

    fn offset(self) -> (i32, i32) {
        match self {
            Self::N => (0, -1),
            Self::NE => (1, -1),
            Self::SE => (1, 0),
            Self::S => (0, 1),
            Self::SW => (-1, 1),
            Self::NW => (-1, 0),
        }
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::N => "n",
            Self::NE => "ne",
            Self::SE => "se",
            Self::S => "s",
            Self::SW => "sw",
            Self::NW => "nw",
        };
        f.write_str(s)
    }
}

/// A cell position in axial coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub struct HexCoord {
    /// Column axis.
    pub q: i32,
    /// Diagonal row axis.
    pub r: i32,
}

impl HexCoord {
    /// The origin cell.
    pub const ORIGIN: HexCoord = HexCoord { q: 0, r: 0 };

    /// Create a coordinate.
    pub fn new(q: i32, r: i32) -> Self {
        Self { q, r }
    }

    /// The adjacent cell across the given side.
    pub fn neighbor(self, dir: Direction) -> Self {
        let (dq, dr) = dir.offset();
        Self {
            q: self.q + dq,
            r: self.r + dr,
        }
    }

    /// All six adjacent cells paired with the side they lie across.
    pub fn neighbors(self) -> impl Iterator<Item = (Direction, HexCoord)> {
        Direction::ALL.into_iter().map(move |d| (d, self.neighbor(d)))
    }

    /// Number of steps between two cells.
    pub fn distance(self, other: HexCoord) -> u32 {
        let dq = self.q - other.q;
        let dr = self.r - other.r;
        ((dq.abs() + dr.abs() + (dq + dr).abs()) / 2) as u32
    }
}

impl std::fmt::Display for HexCoord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.q, self.r)
    }
}
