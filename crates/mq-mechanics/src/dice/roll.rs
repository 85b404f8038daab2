//! Rolled faces and their interpretation.

use serde::{Deserialize, Serialize};

use crate::resolution::{count_successes, is_critical_hit, is_critical_miss};

/// The faces produced by rolling a pool, with the DC they were rolled against.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Roll {
    /// Individual faces in roll order, each in `1..=6`.
    pub faces: Vec<u8>,
    /// Minimum face counted as a success.
    pub dc: u8,
}

impl Roll {
    /// Wrap already-rolled faces.
    pub fn new(faces: Vec<u8>, dc: u8) -> Self {
        Self { faces, dc }
    }

    /// Number of dice at or above the DC.
    pub fn successes(&self) -> u32 {
        count_successes(&self.faces, self.dc)
    }

    /// Every die succeeded (and at least one was rolled).
    pub fn is_critical_hit(&self) -> bool {
        is_critical_hit(&self.faces, self.dc)
    }

    /// Every die failed (and at least one was rolled).
    pub fn is_critical_miss(&self) -> bool {
        is_critical_miss(&self.faces, self.dc)
    }

    /// Number of dice rolled.
    pub fn count(&self) -> usize {
        self.faces.len()
    }

    /// True when nothing was rolled.
    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }
}

impl std::fmt::Display for Roll {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let faces: Vec<String> = self.faces.iter().map(u8::to_string).collect();
        write!(
            f,
            "[{}] vs DC {} = {}",
            faces.join(", "),
            self.dc,
            self.successes()
        )
    }
}
