//! Dice pool construction and rolling.

use mq_core::RandomSource;
use serde::{Deserialize, Serialize};

use super::roll::Roll;
use super::{DEFAULT_DC, roll_pool};

/// A number of d6 to be rolled together against a difficulty class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DicePool {
    /// How many dice to roll. Zero or less rolls nothing.
    pub dice: i32,
    /// Minimum face counted as a success.
    pub dc: u8,
}

impl Default for DicePool {
    fn default() -> Self {
        Self {
            dice: 0,
            dc: DEFAULT_DC,
        }
    }
}

impl DicePool {
    /// A pool of `dice` d6 at the default DC.
    pub fn new(dice: i32) -> Self {
        Self {
            dice,
            dc: DEFAULT_DC,
        }
    }

    /// Set the difficulty class.
    pub fn with_dc(mut self, dc: u8) -> Self {
        self.dc = dc;
        self
    }

    /// Add (or with a negative count, remove) dice.
    pub fn add(mut self, count: i32) -> Self {
        self.dice = self.dice.saturating_add(count);
        self
    }

    /// Number of dice that will actually be rolled.
    pub fn count(&self) -> usize {
        self.dice.max(0) as usize
    }

    /// Returns true if rolling the pool produces no dice.
    pub fn is_empty(&self) -> bool {
        self.dice <= 0
    }

    /// Roll all dice in the pool.
    pub fn roll(&self, rng: &mut impl RandomSource) -> Roll {
        Roll::new(roll_pool(self.dice, rng), self.dc)
    }
}
