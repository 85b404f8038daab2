//! Six-sided dice pools and rolling.
//!
//! Every action in the game rolls a pool of d6 against a difficulty class.
//! Pool sizes are signed: modifiers can push a pool to zero or below, which
//! is a legitimate "disarmed" state that rolls nothing.

pub mod pool;
pub mod roll;

pub use pool::DicePool;
pub use roll::Roll;

use mq_core::RandomSource;

/// Number of sides on every die in the game.
pub const D6: u32 = 6;

/// Minimum face counted as a success unless a check says otherwise.
pub const DEFAULT_DC: u8 = 4;

/// Roll `n` independent d6. A non-positive `n` rolls nothing.
pub fn roll_pool(n: i32, rng: &mut impl RandomSource) -> Vec<u8> {
    (0..n.max(0)).map(|_| rng.die(D6) as u8).collect()
}
