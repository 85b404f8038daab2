//! Shared primitives for the Mythos Quest core.
//!
//! Everything random in the game flows through a [`RandomSource`] handed in
//! by the caller, so generation, loot and dice can be replayed exactly in
//! tests. [`WeightedTable`] is the single weighted-draw implementation used by
//! tile generation, loot, lore and dark-room content.

/// Error types used throughout the crate.
pub mod error;
/// Injected random sources and sampling helpers.
pub mod rng;
/// Skill categories referenced by checks and drawbacks.
pub mod skill;
/// Weighted tables and the weighted selector.
pub mod weighted;

/// Re-export error types.
pub use error::{CoreError, CoreResult};
/// Re-export random source types.
pub use rng::{RandomSource, SequenceSource, choose_distinct};
/// Re-export skill categories.
pub use skill::SkillCategory;
/// Re-export weighted table types.
pub use weighted::{WeightedEntry, WeightedTable, weighted_pick};
