//! Dice-pool resolution engine for Mythos Quest.
//!
//! Rolls d6 pools against a difficulty class, detects criticals, resolves
//! opposed combat, and adjusts everything for the doom counter and the
//! player's desperate measures. Randomness is always injected through
//! [`mq_core::RandomSource`], so every outcome can be replayed in tests.

pub mod check;
pub mod combat;
pub mod critical;
pub mod desperate;
pub mod dice;
pub mod doom;
pub mod error;
pub mod probability;
pub mod resolution;

pub use check::{CheckOutcome, SkillCheck, perform_check};
pub use combat::{
    CombatResult, CombatSetup, resolve_combat, resolve_enemy_attack, resolve_player_attack,
    roll_and_resolve_combat,
};
pub use critical::{BonusChoice, Critical, CriticalBonus, CriticalConfig, CriticalPenalty};
pub use desperate::{
    BonusSummary, DesperateEngine, DesperateMeasure, MeasureEffect, Trigger,
    calculate_desperate_bonuses, get_active_desperate_measures,
};
pub use dice::{DEFAULT_DC, DicePool, Roll, roll_pool};
pub use doom::{
    CombatModifier, DoomBand, DoomChange, DoomConfig, DoomEvent, DoomRange, DoomTable,
    DoomTracker, Severity, get_combat_modifier,
};
pub use error::{MechError, MechResult};
pub use probability::{die_success_chance, expected_successes, success_probability};
pub use resolution::{count_successes, is_critical_hit, is_critical_miss, net_damage};
