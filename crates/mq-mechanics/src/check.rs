//! Skill checks outside combat: forcing doors, reading tomes, resisting fear.

use mq_core::{RandomSource, SkillCategory};
use serde::{Deserialize, Serialize};

use crate::desperate::calculate_desperate_bonuses;
use crate::dice::{DEFAULT_DC, DicePool, Roll};
use crate::doom::CombatModifier;

/// A check request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillCheck {
    /// Category the check is made against.
    pub skill: SkillCategory,
    /// Base dice before doom adjustments.
    pub dice: i32,
    /// Minimum face counted as a success.
    #[serde(default = "default_dc")]
    pub dc: u8,
    /// Successes needed to pass.
    #[serde(default = "default_required")]
    pub required: u32,
}

fn default_dc() -> u8 {
    DEFAULT_DC
}

fn default_required() -> u32 {
    1
}

impl SkillCheck {
    /// A check needing one success at the default DC.
    pub fn new(skill: SkillCategory, dice: i32) -> Self {
        Self {
            skill,
            dice,
            dc: DEFAULT_DC,
            required: 1,
        }
    }

    /// Set the difficulty class.
    pub fn with_dc(mut self, dc: u8) -> Self {
        self.dc = dc;
        self
    }

    /// Set the number of successes needed.
    pub fn with_required(mut self, required: u32) -> Self {
        self.required = required;
        self
    }
}

/// The result of a check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckOutcome {
    /// Dice rolled; empty when the check auto-failed.
    pub roll: Roll,
    /// Successes counted.
    pub successes: u32,
    /// Whether the check passed.
    pub passed: bool,
    /// A desperate measure failed the check before any dice were rolled.
    pub auto_failed: bool,
}

/// Resolve a check with live resources and the current doom adjustments.
pub fn perform_check(
    check: &SkillCheck,
    hp: i32,
    sanity: i32,
    doom: CombatModifier,
    rng: &mut impl RandomSource,
) -> CheckOutcome {
    let desperate = calculate_desperate_bonuses(hp, sanity);
    if desperate.auto_fails(check.skill) {
        tracing::debug!(skill = %check.skill, "check auto-failed by desperate measure");
        return CheckOutcome {
            roll: Roll::new(Vec::new(), check.dc),
            successes: 0,
            passed: false,
            auto_failed: true,
        };
    }

    let roll = DicePool::new(check.dice)
        .add(doom.player_dice_bonus)
        .with_dc(check.dc)
        .roll(rng);
    let successes = roll.successes();
    let passed = successes >= check.required;
    tracing::debug!(skill = %check.skill, %roll, passed, "skill check");

    CheckOutcome {
        roll,
        successes,
        passed,
        auto_failed: false,
    }
}
