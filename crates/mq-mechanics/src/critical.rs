//! Critical hits and critical misses.
//!
//! A critical hit offers the player a small menu of bonuses drawn without
//! replacement; they must pick exactly one. A critical miss applies one
//! penalty drawn uniformly, with no choice involved.

use mq_core::{RandomSource, choose_distinct};
use serde::{Deserialize, Serialize};

use crate::dice::Roll;
use crate::error::{MechError, MechResult};

/// A reward offered on a critical hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CriticalBonus {
    /// Regain a point of health.
    RestoreHealth,
    /// Take an extra action this round.
    ExtraAction,
    /// Gain a point of insight.
    GainInsight,
    /// Regain a point of sanity.
    RecoverSanity,
}

impl CriticalBonus {
    /// The full bonus catalogue.
    pub const ALL: [CriticalBonus; 4] = [
        Self::RestoreHealth,
        Self::ExtraAction,
        Self::GainInsight,
        Self::RecoverSanity,
    ];
}

impl std::fmt::Display for CriticalBonus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::RestoreHealth => write!(f, "restore health"),
            Self::ExtraAction => write!(f, "extra action"),
            Self::GainInsight => write!(f, "gain insight"),
            Self::RecoverSanity => write!(f, "recover sanity"),
        }
    }
}

/// A consequence applied on a critical miss.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CriticalPenalty {
    /// The target strikes back immediately.
    CounterAttack,
    /// Lose one action point next round.
    LoseNextActionPoint,
    /// Drop a held item.
    DropItem,
    /// A nearby threat notices the noise.
    AttractThreat,
}

impl CriticalPenalty {
    /// The full penalty catalogue.
    pub const ALL: [CriticalPenalty; 4] = [
        Self::CounterAttack,
        Self::LoseNextActionPoint,
        Self::DropItem,
        Self::AttractThreat,
    ];
}

impl std::fmt::Display for CriticalPenalty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::CounterAttack => write!(f, "counter-attack"),
            Self::LoseNextActionPoint => write!(f, "lose next action point"),
            Self::DropItem => write!(f, "drop an item"),
            Self::AttractThreat => write!(f, "attract a nearby threat"),
        }
    }
}

/// How many bonuses a critical hit offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CriticalConfig {
    /// Options offered when two or more dice all succeeded.
    pub bonus_options: usize,
    /// Options offered when a single die succeeded.
    pub single_die_bonus_options: usize,
}

impl Default for CriticalConfig {
    fn default() -> Self {
        Self {
            bonus_options: 3,
            single_die_bonus_options: 2,
        }
    }
}

impl CriticalConfig {
    /// Set the menu size for multi-die criticals.
    pub fn with_bonus_options(mut self, n: usize) -> Self {
        self.bonus_options = n;
        self
    }

    /// Set the menu size for one-die criticals.
    pub fn with_single_die_bonus_options(mut self, n: usize) -> Self {
        self.single_die_bonus_options = n;
        self
    }

    /// Menu size for a critical rolled with `dice` dice.
    pub fn options_for(&self, dice: usize) -> usize {
        if dice == 1 {
            self.single_die_bonus_options
        } else {
            self.bonus_options
        }
    }
}

/// The bonus menu offered to the player after a critical hit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BonusChoice {
    options: Vec<CriticalBonus>,
}

impl BonusChoice {
    /// Wrap a fixed menu.
    pub fn new(options: Vec<CriticalBonus>) -> Self {
        Self { options }
    }

    /// The distinct bonuses on offer.
    pub fn options(&self) -> &[CriticalBonus] {
        &self.options
    }

    /// Pick the bonus at `index`.
    pub fn choose(&self, index: usize) -> MechResult<CriticalBonus> {
        self.options
            .get(index)
            .copied()
            .ok_or(MechError::InvalidChoice {
                index,
                options: self.options.len(),
            })
    }
}

/// What a critical roll produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Critical {
    /// Every die succeeded; the player picks one bonus.
    Hit(BonusChoice),
    /// Every die failed; the penalty applies automatically.
    Miss(CriticalPenalty),
}

impl std::fmt::Display for Critical {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Hit(choice) => {
                let options: Vec<String> = choice.options.iter().map(|b| b.to_string()).collect();
                write!(f, "critical hit (choose one: {})", options.join(", "))
            }
            Self::Miss(penalty) => write!(f, "critical miss ({penalty})"),
        }
    }
}

/// Draw the bonus menu for a critical hit rolled with `dice` dice.
pub fn draw_bonus_choice(
    dice: usize,
    config: &CriticalConfig,
    rng: &mut impl RandomSource,
) -> BonusChoice {
    BonusChoice::new(choose_distinct(
        &CriticalBonus::ALL,
        config.options_for(dice),
        rng,
    ))
}

/// Draw one penalty uniformly.
pub fn draw_penalty(rng: &mut impl RandomSource) -> CriticalPenalty {
    let i = rng.below(CriticalPenalty::ALL.len() as u64) as usize;
    CriticalPenalty::ALL[i]
}

/// Inspect a roll for a critical and draw its consequence.
///
/// Only consumes randomness when the roll is critical.
pub fn detect_critical(
    roll: &Roll,
    config: &CriticalConfig,
    rng: &mut impl RandomSource,
) -> Option<Critical> {
    if roll.is_critical_hit() {
        Some(Critical::Hit(draw_bonus_choice(roll.count(), config, rng)))
    } else if roll.is_critical_miss() {
        Some(Critical::Miss(draw_penalty(rng)))
    } else {
        None
    }
}
