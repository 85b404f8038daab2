//! Desperate measures: bonuses and drawbacks unlocked by low HP or sanity.
//!
//! Nothing here is cached. Every resolution step asks the engine again with
//! the live HP and sanity, so healing or sanity loss between steps changes
//! the active set immediately.

use std::collections::BTreeSet;

use mq_core::SkillCategory;
use serde::{Deserialize, Serialize};

/// When a measure becomes active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Trigger {
    /// HP at or below the threshold.
    HpAtMost(i32),
    /// Sanity at or below the threshold.
    SanityAtMost(i32),
    /// Both at or below their thresholds at the same time.
    Both {
        /// HP threshold.
        hp: i32,
        /// Sanity threshold.
        sanity: i32,
    },
}

impl Trigger {
    /// Whether the trigger fires for the given resources.
    pub fn matches(self, hp: i32, sanity: i32) -> bool {
        match self {
            Self::HpAtMost(t) => hp <= t,
            Self::SanityAtMost(t) => sanity <= t,
            Self::Both { hp: h, sanity: s } => hp <= h && sanity <= s,
        }
    }
}

/// Bonuses granted by one measure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MeasureEffect {
    /// Extra action points.
    pub action_points: i32,
    /// Extra attack dice.
    pub attack_dice: i32,
    /// Extra defense dice.
    pub defense_dice: i32,
    /// Extra damage on a landed hit.
    pub damage: i32,
}

/// A named trigger with its effect and optional drawback.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DesperateMeasure {
    /// Display name.
    pub name: String,
    /// When the measure is active.
    pub trigger: Trigger,
    /// What it grants.
    pub effect: MeasureEffect,
    /// A skill category that automatically fails while active.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auto_fail: Option<SkillCategory>,
}

impl DesperateMeasure {
    /// Whether the measure is active for the given resources.
    pub fn is_active(&self, hp: i32, sanity: i32) -> bool {
        self.trigger.matches(hp, sanity)
    }
}

/// The summed effect of every active measure.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BonusSummary {
    /// Total extra action points.
    pub action_points: i32,
    /// Total extra attack dice.
    pub attack_dice: i32,
    /// Total extra defense dice.
    pub defense_dice: i32,
    /// Total extra damage.
    pub damage: i32,
    /// Skill categories that automatically fail.
    pub auto_fail: BTreeSet<SkillCategory>,
    /// Names of the active measures, in catalogue order.
    pub active: Vec<String>,
}

impl BonusSummary {
    /// True when no measure is active.
    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }

    /// Whether checks of `skill` automatically fail.
    pub fn auto_fails(&self, skill: SkillCategory) -> bool {
        self.auto_fail.contains(&skill)
    }
}

/// Evaluates a catalogue of measures against live resources.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DesperateEngine {
    measures: Vec<DesperateMeasure>,
}

impl Default for DesperateEngine {
    fn default() -> Self {
        Self::standard()
    }
}

impl DesperateEngine {
    /// An engine over a custom catalogue.
    pub fn new(measures: Vec<DesperateMeasure>) -> Self {
        Self { measures }
    }

    /// The built-in catalogue.
    pub fn standard() -> Self {
        let measure = |name: &str, trigger, effect, auto_fail| DesperateMeasure {
            name: name.to_string(),
            trigger,
            effect,
            auto_fail,
        };

        Self::new(vec![
            measure(
                "Adrenaline Surge",
                Trigger::HpAtMost(2),
                MeasureEffect {
                    action_points: 1,
                    ..MeasureEffect::default()
                },
                None,
            ),
            measure(
                "Cornered",
                Trigger::HpAtMost(1),
                MeasureEffect {
                    attack_dice: 1,
                    ..MeasureEffect::default()
                },
                Some(SkillCategory::Intellect),
            ),
            measure(
                "Reckless Swing",
                Trigger::HpAtMost(2),
                MeasureEffect {
                    damage: 1,
                    ..MeasureEffect::default()
                },
                None,
            ),
            measure(
                "Mad Clarity",
                Trigger::SanityAtMost(2),
                MeasureEffect {
                    attack_dice: 1,
                    ..MeasureEffect::default()
                },
                Some(SkillCategory::Willpower),
            ),
            measure(
                "Last Stand",
                Trigger::Both { hp: 1, sanity: 1 },
                MeasureEffect {
                    attack_dice: 1,
                    defense_dice: 2,
                    ..MeasureEffect::default()
                },
                None,
            ),
        ])
    }

    /// The full catalogue.
    pub fn measures(&self) -> &[DesperateMeasure] {
        &self.measures
    }

    /// Measures active for the given resources, in catalogue order.
    pub fn active(&self, hp: i32, sanity: i32) -> Vec<&DesperateMeasure> {
        self.measures
            .iter()
            .filter(|m| m.is_active(hp, sanity))
            .collect()
    }

    /// Sum the effects of every active measure.
    pub fn bonuses(&self, hp: i32, sanity: i32) -> BonusSummary {
        let mut summary = BonusSummary::default();
        for measure in self.active(hp, sanity) {
            summary.action_points += measure.effect.action_points;
            summary.attack_dice += measure.effect.attack_dice;
            summary.defense_dice += measure.effect.defense_dice;
            summary.damage += measure.effect.damage;
            summary.auto_fail.extend(measure.auto_fail);
            summary.active.push(measure.name.clone());
        }
        summary
    }
}

/// Active measures from the built-in catalogue.
pub fn get_active_desperate_measures(hp: i32, sanity: i32) -> Vec<DesperateMeasure> {
    DesperateEngine::standard()
        .active(hp, sanity)
        .into_iter()
        .cloned()
        .collect()
}

/// Summed bonuses from the built-in catalogue.
pub fn calculate_desperate_bonuses(hp: i32, sanity: i32) -> BonusSummary {
    DesperateEngine::standard().bonuses(hp, sanity)
}
