//! Opposed attack and defense rolls.
//!
//! The attacker rolls skulls, the defender rolls shields, and the difference
//! is the damage. Criticals belong to the player's attacks; an enemy's roll
//! never yields a bonus choice or a penalty.

use mq_core::RandomSource;
use serde::{Deserialize, Serialize};

use crate::critical::{Critical, CriticalConfig, detect_critical};
use crate::desperate::BonusSummary;
use crate::dice::{DEFAULT_DC, DicePool, Roll};
use crate::doom::CombatModifier;
use crate::resolution::net_damage;

/// Base pools for one exchange, before doom and desperate adjustments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombatSetup {
    /// Attacker's dice.
    pub attack_dice: i32,
    /// Defender's dice.
    pub defense_dice: i32,
    /// Minimum face counted as a success for both sides.
    pub dc: u8,
}

impl CombatSetup {
    /// A setup at the default DC.
    pub fn new(attack_dice: i32, defense_dice: i32) -> Self {
        Self {
            attack_dice,
            defense_dice,
            dc: DEFAULT_DC,
        }
    }

    /// Set the difficulty class.
    pub fn with_dc(mut self, dc: u8) -> Self {
        self.dc = dc;
        self
    }
}

/// The outcome of one exchange.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombatResult {
    /// The attacker's roll.
    pub attack: Roll,
    /// The defender's roll.
    pub defense: Roll,
    /// Skulls.
    pub attack_successes: u32,
    /// Shields.
    pub defense_successes: u32,
    /// Damage dealt, bonuses included. Never negative.
    pub net_damage: u32,
    /// Extra damage added by doom or desperate measures.
    pub bonus_damage: u32,
    /// The attacker's critical, if any. Always `None` for enemy attacks.
    pub critical: Option<Critical>,
}

impl CombatResult {
    /// Whether any damage was dealt.
    pub fn is_hit(&self) -> bool {
        self.net_damage > 0
    }
}

impl std::fmt::Display for CombatResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "attack {} / defense {} -> {} damage",
            self.attack, self.defense, self.net_damage
        )?;
        if let Some(critical) = &self.critical {
            write!(f, ", {critical}")?;
        }
        Ok(())
    }
}

/// Roll both pools and compute damage and criticals.
pub fn resolve_combat(
    attack: DicePool,
    defense: DicePool,
    config: &CriticalConfig,
    rng: &mut impl RandomSource,
) -> CombatResult {
    let mut result = roll_exchange(attack, defense, rng);
    result.critical = detect_critical(&result.attack, config, rng);
    result
}

/// Roll both pools and compute damage, without judging criticals.
fn roll_exchange(
    attack: DicePool,
    defense: DicePool,
    rng: &mut impl RandomSource,
) -> CombatResult {
    let attack = attack.roll(rng);
    let defense = defense.roll(rng);
    let attack_successes = attack.successes();
    let defense_successes = defense.successes();

    CombatResult {
        net_damage: net_damage(attack_successes, defense_successes),
        bonus_damage: 0,
        attack,
        defense,
        attack_successes,
        defense_successes,
        critical: None,
    }
}

/// Roll `attack_dice` against `defense_dice` at `dc` with the default
/// critical settings.
pub fn roll_and_resolve_combat(
    attack_dice: i32,
    defense_dice: i32,
    dc: u8,
    rng: &mut impl RandomSource,
) -> CombatResult {
    resolve_combat(
        DicePool::new(attack_dice).with_dc(dc),
        DicePool::new(defense_dice).with_dc(dc),
        &CriticalConfig::default(),
        rng,
    )
}

/// The player attacks an enemy.
///
/// Doom adds (or removes) player dice; desperate measures add attack dice and
/// damage on a landed hit.
pub fn resolve_player_attack(
    setup: CombatSetup,
    doom: CombatModifier,
    desperate: &BonusSummary,
    config: &CriticalConfig,
    rng: &mut impl RandomSource,
) -> CombatResult {
    let attack = DicePool::new(setup.attack_dice)
        .add(doom.player_dice_bonus)
        .add(desperate.attack_dice)
        .with_dc(setup.dc);
    let defense = DicePool::new(setup.defense_dice).with_dc(setup.dc);

    let mut result = resolve_combat(attack, defense, config, rng);
    apply_bonus_damage(&mut result, desperate.damage);
    tracing::debug!(
        attack = %result.attack,
        defense = %result.defense,
        damage = result.net_damage,
        "player attack"
    );
    result
}

/// An enemy attacks the player.
///
/// Desperate measures add defense dice; doom adds damage to hits that land.
/// The enemy's roll is never judged for criticals.
pub fn resolve_enemy_attack(
    setup: CombatSetup,
    doom: CombatModifier,
    desperate: &BonusSummary,
    rng: &mut impl RandomSource,
) -> CombatResult {
    let attack = DicePool::new(setup.attack_dice).with_dc(setup.dc);
    let defense = DicePool::new(setup.defense_dice)
        .add(desperate.defense_dice)
        .with_dc(setup.dc);

    let mut result = roll_exchange(attack, defense, rng);
    apply_bonus_damage(&mut result, doom.enemy_damage_bonus);
    tracing::debug!(
        attack = %result.attack,
        defense = %result.defense,
        damage = result.net_damage,
        "enemy attack"
    );
    result
}

/// Bonus damage only applies to hits that already landed.
fn apply_bonus_damage(result: &mut CombatResult, bonus: i32) {
    if result.net_damage == 0 {
        return;
    }
    let total = result.net_damage.saturating_add_signed(bonus);
    result.bonus_damage = total.saturating_sub(result.net_damage);
    result.net_damage = total;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::desperate::calculate_desperate_bonuses;
    use mq_core::SequenceSource;

    #[test]
    fn damage_is_skulls_minus_shields() {
        // attack 6,5,2 -> 2 skulls; defense 4 -> 1 shield
        let mut rng = SequenceSource::d6_faces(&[6, 5, 2, 4]);
        let result = roll_and_resolve_combat(3, 1, 4, &mut rng);
        assert_eq!(result.attack.faces, vec![6, 5, 2]);
        assert_eq!(result.attack_successes, 2);
        assert_eq!(result.defense_successes, 1);
        assert_eq!(result.net_damage, 1);
        assert!(result.critical.is_none());
    }

    #[test]
    fn shields_never_push_damage_negative() {
        let mut rng = SequenceSource::d6_faces(&[4, 1, 6, 6, 6]);
        let result = roll_and_resolve_combat(2, 3, 4, &mut rng);
        assert_eq!(result.net_damage, 0);
        assert!(!result.is_hit());
    }

    #[test]
    fn all_skulls_is_a_critical_hit() {
        let mut rng = SequenceSource::d6_faces(&[5, 6, 1, 3, 3, 3]);
        let result = roll_and_resolve_combat(2, 1, 4, &mut rng);
        match result.critical {
            Some(Critical::Hit(choice)) => assert_eq!(choice.options().len(), 3),
            other => panic!("expected critical hit, got {other:?}"),
        }
    }

    #[test]
    fn no_skulls_is_a_critical_miss() {
        let mut rng = SequenceSource::d6_faces(&[1, 2, 6, 1]);
        let result = roll_and_resolve_combat(2, 1, 4, &mut rng);
        assert!(matches!(result.critical, Some(Critical::Miss(_))));
    }

    #[test]
    fn disarmed_attacker_rolls_nothing() {
        let mut rng = SequenceSource::d6_faces(&[6, 6]);
        let result = roll_and_resolve_combat(0, 2, 4, &mut rng);
        assert!(result.attack.is_empty());
        assert_eq!(result.net_damage, 0);
        assert!(result.critical.is_none());
    }

    #[test]
    fn doom_and_desperation_shape_player_attack() {
        // base 2 dice, doom -1, cornered +1 -> 2 dice
        let desperate = calculate_desperate_bonuses(1, 5);
        let mut rng = SequenceSource::d6_faces(&[6, 3, 2]);
        let result = resolve_player_attack(
            CombatSetup::new(2, 1),
            CombatModifier::new(2, -1),
            &desperate,
            &CriticalConfig::default(),
            &mut rng,
        );
        assert_eq!(result.attack.count(), 2);
        // one skull, no shields, plus reckless swing
        assert_eq!(result.net_damage, 2);
        assert_eq!(result.bonus_damage, 1);
    }

    #[test]
    fn enemy_bonus_only_on_landed_hits() {
        let none = BonusSummary::default();
        let doom = CombatModifier::new(2, -1);

        let mut rng = SequenceSource::d6_faces(&[5, 2, 6]);
        let result = resolve_enemy_attack(
            CombatSetup::new(2, 1),
            doom,
            &none,
            &mut rng,
        );
        assert_eq!(result.net_damage, 0);
        assert_eq!(result.bonus_damage, 0);

        let mut rng = SequenceSource::d6_faces(&[5, 2, 1]);
        let result = resolve_enemy_attack(
            CombatSetup::new(2, 1),
            doom,
            &none,
            &mut rng,
        );
        assert_eq!(result.net_damage, 3);
        assert_eq!(result.bonus_damage, 2);
    }

    #[test]
    fn last_stand_adds_shields() {
        let desperate = calculate_desperate_bonuses(1, 1);
        let mut rng = SequenceSource::d6_faces(&[6, 1, 1, 1]);
        let result = resolve_enemy_attack(
            CombatSetup::new(1, 1),
            CombatModifier::default(),
            &desperate,
            &mut rng,
        );
        assert_eq!(result.defense.count(), 3);
    }

    #[test]
    fn enemy_rolls_never_produce_criticals() {
        let none = BonusSummary::default();

        // every skull lands: would be a critical hit for the player
        let mut rng = SequenceSource::d6_faces(&[6, 6, 1, 3, 3, 3]);
        let result = resolve_enemy_attack(
            CombatSetup::new(2, 1),
            CombatModifier::default(),
            &none,
            &mut rng,
        );
        assert_eq!(result.attack_successes, 2);
        assert!(result.critical.is_none());

        // no skulls at all: would be a critical miss for the player
        let mut rng = SequenceSource::d6_faces(&[1, 2, 6, 3, 3, 3]);
        let result = resolve_enemy_attack(
            CombatSetup::new(2, 1),
            CombatModifier::default(),
            &none,
            &mut rng,
        );
        assert_eq!(result.attack_successes, 0);
        assert!(result.critical.is_none());
    }

    #[test]
    fn display() {
        let mut rng = SequenceSource::d6_faces(&[6, 3, 2]);
        let result = roll_and_resolve_combat(2, 1, 4, &mut rng);
        assert_eq!(
            result.to_string(),
            "attack [6, 3] vs DC 4 = 1 / defense [2] vs DC 4 = 0 -> 1 damage"
        );
    }
}
