//! Success counting over rolled faces.
//!
//! A die succeeds when its face is at or above the DC. Attack successes are
//! skulls, defense successes are shields; the difference is the damage.

/// Count faces at or above `dc`.
pub fn count_successes(faces: &[u8], dc: u8) -> u32 {
    faces.iter().filter(|&&f| f >= dc).count() as u32
}

/// Every die succeeded. An empty pool is never a critical hit.
pub fn is_critical_hit(faces: &[u8], dc: u8) -> bool {
    !faces.is_empty() && faces.iter().all(|&f| f >= dc)
}

/// Every die failed. An empty pool is never a critical miss.
pub fn is_critical_miss(faces: &[u8], dc: u8) -> bool {
    !faces.is_empty() && faces.iter().all(|&f| f < dc)
}

/// Skulls minus shields, floored at zero.
pub fn net_damage(attack_successes: u32, defense_successes: u32) -> u32 {
    attack_successes.saturating_sub(defense_successes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dice::roll_pool;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn counts_at_or_above_dc() {
        assert_eq!(count_successes(&[1, 3, 4, 6], 4), 2);
        assert_eq!(count_successes(&[1, 3, 4, 6], 1), 4);
        assert_eq!(count_successes(&[1, 3, 4, 6], 6), 1);
        assert_eq!(count_successes(&[], 4), 0);
    }

    #[test]
    fn single_die_success_is_critical() {
        assert!(is_critical_hit(&[5], 4));
        assert!(is_critical_miss(&[2], 4));
    }

    #[test]
    fn mixed_roll_is_neither() {
        assert!(!is_critical_hit(&[2, 5], 4));
        assert!(!is_critical_miss(&[2, 5], 4));
    }

    #[test]
    fn net_damage_floors_at_zero() {
        assert_eq!(net_damage(3, 1), 2);
        assert_eq!(net_damage(1, 3), 0);
        assert_eq!(net_damage(2, 2), 0);
    }

    proptest! {
        #[test]
        fn successes_bounded_by_pool(n in 0i32..40, dc in 1u8..=6, seed in any::<u64>()) {
            let mut rng = StdRng::seed_from_u64(seed);
            let faces = roll_pool(n, &mut rng);
            let successes = count_successes(&faces, dc);
            prop_assert!(successes <= n as u32);
        }

        #[test]
        fn criticals_match_success_count(
            faces in proptest::collection::vec(1u8..=6, 1..12),
            dc in 1u8..=6,
        ) {
            let successes = count_successes(&faces, dc);
            prop_assert_eq!(is_critical_hit(&faces, dc), successes as usize == faces.len());
            prop_assert_eq!(is_critical_miss(&faces, dc), successes == 0);
        }

        #[test]
        fn net_damage_is_difference_or_zero(x in 0u32..1000, y in 0u32..1000) {
            let expected = if x >= y { x - y } else { 0 };
            prop_assert_eq!(net_damage(x, y), expected);
        }
    }
}
