//! Analytic odds for balance tuning. Nothing here touches a live roll.

use crate::dice::D6;

/// Chance that a single d6 meets `dc`.
pub fn die_success_chance(dc: u8) -> f64 {
    let dc = u32::from(dc.clamp(1, 7));
    f64::from(D6 + 1 - dc) / f64::from(D6)
}

/// Probability that `dice` d6 produce at least `required` successes at `dc`.
pub fn success_probability(dice: i32, dc: u8, required: u32) -> f64 {
    if required == 0 {
        return 1.0;
    }
    let n = dice.max(0) as u32;
    if required > n {
        return 0.0;
    }

    let p = die_success_chance(dc);
    (required..=n)
        .map(|k| binomial(n, k) * p.powi(k as i32) * (1.0 - p).powi((n - k) as i32))
        .sum::<f64>()
        .clamp(0.0, 1.0)
}

/// Mean number of successes for `dice` d6 at `dc`.
pub fn expected_successes(dice: i32, dc: u8) -> f64 {
    f64::from(dice.max(0)) * die_success_chance(dc)
}

fn binomial(n: u32, k: u32) -> f64 {
    let k = k.min(n - k);
    (0..k).fold(1.0, |acc, i| acc * f64::from(n - i) / f64::from(i + 1))
}
