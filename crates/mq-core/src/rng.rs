use rand::Rng;
use rand::rngs::StdRng;

/// A source of uniform random floats in `[0, 1)`.
///
/// Components never reach for a global generator; the caller owns the source
/// and passes it in. Sessions use a seeded [`StdRng`]; tests use a
/// [`SequenceSource`] to script exact outcomes.
pub trait RandomSource {
    /// Next uniform value in `[0, 1)`.
    fn next_f64(&mut self) -> f64;

    /// Uniform integer in `[0, n)`. Returns 0 when `n` is 0.
    fn below(&mut self, n: u64) -> u64 {
        if n == 0 {
            return 0;
        }
        ((self.next_f64() * n as f64) as u64).min(n - 1)
    }

    /// Roll one die with the given number of sides, in `[1, sides]`.
    fn die(&mut self, sides: u32) -> u32 {
        self.below(u64::from(sides.max(1))) as u32 + 1
    }
}

impl RandomSource for StdRng {
    fn next_f64(&mut self) -> f64 {
        self.random::<f64>()
    }
}

impl<T: RandomSource + ?Sized> RandomSource for &mut T {
    fn next_f64(&mut self) -> f64 {
        (**self).next_f64()
    }
}

/// A scripted random source that cycles through a fixed list of values.
#[derive(Debug, Clone, Default)]
pub struct SequenceSource {
    values: Vec<f64>,
    cursor: usize,
}

impl SequenceSource {
    /// Create a source replaying `values` in order, wrapping at the end.
    ///
    /// Values are clamped into `[0, 1)`.
    pub fn new(values: impl Into<Vec<f64>>) -> Self {
        let values = values
            .into()
            .into_iter()
            .map(|v| v.clamp(0.0, 1.0 - f64::EPSILON))
            .collect();
        Self { values, cursor: 0 }
    }

    /// Create a source whose consecutive d6 rolls produce exactly `faces`.
    pub fn d6_faces(faces: &[u8]) -> Self {
        Self::new(
            faces
                .iter()
                .map(|&f| (f64::from(f.clamp(1, 6)) - 0.5) / 6.0)
                .collect::<Vec<_>>(),
        )
    }

    /// How many values have been consumed so far.
    pub fn consumed(&self) -> usize {
        self.cursor
    }
}

impl RandomSource for SequenceSource {
    fn next_f64(&mut self) -> f64 {
        if self.values.is_empty() {
            return 0.0;
        }
        let value = self.values[self.cursor % self.values.len()];
        self.cursor += 1;
        value
    }
}

/// Draw `n` distinct items from `items` without replacement.
///
/// Returns fewer than `n` items when the slice is shorter than `n`.
pub fn choose_distinct<T: Clone>(items: &[T], n: usize, rng: &mut impl RandomSource) -> Vec<T> {
    let mut indices: Vec<usize> = (0..items.len()).collect();
    let take = n.min(items.len());
    for i in 0..take {
        let remaining = (indices.len() - i) as u64;
        let j = i + rng.below(remaining) as usize;
        indices.swap(i, j);
    }
    indices[..take].iter().map(|&i| items[i].clone()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn below_stays_in_range() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..1000 {
            assert!(rng.below(6) < 6);
        }
        assert_eq!(rng.below(0), 0);
    }

    #[test]
    fn sequence_wraps() {
        let mut src = SequenceSource::new(vec![0.1, 0.9]);
        assert!((src.next_f64() - 0.1).abs() < f64::EPSILON);
        assert!((src.next_f64() - 0.9).abs() < f64::EPSILON);
        assert!((src.next_f64() - 0.1).abs() < f64::EPSILON);
        assert_eq!(src.consumed(), 3);
    }

    #[test]
    fn sequence_clamps_out_of_range() {
        let mut src = SequenceSource::new(vec![1.0, -3.0]);
        assert!(src.next_f64() < 1.0);
        assert_eq!(src.next_f64(), 0.0);
    }

    #[test]
    fn d6_faces_replay_exactly() {
        let mut src = SequenceSource::d6_faces(&[1, 4, 6, 3]);
        let rolled: Vec<u32> = (0..4).map(|_| src.die(6)).collect();
        assert_eq!(rolled, vec![1, 4, 6, 3]);
    }

    #[test]
    fn empty_sequence_yields_zero() {
        let mut src = SequenceSource::default();
        assert_eq!(src.next_f64(), 0.0);
        assert_eq!(src.die(6), 1);
    }

    #[test]
    fn choose_distinct_has_no_duplicates() {
        let mut rng = StdRng::seed_from_u64(3);
        let items = ["a", "b", "c", "d"];
        for _ in 0..100 {
            let mut picked = choose_distinct(&items, 3, &mut rng);
            assert_eq!(picked.len(), 3);
            picked.sort();
            picked.dedup();
            assert_eq!(picked.len(), 3);
        }
    }

    #[test]
    fn choose_distinct_caps_at_len() {
        let mut rng = StdRng::seed_from_u64(3);
        let picked = choose_distinct(&[1, 2], 5, &mut rng);
        assert_eq!(picked.len(), 2);
    }

    #[test]
    fn seeded_rng_is_deterministic() {
        let mut a = StdRng::seed_from_u64(99);
        let mut b = StdRng::seed_from_u64(99);
        for _ in 0..20 {
            assert_eq!(a.die(6), b.die(6));
        }
    }
}
