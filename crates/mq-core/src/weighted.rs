use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::rng::RandomSource;

/// One row of a weighted table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeightedEntry<T> {
    /// The item drawn when this row is selected.
    pub item: T,
    /// Relative weight. Zero means the row is listed but never drawn.
    pub weight: u32,
}

/// An ordered list of weighted items with a positive total weight.
///
/// Selection walks exact integer cumulative weights, so there is no rounding
/// boundary at which the wrong row (or no row) could be returned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    try_from = "Vec<WeightedEntry<T>>",
    into = "Vec<WeightedEntry<T>>",
    bound(
        serialize = "T: Serialize + Clone",
        deserialize = "T: Deserialize<'de>"
    )
)]
pub struct WeightedTable<T> {
    entries: Vec<WeightedEntry<T>>,
    total: u64,
}

impl<T> WeightedTable<T> {
    /// Build a table from `(item, weight)` pairs.
    ///
    /// Fails when the table is empty or every weight is zero.
    pub fn new(pairs: impl IntoIterator<Item = (T, u32)>) -> CoreResult<Self> {
        Self::from_entries(
            pairs
                .into_iter()
                .map(|(item, weight)| WeightedEntry { item, weight })
                .collect(),
        )
    }

    /// Build a table from explicit entries.
    pub fn from_entries(entries: Vec<WeightedEntry<T>>) -> CoreResult<Self> {
        if entries.is_empty() {
            return Err(CoreError::EmptyTable);
        }
        let total: u64 = entries.iter().map(|e| u64::from(e.weight)).sum();
        if total == 0 {
            return Err(CoreError::ZeroTotalWeight {
                entries: entries.len(),
            });
        }
        Ok(Self { entries, total })
    }

    /// Number of rows, including zero-weight rows.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always false: empty tables cannot be constructed.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of all weights.
    pub fn total_weight(&self) -> u64 {
        self.total
    }

    /// Iterate over the rows in order.
    pub fn entries(&self) -> impl Iterator<Item = &WeightedEntry<T>> {
        self.entries.iter()
    }

    /// Draw one item.
    pub fn pick(&self, rng: &mut impl RandomSource) -> CoreResult<&T> {
        self.pick_filtered(rng, |_| true)
    }

    /// Draw one item among those accepted by `eligible`.
    ///
    /// The filter runs before the weights are summed, so an ineligible row is
    /// never drawn whatever its listed weight.
    pub fn pick_filtered(
        &self,
        rng: &mut impl RandomSource,
        eligible: impl Fn(&T) -> bool,
    ) -> CoreResult<&T> {
        let candidates: Vec<&WeightedEntry<T>> = self
            .entries
            .iter()
            .filter(|e| e.weight > 0 && eligible(&e.item))
            .collect();
        let total: u64 = candidates.iter().map(|e| u64::from(e.weight)).sum();
        if total == 0 {
            return Err(CoreError::NoEligibleEntries);
        }

        let mut roll = rng.below(total);
        for entry in &candidates {
            let weight = u64::from(entry.weight);
            if roll < weight {
                return Ok(&entry.item);
            }
            roll -= weight;
        }
        Err(CoreError::NoEligibleEntries)
    }
}

impl<T> TryFrom<Vec<WeightedEntry<T>>> for WeightedTable<T> {
    type Error = CoreError;

    fn try_from(entries: Vec<WeightedEntry<T>>) -> Result<Self, Self::Error> {
        Self::from_entries(entries)
    }
}

impl<T> From<WeightedTable<T>> for Vec<WeightedEntry<T>> {
    fn from(table: WeightedTable<T>) -> Self {
        table.entries
    }
}

/// Draw from `table`, optionally restricted to items accepted by `filter`.
pub fn weighted_pick<'a, T>(
    table: &'a WeightedTable<T>,
    filter: Option<&dyn Fn(&T) -> bool>,
    rng: &mut impl RandomSource,
) -> CoreResult<&'a T> {
    match filter {
        Some(filter) => table.pick_filtered(rng, filter),
        None => table.pick(rng),
    }
}
