use std::collections::BTreeMap;

use rand::Rng;
use serde::Serialize;

use crate::Error;

pub type TireSize = i32;

pub const DEFAULT_MIN_SIZE: TireSize = 26;
pub const DEFAULT_MAX_SIZE: TireSize = 29;

/// Closed range `[min, max]` tire sizes are drawn from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TireSizeRange {
    min: TireSize,
    max: TireSize,
}

impl TireSizeRange {
    pub fn new(min: TireSize, max: TireSize) -> Result<Self, Error> {
        if min > max {
            return Err(Error::Range(format!(
                "tire size minimum {} is greater than maximum {}",
                min, max
            )));
        }
        Ok(Self { min, max })
    }

    pub fn min(&self) -> TireSize {
        self.min
    }

    pub fn max(&self) -> TireSize {
        self.max
    }

    pub fn contains(&self, size: TireSize) -> bool {
        self.min <= size && size <= self.max
    }
}

impl Default for TireSizeRange {
    fn default() -> Self {
        Self {
            min: DEFAULT_MIN_SIZE,
            max: DEFAULT_MAX_SIZE,
        }
    }
}

pub fn generate_tire_sizes<R: Rng + ?Sized>(
    rng: &mut R,
    count: usize,
    range: TireSizeRange,
) -> Vec<TireSize> {
    (0..count)
        .map(|_| rng.gen_range(range.min..=range.max))
        .collect()
}

/// Number of occurrences of each drawn size, keyed in ascending order.
pub fn histogram(sizes: &[TireSize]) -> BTreeMap<TireSize, usize> {
    let mut counts = BTreeMap::new();
    for size in sizes {
        *counts.entry(*size).or_insert(0) += 1;
    }
    counts
}
