//! Slice scheduling over the price series

use rand::{Rng, RngCore};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Lower bound of the synthetic volume draw; weights land in [0.5, 1.5)
const VOLUME_FLOOR: Decimal = dec!(0.5);

/// Maps slices onto bar indices
#[derive(Debug, Clone, Copy)]
pub struct SliceScheduler {
    slice_count: usize,
}

impl SliceScheduler {
    /// Create a scheduler for `slice_count` slices
    pub fn new(slice_count: usize) -> Self {
        Self { slice_count }
    }

    /// Bar index for each slice: `floor(i * len / slice_count)`
    ///
    /// Indices repeat when there are more slices than bars.
    pub fn indices(&self, series_len: usize) -> Vec<usize> {
        if self.slice_count == 0 {
            return vec![];
        }
        let n = series_len as u128;
        let s = self.slice_count as u128;
        (0..self.slice_count)
            .map(|i| (i as u128 * n / s) as usize)
            .collect()
    }

    /// Draw one synthetic volume weight per slice
    pub fn volume_profile(&self, rng: &mut dyn RngCore) -> VolumeProfile {
        let weights = (0..self.slice_count)
            .map(|_| Decimal::try_from(rng.gen::<f64>()).unwrap_or(VOLUME_FLOOR) + VOLUME_FLOOR)
            .collect();
        VolumeProfile::from_weights(weights).unwrap_or_else(|| VolumeProfile::uniform(1))
    }
}

/// Strictly positive per-slice weights standing in for traded volume
#[derive(Debug, Clone, PartialEq)]
pub struct VolumeProfile {
    weights: Vec<Decimal>,
    total: Decimal,
}

impl VolumeProfile {
    /// Build from explicit weights; `None` if empty or any weight is not positive
    pub fn from_weights(weights: Vec<Decimal>) -> Option<Self> {
        if weights.is_empty() || weights.iter().any(|w| *w <= Decimal::ZERO) {
            return None;
        }
        let total = weights.iter().copied().sum();
        Some(Self { weights, total })
    }

    /// Equal weights for `len` slices
    pub fn uniform(len: usize) -> Self {
        let len = len.max(1);
        Self {
            weights: vec![Decimal::ONE; len],
            total: Decimal::from(len),
        }
    }

    /// Weight of slice `index`, zero when out of range
    pub fn weight(&self, index: usize) -> Decimal {
        self.weights.get(index).copied().unwrap_or(Decimal::ZERO)
    }

    /// Fraction of total volume assigned to slice `index`
    pub fn share(&self, index: usize) -> Decimal {
        self.weight(index) / self.total
    }

    /// Sum of all weights
    pub fn total(&self) -> Decimal {
        self.total
    }

    /// Number of weights
    pub fn len(&self) -> usize {
        self.weights.len()
    }

    /// Always false for a constructed profile
    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }
}
