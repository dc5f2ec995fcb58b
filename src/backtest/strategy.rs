//! Execution strategies
//!
//! Each strategy reshapes the clipped risk quantity for one slice:
//! - TWAP splits it evenly across all slices
//! - VWAP reweights the split by the slice's share of synthetic volume
//! - Iceberg discloses a random 20-100% fraction of it
//! - Anything else passes it through unchanged

use super::VolumeProfile;
use rand::{Rng, RngCore};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// Smallest fraction of an iceberg order shown per slice
const ICEBERG_MIN_FRACTION: Decimal = dec!(0.2);
/// Width of the iceberg fraction draw
const ICEBERG_FRACTION_RANGE: Decimal = dec!(0.8);

/// Order slicing strategy
///
/// Parsed case-sensitively from the wire names `TWAP`, `VWAP` and `ICEBERG`.
/// Unknown names are kept as [`ExecutionStrategy::Other`] and leave the
/// quantity untouched.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ExecutionStrategy {
    /// Time-weighted average price
    #[default]
    Twap,
    /// Volume-weighted average price
    Vwap,
    /// Randomly sized partial disclosure
    Iceberg,
    /// Unrecognized name, quantity passes through
    Other(String),
}

/// Per-slice inputs to a strategy adjustment
#[derive(Debug, Clone, Copy)]
pub struct SliceInputs<'a> {
    /// Position of the slice in the schedule
    pub index: usize,
    /// Total slices in the run
    pub slice_count: usize,
    /// Synthetic volume, present for VWAP runs
    pub volumes: Option<&'a VolumeProfile>,
}

impl ExecutionStrategy {
    /// Wire name
    pub fn name(&self) -> &str {
        match self {
            ExecutionStrategy::Twap => "TWAP",
            ExecutionStrategy::Vwap => "VWAP",
            ExecutionStrategy::Iceberg => "ICEBERG",
            ExecutionStrategy::Other(name) => name,
        }
    }

    /// Whether the run must draw a volume profile first
    pub fn needs_volume_profile(&self) -> bool {
        matches!(self, ExecutionStrategy::Vwap)
    }

    /// Apply the strategy transform to an already clipped quantity
    ///
    /// Returns `None` when the adjusted quantity does not fit in a `Decimal`.
    pub fn adjust(
        &self,
        qty: Decimal,
        inputs: SliceInputs<'_>,
        rng: &mut dyn RngCore,
    ) -> Option<Decimal> {
        match self {
            ExecutionStrategy::Twap => twap_qty(qty, inputs),
            ExecutionStrategy::Vwap => vwap_qty(qty, inputs),
            ExecutionStrategy::Iceberg => iceberg_qty(qty, rng),
            ExecutionStrategy::Other(_) => Some(qty),
        }
    }
}

fn twap_qty(qty: Decimal, inputs: SliceInputs<'_>) -> Option<Decimal> {
    qty.checked_div(Decimal::from(inputs.slice_count.max(1)))
}

fn vwap_qty(qty: Decimal, inputs: SliceInputs<'_>) -> Option<Decimal> {
    // Without a profile every slice has the average share, i.e. 1 / slice_count
    match inputs.volumes {
        Some(volumes) => {
            let scale = volumes
                .share(inputs.index)
                .checked_mul(Decimal::from(inputs.slice_count))?;
            qty.checked_mul(scale)
        }
        None => Some(qty),
    }
}

fn iceberg_qty(qty: Decimal, rng: &mut dyn RngCore) -> Option<Decimal> {
    let draw = Decimal::try_from(rng.gen::<f64>()).unwrap_or(Decimal::ONE);
    qty.checked_mul(ICEBERG_MIN_FRACTION + draw * ICEBERG_FRACTION_RANGE)
}

impl From<String> for ExecutionStrategy {
    fn from(name: String) -> Self {
        match name.as_str() {
            "TWAP" => ExecutionStrategy::Twap,
            "VWAP" => ExecutionStrategy::Vwap,
            "ICEBERG" => ExecutionStrategy::Iceberg,
            _ => ExecutionStrategy::Other(name),
        }
    }
}

impl From<ExecutionStrategy> for String {
    fn from(strategy: ExecutionStrategy) -> Self {
        match strategy {
            ExecutionStrategy::Other(name) => name,
            known => known.name().to_string(),
        }
    }
}

impl FromStr for ExecutionStrategy {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(ExecutionStrategy::from(s.to_string()))
    }
}

impl fmt::Display for ExecutionStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
