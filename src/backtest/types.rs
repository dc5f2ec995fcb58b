//! Backtest types

use crate::data::BarTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Trade direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Action {
    /// Profit when the fill is above the market price
    Buy,
    /// Profit when the fill is below the market price
    Sell,
}

/// One scheduled execution
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Slice {
    /// Time of the sampled bar
    pub timestamp: BarTime,
    /// Simulated execution price
    #[serde(rename = "price")]
    pub exec_price: Decimal,
    /// Child order quantity
    pub qty: Decimal,
    /// Execution price minus market price
    pub price_change: Decimal,
    /// Realized P&L of the fill
    pub pnl: Decimal,
}

/// Trade record derived from a slice
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trade {
    /// Time of the sampled bar
    pub time: BarTime,
    /// Trade direction
    pub action: Action,
    /// Realized P&L
    pub pnl: Decimal,
}

/// Input rejected before any simulation work
#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    /// Price series is empty
    #[error("No data provided")]
    NoData,
    /// Slice count below one
    #[error("sliceCount must be at least 1")]
    InvalidSliceCount,
    /// Slice count above the configured ceiling
    #[error("sliceCount {requested} exceeds the maximum of {max}")]
    TooManySlices {
        /// Requested slice count
        requested: usize,
        /// Configured ceiling
        max: usize,
    },
    /// Starting capital not positive
    #[error("startingCapital must be positive, got {0}")]
    NonPositiveCapital(Decimal),
    /// Risk percentage negative
    #[error("riskPerTrade must not be negative, got {0}")]
    NegativeRisk(Decimal),
    /// Child order cap not positive
    #[error("maxChildSize must be positive, got {0}")]
    NonPositiveMaxChildSize(Decimal),
    /// Quantity multiplier negative
    #[error("quantity multiplier must not be negative, got {0}")]
    NegativeMultiplier(Decimal),
    /// Volatility bound negative
    #[error("volatility must not be negative, got {0}")]
    NegativeVolatility(Decimal),
    /// A bar's close cannot be used for sizing
    #[error("bar {index} has non-positive close {close}")]
    NonPositiveClose {
        /// Position in the series
        index: usize,
        /// Offending close price
        close: Decimal,
    },
    /// Sizing or P&L left the representable range
    #[error("arithmetic overflow at slice {slice}; inputs are too large")]
    Overflow {
        /// Slice being processed
        slice: usize,
    },
}
