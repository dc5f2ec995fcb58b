//! Price series types

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Bar timestamp as supplied by the caller
///
/// Charting front-ends use either unix seconds or a `yyyy-mm-dd` label, so
/// both are accepted and echoed back unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BarTime {
    /// Unix timestamp
    Unix(i64),
    /// Free-form label, usually an ISO date
    Label(String),
}

impl fmt::Display for BarTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BarTime::Unix(ts) => write!(f, "{}", ts),
            BarTime::Label(label) => f.write_str(label),
        }
    }
}

impl From<&str> for BarTime {
    fn from(label: &str) -> Self {
        BarTime::Label(label.to_string())
    }
}

impl From<String> for BarTime {
    fn from(label: String) -> Self {
        BarTime::Label(label)
    }
}

impl From<i64> for BarTime {
    fn from(ts: i64) -> Self {
        BarTime::Unix(ts)
    }
}

/// One OHLC bar of the input series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceBar {
    /// Bar time
    pub time: BarTime,
    /// Open price
    pub open: Decimal,
    /// High price
    pub high: Decimal,
    /// Low price
    pub low: Decimal,
    /// Close price
    pub close: Decimal,
}

impl PriceBar {
    /// Create a flat bar where every price equals `close`
    pub fn flat(time: impl Into<BarTime>, close: Decimal) -> Self {
        Self {
            time: time.into(),
            open: close,
            high: close,
            low: close,
            close,
        }
    }
}
