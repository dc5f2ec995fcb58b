//! Synthetic OHLC random walk
//!
//! Produces daily bars for demo runs: each close moves up to ±4% from the
//! open and wicks extend up to 2% beyond the body. Prices are rounded to cents.

use super::PriceBar;
use chrono::{Duration, NaiveDate};
use rand::{Rng, RngCore};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Maximum close-to-open move as a fraction of price (total range, ±half)
const MAX_BODY_MOVE: Decimal = dec!(0.08);
/// Maximum wick length as a fraction of price
const MAX_WICK: Decimal = dec!(0.02);

/// Demo assets with their starting prices
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Asset {
    /// Gold/USD
    Gold,
    /// Silver/USD
    Silver,
    /// Oil/USD
    Oil,
}

impl Asset {
    /// Starting price of the walk
    pub fn start_price(&self) -> Decimal {
        match self {
            Asset::Gold => dec!(2000),
            Asset::Silver => dec!(25),
            Asset::Oil => dec!(80),
        }
    }

    /// Display symbol
    pub fn symbol(&self) -> &'static str {
        match self {
            Asset::Gold => "Gold/USD",
            Asset::Silver => "Silver/USD",
            Asset::Oil => "Oil/USD",
        }
    }
}

/// Random walk generator for daily bars
pub struct RandomWalkGenerator {
    start_price: Decimal,
}

impl RandomWalkGenerator {
    /// Create a generator starting at the asset's reference price
    pub fn new(asset: Asset) -> Self {
        Self {
            start_price: asset.start_price(),
        }
    }

    /// Create a generator with an explicit starting price
    pub fn with_start_price(start_price: Decimal) -> Self {
        Self { start_price }
    }

    /// Generate one bar per day from `from` to `to` inclusive
    ///
    /// Returns an empty series when `to` is before `from`.
    pub fn generate(
        &self,
        from: NaiveDate,
        to: NaiveDate,
        rng: &mut dyn RngCore,
    ) -> Vec<PriceBar> {
        let mut bars = Vec::new();
        let mut price = self.start_price;
        let mut date = from;

        while date <= to {
            let open = price;
            let body = (unit_draw(rng) - dec!(0.5)) * MAX_BODY_MOVE * price;
            let close = (open + body).round_dp(2);
            let high = open.max(close) + (unit_draw(rng) * MAX_WICK * price).round_dp(2);
            let low = open.min(close) - (unit_draw(rng) * MAX_WICK * price).round_dp(2);

            bars.push(PriceBar {
                time: date.format("%Y-%m-%d").to_string().into(),
                open,
                high,
                low,
                close,
            });

            price = close;
            date += Duration::days(1);
        }

        bars
    }
}

fn unit_draw(rng: &mut dyn RngCore) -> Decimal {
    Decimal::try_from(rng.gen::<f64>()).unwrap_or(dec!(0.5))
}
