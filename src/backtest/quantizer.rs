//! Risk-based child order sizing
//!
//! The base quantity risks a fixed percentage of current capital at the
//! market price, scaled by a multiplier, then clipped to the maximum child
//! order size before the strategy transform is applied.

use super::{BacktestConfig, ExecutionStrategy, SliceInputs};
use rand::RngCore;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Converts capital at risk into per-slice quantities
#[derive(Debug, Clone)]
pub struct OrderQuantizer {
    /// Percentage of capital risked per trade (2 = 2%)
    pub risk_per_trade: Decimal,
    /// Scale factor on the risk quantity
    pub qty_multiplier: Decimal,
    /// Largest child order allowed
    pub max_child_size: Decimal,
    /// Clip again after the strategy transform
    pub reclip: bool,
}

impl OrderQuantizer {
    /// Create a quantizer with the default multiplier and re-clipping on
    pub fn new(risk_per_trade: Decimal, max_child_size: Decimal) -> Self {
        Self {
            risk_per_trade,
            qty_multiplier: dec!(20),
            max_child_size,
            reclip: true,
        }
    }

    /// Create from BacktestConfig
    pub fn from_config(config: &BacktestConfig) -> Self {
        Self {
            risk_per_trade: config.risk_per_trade,
            qty_multiplier: config.qty_multiplier,
            max_child_size: config.max_child_size,
            reclip: config.reclip,
        }
    }

    /// Set the quantity multiplier
    pub fn with_multiplier(mut self, qty_multiplier: Decimal) -> Self {
        self.qty_multiplier = qty_multiplier;
        self
    }

    /// Enable or disable the post-transform clip
    pub fn with_reclip(mut self, reclip: bool) -> Self {
        self.reclip = reclip;
        self
    }

    /// Capital at risk; zero once capital is exhausted
    ///
    /// This and the sizing steps below return `None` when a value does not
    /// fit in a `Decimal`.
    pub fn risk_amount(&self, capital: Decimal) -> Option<Decimal> {
        let risk = capital.checked_mul(self.risk_per_trade)? / dec!(100);
        Some(risk.max(Decimal::ZERO))
    }

    /// Unclipped quantity: `risk / price * multiplier`
    pub fn base_quantity(&self, capital: Decimal, market_price: Decimal) -> Option<Decimal> {
        if market_price.is_zero() {
            return Some(Decimal::ZERO);
        }
        self.risk_amount(capital)?
            .checked_div(market_price)?
            .checked_mul(self.qty_multiplier)
    }

    /// Base quantity capped at the maximum child size
    pub fn clipped_quantity(&self, capital: Decimal, market_price: Decimal) -> Option<Decimal> {
        self.base_quantity(capital, market_price)
            .map(|qty| qty.min(self.max_child_size))
    }

    /// Final quantity for one slice
    pub fn quantize(
        &self,
        capital: Decimal,
        market_price: Decimal,
        strategy: &ExecutionStrategy,
        inputs: SliceInputs<'_>,
        rng: &mut dyn RngCore,
    ) -> Option<Decimal> {
        let clipped = self.clipped_quantity(capital, market_price)?;
        let qty = strategy.adjust(clipped, inputs, rng)?;

        if self.reclip {
            Some(qty.min(self.max_child_size))
        } else {
            Some(qty)
        }
    }
}

impl Default for OrderQuantizer {
    fn default() -> Self {
        Self {
            risk_per_trade: dec!(2),
            qty_multiplier: dec!(20),
            max_child_size: dec!(5000),
            reclip: true,
        }
    }
}
