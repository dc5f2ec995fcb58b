//! Backtesting module
//!
//! Samples a price series into slices, sizes each child order by risk and
//! strategy, simulates the fill, and aggregates P&L and equity statistics

mod analytics;
mod equity;
mod execution_model;
mod quantizer;
mod scheduler;
mod simulator;
mod strategy;
mod types;

pub use analytics::{
    BacktestResult, BacktestSummary, DrawdownTracker, PerformanceAggregator, RunState,
};
pub use equity::{segment_equity_curve, EquityPoint, EquitySegment, Trend};
pub use execution_model::{
    realized_pnl, CoinFlipDecision, DecisionModel, ExecutionSimulator, FixedDecision, MarketModel,
    PriceMove, UniformShockMarket,
};
pub use quantizer::OrderQuantizer;
pub use scheduler::{SliceScheduler, VolumeProfile};
pub use simulator::BacktestSimulator;
pub use strategy::{ExecutionStrategy, SliceInputs};
pub use types::{Action, Slice, Trade, ValidationError};

use crate::config::BacktestSettings;
use crate::data::PriceBar;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Backtest configuration
#[derive(Debug, Clone, PartialEq)]
pub struct BacktestConfig {
    /// Slicing strategy
    pub strategy: ExecutionStrategy,
    /// Initial capital
    pub starting_capital: Decimal,
    /// Percentage of capital risked per slice
    pub risk_per_trade: Decimal,
    /// Number of slices
    pub slice_count: usize,
    /// Largest slice count accepted
    pub max_slice_count: usize,
    /// Maximum child order quantity
    pub max_child_size: Decimal,
    /// Scale factor on the risk quantity
    pub qty_multiplier: Decimal,
    /// Half-width of the execution price shock as a fraction of price
    pub volatility: Decimal,
    /// Clip again after the strategy transform
    pub reclip: bool,
}

impl Default for BacktestConfig {
    fn default() -> Self {
        Self {
            strategy: ExecutionStrategy::Twap,
            starting_capital: dec!(10000),
            risk_per_trade: dec!(2),
            slice_count: 20,
            max_slice_count: 100_000,
            max_child_size: dec!(5000),
            qty_multiplier: dec!(20),
            volatility: dec!(0.15),
            reclip: true,
        }
    }
}

impl BacktestConfig {
    /// Create from configured defaults
    pub fn from_settings(settings: &BacktestSettings) -> Self {
        Self {
            strategy: settings.strategy.clone(),
            starting_capital: settings.starting_capital,
            risk_per_trade: settings.risk_per_trade,
            slice_count: settings.slice_count,
            max_slice_count: settings.max_slice_count,
            max_child_size: settings.max_child_size,
            qty_multiplier: settings.qty_multiplier,
            volatility: settings.volatility,
            reclip: settings.reclip,
        }
    }

    /// Set the strategy
    pub fn with_strategy(mut self, strategy: ExecutionStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Set the slice count
    pub fn with_slice_count(mut self, slice_count: usize) -> Self {
        self.slice_count = slice_count;
        self
    }

    /// Check the configuration and series before simulating
    pub fn validate(&self, bars: &[PriceBar]) -> Result<(), ValidationError> {
        if bars.is_empty() {
            return Err(ValidationError::NoData);
        }
        if self.slice_count == 0 {
            return Err(ValidationError::InvalidSliceCount);
        }
        if self.slice_count > self.max_slice_count {
            return Err(ValidationError::TooManySlices {
                requested: self.slice_count,
                max: self.max_slice_count,
            });
        }
        if self.starting_capital <= Decimal::ZERO {
            return Err(ValidationError::NonPositiveCapital(self.starting_capital));
        }
        if self.risk_per_trade < Decimal::ZERO {
            return Err(ValidationError::NegativeRisk(self.risk_per_trade));
        }
        if self.max_child_size <= Decimal::ZERO {
            return Err(ValidationError::NonPositiveMaxChildSize(self.max_child_size));
        }
        if self.qty_multiplier < Decimal::ZERO {
            return Err(ValidationError::NegativeMultiplier(self.qty_multiplier));
        }
        if self.volatility < Decimal::ZERO {
            return Err(ValidationError::NegativeVolatility(self.volatility));
        }
        if let Some((index, bar)) = bars
            .iter()
            .enumerate()
            .find(|(_, bar)| bar.close <= Decimal::ZERO)
        {
            return Err(ValidationError::NonPositiveClose {
                index,
                close: bar.close,
            });
        }
        Ok(())
    }
}
