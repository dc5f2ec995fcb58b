//! Backtest simulator engine

use super::{
    segment_equity_curve, BacktestConfig, BacktestResult, DecisionModel, ExecutionSimulator,
    MarketModel, OrderQuantizer, PerformanceAggregator, SliceInputs, SliceScheduler,
    ValidationError,
};
use crate::data::PriceBar;
use crate::telemetry;
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use std::time::Instant;
use uuid::Uuid;

/// Runs backtest simulation
pub struct BacktestSimulator {
    config: BacktestConfig,
    execution: ExecutionSimulator,
}

impl BacktestSimulator {
    /// Create a new simulator with the uniform shock market and coin-flip decisions
    pub fn new(config: BacktestConfig) -> Self {
        let execution = ExecutionSimulator::with_volatility(config.volatility);
        Self { config, execution }
    }

    /// Replace the market model
    pub fn with_market_model(mut self, market: Box<dyn MarketModel>) -> Self {
        self.execution.set_market_model(market);
        self
    }

    /// Replace the decision model
    pub fn with_decision_model(mut self, decision: Box<dyn DecisionModel>) -> Self {
        self.execution.set_decision_model(decision);
        self
    }

    /// Run with a fresh RNG seeded from `seed`
    pub fn run_seeded(
        &self,
        bars: &[PriceBar],
        seed: u64,
    ) -> Result<BacktestResult, ValidationError> {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut result = self.run(bars, &mut rng)?;
        result.seed = Some(seed);
        Ok(result)
    }

    /// Run the backtest, drawing all randomness from `rng`
    ///
    /// Slices are processed strictly in schedule order since each slice is
    /// sized from the capital left by the previous ones. A run whose sizes or
    /// P&L leave the `Decimal` range stops with [`ValidationError::Overflow`].
    pub fn run(
        &self,
        bars: &[PriceBar],
        rng: &mut dyn RngCore,
    ) -> Result<BacktestResult, ValidationError> {
        if let Err(e) = self.config.validate(bars) {
            telemetry::record_rejection(&e);
            return Err(e);
        }

        let started = Instant::now();
        let run_id = Uuid::new_v4();
        let span = tracing::info_span!("backtest", %run_id, strategy = %self.config.strategy);
        let _guard = span.enter();

        let (market, decision) = self.execution.model_names();
        tracing::info!(
            bars = bars.len(),
            slices = self.config.slice_count,
            market,
            decision,
            "Starting backtest"
        );

        let scheduler = SliceScheduler::new(self.config.slice_count);
        let indices = scheduler.indices(bars.len());
        let volumes = if self.config.strategy.needs_volume_profile() {
            Some(scheduler.volume_profile(rng))
        } else {
            None
        };

        let overflow = |slice: usize| {
            let err = ValidationError::Overflow { slice };
            telemetry::record_rejection(&err);
            err
        };

        let quantizer = OrderQuantizer::from_config(&self.config);
        let mut aggregator = PerformanceAggregator::new(self.config.starting_capital);
        let mut slices = Vec::with_capacity(indices.len());
        let mut trades = Vec::with_capacity(indices.len());

        for (i, &idx) in indices.iter().enumerate() {
            let bar = &bars[idx];
            let inputs = SliceInputs {
                index: i,
                slice_count: self.config.slice_count,
                volumes: volumes.as_ref(),
            };
            let qty = quantizer
                .quantize(
                    aggregator.capital(),
                    bar.close,
                    &self.config.strategy,
                    inputs,
                    rng,
                )
                .ok_or_else(|| overflow(i))?;

            let (slice, trade) = self
                .execution
                .execute(bar, qty, rng)
                .ok_or_else(|| overflow(i))?;
            aggregator.record(&trade).ok_or_else(|| overflow(i))?;

            tracing::debug!(
                slice = i,
                bar = idx,
                %qty,
                price = %slice.exec_price,
                action = ?trade.action,
                pnl = %trade.pnl,
                "Slice filled"
            );

            slices.push(slice);
            trades.push(trade);
        }

        let summary = aggregator.summary();
        let equity_segments = segment_equity_curve(aggregator.equity_curve());

        tracing::info!(
            total_pnl = %summary.total_pnl,
            win_rate = %summary.win_rate,
            trades = summary.total_trades,
            segments = equity_segments.len(),
            "Backtest complete"
        );
        telemetry::record_run(started.elapsed(), &summary);

        Ok(BacktestResult {
            slices,
            trades,
            summary,
            equity_segments,
            seed: None,
        })
    }
}
