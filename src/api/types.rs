//! Request and response bodies for the backtest endpoint

use crate::backtest::{
    BacktestConfig, BacktestResult, EquitySegment, ExecutionStrategy, Slice, Trade,
};
use crate::config::BacktestSettings;
use crate::data::PriceBar;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Body of `POST /api/backtest`
///
/// Every numeric field falls back to the configured default when omitted.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BacktestRequest {
    /// Price series, required and non-empty
    #[serde(default)]
    pub data: Option<Vec<PriceBar>>,
    #[serde(default)]
    pub strategy: Option<ExecutionStrategy>,
    #[serde(default)]
    pub starting_capital: Option<Decimal>,
    /// Percent of capital
    #[serde(default)]
    pub risk_per_trade: Option<Decimal>,
    #[serde(default)]
    pub slice_count: Option<usize>,
    #[serde(default)]
    pub max_child_size: Option<Decimal>,
    #[serde(default)]
    pub seed: Option<u64>,
}

impl BacktestRequest {
    /// Merge request overrides onto configured defaults
    pub fn to_config(&self, defaults: &BacktestSettings) -> BacktestConfig {
        let base = BacktestConfig::from_settings(defaults);
        BacktestConfig {
            strategy: self.strategy.clone().unwrap_or(base.strategy),
            starting_capital: self.starting_capital.unwrap_or(base.starting_capital),
            risk_per_trade: self.risk_per_trade.unwrap_or(base.risk_per_trade),
            slice_count: self.slice_count.unwrap_or(base.slice_count),
            max_child_size: self.max_child_size.unwrap_or(base.max_child_size),
            ..base
        }
    }

    /// Price series, empty when absent
    pub fn bars(&self) -> &[PriceBar] {
        self.data.as_deref().unwrap_or_default()
    }
}

/// Successful response body
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BacktestResponse {
    pub slices: Vec<Slice>,
    pub trades: Vec<Trade>,
    #[serde(rename = "totalPnL")]
    pub total_pnl: Decimal,
    /// Percentage, 0 to 100
    pub win_rate: Decimal,
    pub equity_segments: Vec<EquitySegment>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl From<BacktestResult> for BacktestResponse {
    fn from(result: BacktestResult) -> Self {
        Self {
            total_pnl: result.total_pnl(),
            win_rate: result.win_rate(),
            slices: result.slices,
            trades: result.trades,
            equity_segments: result.equity_segments,
            seed: result.seed,
        }
    }
}

/// Error response body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}
