//! Prometheus metrics
//!
//! Recording is a no-op until an exporter is installed.

use crate::backtest::{BacktestSummary, ValidationError};
use rust_decimal::prelude::ToPrimitive;
use std::time::Duration;

/// Run-level metric types
#[derive(Debug, Clone, Copy)]
pub enum RunMetric {
    /// Completed runs
    Runs,
    /// Runs rejected by validation
    Rejections,
    /// Wall time of a run
    Duration,
    /// Win rate of the latest run
    LastWinRate,
    /// Total P&L of the latest run
    LastTotalPnl,
    /// API requests by status
    HttpRequests,
}

impl RunMetric {
    /// Exported metric name
    pub fn name(self) -> &'static str {
        match self {
            RunMetric::Runs => "backtest_runs_total",
            RunMetric::Rejections => "backtest_rejections_total",
            RunMetric::Duration => "backtest_run_duration_ms",
            RunMetric::LastWinRate => "backtest_last_win_rate",
            RunMetric::LastTotalPnl => "backtest_last_total_pnl",
            RunMetric::HttpRequests => "backtest_http_requests_total",
        }
    }
}

/// Record a completed run
pub fn record_run(duration: Duration, summary: &BacktestSummary) {
    let elapsed_ms = duration.as_secs_f64() * 1000.0;

    metrics::counter!(RunMetric::Runs.name()).increment(1);
    metrics::histogram!(RunMetric::Duration.name()).record(elapsed_ms);
    metrics::gauge!(RunMetric::LastWinRate.name())
        .set(summary.win_rate.to_f64().unwrap_or_default());
    metrics::gauge!(RunMetric::LastTotalPnl.name())
        .set(summary.total_pnl.to_f64().unwrap_or_default());

    tracing::debug!(
        metric = RunMetric::Duration.name(),
        value_ms = elapsed_ms,
        "Recording run"
    );
}

/// Record a run rejected before simulation
pub fn record_rejection(err: &ValidationError) {
    metrics::counter!(RunMetric::Rejections.name()).increment(1);
    tracing::warn!(error = %err, "Backtest rejected");
}

/// Record an API request outcome
pub fn record_request(status: u16) {
    metrics::counter!(RunMetric::HttpRequests.name(), "status" => status.to_string())
        .increment(1);
}
