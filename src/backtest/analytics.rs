//! Backtest analytics and reporting

use super::{EquityPoint, EquitySegment, Slice, Trade};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;

/// Running totals threaded through a run
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunState {
    /// Capital after all recorded trades
    pub capital: Decimal,
    /// Trades with positive P&L
    pub wins: usize,
    /// Trades recorded
    pub total_trades: usize,
}

impl RunState {
    /// Fresh state holding only the starting capital
    pub fn new(starting_capital: Decimal) -> Self {
        Self {
            capital: starting_capital,
            wins: 0,
            total_trades: 0,
        }
    }

    /// Apply one trade's P&L
    ///
    /// Leaves the state untouched and returns `None` if capital overflows.
    pub fn apply(&mut self, pnl: Decimal) -> Option<()> {
        self.capital = self.capital.checked_add(pnl)?;
        self.total_trades += 1;
        if pnl > Decimal::ZERO {
            self.wins += 1;
        }
        Some(())
    }

    /// Winning trades as a percentage, zero before any trade
    pub fn win_rate(&self) -> Decimal {
        if self.total_trades == 0 {
            return Decimal::ZERO;
        }
        Decimal::from(self.wins) * dec!(100) / Decimal::from(self.total_trades)
    }
}

/// Peak-to-trough tracking of the equity curve
#[derive(Debug, Clone)]
pub struct DrawdownTracker {
    /// Highest capital seen
    pub peak: Decimal,
    /// Largest absolute drop from a peak
    pub max_drawdown: Decimal,
    /// Largest drop as a fraction of its peak
    pub max_drawdown_pct: Decimal,
}

impl DrawdownTracker {
    /// Start tracking from the initial capital
    pub fn new(initial: Decimal) -> Self {
        Self {
            peak: initial,
            max_drawdown: Decimal::ZERO,
            max_drawdown_pct: Decimal::ZERO,
        }
    }

    /// Observe a new capital value, `None` if the drawdown overflows
    pub fn update(&mut self, capital: Decimal) -> Option<()> {
        if capital > self.peak {
            self.peak = capital;
            return Some(());
        }

        let drawdown = self.peak.checked_sub(capital)?;
        let pct = if self.peak > Decimal::ZERO {
            drawdown.checked_div(self.peak)?
        } else {
            Decimal::ZERO
        };

        self.max_drawdown = self.max_drawdown.max(drawdown);
        self.max_drawdown_pct = self.max_drawdown_pct.max(pct);
        Some(())
    }
}

/// Folds the ordered trade stream into run statistics
///
/// Trades must be recorded in chronological order: the capital seen by
/// slice `i` is the capital after trades `0..i`.
#[derive(Debug, Clone)]
pub struct PerformanceAggregator {
    starting_capital: Decimal,
    state: RunState,
    drawdown: DrawdownTracker,
    gross_profit: Decimal,
    gross_loss: Decimal,
    equity: Vec<EquityPoint>,
}

impl PerformanceAggregator {
    /// Create an aggregator for a run starting with `starting_capital`
    pub fn new(starting_capital: Decimal) -> Self {
        Self {
            starting_capital,
            state: RunState::new(starting_capital),
            drawdown: DrawdownTracker::new(starting_capital),
            gross_profit: Decimal::ZERO,
            gross_loss: Decimal::ZERO,
            equity: Vec::new(),
        }
    }

    /// Capital available to size the next slice
    pub fn capital(&self) -> Decimal {
        self.state.capital
    }

    /// Record the next trade
    ///
    /// Returns `None` and records nothing when a running total would
    /// overflow.
    pub fn record(&mut self, trade: &Trade) -> Option<()> {
        let mut state = self.state.clone();
        state.apply(trade.pnl)?;
        // Total P&L must stay representable too
        state.capital.checked_sub(self.starting_capital)?;

        let mut drawdown = self.drawdown.clone();
        drawdown.update(state.capital)?;

        let (gross_profit, gross_loss) = if trade.pnl > Decimal::ZERO {
            (self.gross_profit.checked_add(trade.pnl)?, self.gross_loss)
        } else {
            (self.gross_profit, self.gross_loss.checked_add(trade.pnl)?)
        };

        self.state = state;
        self.drawdown = drawdown;
        self.gross_profit = gross_profit;
        self.gross_loss = gross_loss;
        self.equity.push(EquityPoint {
            time: trade.time.clone(),
            value: self.state.capital,
        });
        Some(())
    }

    /// Capital after each recorded trade
    pub fn equity_curve(&self) -> &[EquityPoint] {
        &self.equity
    }

    /// Final statistics
    pub fn summary(&self) -> BacktestSummary {
        // Saturates when the ratio does not fit
        let profit_factor = if self.gross_loss < Decimal::ZERO {
            self.gross_profit
                .checked_div(self.gross_loss.abs())
                .unwrap_or(Decimal::MAX)
        } else {
            Decimal::ZERO
        };

        BacktestSummary {
            starting_capital: self.starting_capital,
            final_capital: self.state.capital,
            total_pnl: self.state.capital - self.starting_capital,
            win_rate: self.state.win_rate(),
            wins: self.state.wins,
            total_trades: self.state.total_trades,
            max_drawdown: self.drawdown.max_drawdown,
            max_drawdown_pct: self.drawdown.max_drawdown_pct,
            profit_factor,
        }
    }
}

/// Summary statistics from backtest
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BacktestSummary {
    /// Capital at the start of the run
    pub starting_capital: Decimal,
    /// Capital after the last trade
    pub final_capital: Decimal,
    /// Final minus starting capital
    pub total_pnl: Decimal,
    /// Win rate percentage (0-100)
    pub win_rate: Decimal,
    /// Trades with positive P&L
    pub wins: usize,
    /// Total number of trades
    pub total_trades: usize,
    /// Maximum drawdown (absolute)
    pub max_drawdown: Decimal,
    /// Maximum drawdown (fraction of peak)
    pub max_drawdown_pct: Decimal,
    /// Gross profit over gross loss, zero without losses
    pub profit_factor: Decimal,
}

/// Complete backtest results
#[derive(Debug, Clone)]
pub struct BacktestResult {
    /// One entry per scheduled slice
    pub slices: Vec<Slice>,
    /// Trade records, aligned with `slices`
    pub trades: Vec<Trade>,
    /// Summary statistics
    pub summary: BacktestSummary,
    /// Equity curve split into up/down runs
    pub equity_segments: Vec<EquitySegment>,
    /// Seed of the RNG stream, when the run was seeded
    pub seed: Option<u64>,
}

impl BacktestResult {
    /// Final minus starting capital
    pub fn total_pnl(&self) -> Decimal {
        self.summary.total_pnl
    }

    /// Win rate percentage
    pub fn win_rate(&self) -> Decimal {
        self.summary.win_rate
    }
}

impl BacktestSummary {
    /// Format as table for CLI output
    pub fn format_table(&self) -> String {
        let return_pct = self
            .total_pnl
            .checked_div(self.starting_capital)
            .and_then(|ratio| ratio.checked_mul(dec!(100)))
            .unwrap_or(Decimal::ZERO);
        let drawdown_pct = self
            .max_drawdown_pct
            .checked_mul(dec!(100))
            .unwrap_or(Decimal::MAX);

        format!(
            r#"
══════════════════════════════════════════════════════
               BACKTEST RESULTS
══════════════════════════════════════════════════════

PERFORMANCE
───────────────────────────────────────────────────────
Total P&L:        {:+.2} ({:+.2}%)
Final Capital:    {:.2}
Max Drawdown:     {:.2} ({:.2}%)
Win Rate:         {:.1}%
Profit Factor:    {:.2}

ACTIVITY
───────────────────────────────────────────────────────
Total Trades:     {}
Winning Trades:   {}
══════════════════════════════════════════════════════
"#,
            self.total_pnl,
            return_pct,
            self.final_capital,
            self.max_drawdown,
            drawdown_pct,
            self.win_rate,
            self.profit_factor,
            self.total_trades,
            self.wins,
        )
    }
}
