//! Fill price and trade direction simulation
//!
//! A fill combines two pluggable models: a [`MarketModel`] that moves the
//! execution price away from the bar close, and a [`DecisionModel`] that
//! picks the trade direction. Both draw from a caller-supplied RNG.

use super::{Action, Slice, Trade};
use crate::data::PriceBar;
use rand::{Rng, RngCore};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Decimal places kept on prices and P&L
const PRICE_DP: u32 = 8;

/// Simulated execution relative to the market price
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceMove {
    /// Market price the move is measured from
    pub market_price: Decimal,
    /// Execution price minus market price
    pub price_change: Decimal,
}

impl PriceMove {
    /// Simulated execution price, `None` if it does not fit
    pub fn exec_price(&self) -> Option<Decimal> {
        self.market_price.checked_add(self.price_change)
    }
}

/// Produces execution prices for a bar
pub trait MarketModel: Send + Sync {
    /// Simulate the execution price for a fill at `bar`
    ///
    /// `None` when the move is not representable.
    fn execution_price(&self, bar: &PriceBar, rng: &mut dyn RngCore) -> Option<PriceMove>;

    /// Model name for logs
    fn name(&self) -> &'static str;
}

/// Chooses the trade direction for a bar
pub trait DecisionModel: Send + Sync {
    /// Decide BUY or SELL at `bar`
    fn decide(&self, bar: &PriceBar, rng: &mut dyn RngCore) -> Action;

    /// Model name for logs
    fn name(&self) -> &'static str;
}

/// Uniform price shock of up to `volatility` times the close, either way
#[derive(Debug, Clone)]
pub struct UniformShockMarket {
    /// Half-width of the shock as a fraction of price (0.15 = ±15%)
    pub volatility: Decimal,
}

impl UniformShockMarket {
    /// Create a market model with the given volatility bound
    pub fn new(volatility: Decimal) -> Self {
        Self { volatility }
    }
}

impl Default for UniformShockMarket {
    fn default() -> Self {
        Self {
            volatility: dec!(0.15),
        }
    }
}

impl MarketModel for UniformShockMarket {
    fn execution_price(&self, bar: &PriceBar, rng: &mut dyn RngCore) -> Option<PriceMove> {
        let draw = Decimal::try_from(rng.gen::<f64>()).unwrap_or(dec!(0.5));
        let shock = ((draw - dec!(0.5)) * dec!(2)).checked_mul(self.volatility)?;
        let price_change = shock.checked_mul(bar.close)?.round_dp(PRICE_DP);

        Some(PriceMove {
            market_price: bar.close,
            price_change,
        })
    }

    fn name(&self) -> &'static str {
        "uniform_shock"
    }
}

/// Fair coin between BUY and SELL
#[derive(Debug, Clone, Copy, Default)]
pub struct CoinFlipDecision;

impl DecisionModel for CoinFlipDecision {
    fn decide(&self, _bar: &PriceBar, rng: &mut dyn RngCore) -> Action {
        if rng.gen_bool(0.5) {
            Action::Buy
        } else {
            Action::Sell
        }
    }

    fn name(&self) -> &'static str {
        "coin_flip"
    }
}

/// Always trades the same direction
#[derive(Debug, Clone, Copy)]
pub struct FixedDecision(pub Action);

impl DecisionModel for FixedDecision {
    fn decide(&self, _bar: &PriceBar, _rng: &mut dyn RngCore) -> Action {
        self.0
    }

    fn name(&self) -> &'static str {
        "fixed"
    }
}

/// P&L of a fill against the market price, `None` on overflow
pub fn realized_pnl(action: Action, price_move: &PriceMove, qty: Decimal) -> Option<Decimal> {
    let gain = price_move.price_change.checked_mul(qty)?;
    let pnl = match action {
        Action::Buy => gain,
        Action::Sell => -gain,
    };
    Some(pnl.round_dp(PRICE_DP))
}

/// Turns a sized child order into a filled slice and trade record
pub struct ExecutionSimulator {
    market: Box<dyn MarketModel>,
    decision: Box<dyn DecisionModel>,
}

impl ExecutionSimulator {
    /// Create a simulator from explicit models
    pub fn new(market: Box<dyn MarketModel>, decision: Box<dyn DecisionModel>) -> Self {
        Self { market, decision }
    }

    /// Uniform shock market with a coin-flip decision
    pub fn with_volatility(volatility: Decimal) -> Self {
        Self::new(
            Box::new(UniformShockMarket::new(volatility)),
            Box::new(CoinFlipDecision),
        )
    }

    /// Replace the market model
    pub fn set_market_model(&mut self, market: Box<dyn MarketModel>) {
        self.market = market;
    }

    /// Replace the decision model
    pub fn set_decision_model(&mut self, decision: Box<dyn DecisionModel>) {
        self.decision = decision;
    }

    /// Names of the active models
    pub fn model_names(&self) -> (&'static str, &'static str) {
        (self.market.name(), self.decision.name())
    }

    /// Fill `qty` at `bar`
    ///
    /// The price move is drawn before the direction. `None` when the fill
    /// price or P&L overflows.
    pub fn execute(
        &self,
        bar: &PriceBar,
        qty: Decimal,
        rng: &mut dyn RngCore,
    ) -> Option<(Slice, Trade)> {
        let price_move = self.market.execution_price(bar, rng)?;
        let action = self.decision.decide(bar, rng);
        let pnl = realized_pnl(action, &price_move, qty)?;

        let slice = Slice {
            timestamp: bar.time.clone(),
            exec_price: price_move.exec_price()?,
            qty,
            price_change: price_move.price_change,
            pnl,
        };
        let trade = Trade {
            time: bar.time.clone(),
            action,
            pnl,
        };
        Some((slice, trade))
    }
}

impl Default for ExecutionSimulator {
    fn default() -> Self {
        Self::with_volatility(dec!(0.15))
    }
}
