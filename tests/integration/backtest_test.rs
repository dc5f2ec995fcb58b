//! Backtest engine integration tests

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use slice_backtester::backtest::{
    Action, BacktestConfig, BacktestSimulator, ExecutionStrategy, FixedDecision, MarketModel,
    PriceMove, ValidationError,
};
use slice_backtester::data::{BarTime, PriceBar};

fn closes(values: &[i64]) -> Vec<PriceBar> {
    values
        .iter()
        .enumerate()
        .map(|(i, v)| PriceBar::flat(format!("2024-03-{:02}", i + 1), Decimal::from(*v)))
        .collect()
}

/// Fills at the close, no slippage
struct AtClose;

impl MarketModel for AtClose {
    fn execution_price(&self, bar: &PriceBar, _rng: &mut dyn rand::RngCore) -> Option<PriceMove> {
        Some(PriceMove {
            market_price: bar.close,
            price_change: Decimal::ZERO,
        })
    }

    fn name(&self) -> &'static str {
        "at_close"
    }
}

#[test]
fn test_reference_twap_scenario() {
    let bars = closes(&[100, 101, 102, 103, 104, 105, 106, 107, 108, 109]);
    let config = BacktestConfig {
        strategy: ExecutionStrategy::Twap,
        starting_capital: dec!(10000),
        risk_per_trade: dec!(2),
        slice_count: 5,
        max_child_size: dec!(5000),
        ..Default::default()
    };

    let result = BacktestSimulator::new(config).run_seeded(&bars, 17).unwrap();

    let prices_at: Vec<BarTime> = result.slices.iter().map(|s| s.timestamp.clone()).collect();
    let expected: Vec<BarTime> = [0, 2, 4, 6, 8].iter().map(|&i| bars[i].time.clone()).collect();
    assert_eq!(prices_at, expected);
    assert_eq!(result.trades.len(), 5);

    let wins = result.trades.iter().filter(|t| t.pnl > Decimal::ZERO).count();
    assert_eq!(result.win_rate(), Decimal::from(wins) * dec!(100) / dec!(5));
}

#[test]
fn test_zero_price_change_means_no_wins() {
    let bars = closes(&[50, 60, 70, 80]);
    let simulator = BacktestSimulator::new(BacktestConfig::default().with_slice_count(4))
        .with_market_model(Box::new(AtClose))
        .with_decision_model(Box::new(FixedDecision(Action::Sell)));

    let result = simulator.run_seeded(&bars, 0).unwrap();
    assert!(result.trades.iter().all(|t| t.pnl.is_zero()));
    assert_eq!(result.win_rate(), Decimal::ZERO);
    assert_eq!(result.total_pnl(), Decimal::ZERO);
    assert_eq!(result.summary.final_capital, dec!(10000));
}

#[test]
fn test_twap_quantity_with_flat_capital() {
    // Capital never moves, so every slice is clip(base) / S
    let bars = closes(&[100; 6]);
    let simulator = BacktestSimulator::new(BacktestConfig::default().with_slice_count(6))
        .with_market_model(Box::new(AtClose));

    let result = simulator.run_seeded(&bars, 5).unwrap();
    // 10000 * 2% / 100 * 20 = 40, / 6
    let expected = dec!(40) / dec!(6);
    assert!(result.slices.iter().all(|s| s.qty == expected));
}

#[test]
fn test_unknown_strategy_keeps_clipped_quantity() {
    let bars = closes(&[100, 100]);
    let config = BacktestConfig::default()
        .with_strategy(ExecutionStrategy::from("MARKET".to_string()))
        .with_slice_count(2);
    let simulator = BacktestSimulator::new(config).with_market_model(Box::new(AtClose));

    let result = simulator.run_seeded(&bars, 1).unwrap();
    assert_eq!(result.slices[0].qty, dec!(40));
    assert_eq!(result.slices[1].qty, dec!(40));
}

#[test]
fn test_iceberg_within_bounds() {
    let bars = closes(&[100; 50]);
    let config = BacktestConfig::default()
        .with_strategy(ExecutionStrategy::Iceberg)
        .with_slice_count(50);
    let simulator = BacktestSimulator::new(config).with_market_model(Box::new(AtClose));

    let result = simulator.run_seeded(&bars, 8).unwrap();
    // Between 20% and 100% of the clipped 40
    assert!(result
        .slices
        .iter()
        .all(|s| s.qty >= dec!(8) && s.qty <= dec!(40)));
}

#[test]
fn test_validation_errors() {
    let simulator = BacktestSimulator::new(BacktestConfig::default());
    assert_eq!(
        simulator.run_seeded(&[], 1).unwrap_err(),
        ValidationError::NoData
    );

    let bad_slices = BacktestSimulator::new(BacktestConfig::default().with_slice_count(0));
    assert_eq!(
        bad_slices.run_seeded(&closes(&[1]), 1).unwrap_err(),
        ValidationError::InvalidSliceCount
    );
}

#[test]
fn test_unix_timestamps_echoed() {
    let bars = vec![
        PriceBar::flat(1_709_251_200, dec!(10)),
        PriceBar::flat(1_709_337_600, dec!(11)),
    ];
    let result = BacktestSimulator::new(BacktestConfig::default().with_slice_count(2))
        .run_seeded(&bars, 4)
        .unwrap();

    assert_eq!(result.slices[1].timestamp, BarTime::Unix(1_709_337_600));
    assert_eq!(result.trades[0].time, BarTime::Unix(1_709_251_200));
}

#[test]
fn test_oversized_inputs_rejected_cleanly() {
    let bars = closes(&[100, 101, 102]);

    let config = BacktestConfig {
        risk_per_trade: Decimal::MAX,
        ..Default::default()
    };
    assert!(matches!(
        BacktestSimulator::new(config).run_seeded(&bars, 1),
        Err(ValidationError::Overflow { slice: 0 })
    ));

    let config = BacktestConfig::default().with_slice_count(1 << 40);
    assert!(matches!(
        BacktestSimulator::new(config).run_seeded(&bars, 1),
        Err(ValidationError::TooManySlices { .. })
    ));
}
