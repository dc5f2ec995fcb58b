//! Property tests for backtest invariants
//!
//! Uses proptest to verify:
//! 1. Scheduling: exactly S in-range, non-decreasing indices
//! 2. Sizing: child quantity never exceeds the maximum child size
//! 3. Accounting: total P&L equals the sum of trade P&L and the capital change
//! 4. Win rate stays within 0..=100
//! 5. Equity segments rebuild the curve and share their boundaries

use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;
use rust_decimal::Decimal;
use slice_backtester::backtest::{
    segment_equity_curve, BacktestConfig, BacktestSimulator, EquityPoint, ExecutionStrategy,
    SliceScheduler,
};
use slice_backtester::data::{BarTime, PriceBar};

// ── Strategies (proptest) ────────────────────────────────────────────

fn arb_strategy() -> impl Strategy<Value = ExecutionStrategy> {
    prop_oneof![
        Just(ExecutionStrategy::Twap),
        Just(ExecutionStrategy::Vwap),
        Just(ExecutionStrategy::Iceberg),
        Just(ExecutionStrategy::Other("MARKET".to_string())),
    ]
}

fn arb_series() -> impl Strategy<Value = Vec<PriceBar>> {
    prop::collection::vec(1u32..100_000, 1..40).prop_map(|cents| {
        cents
            .into_iter()
            .enumerate()
            .map(|(i, c)| PriceBar::flat(i as i64, Decimal::new(c as i64, 2)))
            .collect()
    })
}

fn arb_config() -> impl Strategy<Value = BacktestConfig> {
    (arb_strategy(), 1usize..60, 1u32..100_000, 0u32..1_000, 1u32..10_000).prop_map(
        |(strategy, slice_count, capital, risk_bps, max_child)| BacktestConfig {
            strategy,
            slice_count,
            starting_capital: Decimal::from(capital),
            risk_per_trade: Decimal::new(risk_bps as i64, 2),
            max_child_size: Decimal::from(max_child),
            ..Default::default()
        },
    )
}

// ── 1. Scheduling ────────────────────────────────────────────────────

proptest! {
    #[test]
    fn indices_cover_series(len in 1usize..500, slices in 1usize..500) {
        let indices = SliceScheduler::new(slices).indices(len);

        prop_assert_eq!(indices.len(), slices);
        prop_assert_eq!(indices[0], 0);
        prop_assert!(indices.iter().all(|&i| i < len));
        prop_assert!(indices.windows(2).all(|w| w[0] <= w[1]));
        for (i, &idx) in indices.iter().enumerate() {
            prop_assert_eq!(idx, i * len / slices);
        }
    }

    #[test]
    fn volume_shares_sum_to_one(slices in 1usize..200, seed in any::<u64>()) {
        let mut rng = StdRng::seed_from_u64(seed);
        let profile = SliceScheduler::new(slices).volume_profile(&mut rng);

        let sum: Decimal = (0..slices).map(|i| profile.share(i)).sum();
        prop_assert!((sum - Decimal::ONE).abs() < Decimal::new(1, 20));
    }
}

// ── 2-4. Runs ────────────────────────────────────────────────────────

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn run_invariants(bars in arb_series(), config in arb_config(), seed in any::<u64>()) {
        let max_child = config.max_child_size;
        let slice_count = config.slice_count;
        let result = BacktestSimulator::new(config).run_seeded(&bars, seed).unwrap();

        prop_assert_eq!(result.slices.len(), slice_count);
        prop_assert_eq!(result.trades.len(), slice_count);
        prop_assert!(result.slices.iter().all(|s| s.qty <= max_child));
        prop_assert!(result.slices.iter().all(|s| s.qty >= Decimal::ZERO));

        let sum: Decimal = result.trades.iter().map(|t| t.pnl).sum();
        prop_assert_eq!(result.total_pnl(), sum);
        prop_assert_eq!(
            result.total_pnl(),
            result.summary.final_capital - result.summary.starting_capital
        );

        let win_rate = result.win_rate();
        prop_assert!(win_rate >= Decimal::ZERO && win_rate <= Decimal::ONE_HUNDRED);
    }

    #[test]
    fn same_seed_is_deterministic(bars in arb_series(), config in arb_config(), seed in any::<u64>()) {
        let simulator = BacktestSimulator::new(config);
        let a = simulator.run_seeded(&bars, seed).unwrap();
        let b = simulator.run_seeded(&bars, seed).unwrap();

        prop_assert_eq!(a.slices, b.slices);
        prop_assert_eq!(a.summary, b.summary);
    }
}

// ── 5. Equity segmentation ───────────────────────────────────────────

proptest! {
    #[test]
    fn segments_rebuild_curve(values in prop::collection::vec(-50i64..50, 2..80)) {
        let points: Vec<EquityPoint> = values
            .iter()
            .enumerate()
            .map(|(i, v)| EquityPoint { time: BarTime::Unix(i as i64), value: Decimal::from(*v) })
            .collect();

        let segments = segment_equity_curve(&points);
        prop_assert!(segments.iter().all(|s| s.points.len() >= 2));

        for pair in segments.windows(2) {
            prop_assert_eq!(pair[0].points.last(), pair[1].points.first());
        }

        let mut rebuilt: Vec<EquityPoint> = Vec::new();
        for (i, segment) in segments.iter().enumerate() {
            let skip = usize::from(i > 0);
            rebuilt.extend(segment.points.iter().skip(skip).cloned());
        }
        prop_assert_eq!(rebuilt, points);
    }
}
