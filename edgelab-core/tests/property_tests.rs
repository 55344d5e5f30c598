//! Property tests for engine accounting invariants.
//!
//! Uses proptest to verify:
//! 1. Ledger identity — Σ net_pnl == final_equity − initial_capital
//! 2. Cash sanity — equity never goes NaN or negative under long-only rules
//! 3. Structural invariants — trade ordering, bar alignment, forced exits

use proptest::prelude::*;

use edgelab_core::{
    run_backtest, EngineConfig, FixedFraction, PerSideCost, PriceBar, Signal, SignalSeries,
};

// ── Strategies (proptest) ────────────────────────────────────────────

fn arb_closes() -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(10.0..500.0_f64, 2..120)
        .prop_map(|v| v.into_iter().map(|p| (p * 100.0).round() / 100.0).collect())
}

fn arb_signal() -> impl Strategy<Value = Signal> {
    prop_oneof![
        Just(Signal::Hold),
        Just(Signal::Enter),
        Just(Signal::Exit),
    ]
}

fn arb_cost_rate() -> impl Strategy<Value = f64> {
    0.0..0.005_f64
}

fn bars_from(closes: &[f64]) -> Vec<PriceBar> {
    let base = chrono::NaiveDate::from_ymd_opt(2022, 1, 3).unwrap();
    closes
        .iter()
        .enumerate()
        .map(|(i, &close)| PriceBar {
            date: base + chrono::Days::new(i as u64),
            open: close,
            high: close * 1.02,
            low: close * 0.98,
            close,
            volume: 100_000,
        })
        .collect()
}

proptest! {
    /// The ledger identity holds for arbitrary price paths, signal
    /// sequences, and cost rates.
    #[test]
    fn ledger_identity_always_holds(
        closes in arb_closes(),
        seed_signals in prop::collection::vec(arb_signal(), 120),
        rate in arb_cost_rate(),
    ) {
        let bars = bars_from(&closes);
        let signals = SignalSeries::new(seed_signals[..bars.len()].to_vec());
        let result = run_backtest(
            &bars,
            &signals,
            &EngineConfig::new(100_000.0),
            &PerSideCost::new(rate, 0.0),
            &FixedFraction::all_in(),
        ).unwrap();

        let gap = result.net_pnl() - (result.final_equity - result.initial_capital);
        prop_assert!(
            gap.abs() < 1e-6,
            "ledger identity violated by {gap}"
        );
    }

    /// Equity is always finite and positive under long-only, all-in sizing
    /// with positive prices.
    #[test]
    fn equity_stays_finite_and_positive(
        closes in arb_closes(),
        seed_signals in prop::collection::vec(arb_signal(), 120),
    ) {
        let bars = bars_from(&closes);
        let signals = SignalSeries::new(seed_signals[..bars.len()].to_vec());
        let result = run_backtest(
            &bars,
            &signals,
            &EngineConfig::new(100_000.0),
            &PerSideCost::new(0.001, 0.0005),
            &FixedFraction::all_in(),
        ).unwrap();

        for p in result.equity.points() {
            prop_assert!(p.equity.is_finite());
            prop_assert!(p.equity > 0.0, "equity went non-positive: {}", p.equity);
        }
    }

    /// Trades are well-formed: ordered bars, positive quantity, net pnl
    /// consistent with gross minus cost, and only the last trade may be a
    /// forced exit.
    #[test]
    fn trades_are_well_formed(
        closes in arb_closes(),
        seed_signals in prop::collection::vec(arb_signal(), 120),
    ) {
        let bars = bars_from(&closes);
        let signals = SignalSeries::new(seed_signals[..bars.len()].to_vec());
        let result = run_backtest(
            &bars,
            &signals,
            &EngineConfig::new(100_000.0),
            &PerSideCost::new(0.001, 0.0),
            &FixedFraction::all_in(),
        ).unwrap();

        for (i, trade) in result.trades.iter().enumerate() {
            prop_assert!(trade.quantity > 0.0);
            prop_assert!(trade.exit_bar >= trade.entry_bar);
            prop_assert!(trade.exit_bar < bars.len());
            prop_assert!((trade.net_pnl - (trade.gross_pnl - trade.cost)).abs() < 1e-9);
            prop_assert!(trade.cost >= 0.0);
            if trade.forced_exit {
                prop_assert_eq!(i, result.trades.len() - 1);
                prop_assert_eq!(trade.exit_bar, bars.len() - 1);
            }
        }
    }

    /// The equity curve has exactly one point per bar, dates aligned.
    #[test]
    fn equity_curve_aligned(
        closes in arb_closes(),
        seed_signals in prop::collection::vec(arb_signal(), 120),
    ) {
        let bars = bars_from(&closes);
        let signals = SignalSeries::new(seed_signals[..bars.len()].to_vec());
        let result = run_backtest(
            &bars,
            &signals,
            &EngineConfig::new(100_000.0),
            &PerSideCost::new(0.0005, 0.0),
            &FixedFraction::all_in(),
        ).unwrap();

        prop_assert_eq!(result.equity.len(), bars.len());
        for (p, bar) in result.equity.points().iter().zip(&bars) {
            prop_assert_eq!(p.date, bar.date);
        }
    }

    /// The first equity point always equals initial capital: the one-bar
    /// lag means no fill can happen on bar 0.
    #[test]
    fn first_equity_point_is_initial_capital(
        closes in arb_closes(),
        seed_signals in prop::collection::vec(arb_signal(), 120),
    ) {
        let bars = bars_from(&closes);
        let signals = SignalSeries::new(seed_signals[..bars.len()].to_vec());
        let result = run_backtest(
            &bars,
            &signals,
            &EngineConfig::new(100_000.0),
            &PerSideCost::new(0.001, 0.0),
            &FixedFraction::all_in(),
        ).unwrap();

        prop_assert_eq!(result.equity.first_equity(), Some(100_000.0));
    }

    /// Raising the cost rate never raises final equity for a fixed
    /// price/signal path.
    #[test]
    fn higher_costs_never_help(
        closes in arb_closes(),
        seed_signals in prop::collection::vec(arb_signal(), 120),
        rate in 0.0001..0.003_f64,
    ) {
        let bars = bars_from(&closes);
        let signals = SignalSeries::new(seed_signals[..bars.len()].to_vec());
        let config = EngineConfig::new(100_000.0);
        let sizer = FixedFraction::all_in();

        let low = run_backtest(&bars, &signals, &config, &PerSideCost::new(rate, 0.0), &sizer)
            .unwrap();
        let high = run_backtest(
            &bars,
            &signals,
            &config,
            &PerSideCost::new(rate * 2.0, 0.0),
            &sizer,
        )
        .unwrap();

        prop_assert!(high.final_equity <= low.final_equity + 1e-9);
    }
}
