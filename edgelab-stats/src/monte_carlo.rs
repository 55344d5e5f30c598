//! Monte Carlo null distribution: does the strategy beat random trading?
//!
//! Each trial builds a random signal series with the same entry/exit count
//! as the observed strategy and runs it through the real backtest engine on
//! the same bars, cost model, and sizer. The empirical p-value is the
//! fraction of simulated total returns at least as large as the observed
//! one. Trials are independently seeded and run on the rayon pool.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use edgelab_core::{
    run_backtest, ConfigError, CostModel, EngineConfig, PositionSizer, PriceBar, RandomMode,
    RandomSignals, SignalSeries, SignalSource,
};

use crate::cancel::CancelToken;
use crate::error::StatsError;
use crate::metrics::{mean_f64, std_dev};

/// Configuration for a Monte Carlo run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonteCarloConfig {
    /// Number of random trials (default 1000; must be at least 1).
    pub n_trials: usize,
    /// Base seed for per-trial seed derivation.
    pub seed: u64,
}

impl Default for MonteCarloConfig {
    fn default() -> Self {
        Self {
            n_trials: 1_000,
            seed: 42,
        }
    }
}

/// Result of a Monte Carlo null simulation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonteCarloResult {
    /// Total return of the observed strategy.
    pub observed_return: f64,
    /// Fraction of simulated returns >= the observed return.
    pub p_value: f64,
    pub null_mean: f64,
    pub null_std: f64,
    pub n_trials: usize,
    /// Entry/exit counts matched by every trial.
    pub matched_entries: usize,
    pub matched_exits: usize,
}

/// Run the Monte Carlo null for an observed signal series.
///
/// The observed strategy is backtested once to fix the reference return;
/// each trial then reruns the engine with trade-count-matched random
/// signals. Cancellation is checked per trial.
pub fn monte_carlo_null(
    bars: &[PriceBar],
    observed: &SignalSeries,
    engine_config: &EngineConfig,
    cost_model: &dyn CostModel,
    sizer: &dyn PositionSizer,
    config: &MonteCarloConfig,
    cancel: &CancelToken,
) -> Result<MonteCarloResult, StatsError> {
    if config.n_trials == 0 {
        return Err(ConfigError::ZeroTrials.into());
    }

    let observed_run = run_backtest(bars, observed, engine_config, cost_model, sizer)?;
    let observed_return = observed_run.total_return();

    let entries = observed.entry_count();
    let exits = observed.exit_count();
    let template = RandomSignals::new(
        RandomMode::MatchedCount { entries, exits },
        config.seed,
        0,
    );

    let null_returns: Vec<f64> = (0..config.n_trials)
        .into_par_iter()
        .map(|trial| -> Result<Option<f64>, StatsError> {
            if cancel.is_cancelled() {
                return Ok(None);
            }
            let signals = template.for_trial(trial as u64).signals(bars);
            let run = run_backtest(bars, &signals, engine_config, cost_model, sizer)?;
            Ok(Some(run.total_return()))
        })
        .collect::<Result<Option<Vec<f64>>, StatsError>>()?
        .ok_or(StatsError::Cancelled)?;

    let at_least = null_returns
        .iter()
        .filter(|r| **r >= observed_return)
        .count();

    Ok(MonteCarloResult {
        observed_return,
        p_value: at_least as f64 / config.n_trials as f64,
        null_mean: mean_f64(&null_returns),
        null_std: std_dev(&null_returns),
        n_trials: config.n_trials,
        matched_entries: entries,
        matched_exits: exits,
    })
}
