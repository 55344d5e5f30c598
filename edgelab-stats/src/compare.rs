//! Multi-strategy comparison: run the full evaluation pipeline for each
//! strategy over identical bars, then test every pair against each other.
//!
//! A strategy that errors out is isolated as `StrategyOutcome::Failed` and
//! excluded from the pairwise matrix; it never aborts the batch.
//! Cancellation does abort, with no partial report.

use serde::Serialize;

use edgelab_core::{
    run_backtest, CostModel, EngineConfig, PositionSizer, PriceBar, SignalSource,
};

use crate::bootstrap::{bootstrap_ci, BootstrapConfig, BootstrapResult};
use crate::cancel::CancelToken;
use crate::correction::{bonferroni, CorrectionResult};
use crate::error::StatsError;
use crate::metrics::{sharpe_ratio, PerformanceMetrics};
use crate::monte_carlo::{monte_carlo_null, MonteCarloConfig, MonteCarloResult};
use crate::ttest::{compare_samples, one_sample_t_test, TestOutcome};

/// Configuration for a comparison batch.
#[derive(Debug, Clone)]
pub struct ComparisonConfig {
    pub engine: EngineConfig,
    /// Annualization base for metrics (252 for daily bars).
    pub bars_per_year: f64,
    /// Annual risk-free rate for Sharpe and Sortino.
    pub risk_free_rate: f64,
    pub bootstrap: BootstrapConfig,
    pub monte_carlo: MonteCarloConfig,
    /// Significance level for the pairwise family.
    pub alpha: f64,
}

impl Default for ComparisonConfig {
    fn default() -> Self {
        Self {
            engine: EngineConfig::default(),
            bars_per_year: 252.0,
            risk_free_rate: 0.0,
            bootstrap: BootstrapConfig::default(),
            monte_carlo: MonteCarloConfig::default(),
            alpha: 0.05,
        }
    }
}

/// Full evaluation of one strategy.
#[derive(Debug, Clone, Serialize)]
pub struct StrategyReport {
    pub name: String,
    pub metrics: PerformanceMetrics,
    /// One-sample t-test of per-bar returns against zero.
    pub profitability: TestOutcome,
    /// Bootstrap CI for the annualized Sharpe ratio.
    pub sharpe_ci: BootstrapResult,
    /// Does the strategy beat trade-count-matched random signals?
    pub monte_carlo: MonteCarloResult,
}

/// Per-strategy outcome: a full report, or the error that stopped it.
#[derive(Debug, Clone, Serialize)]
pub enum StrategyOutcome {
    Evaluated(StrategyReport),
    Failed { name: String, error: String },
}

impl StrategyOutcome {
    pub fn name(&self) -> &str {
        match self {
            StrategyOutcome::Evaluated(r) => &r.name,
            StrategyOutcome::Failed { name, .. } => name,
        }
    }

    pub fn as_evaluated(&self) -> Option<&StrategyReport> {
        match self {
            StrategyOutcome::Evaluated(r) => Some(r),
            StrategyOutcome::Failed { .. } => None,
        }
    }
}

/// One cell of the pairwise significance matrix.
#[derive(Debug, Clone, Serialize)]
pub struct PairwiseComparison {
    pub strategy_a: String,
    pub strategy_b: String,
    /// Two-sample test over per-bar returns, method chosen automatically.
    pub outcome: TestOutcome,
}

/// The complete comparison report.
#[derive(Debug, Clone, Serialize)]
pub struct ComparisonReport {
    pub strategies: Vec<StrategyOutcome>,
    pub pairwise: Vec<PairwiseComparison>,
    /// Bonferroni over the conclusive pairwise p-values.
    pub corrections: Vec<CorrectionResult>,
    pub alpha: f64,
}

/// Evaluate and cross-compare a set of strategies over the same bars.
///
/// Every strategy sees the same bars, cost model, and sizer. Per-strategy
/// failures are recorded and skipped; cancellation aborts the whole batch.
pub fn compare_strategies(
    bars: &[PriceBar],
    strategies: &[(&str, &dyn SignalSource)],
    cost_model: &dyn CostModel,
    sizer: &dyn PositionSizer,
    config: &ComparisonConfig,
    cancel: &CancelToken,
) -> Result<ComparisonReport, StatsError> {
    let mut outcomes: Vec<StrategyOutcome> = Vec::with_capacity(strategies.len());
    // Per-bar returns of the evaluated strategies, for the pairwise tests.
    let mut returns: Vec<(String, Vec<f64>)> = Vec::new();

    for (name, source) in strategies {
        if cancel.is_cancelled() {
            return Err(StatsError::Cancelled);
        }
        match evaluate_strategy(name, *source, bars, cost_model, sizer, config, cancel) {
            Ok((report, per_bar)) => {
                returns.push((report.name.clone(), per_bar));
                outcomes.push(StrategyOutcome::Evaluated(report));
            }
            Err(StatsError::Cancelled) => return Err(StatsError::Cancelled),
            Err(err) => outcomes.push(StrategyOutcome::Failed {
                name: name.to_string(),
                error: err.to_string(),
            }),
        }
    }

    let mut pairwise = Vec::new();
    for i in 0..returns.len() {
        for j in i + 1..returns.len() {
            if cancel.is_cancelled() {
                return Err(StatsError::Cancelled);
            }
            let (name_a, returns_a) = &returns[i];
            let (name_b, returns_b) = &returns[j];
            let outcome = match compare_samples(returns_a, returns_b) {
                Ok(outcome) => outcome,
                Err(StatsError::Cancelled) => return Err(StatsError::Cancelled),
                Err(err) => TestOutcome::Indeterminate {
                    reason: err.to_string(),
                },
            };
            pairwise.push(PairwiseComparison {
                strategy_a: name_a.clone(),
                strategy_b: name_b.clone(),
                outcome,
            });
        }
    }

    let family: Vec<(String, f64)> = pairwise
        .iter()
        .filter_map(|pair| {
            pair.outcome.as_conclusive().map(|r| {
                (
                    format!("{} vs {}", pair.strategy_a, pair.strategy_b),
                    r.p_value,
                )
            })
        })
        .collect();
    let corrections = bonferroni(&family, config.alpha);

    Ok(ComparisonReport {
        strategies: outcomes,
        pairwise,
        corrections,
        alpha: config.alpha,
    })
}

fn evaluate_strategy(
    name: &str,
    source: &dyn SignalSource,
    bars: &[PriceBar],
    cost_model: &dyn CostModel,
    sizer: &dyn PositionSizer,
    config: &ComparisonConfig,
    cancel: &CancelToken,
) -> Result<(StrategyReport, Vec<f64>), StatsError> {
    let signals = source.signals(bars);
    let run = run_backtest(bars, &signals, &config.engine, cost_model, sizer)?;

    let metrics = PerformanceMetrics::compute(
        &run.equity,
        &run.trades,
        config.bars_per_year,
        config.risk_free_rate,
    );
    let per_bar = run.equity.per_bar_returns();

    let profitability = one_sample_t_test(&per_bar)?;

    let bars_per_year = config.bars_per_year;
    let risk_free_rate = config.risk_free_rate;
    let sharpe_ci = bootstrap_ci(
        &per_bar,
        |sample| sharpe_ratio(sample, bars_per_year, risk_free_rate),
        &config.bootstrap,
        cancel,
    )?;

    let monte_carlo = monte_carlo_null(
        bars,
        &signals,
        &config.engine,
        cost_model,
        sizer,
        &config.monte_carlo,
        cancel,
    )?;

    Ok((
        StrategyReport {
            name: name.to_string(),
            metrics,
            profitability,
            sharpe_ci,
            monte_carlo,
        },
        per_bar,
    ))
}
