//! EdgeLab Stats — statistical validation for backtest results.
//!
//! Answers one question about a strategy: is the observed edge real, or an
//! artifact of noise and repeated testing? The toolkit:
//! - Performance metrics (returns, Sharpe, Sortino, drawdown, VaR, trade stats)
//! - Hypothesis tests (one-sample t, Welch's t, Mann–Whitney U) with an
//!   automatic two-sample method chooser
//! - Effect sizes (Cohen's d, CLES) with conventional magnitude labels
//! - Percentile bootstrap confidence intervals for any statistic
//! - Monte Carlo null: the strategy against trade-count-matched random trading
//! - Multiple-comparison corrections (Bonferroni, Benjamini-Hochberg)
//! - A batch orchestrator that evaluates and cross-compares strategies
//!
//! All long computations are deterministic under rayon (per-trial BLAKE3
//! seeds) and cancellable via [`CancelToken`].

pub mod bootstrap;
pub mod cancel;
pub mod compare;
pub mod correction;
mod dist;
pub mod effect;
pub mod error;
pub mod metrics;
pub mod monte_carlo;
pub mod ttest;

pub use bootstrap::{bootstrap_ci, BootstrapConfig, BootstrapResult};
pub use cancel::CancelToken;
pub use compare::{
    compare_strategies, ComparisonConfig, ComparisonReport, PairwiseComparison,
    StrategyOutcome, StrategyReport,
};
pub use correction::{benjamini_hochberg, bonferroni, CorrectionResult};
pub use effect::{EffectMagnitude, EffectSize};
pub use error::StatsError;
pub use metrics::PerformanceMetrics;
pub use monte_carlo::{monte_carlo_null, MonteCarloConfig, MonteCarloResult};
pub use ttest::{
    compare_samples, mann_whitney_u, one_sample_t_test, welch_t_test, StatisticalResult,
    TestMethod, TestOutcome,
};

#[cfg(test)]
mod tests {
    use super::*;

    /// Compile-time check: everything that crosses a rayon closure or an
    /// application thread boundary is Send + Sync.
    #[allow(dead_code)]
    fn assert_send_sync() {
        fn require_send<T: Send>() {}
        fn require_sync<T: Sync>() {}

        require_send::<CancelToken>();
        require_sync::<CancelToken>();
        require_send::<StatsError>();
        require_sync::<StatsError>();

        require_send::<PerformanceMetrics>();
        require_sync::<PerformanceMetrics>();
        require_send::<StatisticalResult>();
        require_sync::<StatisticalResult>();
        require_send::<BootstrapResult>();
        require_sync::<BootstrapResult>();
        require_send::<MonteCarloResult>();
        require_sync::<MonteCarloResult>();
        require_send::<ComparisonReport>();
        require_sync::<ComparisonReport>();
    }
}
