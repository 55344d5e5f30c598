//! Percentile bootstrap confidence intervals for an arbitrary statistic.
//!
//! Resamples the input with replacement B times, evaluates a pluggable
//! statistic on each resample, and reads the CI off the empirical
//! distribution. Trials are independently seeded via BLAKE3 derivation and
//! run on the rayon pool, so sequential and parallel runs produce identical
//! output.

use rand::Rng;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use edgelab_core::{ConfigError, TrialSeeds};

use crate::cancel::CancelToken;
use crate::error::StatsError;
use crate::metrics::{mean_f64, percentile_sorted};

/// Configuration for a bootstrap run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BootstrapConfig {
    /// Number of resamples (default 10 000; must be at least 1).
    pub n_resamples: usize,
    /// Confidence level for the percentile CI (default 0.95).
    pub confidence: f64,
    /// Base seed for per-trial seed derivation.
    pub seed: u64,
}

impl Default for BootstrapConfig {
    fn default() -> Self {
        Self {
            n_resamples: 10_000,
            confidence: 0.95,
            seed: 42,
        }
    }
}

/// Result of a bootstrap analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BootstrapResult {
    /// The statistic evaluated on the original sample.
    pub observed: f64,
    pub ci_lower: f64,
    pub ci_upper: f64,
    /// Bootstrap estimate of bias: mean of the resampled statistics minus
    /// the observed value.
    pub bias: f64,
    pub confidence: f64,
    pub n_resamples: usize,
    pub sample_size: usize,
}

/// Percentile bootstrap CI for `statistic` over `data`.
///
/// The statistic must be a pure function of its sample. Cancellation is
/// checked per trial; a cancelled run returns `StatsError::Cancelled` with
/// no partial result.
pub fn bootstrap_ci<F>(
    data: &[f64],
    statistic: F,
    config: &BootstrapConfig,
    cancel: &CancelToken,
) -> Result<BootstrapResult, StatsError>
where
    F: Fn(&[f64]) -> f64 + Sync,
{
    if config.n_resamples == 0 {
        return Err(ConfigError::ZeroResamples.into());
    }
    if !(config.confidence > 0.0 && config.confidence < 1.0) {
        return Err(ConfigError::InvalidConfidence {
            value: config.confidence,
        }
        .into());
    }
    let n = data.len();
    if n < 2 {
        return Err(StatsError::SampleTooSmall { n, required: 2 });
    }

    let seeds = TrialSeeds::new(config.seed);
    let observed = statistic(data);

    let mut stats: Vec<f64> = (0..config.n_resamples)
        .into_par_iter()
        .map(|trial| {
            if cancel.is_cancelled() {
                return None;
            }
            let mut rng = seeds.rng_for("bootstrap", trial as u64);
            let resample: Vec<f64> = (0..n).map(|_| data[rng.gen_range(0..n)]).collect();
            Some(statistic(&resample))
        })
        .collect::<Option<Vec<f64>>>()
        .ok_or(StatsError::Cancelled)?;

    let bias = mean_f64(&stats) - observed;
    stats.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    let tail = (1.0 - config.confidence) / 2.0 * 100.0;
    Ok(BootstrapResult {
        observed,
        ci_lower: percentile_sorted(&stats, tail),
        ci_upper: percentile_sorted(&stats, 100.0 - tail),
        bias,
        confidence: config.confidence,
        n_resamples: config.n_resamples,
        sample_size: n,
    })
}
