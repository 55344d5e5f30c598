//! Statistical-layer errors.

use edgelab_core::{BacktestError, ConfigError};
use thiserror::Error;

/// Any failure the statistical layer can produce.
#[derive(Debug, Error)]
pub enum StatsError {
    #[error("sample too small: {n} observations, need at least {required}")]
    SampleTooSmall { n: usize, required: usize },

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Backtest(#[from] BacktestError),

    #[error("cancelled")]
    Cancelled,
}
