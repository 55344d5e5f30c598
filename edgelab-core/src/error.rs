//! Error taxonomy: data errors, configuration errors, and the combined
//! engine error.
//!
//! Data and configuration problems fail the whole run before (or at) the bar
//! where they are detected; malformed input is never simulated.

use chrono::NaiveDate;
use thiserror::Error;

/// Malformed, misaligned, or non-monotonic price/signal input.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DataError {
    #[error("price series is empty")]
    EmptyPriceSeries,

    #[error("price/signal length mismatch: {bars} bars vs {signals} signals")]
    LengthMismatch { bars: usize, signals: usize },

    #[error("timestamps not strictly increasing at index {index} ({date})")]
    NonMonotonicTimestamp { index: usize, date: NaiveDate },

    #[error("malformed bar at index {index} ({date}): {reason}")]
    MalformedBar {
        index: usize,
        date: NaiveDate,
        reason: &'static str,
    },
}

/// Invalid parameters, detected before simulation starts.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("initial capital must be positive, got {value}")]
    NonPositiveCapital { value: f64 },

    #[error("cost model returned a negative cost {cost} for notional {notional}")]
    NegativeCost { notional: f64, cost: f64 },

    #[error("bootstrap resample count must be at least 1")]
    ZeroResamples,

    #[error("confidence level must be in (0, 1), got {value}")]
    InvalidConfidence { value: f64 },

    #[error("Monte Carlo trial count must be at least 1")]
    ZeroTrials,
}

/// Any failure the backtest engine can produce.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BacktestError {
    #[error(transparent)]
    Data(#[from] DataError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn data_error_messages_carry_context() {
        let err = DataError::MalformedBar {
            index: 7,
            date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            reason: "zero volume",
        };
        let msg = err.to_string();
        assert!(msg.contains("index 7"));
        assert!(msg.contains("zero volume"));
    }

    #[test]
    fn backtest_error_wraps_both_kinds() {
        let data: BacktestError = DataError::EmptyPriceSeries.into();
        let config: BacktestError = ConfigError::NonPositiveCapital { value: 0.0 }.into();
        assert!(matches!(data, BacktestError::Data(_)));
        assert!(matches!(config, BacktestError::Config(_)));
    }
}
