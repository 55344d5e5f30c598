//! EquityCurve — mark-to-market account value, one point per bar.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A single (timestamp, equity) observation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EquityPoint {
    pub date: NaiveDate,
    pub equity: f64,
}

/// Ordered sequence of equity points, one per bar.
///
/// Invariant maintained by the engine: `equity_t = cash_t + qty_t × close_t`
/// for every t, and the first point equals the initial capital.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EquityCurve {
    points: Vec<EquityPoint>,
}

impl EquityCurve {
    pub fn with_capacity(n: usize) -> Self {
        Self {
            points: Vec::with_capacity(n),
        }
    }

    pub fn push(&mut self, date: NaiveDate, equity: f64) {
        self.points.push(EquityPoint { date, equity });
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn points(&self) -> &[EquityPoint] {
        &self.points
    }

    pub fn first_equity(&self) -> Option<f64> {
        self.points.first().map(|p| p.equity)
    }

    pub fn final_equity(&self) -> Option<f64> {
        self.points.last().map(|p| p.equity)
    }

    /// Equity values only, in bar order.
    pub fn values(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.equity).collect()
    }

    /// Simple per-bar percentage returns (length = len − 1).
    ///
    /// A non-positive predecessor yields a 0.0 return rather than a NaN.
    pub fn per_bar_returns(&self) -> Vec<f64> {
        if self.points.len() < 2 {
            return Vec::new();
        }
        self.points
            .windows(2)
            .map(|w| {
                if w[0].equity > 0.0 {
                    (w[1].equity - w[0].equity) / w[0].equity
                } else {
                    0.0
                }
            })
            .collect()
    }
}
