//! PriceBar — the fundamental market data unit.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// OHLCV bar for a single instrument on a single day.
///
/// Bars are immutable once ingested. The engine validates every bar before
/// simulating: a bar that fails `is_sane()` aborts the run with a `DataError`
/// rather than being silently traded through.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceBar {
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: u64,
}

impl PriceBar {
    /// Basic OHLCV sanity check: positive prices, high/low envelope intact,
    /// non-zero volume.
    pub fn is_sane(&self) -> bool {
        self.sanity_error().is_none()
    }

    /// Like [`is_sane`](Self::is_sane) but names the first failing check.
    pub fn sanity_error(&self) -> Option<&'static str> {
        let prices = [self.open, self.high, self.low, self.close];
        if prices.iter().any(|p| !p.is_finite()) {
            return Some("non-finite price");
        }
        if prices.iter().any(|p| *p <= 0.0) {
            return Some("non-positive price");
        }
        if self.high < self.low {
            return Some("high below low");
        }
        if self.high < self.open || self.high < self.close {
            return Some("high below open/close");
        }
        if self.low > self.open || self.low > self.close {
            return Some("low above open/close");
        }
        if self.volume == 0 {
            return Some("zero volume");
        }
        None
    }
}
