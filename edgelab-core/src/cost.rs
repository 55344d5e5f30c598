//! Transaction cost models.
//!
//! A cost model prices one *side* of a trade (entry or exit) as a function of
//! the traded notional. The engine calls it once per fill and debits the
//! result from cash, so total round-trip cost is entry cost plus exit cost.

use serde::{Deserialize, Serialize};

/// Per-side transaction cost as a function of traded notional.
///
/// Implementations must return a finite, non-negative value; the engine
/// rejects negative costs with a configuration error.
pub trait CostModel: Send + Sync {
    /// Cost in account currency for trading `notional` (price × quantity).
    fn cost(&self, notional: f64) -> f64;
}

/// Zero-cost execution. Useful for theoretical baselines and exactness tests.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Frictionless;

impl CostModel for Frictionless {
    fn cost(&self, _notional: f64) -> f64 {
        0.0
    }
}

/// Proportional commission, slippage, and half-spread, each as a fraction of
/// notional.
///
/// `rate = commission_rate + slippage_rate + half_spread_rate`, applied per
/// side. A 10 bps commission with 5 bps slippage is
/// `PerSideCost::new(0.0010, 0.0005)`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PerSideCost {
    pub commission_rate: f64,
    pub slippage_rate: f64,
    pub half_spread_rate: f64,
}

impl PerSideCost {
    pub fn new(commission_rate: f64, slippage_rate: f64) -> Self {
        Self {
            commission_rate,
            slippage_rate,
            half_spread_rate: 0.0,
        }
    }

    /// Add a bid/ask half-spread charge on top of commission and slippage.
    pub fn with_half_spread(mut self, half_spread_rate: f64) -> Self {
        self.half_spread_rate = half_spread_rate;
        self
    }

    pub fn total_rate(&self) -> f64 {
        self.commission_rate + self.slippage_rate + self.half_spread_rate
    }
}

impl CostModel for PerSideCost {
    fn cost(&self, notional: f64) -> f64 {
        notional.abs() * self.total_rate()
    }
}
