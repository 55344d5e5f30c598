//! Position sizing policies.
//!
//! A sizer proposes a quantity for a new long given available cash and the
//! fill price. The engine may scale the proposal down if the total debit
//! (notional plus entry cost) exceeds cash; it never scales up.

use serde::{Deserialize, Serialize};

/// Context handed to a sizer alongside cash and price.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SizingContext {
    /// Bar index at which the fill occurs.
    pub bar: usize,
    /// Current mark-to-market equity (equals cash when flat).
    pub equity: f64,
}

/// Proposes an order quantity for a new long position.
///
/// Returned quantities are fractional (shares need not be whole). A
/// non-positive or non-finite proposal means "do not enter".
pub trait PositionSizer: Send + Sync {
    fn size_order(&self, cash: f64, price: f64, ctx: &SizingContext) -> f64;
}

/// Invest a fixed fraction of available cash. `FixedFraction::all_in()` is
/// the 100% variant used by the buy-and-hold baseline.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FixedFraction {
    pub fraction: f64,
}

impl FixedFraction {
    pub fn new(fraction: f64) -> Self {
        Self { fraction }
    }

    pub fn all_in() -> Self {
        Self { fraction: 1.0 }
    }
}

impl PositionSizer for FixedFraction {
    fn size_order(&self, cash: f64, price: f64, _ctx: &SizingContext) -> f64 {
        if price <= 0.0 || !price.is_finite() {
            return 0.0;
        }
        (cash * self.fraction) / price
    }
}

/// Invest a fixed dollar amount per trade, capped by available cash.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FixedDollar {
    pub amount: f64,
}

impl FixedDollar {
    pub fn new(amount: f64) -> Self {
        Self { amount }
    }
}

impl PositionSizer for FixedDollar {
    fn size_order(&self, cash: f64, price: f64, _ctx: &SizingContext) -> f64 {
        if price <= 0.0 || !price.is_finite() {
            return 0.0;
        }
        self.amount.min(cash) / price
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx() -> SizingContext {
        SizingContext {
            bar: 0,
            equity: 100_000.0,
        }
    }

    #[test]
    fn fixed_fraction_all_in() {
        let qty = FixedFraction::all_in().size_order(100_000.0, 50.0, &ctx());
        assert!((qty - 2_000.0).abs() < 1e-10);
    }

    #[test]
    fn fixed_fraction_half() {
        let qty = FixedFraction::new(0.5).size_order(100_000.0, 100.0, &ctx());
        assert!((qty - 500.0).abs() < 1e-10);
    }

    #[test]
    fn fixed_dollar_caps_at_cash() {
        let qty = FixedDollar::new(50_000.0).size_order(10_000.0, 100.0, &ctx());
        assert!((qty - 100.0).abs() < 1e-10);
    }

    #[test]
    fn zero_price_yields_zero_quantity() {
        assert_eq!(FixedFraction::all_in().size_order(100.0, 0.0, &ctx()), 0.0);
        assert_eq!(FixedDollar::new(100.0).size_order(100.0, -1.0, &ctx()), 0.0);
    }
}
