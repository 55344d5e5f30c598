//! A completed round-trip trade with full cost accounting.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A complete round-trip trade record.
///
/// Created by the engine when a long position closes; immutable thereafter.
/// `cost` is the sum of entry-side and exit-side transaction costs, so
/// `net_pnl = gross_pnl − cost` and the ledger identity
/// `Σ net_pnl == final_equity − initial_capital` holds exactly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trade {
    pub entry_bar: usize,
    pub entry_date: NaiveDate,
    pub entry_price: f64,

    pub exit_bar: usize,
    pub exit_date: NaiveDate,
    pub exit_price: f64,

    pub quantity: f64,

    pub gross_pnl: f64,
    pub cost: f64,
    pub net_pnl: f64,

    pub bars_held: usize,
    /// True when the position was liquidated by the end-of-run policy rather
    /// than by an Exit signal.
    pub forced_exit: bool,
}

impl Trade {
    /// Return on the trade as a fraction of entry notional.
    pub fn return_pct(&self) -> f64 {
        if self.entry_price == 0.0 || self.quantity == 0.0 {
            return 0.0;
        }
        self.net_pnl / (self.entry_price * self.quantity)
    }

    pub fn is_winner(&self) -> bool {
        self.net_pnl > 0.0
    }
}
