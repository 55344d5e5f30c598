//! Domain types: bars, signals, trades, equity curves.

pub mod bar;
pub mod equity;
pub mod signal;
pub mod trade;

pub use bar::PriceBar;
pub use equity::{EquityCurve, EquityPoint};
pub use signal::{Signal, SignalSeries};
pub use trade::Trade;
