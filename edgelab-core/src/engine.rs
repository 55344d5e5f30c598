//! Bar-by-bar event loop over close prices.
//!
//! Three phases per bar:
//! 1. Execute the signal pending from the previous bar at this bar's close
//! 2. On the final bar, force-liquidate any open position at the close
//! 3. Mark-to-market: record the equity point for this bar
//!
//! A signal emitted at bar `t` fills at the close of bar `t+1` (one-bar lag,
//! no look-ahead). A signal on the final bar therefore never executes. The
//! engine is long-only with no pyramiding: Enter while long and Exit while
//! flat are ignored.

use crate::cost::CostModel;
use crate::domain::{EquityCurve, PriceBar, Signal, SignalSeries, Trade};
use crate::error::{BacktestError, ConfigError, DataError};
use crate::sizing::{PositionSizer, SizingContext};

/// Configuration for a single backtest run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EngineConfig {
    pub initial_capital: f64,
}

impl EngineConfig {
    pub fn new(initial_capital: f64) -> Self {
        Self { initial_capital }
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            initial_capital: 100_000.0,
        }
    }
}

/// Result of a complete backtest run.
///
/// The ledger identity holds exactly by construction:
/// `Σ trades.net_pnl == final_equity − initial_capital`.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct RunResult {
    /// Completed round-trip trades, in exit order.
    pub trades: Vec<Trade>,
    /// Equity at each bar close, one point per bar.
    pub equity: EquityCurve,
    pub initial_capital: f64,
    pub final_equity: f64,
    pub bar_count: usize,
}

impl RunResult {
    /// Total net profit across all trades.
    pub fn net_pnl(&self) -> f64 {
        self.trades.iter().map(|t| t.net_pnl).sum()
    }

    /// Total return as a fraction of initial capital.
    pub fn total_return(&self) -> f64 {
        (self.final_equity - self.initial_capital) / self.initial_capital
    }
}

// Open long position, tracked only while inside the loop.
struct OpenPosition {
    entry_bar: usize,
    entry_date: chrono::NaiveDate,
    entry_price: f64,
    quantity: f64,
    entry_cost: f64,
}

/// Run a long-only backtest over `bars` with timestamp-aligned `signals`.
///
/// Validates the inputs up front, then walks the bars executing each signal
/// at the close of the following bar. Any open position is liquidated at the
/// final close before the last equity point is recorded.
pub fn run_backtest(
    bars: &[PriceBar],
    signals: &SignalSeries,
    config: &EngineConfig,
    cost_model: &dyn CostModel,
    sizer: &dyn PositionSizer,
) -> Result<RunResult, BacktestError> {
    validate_inputs(bars, signals, config)?;

    let n = bars.len();
    let mut cash = config.initial_capital;
    let mut position: Option<OpenPosition> = None;
    let mut trades: Vec<Trade> = Vec::new();
    let mut equity = EquityCurve::with_capacity(n);

    // Signal pending execution at the current bar (emitted at the previous bar).
    let mut pending = Signal::Hold;

    for t in 0..n {
        let bar = &bars[t];
        let price = bar.close;

        // ─── Phase 1: execute the pending signal at this bar's close ───
        match pending {
            Signal::Enter if position.is_none() => {
                let ctx = SizingContext {
                    bar: t,
                    equity: cash,
                };
                let mut quantity = sizer.size_order(cash, price, &ctx);
                if quantity.is_finite() && quantity > 0.0 {
                    let mut notional = quantity * price;
                    let mut cost = checked_cost(cost_model, notional)?;

                    // Affordability limit, with float-rounding slack for
                    // rescales that land exactly on the boundary.
                    let limit = cash * (1.0 + 1e-12);

                    // Scale the order down if the total debit exceeds cash.
                    // One rescale is exact for costs proportional to
                    // notional; a fixed component does not shrink with the
                    // order, so keep reducing until the debit fits. For a
                    // non-decreasing cost model one extra step suffices.
                    let debit = notional + cost;
                    if debit > limit {
                        quantity *= cash / debit;
                        notional = quantity * price;
                        cost = checked_cost(cost_model, notional)?;
                    }
                    for _ in 0..4 {
                        if quantity <= 0.0 || notional + cost <= limit {
                            break;
                        }
                        quantity = (cash - cost) / price;
                        notional = quantity * price;
                        cost = checked_cost(cost_model, notional)?;
                    }

                    if quantity > 0.0 && notional + cost <= limit {
                        cash -= notional + cost;
                        position = Some(OpenPosition {
                            entry_bar: t,
                            entry_date: bar.date,
                            entry_price: price,
                            quantity,
                            entry_cost: cost,
                        });
                    }
                }
            }
            Signal::Exit => {
                if let Some(open) = position.take() {
                    let trade =
                        close_position(open, t, bar, cost_model, &mut cash, false)?;
                    trades.push(trade);
                }
            }
            _ => {}
        }

        // ─── Phase 2: end-of-run liquidation on the final bar ───
        if t == n - 1 {
            if let Some(open) = position.take() {
                let trade = close_position(open, t, bar, cost_model, &mut cash, true)?;
                trades.push(trade);
            }
        }

        // ─── Phase 3: mark-to-market ───
        let marked = match &position {
            Some(open) => cash + open.quantity * price,
            None => cash,
        };
        equity.push(bar.date, marked);

        pending = signals.signals[t];
    }

    let final_equity = equity
        .final_equity()
        .unwrap_or(config.initial_capital);

    Ok(RunResult {
        trades,
        equity,
        initial_capital: config.initial_capital,
        final_equity,
        bar_count: n,
    })
}

fn close_position(
    open: OpenPosition,
    exit_bar: usize,
    bar: &PriceBar,
    cost_model: &dyn CostModel,
    cash: &mut f64,
    forced: bool,
) -> Result<Trade, BacktestError> {
    let exit_price = bar.close;
    let notional = open.quantity * exit_price;
    let exit_cost = checked_cost(cost_model, notional)?;
    *cash += notional - exit_cost;

    let gross_pnl = (exit_price - open.entry_price) * open.quantity;
    let cost = open.entry_cost + exit_cost;

    Ok(Trade {
        entry_bar: open.entry_bar,
        entry_date: open.entry_date,
        entry_price: open.entry_price,
        exit_bar,
        exit_date: bar.date,
        exit_price,
        quantity: open.quantity,
        gross_pnl,
        cost,
        net_pnl: gross_pnl - cost,
        bars_held: exit_bar - open.entry_bar,
        forced_exit: forced,
    })
}

fn checked_cost(model: &dyn CostModel, notional: f64) -> Result<f64, BacktestError> {
    let cost = model.cost(notional);
    if cost < 0.0 || !cost.is_finite() {
        return Err(ConfigError::NegativeCost { notional, cost }.into());
    }
    Ok(cost)
}

fn validate_inputs(
    bars: &[PriceBar],
    signals: &SignalSeries,
    config: &EngineConfig,
) -> Result<(), BacktestError> {
    if config.initial_capital <= 0.0 || !config.initial_capital.is_finite() {
        return Err(ConfigError::NonPositiveCapital {
            value: config.initial_capital,
        }
        .into());
    }
    if bars.is_empty() {
        return Err(DataError::EmptyPriceSeries.into());
    }
    if bars.len() != signals.len() {
        return Err(DataError::LengthMismatch {
            bars: bars.len(),
            signals: signals.len(),
        }
        .into());
    }
    for (i, bar) in bars.iter().enumerate() {
        if let Some(reason) = bar.sanity_error() {
            return Err(DataError::MalformedBar {
                index: i,
                date: bar.date,
                reason,
            }
            .into());
        }
        if i > 0 && bar.date <= bars[i - 1].date {
            return Err(DataError::NonMonotonicTimestamp {
                index: i,
                date: bar.date,
            }
            .into());
        }
    }
    Ok(())
}
