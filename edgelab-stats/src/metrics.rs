//! Performance metrics — pure functions that compute strategy statistics.
//!
//! Every metric is a pure function: equity curve and/or trade list in, scalar
//! out. Degenerate inputs (no trades, constant equity, single bar) yield a
//! defined value, never a panic or NaN. The one deliberate exception is
//! `profit_factor`, which is `+inf` when there are winners and no losers.

use serde::{Deserialize, Serialize};

use edgelab_core::{EquityCurve, Trade};

/// Aggregate performance metrics for a single backtest run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformanceMetrics {
    pub total_return: f64,
    pub annualized_return: f64,
    pub annualized_volatility: f64,
    pub sharpe: f64,
    pub sortino: f64,
    /// Largest peak-to-trough decline, as a non-negative fraction.
    pub max_drawdown: f64,
    /// Empirical 5th percentile of per-bar returns.
    pub var_95: f64,
    pub win_rate: f64,
    pub profit_factor: f64,
    pub trade_count: usize,
    pub max_consecutive_wins: usize,
    pub max_consecutive_losses: usize,
}

impl PerformanceMetrics {
    /// Compute all metrics from an equity curve and trade list.
    ///
    /// `bars_per_year` sets the annualization base (252 for daily bars);
    /// `risk_free_rate` is annual and converted to per-bar internally.
    pub fn compute(
        equity: &EquityCurve,
        trades: &[Trade],
        bars_per_year: f64,
        risk_free_rate: f64,
    ) -> Self {
        let returns = equity.per_bar_returns();
        let values = equity.values();
        let tr = total_return(&values);

        Self {
            total_return: tr,
            annualized_return: annualized_return(tr, values.len(), bars_per_year),
            annualized_volatility: annualized_volatility(&returns, bars_per_year),
            sharpe: sharpe_ratio(&returns, bars_per_year, risk_free_rate),
            sortino: sortino_ratio(&returns, bars_per_year, risk_free_rate),
            max_drawdown: max_drawdown(&values),
            var_95: var_95(&returns),
            win_rate: win_rate(trades),
            profit_factor: profit_factor(trades),
            trade_count: trades.len(),
            max_consecutive_wins: max_consecutive(trades, true),
            max_consecutive_losses: max_consecutive(trades, false),
        }
    }
}

// ─── Individual metric functions ────────────────────────────────────

/// Total return as a fraction: last/first − 1.
pub fn total_return(equity_values: &[f64]) -> f64 {
    if equity_values.len() < 2 {
        return 0.0;
    }
    let initial = equity_values[0];
    let final_eq = equity_values[equity_values.len() - 1];
    if initial <= 0.0 {
        return 0.0;
    }
    (final_eq - initial) / initial
}

/// Geometric annualization of a total return over `num_bars` bars.
///
/// Floors at −1 for a total wipeout; returns 0.0 for degenerate inputs.
pub fn annualized_return(total_return: f64, num_bars: usize, bars_per_year: f64) -> f64 {
    if num_bars < 2 || bars_per_year <= 0.0 {
        return 0.0;
    }
    if total_return <= -1.0 {
        return -1.0;
    }
    (1.0 + total_return).powf(bars_per_year / num_bars as f64) - 1.0
}

/// Sample standard deviation of per-bar returns, annualized.
pub fn annualized_volatility(returns: &[f64], bars_per_year: f64) -> f64 {
    if returns.len() < 2 || bars_per_year <= 0.0 {
        return 0.0;
    }
    std_dev(returns) * bars_per_year.sqrt()
}

/// Annualized Sharpe ratio from per-bar returns.
///
/// Sharpe = mean(r − rf_per_bar) / std(r) × sqrt(bars_per_year).
/// Returns 0.0 when the variance is zero or fewer than 2 returns.
pub fn sharpe_ratio(returns: &[f64], bars_per_year: f64, risk_free_rate: f64) -> f64 {
    if returns.len() < 2 || bars_per_year <= 0.0 {
        return 0.0;
    }
    let rf_per_bar = risk_free_rate / bars_per_year;
    let excess: Vec<f64> = returns.iter().map(|r| r - rf_per_bar).collect();
    let mean = mean_f64(&excess);
    let std = std_dev(&excess);
    if std < 1e-15 {
        return 0.0;
    }
    (mean / std) * bars_per_year.sqrt()
}

/// Annualized Sortino ratio (downside deviation only).
///
/// The denominator is the sample standard deviation of the below-zero
/// returns; an empty or singleton downside sub-sample yields 0.0.
pub fn sortino_ratio(returns: &[f64], bars_per_year: f64, risk_free_rate: f64) -> f64 {
    if returns.len() < 2 || bars_per_year <= 0.0 {
        return 0.0;
    }
    let rf_per_bar = risk_free_rate / bars_per_year;
    let excess: Vec<f64> = returns.iter().map(|r| r - rf_per_bar).collect();
    let mean = mean_f64(&excess);

    let downside: Vec<f64> = returns.iter().copied().filter(|r| *r < 0.0).collect();
    if downside.len() < 2 {
        return 0.0;
    }
    let downside_std = std_dev(&downside);
    if downside_std < 1e-15 {
        return 0.0;
    }
    (mean / downside_std) * bars_per_year.sqrt()
}

/// Maximum drawdown as a non-negative fraction (0.15 = 15% decline).
pub fn max_drawdown(equity_values: &[f64]) -> f64 {
    if equity_values.len() < 2 {
        return 0.0;
    }
    let mut peak = equity_values[0];
    let mut max_dd = 0.0_f64;

    for &eq in equity_values {
        if eq > peak {
            peak = eq;
        }
        if peak > 0.0 {
            let dd = (peak - eq) / peak;
            if dd > max_dd {
                max_dd = dd;
            }
        }
    }
    max_dd
}

/// 95% value-at-risk: the empirical 5th percentile of per-bar returns.
pub fn var_95(returns: &[f64]) -> f64 {
    if returns.is_empty() {
        return 0.0;
    }
    let mut sorted = returns.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    percentile_sorted(&sorted, 5.0)
}

/// Win rate: fraction of trades that were winners. 0.0 with no trades.
pub fn win_rate(trades: &[Trade]) -> f64 {
    if trades.is_empty() {
        return 0.0;
    }
    let winners = trades.iter().filter(|t| t.is_winner()).count();
    winners as f64 / trades.len() as f64
}

/// Profit factor: gross profits / gross losses.
///
/// `+inf` when there are winners and no losers; 0.0 with no trades or no
/// winners.
pub fn profit_factor(trades: &[Trade]) -> f64 {
    if trades.is_empty() {
        return 0.0;
    }
    let gross_profit: f64 = trades
        .iter()
        .filter(|t| t.net_pnl > 0.0)
        .map(|t| t.net_pnl)
        .sum();
    let gross_loss: f64 = trades
        .iter()
        .filter(|t| t.net_pnl < 0.0)
        .map(|t| t.net_pnl.abs())
        .sum();

    if gross_loss < 1e-10 {
        return if gross_profit > 0.0 { f64::INFINITY } else { 0.0 };
    }
    gross_profit / gross_loss
}

// ─── Helpers ────────────────────────────────────────────────────────

pub(crate) fn mean_f64(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

pub(crate) fn std_dev(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let mean = mean_f64(values);
    let variance =
        values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (values.len() - 1) as f64;
    variance.sqrt()
}

/// Percentile of a sorted slice using linear interpolation.
pub(crate) fn percentile_sorted(sorted: &[f64], p: f64) -> f64 {
    let n = sorted.len();
    if n == 0 {
        return 0.0;
    }
    if n == 1 {
        return sorted[0];
    }
    let rank = (p / 100.0) * (n - 1) as f64;
    let lo = rank.floor() as usize;
    let hi = (lo + 1).min(n - 1);
    let frac = rank - lo as f64;
    sorted[lo] * (1.0 - frac) + sorted[hi] * frac
}

fn max_consecutive(trades: &[Trade], winners: bool) -> usize {
    let mut max_streak = 0;
    let mut current = 0;

    for trade in trades {
        if trade.is_winner() == winners {
            current += 1;
            if current > max_streak {
                max_streak = current;
            }
        } else {
            current = 0;
        }
    }
    max_streak
}
