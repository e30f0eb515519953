//! Summary statistics — pure functions over the trade list.
//!
//! Every figure is recomputable from the trades; nothing here is mutated
//! after the fact. Empty input produces zeroed fields, never an error.

use crate::domain::{Signal, Trade};
use serde::{Deserialize, Serialize};

/// Aggregate and per-entry-signal statistics for a backtest run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BacktestSummary {
    pub total_trades: usize,
    pub avg_return_pct: f64,
    /// Share of trades with `correct = true`, in percent.
    pub hit_rate_pct: f64,
    /// Mean r-multiple over the trades that carry one; `None` when none do.
    pub avg_r_multiple: Option<f64>,
    /// Largest peak-to-trough drop of the compounded equity curve, as a
    /// negative percent (e.g. -15.0 for a 15% drawdown).
    pub max_drawdown_pct: f64,
    pub per_signal: Vec<SignalBreakdown>,
}

/// Statistics for one entry-signal category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignalBreakdown {
    pub signal: Signal,
    pub trades: usize,
    pub avg_return_pct: f64,
    pub hit_rate_pct: f64,
}

/// Compute the summary for a trade list.
pub fn summarize(trades: &[Trade]) -> BacktestSummary {
    let equity = equity_curve(trades);

    BacktestSummary {
        total_trades: trades.len(),
        avg_return_pct: avg_return_pct(trades),
        hit_rate_pct: hit_rate_pct(trades),
        avg_r_multiple: avg_r_multiple(trades),
        max_drawdown_pct: max_drawdown_pct(&equity),
        per_signal: per_signal(trades),
    }
}

fn avg_return_pct(trades: &[Trade]) -> f64 {
    if trades.is_empty() {
        return 0.0;
    }
    trades.iter().map(|t| t.return_pct).sum::<f64>() / trades.len() as f64
}

fn hit_rate_pct(trades: &[Trade]) -> f64 {
    if trades.is_empty() {
        return 0.0;
    }
    let winners = trades.iter().filter(|t| t.correct).count();
    winners as f64 / trades.len() as f64 * 100.0
}

fn avg_r_multiple(trades: &[Trade]) -> Option<f64> {
    let values: Vec<f64> = trades.iter().filter_map(|t| t.r_multiple).collect();
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Equity path from compounding trade returns sequentially, starting at 1.0.
pub fn equity_curve(trades: &[Trade]) -> Vec<f64> {
    let mut equity = Vec::with_capacity(trades.len() + 1);
    let mut value = 1.0;
    equity.push(value);
    for trade in trades {
        value *= 1.0 + trade.return_pct / 100.0;
        equity.push(value);
    }
    equity
}

/// Maximum drawdown of an equity curve as a negative percent.
/// Returns 0.0 for constant or monotonically rising curves.
pub fn max_drawdown_pct(equity: &[f64]) -> f64 {
    if equity.len() < 2 {
        return 0.0;
    }
    let mut peak = equity[0];
    let mut max_dd = 0.0_f64;

    for &value in equity {
        if value > peak {
            peak = value;
        }
        if peak > 0.0 {
            let dd = (value - peak) / peak * 100.0;
            if dd < max_dd {
                max_dd = dd;
            }
        }
    }
    max_dd
}

/// Group trades by entry signal. The grouping stays generic over the four
/// actionable signals even though a long-only simulator normally only
/// produces BUY / STRONG BUY entries.
fn per_signal(trades: &[Trade]) -> Vec<SignalBreakdown> {
    [
        Signal::StrongBuy,
        Signal::Buy,
        Signal::Sell,
        Signal::StrongSell,
    ]
    .iter()
    .filter_map(|&signal| {
        let subset: Vec<&Trade> = trades.iter().filter(|t| t.entry_signal == signal).collect();
        if subset.is_empty() {
            return None;
        }
        let winners = subset.iter().filter(|t| t.correct).count();
        Some(SignalBreakdown {
            signal,
            trades: subset.len(),
            avg_return_pct: subset.iter().map(|t| t.return_pct).sum::<f64>()
                / subset.len() as f64,
            hit_rate_pct: winners as f64 / subset.len() as f64 * 100.0,
        })
    })
    .collect()
}
