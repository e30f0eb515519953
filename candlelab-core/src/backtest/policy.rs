//! Backtest exit policies.
//!
//! The historical engine grew three incompatible exit schemes; they are
//! kept side by side as a policy value the caller selects, instead of
//! hard-coded branches.

use serde::{Deserialize, Serialize};

/// How an open position is closed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ExitPolicy {
    /// Exit purely on age: close after exactly `horizon` bars (reverse
    /// signals are ignored). End of data still force-closes.
    FixedHorizon { horizon: usize },

    /// Exit on the first SELL / STRONG SELL record, or after
    /// `max_hold_bars` bars, whichever comes first.
    ReverseSignal { max_hold_bars: usize },

    /// Like `ReverseSignal`, plus a partial take-profit: entry risk is
    /// `atr14 * atr_mult` (2% of entry when ATR is unavailable) and the
    /// target sits at `entry + risk * tp_mult`. When the target trades
    /// before the exit, half the position is treated as filled there and
    /// the trade return blends 50/50 between target and exit.
    ReverseSignalWithTarget {
        max_hold_bars: usize,
        atr_mult: f64,
        tp_mult: f64,
    },
}

impl ExitPolicy {
    /// Bars after which the position is force-closed, regardless of signals.
    pub fn max_age(&self) -> usize {
        match self {
            ExitPolicy::FixedHorizon { horizon } => *horizon,
            ExitPolicy::ReverseSignal { max_hold_bars }
            | ExitPolicy::ReverseSignalWithTarget { max_hold_bars, .. } => *max_hold_bars,
        }
    }

    /// Whether SELL / STRONG SELL records close the position.
    pub fn exits_on_reverse_signal(&self) -> bool {
        !matches!(self, ExitPolicy::FixedHorizon { .. })
    }
}

/// Backtest configuration passed explicitly by the caller; the simulator
/// reads no ambient configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BacktestPolicy {
    pub exit: ExitPolicy,
}

impl Default for BacktestPolicy {
    fn default() -> Self {
        Self {
            exit: ExitPolicy::ReverseSignal { max_hold_bars: 30 },
        }
    }
}
