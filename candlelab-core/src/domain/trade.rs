//! Trade — a completed round trip produced by the backtest simulator.

use super::signal::Signal;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Why an open position was closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExitReason {
    /// A SELL / STRONG SELL record closed the position.
    ReverseSignal,
    /// Position age reached the policy's maximum holding period.
    TimeStop,
    /// Fixed-horizon policy: the position aged out at the configured horizon.
    FixedHorizon,
    /// The series ended with the position still open.
    EndOfData,
}

/// A complete round-trip trade: entry → exit.
///
/// Invariants maintained by the simulator: `entry_index < exit_index`,
/// trades never overlap, at most one open position at any time (long-only,
/// no pyramiding).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trade {
    // ── Entry ──
    pub entry_index: usize,
    pub entry_time: DateTime<Utc>,
    pub entry_price: f64,
    pub entry_signal: Signal,
    pub entry_reason: String,

    // ── Exit ──
    pub exit_index: usize,
    pub exit_time: DateTime<Utc>,
    pub exit_price: f64,
    pub exit_reason: ExitReason,

    // ── Outcome ──
    /// Percent return; under a partial take-profit policy this is the
    /// 50/50 blend of the target fill and the actual exit fill.
    pub return_pct: f64,
    /// Profit as a multiple of the entry risk. Only populated by policies
    /// that define a risk unit.
    pub r_multiple: Option<f64>,
    pub hold_bars: usize,
    pub correct: bool,
}

impl Trade {
    pub fn is_winner(&self) -> bool {
        self.return_pct > 0.0
    }
}
