//! Signal — the closed set of per-candle decisions, and the record emitted
//! for each bar.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Per-candle trading signal.
///
/// A closed enum rather than free-form labels: the presentation layer owns
/// any color/icon mapping, the core only knows the variants and their
/// display text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Signal {
    NoData,
    Hold,
    Buy,
    StrongBuy,
    Sell,
    StrongSell,
}

impl Signal {
    /// True for the four signals that can open or close a position.
    pub fn is_actionable(&self) -> bool {
        matches!(
            self,
            Signal::Buy | Signal::StrongBuy | Signal::Sell | Signal::StrongSell
        )
    }

    /// True for every signal a fully-warmed engine can emit (everything
    /// except the `NoData` placeholder).
    pub fn is_valid(&self) -> bool {
        !matches!(self, Signal::NoData)
    }

    /// True for signals that open a long position.
    pub fn is_entry(&self) -> bool {
        matches!(self, Signal::Buy | Signal::StrongBuy)
    }

    /// True for signals that close a long position.
    pub fn is_exit(&self) -> bool {
        matches!(self, Signal::Sell | Signal::StrongSell)
    }

    /// Stable display label.
    pub fn label(&self) -> &'static str {
        match self {
            Signal::NoData => "NO DATA",
            Signal::Hold => "HOLD",
            Signal::Buy => "BUY",
            Signal::StrongBuy => "STRONG BUY",
            Signal::Sell => "SELL",
            Signal::StrongSell => "STRONG SELL",
        }
    }
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// The signal emitted for one bar, with a human-readable justification.
///
/// `signal` is a pure function of the frames up to `index` and the engine's
/// running last-actionable-signal state — never of later bars.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignalRecord {
    pub index: usize,
    pub signal: Signal,
    pub reason: String,
}
