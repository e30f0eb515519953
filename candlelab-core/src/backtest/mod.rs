//! Backtest simulator — replays signal-annotated frames as a
//! single-position, long-only account and summarizes the result.

pub mod policy;
pub mod simulator;
pub mod summary;

pub use policy::{BacktestPolicy, ExitPolicy};
pub use simulator::simulate;
pub use summary::{equity_curve, max_drawdown_pct, summarize, BacktestSummary, SignalBreakdown};

use crate::domain::{IndicatorFrame, SignalRecord, Trade};
use serde::{Deserialize, Serialize};

/// Trades plus their summary, as one serializable artifact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BacktestResult {
    pub trades: Vec<Trade>,
    pub summary: BacktestSummary,
}

/// Simulate the sequence under a policy and summarize the trades.
///
/// Empty frames or a signal list without actionable records produce an
/// empty trade list and a zeroed summary — never an error.
pub fn run_backtest(
    frames: &[IndicatorFrame],
    signals: &[SignalRecord],
    policy: &BacktestPolicy,
) -> BacktestResult {
    let trades = simulate(frames, signals, &policy.exit);
    let summary = summarize(&trades);
    BacktestResult { trades, summary }
}
