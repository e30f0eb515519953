//! The full pipeline: candles → indicators → signals → backtest.
//!
//! One synchronous batch call per refresh cycle. Everything is recomputed
//! from scratch each invocation; no state survives between calls, which
//! keeps repeated runs reproducible and idempotent.

use crate::backtest::{run_backtest, BacktestPolicy, BacktestResult};
use crate::domain::{validate_series, Candle, IndicatorFrame, SeriesError, SignalRecord};
use crate::indicators::compute_indicators;
use crate::signals::{compute_signals_with, RuleSet};
use serde::{Deserialize, Serialize};

/// The complete output of one pipeline run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Analysis {
    pub frames: Vec<IndicatorFrame>,
    pub records: Vec<SignalRecord>,
    pub backtest: BacktestResult,
}

/// Run the three stages over a candle sequence.
///
/// Only a sequence-contract violation (out-of-order timestamps, insane
/// OHLCV) is an error; short history, warmup NaN, and signal-free series
/// all degrade to well-typed empty or HOLD output.
pub fn analyze(
    candles: &[Candle],
    rule_set: &RuleSet,
    policy: &BacktestPolicy,
) -> Result<Analysis, SeriesError> {
    validate_series(candles)?;

    let frames = compute_indicators(candles);
    let records = compute_signals_with(&frames, rule_set);
    let backtest = run_backtest(&frames, &records, policy);

    Ok(Analysis {
        frames,
        records,
        backtest,
    })
}
