//! Candle — the fundamental market data unit.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// OHLCV candle for a single instrument at a fixed cadence (e.g. 1h bars).
///
/// Candles are immutable once produced by the data provider. All pipeline
/// stages treat them as read-only input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candle {
    pub timestamp: DateTime<Utc>,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

impl Candle {
    /// Returns true if any OHLCV field is NaN.
    pub fn is_void(&self) -> bool {
        self.open.is_nan()
            || self.high.is_nan()
            || self.low.is_nan()
            || self.close.is_nan()
            || self.volume.is_nan()
    }

    /// Basic OHLCV sanity check: high >= low, high bounds open/close, positive prices.
    pub fn is_sane(&self) -> bool {
        if self.is_void() {
            return false;
        }
        self.high >= self.low
            && self.high >= self.open
            && self.high >= self.close
            && self.low <= self.open
            && self.low <= self.close
            && self.open > 0.0
            && self.close > 0.0
            && self.volume >= 0.0
    }
}

/// Contract violation in an input candle sequence.
///
/// These are programming/upstream errors, not data-quality conditions:
/// short history, zero denominators, and empty input are all handled as
/// values (NaN fields, HOLD records, empty trade lists) further down the
/// pipeline and never surface as errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SeriesError {
    #[error("candle at index {index} is not strictly after its predecessor")]
    OutOfOrder { index: usize },

    #[error("candle at index {index} fails the OHLCV sanity check")]
    InsaneCandle { index: usize },
}

/// Validate the candle sequence contract: strictly increasing timestamps
/// and sane OHLCV values. An empty sequence is valid.
pub fn validate_series(candles: &[Candle]) -> Result<(), SeriesError> {
    for (i, candle) in candles.iter().enumerate() {
        if !candle.is_sane() {
            return Err(SeriesError::InsaneCandle { index: i });
        }
        if i > 0 && candle.timestamp <= candles[i - 1].timestamp {
            return Err(SeriesError::OutOfOrder { index: i });
        }
    }
    Ok(())
}
