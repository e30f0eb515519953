//! IndicatorFrame — a candle plus its derived indicator fields.

use super::candle::Candle;
use serde::{Deserialize, Serialize};

/// A candle augmented with the derived indicator set.
///
/// Every indicator field is `f64::NAN` while its window is still warming up
/// (an indicator needing N prior bars is undefined for the first N-1 bars).
/// All fields at index i are computed from candles `0..=i` only — no value
/// may depend on a later bar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndicatorFrame {
    #[serde(flatten)]
    pub candle: Candle,
    pub ema20: f64,
    pub ema50: f64,
    pub ma200: f64,
    pub bb_mid: f64,
    pub bb_up: f64,
    pub bb_lo: f64,
    pub rsi14: f64,
    pub atr14: f64,
    pub adx14: f64,
    pub rvol20: f64,
}

impl IndicatorFrame {
    pub fn close(&self) -> f64 {
        self.candle.close
    }

    pub fn high(&self) -> f64 {
        self.candle.high
    }

    pub fn low(&self) -> f64 {
        self.candle.low
    }

    pub fn open(&self) -> f64 {
        self.candle.open
    }

    /// Bollinger band width relative to the middle band.
    ///
    /// Used as the adaptive volatility context for signal rules.
    /// Returns 0.0 while the bands are warming up or the middle band is 0.
    pub fn band_width(&self) -> f64 {
        if self.bb_mid.is_nan() || self.bb_up.is_nan() || self.bb_lo.is_nan() || self.bb_mid == 0.0
        {
            return 0.0;
        }
        (self.bb_up - self.bb_lo) / self.bb_mid
    }
}
