//! Simple Moving Average (SMA).
//!
//! Rolling mean of close prices over a lookback window.
//! First valid value at index period - 1.

use crate::domain::Candle;

pub fn sma(candles: &[Candle], period: usize) -> Vec<f64> {
    assert!(period >= 1, "SMA period must be >= 1");

    let n = candles.len();
    let mut result = vec![f64::NAN; n];

    if n < period {
        return result;
    }

    let mut sum = 0.0;
    for candle in candles.iter().take(period) {
        sum += candle.close;
    }
    result[period - 1] = sum / period as f64;

    for i in period..n {
        sum = sum - candles[i - period].close + candles[i].close;
        result[i] = sum / period as f64;
    }

    result
}
