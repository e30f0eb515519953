//! Exponential Moving Average (EMA).
//!
//! Recursive: EMA[t] = alpha * close[t] + (1 - alpha) * EMA[t-1]
//! with alpha = 2 / (period + 1).
//! Seed: the first close, so the series is defined from index 0.

use crate::domain::Candle;

pub fn ema(candles: &[Candle], period: usize) -> Vec<f64> {
    assert!(period >= 1, "EMA period must be >= 1");

    let n = candles.len();
    let mut result = vec![f64::NAN; n];

    if n == 0 {
        return result;
    }

    let alpha = 2.0 / (period as f64 + 1.0);

    let mut prev = candles[0].close;
    result[0] = prev;

    for i in 1..n {
        if candles[i].close.is_nan() {
            // NaN taints everything after it
            for val in result.iter_mut().skip(i) {
                *val = f64::NAN;
            }
            return result;
        }
        let value = alpha * candles[i].close + (1.0 - alpha) * prev;
        result[i] = value;
        prev = value;
    }

    result
}
