//! Relative Volume (RVOL).
//!
//! volume / rolling_mean(volume, period). Above 1.0 means the bar traded
//! more than its recent average. NaN during warmup and when the rolling
//! mean is zero (dead tape).

use crate::domain::Candle;

pub fn rvol(candles: &[Candle], period: usize) -> Vec<f64> {
    assert!(period >= 1, "RVOL period must be >= 1");

    let n = candles.len();
    let mut result = vec![f64::NAN; n];

    if n < period {
        return result;
    }

    let mut sum = 0.0;
    for candle in candles.iter().take(period) {
        sum += candle.volume;
    }

    for i in (period - 1)..n {
        if i >= period {
            sum = sum - candles[i - period].volume + candles[i].volume;
        }
        let mean = sum / period as f64;
        if mean > 0.0 && !candles[i].volume.is_nan() {
            result[i] = candles[i].volume / mean;
        }
    }

    result
}
