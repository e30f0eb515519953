//! Average True Range (ATR).
//!
//! True Range: max(high-low, |high-prev_close|, |low-prev_close|), with
//! TR[0] = high[0] - low[0] (no previous close).
//! ATR uses Wilder smoothing: seed = mean of the first `period` TR values,
//! then EMA with alpha = 1/period.

use crate::domain::Candle;

pub fn atr(candles: &[Candle], period: usize) -> Vec<f64> {
    assert!(period >= 1, "ATR period must be >= 1");
    let tr = true_range(candles);
    wilder_smooth(&tr, period)
}

/// Compute the True Range series.
pub fn true_range(candles: &[Candle]) -> Vec<f64> {
    let n = candles.len();
    let mut tr = vec![f64::NAN; n];

    if n == 0 {
        return tr;
    }

    let h = candles[0].high;
    let l = candles[0].low;
    if h.is_nan() || l.is_nan() {
        tr[0] = f64::NAN;
    } else {
        tr[0] = h - l;
    }

    for i in 1..n {
        let h = candles[i].high;
        let l = candles[i].low;
        let pc = candles[i - 1].close;
        if h.is_nan() || l.is_nan() || pc.is_nan() {
            tr[i] = f64::NAN;
        } else {
            tr[i] = (h - l).max((h - pc).abs()).max((l - pc).abs());
        }
    }

    tr
}

/// Apply Wilder smoothing to a series. Alpha = 1/period.
///
/// Seed: mean of the first `period` consecutive non-NaN values; everything
/// before the seed stays NaN. ADX reuses this for its DM/DX smoothing, where
/// the input series only becomes valid at index 1.
pub fn wilder_smooth(values: &[f64], period: usize) -> Vec<f64> {
    let n = values.len();
    let mut result = vec![f64::NAN; n];

    if period == 0 || n < period {
        return result;
    }

    // First window of `period` consecutive non-NaN values
    let seed_start = match (0..n).find(|&i| {
        i + period <= n && values[i..i + period].iter().all(|v| !v.is_nan())
    }) {
        Some(start) => start,
        None => return result,
    };

    let seed_end = seed_start + period - 1;
    let seed: f64 = values[seed_start..=seed_end].iter().sum::<f64>() / period as f64;
    result[seed_end] = seed;

    let alpha = 1.0 / period as f64;
    let mut prev = seed;
    for i in (seed_end + 1)..n {
        if values[i].is_nan() {
            for val in result.iter_mut().skip(i) {
                *val = f64::NAN;
            }
            return result;
        }
        let value = alpha * values[i] + (1.0 - alpha) * prev;
        result[i] = value;
        prev = value;
    }

    result
}
