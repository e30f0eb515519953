//! Relative Strength Index (RSI).
//!
//! Wilder-style: close deltas split into up/down components, each smoothed
//! with an exponential recursion (alpha = 1/period) seeded at the first
//! delta, so the series is defined from index 1.
//! RSI = 100 - 100 / (1 + avg_up / avg_down).
//! Edge cases: avg_down == 0 → RSI = 100; flat tape (both zero) → RSI = 50.

use crate::domain::Candle;

pub fn rsi(candles: &[Candle], period: usize) -> Vec<f64> {
    assert!(period >= 1, "RSI period must be >= 1");

    let n = candles.len();
    let mut result = vec![f64::NAN; n];

    if n < 2 {
        return result;
    }

    let alpha = 1.0 / period as f64;

    let first_delta = candles[1].close - candles[0].close;
    if first_delta.is_nan() {
        return result;
    }
    let mut avg_up = first_delta.max(0.0);
    let mut avg_down = (-first_delta).max(0.0);
    result[1] = rsi_value(avg_up, avg_down);

    for i in 2..n {
        let delta = candles[i].close - candles[i - 1].close;
        if delta.is_nan() {
            // NaN taints everything after it
            for val in result.iter_mut().skip(i) {
                *val = f64::NAN;
            }
            return result;
        }

        let up = delta.max(0.0);
        let down = (-delta).max(0.0);

        avg_up = alpha * up + (1.0 - alpha) * avg_up;
        avg_down = alpha * down + (1.0 - alpha) * avg_down;

        result[i] = rsi_value(avg_up, avg_down);
    }

    result
}

fn rsi_value(avg_up: f64, avg_down: f64) -> f64 {
    if avg_down == 0.0 && avg_up == 0.0 {
        50.0 // no movement
    } else if avg_down == 0.0 {
        100.0
    } else {
        100.0 - 100.0 / (1.0 + avg_up / avg_down)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::{assert_approx, make_candles};

    #[test]
    fn rsi_all_gains_is_100() {
        let candles = make_candles(&[100.0, 101.0, 102.0, 103.0, 104.0, 105.0]);
        let result = rsi(&candles, 3);
        for &v in &result[1..] {
            assert_approx(v, 100.0, 1e-9);
        }
    }

    #[test]
    fn rsi_all_losses_is_0() {
        let candles = make_candles(&[105.0, 104.0, 103.0, 102.0, 101.0, 100.0]);
        let result = rsi(&candles, 3);
        for &v in &result[1..] {
            assert_approx(v, 0.0, 1e-9);
        }
    }

    #[test]
    fn rsi_flat_tape_is_50() {
        let candles = make_candles(&[100.0; 6]);
        let result = rsi(&candles, 3);
        for &v in &result[1..] {
            assert_approx(v, 50.0, 1e-9);
        }
    }

    #[test]
    fn rsi_first_bar_undefined() {
        let candles = make_candles(&[100.0, 101.0]);
        let result = rsi(&candles, 14);
        assert!(result[0].is_nan());
        assert!(!result[1].is_nan());
    }

    #[test]
    fn rsi_bounds() {
        let candles = make_candles(&[100.0, 105.0, 98.0, 110.0, 95.0, 115.0, 90.0, 120.0]);
        let result = rsi(&candles, 3);
        for (i, &v) in result.iter().enumerate().skip(1) {
            assert!(
                (0.0..=100.0).contains(&v),
                "RSI out of bounds at bar {i}: {v}"
            );
        }
    }

    #[test]
    fn rsi_mixed_known_value() {
        // Deltas: +2, -1. alpha = 1/2.
        // avg_up: 2 → 0.5*0 + 0.5*2 = 1; avg_down: 0 → 0.5*1 + 0.5*0 = 0.5
        // RS = 2 → RSI = 100 - 100/3 = 66.666...
        let candles = make_candles(&[100.0, 102.0, 101.0]);
        let result = rsi(&candles, 2);
        assert_approx(result[1], 100.0, 1e-9);
        assert_approx(result[2], 100.0 - 100.0 / 3.0, 1e-9);
    }

    #[test]
    fn rsi_monotone_rise_never_divides_by_zero() {
        let closes: Vec<f64> = (0..200).map(|i| 100.0 + i as f64).collect();
        let candles = make_candles(&closes);
        let result = rsi(&candles, 14);
        for &v in &result[1..] {
            assert!(v.is_finite());
            assert!(v > 99.0);
        }
    }
}
