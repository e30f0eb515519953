//! ADX — Average Directional Index (Wilder).
//!
//! 1. +DM / -DM from consecutive high/low deltas (only the larger, positive
//!    one counts per bar)
//! 2. Wilder-smooth +DM, -DM, and TR (alpha = 1/period)
//! 3. +DI = 100 * smoothed(+DM) / smoothed(TR), same for -DI
//! 4. DX = 100 * |+DI - -DI| / (+DI + -DI), with DX = 0 when the sum is 0
//! 5. ADX = Wilder-smoothed DX

use crate::domain::Candle;
use crate::indicators::atr::{true_range, wilder_smooth};

pub fn adx(candles: &[Candle], period: usize) -> Vec<f64> {
    assert!(period >= 1, "ADX period must be >= 1");

    let n = candles.len();
    if n < 2 {
        return vec![f64::NAN; n];
    }

    let mut plus_dm = vec![f64::NAN; n];
    let mut minus_dm = vec![f64::NAN; n];

    for i in 1..n {
        let high_diff = candles[i].high - candles[i - 1].high;
        let low_diff = candles[i - 1].low - candles[i].low;

        if high_diff.is_nan() || low_diff.is_nan() {
            continue;
        }

        plus_dm[i] = if high_diff > low_diff && high_diff > 0.0 {
            high_diff
        } else {
            0.0
        };
        minus_dm[i] = if low_diff > high_diff && low_diff > 0.0 {
            low_diff
        } else {
            0.0
        };
    }

    let tr = true_range(candles);
    let smooth_tr = wilder_smooth(&tr, period);
    let smooth_plus_dm = wilder_smooth(&plus_dm, period);
    let smooth_minus_dm = wilder_smooth(&minus_dm, period);

    let mut dx = vec![f64::NAN; n];
    for i in 0..n {
        if smooth_tr[i].is_nan()
            || smooth_plus_dm[i].is_nan()
            || smooth_minus_dm[i].is_nan()
            || smooth_tr[i] == 0.0
        {
            continue;
        }

        let plus_di = 100.0 * smooth_plus_dm[i] / smooth_tr[i];
        let minus_di = 100.0 * smooth_minus_dm[i] / smooth_tr[i];
        let di_sum = plus_di + minus_di;

        dx[i] = if di_sum == 0.0 {
            0.0
        } else {
            100.0 * (plus_di - minus_di).abs() / di_sum
        };
    }

    wilder_smooth(&dx, period)
}
