//! Indicator engine — pure series transforms with warmup semantics.
//!
//! Each module computes one indicator family as a function from the candle
//! slice to an index-aligned `Vec<f64>`, NaN while the window warms up.
//! `compute_indicators` runs the full set once and zips the results into
//! `IndicatorFrame`s; nothing is recomputed incrementally.
//!
//! # Look-ahead contamination guard
//! No indicator value at bar t may depend on price data from bar t+1 or
//! later. Every series must survive the truncated-vs-full comparison test.

pub mod adx;
pub mod atr;
pub mod bollinger;
pub mod ema;
pub mod rsi;
pub mod rvol;
pub mod sma;

pub use adx::adx;
pub use atr::{atr, true_range, wilder_smooth};
pub use bollinger::{bollinger, BollingerBands};
pub use ema::ema;
pub use rsi::rsi;
pub use rvol::rvol;
pub use sma::sma;

use crate::domain::{Candle, IndicatorFrame};

/// Derive the full indicator set for a candle sequence.
///
/// Empty input produces empty output; short history produces frames whose
/// not-yet-warm fields are NaN. Deterministic and free of side effects.
pub fn compute_indicators(candles: &[Candle]) -> Vec<IndicatorFrame> {
    if candles.is_empty() {
        return Vec::new();
    }

    let ema20 = ema(candles, 20);
    let ema50 = ema(candles, 50);
    let ma200 = sma(candles, 200);
    let bands = bollinger(candles, 20, 2.0);
    let rsi14 = rsi(candles, 14);
    let atr14 = atr(candles, 14);
    let adx14 = adx(candles, 14);
    let rvol20 = rvol(candles, 20);

    candles
        .iter()
        .enumerate()
        .map(|(i, candle)| IndicatorFrame {
            candle: candle.clone(),
            ema20: ema20[i],
            ema50: ema50[i],
            ma200: ma200[i],
            bb_mid: bands.mid[i],
            bb_up: bands.up[i],
            bb_lo: bands.lo[i],
            rsi14: rsi14[i],
            atr14: atr14[i],
            adx14: adx14[i],
            rvol20: rvol20[i],
        })
        .collect()
}

/// Create synthetic candles from close prices for testing.
///
/// Generates plausible OHLV: open = prev_close (or close for the first bar),
/// high = max(open, close) + 1.0, low = min(open, close) - 1.0,
/// volume = 1000, hourly cadence.
#[cfg(test)]
pub fn make_candles(closes: &[f64]) -> Vec<Candle> {
    use chrono::{Duration, TimeZone, Utc};
    let base = Utc.with_ymd_and_hms(2024, 1, 2, 0, 0, 0).unwrap();
    closes
        .iter()
        .enumerate()
        .map(|(i, &close)| {
            let open = if i == 0 { close } else { closes[i - 1] };
            Candle {
                timestamp: base + Duration::hours(i as i64),
                open,
                high: open.max(close) + 1.0,
                low: open.min(close) - 1.0,
                close,
                volume: 1000.0,
            }
        })
        .collect()
}

/// Create candles from explicit (open, high, low, close) tuples.
#[cfg(test)]
pub fn make_ohlc_candles(data: &[(f64, f64, f64, f64)]) -> Vec<Candle> {
    use chrono::{Duration, TimeZone, Utc};
    let base = Utc.with_ymd_and_hms(2024, 1, 2, 0, 0, 0).unwrap();
    data.iter()
        .enumerate()
        .map(|(i, &(open, high, low, close))| Candle {
            timestamp: base + Duration::hours(i as i64),
            open,
            high,
            low,
            close,
            volume: 1000.0,
        })
        .collect()
}

/// Assert two f64 values are approximately equal (within epsilon).
#[cfg(test)]
pub fn assert_approx(actual: f64, expected: f64, epsilon: f64) {
    assert!(
        (actual - expected).abs() < epsilon,
        "assert_approx failed: actual={actual}, expected={expected}, diff={}, epsilon={epsilon}",
        (actual - expected).abs()
    );
}
