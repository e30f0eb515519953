//! Bollinger Bands — moving average +/- standard deviation multiplier.
//!
//! - Middle: SMA(close, period)
//! - Upper: middle + mult * stddev(close, period)
//! - Lower: middle - mult * stddev(close, period)
//!
//! Uses population stddev (divide by N). First valid value at period - 1.

use crate::domain::Candle;

/// The three Bollinger series, index-aligned with the input candles.
#[derive(Debug, Clone)]
pub struct BollingerBands {
    pub mid: Vec<f64>,
    pub up: Vec<f64>,
    pub lo: Vec<f64>,
}

pub fn bollinger(candles: &[Candle], period: usize, multiplier: f64) -> BollingerBands {
    assert!(period >= 1, "Bollinger period must be >= 1");

    let n = candles.len();
    let mut bands = BollingerBands {
        mid: vec![f64::NAN; n],
        up: vec![f64::NAN; n],
        lo: vec![f64::NAN; n],
    };

    if n < period {
        return bands;
    }

    for i in (period - 1)..n {
        let window = &candles[i + 1 - period..=i];

        let mut sum = 0.0;
        let mut has_nan = false;
        for candle in window {
            if candle.close.is_nan() {
                has_nan = true;
                break;
            }
            sum += candle.close;
        }
        if has_nan {
            continue;
        }

        let mean = sum / period as f64;
        let variance: f64 = window
            .iter()
            .map(|candle| {
                let diff = candle.close - mean;
                diff * diff
            })
            .sum::<f64>()
            / period as f64;
        let std = variance.sqrt();

        bands.mid[i] = mean;
        bands.up[i] = mean + multiplier * std;
        bands.lo[i] = mean - multiplier * std;
    }

    bands
}
