//! Tunable thresholds for the signal engine.

use serde::{Deserialize, Serialize};

/// Threshold set consumed by the regime gate and the rule table.
///
/// The optional regime filters default to disabled so the default engine
/// gates on the MA200 trend filter alone; callers opt into the stricter
/// trend-strength / liquidity / volatility gates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignalParams {
    // ── Regime gate ──
    /// Minimum ADX for any signal to fire (trend strength). None = off.
    pub adx_min: Option<f64>,
    /// Minimum relative volume for any signal to fire. None = off.
    pub rvol_min: Option<f64>,
    /// Maximum ATR as a percent of close (volatility ceiling). None = off.
    pub atr_pct_max: Option<f64>,

    // ── Adaptive volatility context ──
    /// Bollinger width below this is a low-volatility regime.
    pub low_vol: f64,
    /// Bollinger width above this is a high-volatility regime.
    pub high_vol: f64,

    // ── Blow-off top ──
    pub blowoff_wick_frac: f64,
    pub blowoff_rsi: f64,

    // ── Deep dip ──
    pub deep_dip_rsi: f64,

    // ── Healthy pullback ──
    pub pullback_rsi_lo: f64,
    pub pullback_rsi_hi: f64,
    /// Close this far below EMA50 (as a fraction) still counts as a pullback.
    pub pullback_ema50_frac: f64,

    // ── Trend breakout ──
    pub breakout_lookback: usize,
    pub breakout_rsi_lo: f64,
    pub breakout_rsi_hi: f64,
    /// Volume-expansion floor; only enforced when RVOL is defined.
    pub breakout_rvol_min: f64,

    // ── EMA50 reclaim ──
    pub reclaim_rsi_min: f64,

    // ── Overheat tiers ──
    pub extreme_overheat_ema20_mult: f64,
    pub extreme_overheat_rsi: f64,
    pub overheat_rsi: f64,

    // ── Trend break ──
    pub trend_break_rsi: f64,
}

impl Default for SignalParams {
    fn default() -> Self {
        Self {
            adx_min: None,
            rvol_min: None,
            atr_pct_max: None,
            low_vol: 0.06,
            high_vol: 0.12,
            blowoff_wick_frac: 0.45,
            blowoff_rsi: 73.0,
            deep_dip_rsi: 35.0,
            pullback_rsi_lo: 30.0,
            pullback_rsi_hi: 48.0,
            pullback_ema50_frac: 0.96,
            breakout_lookback: 20,
            breakout_rsi_lo: 50.0,
            breakout_rsi_hi: 65.0,
            breakout_rvol_min: 1.05,
            reclaim_rsi_min: 46.0,
            extreme_overheat_ema20_mult: 1.10,
            extreme_overheat_rsi: 80.0,
            overheat_rsi: 72.0,
            trend_break_rsi: 50.0,
        }
    }
}
