//! The ordered signal rule table.
//!
//! Each rule is a tagged variant evaluated against the frame history up to
//! the current bar; the first rule that matches decides the raw signal for
//! that bar. Swapping a rule set is reordering or removing variants, not
//! editing nested conditionals.

use super::params::SignalParams;
use crate::domain::{IndicatorFrame, Signal};
use serde::{Deserialize, Serialize};

/// Adaptive volatility context derived from the Bollinger band width.
#[derive(Debug, Clone, Copy)]
pub struct VolRegime {
    pub low: bool,
    pub high: bool,
}

impl VolRegime {
    pub fn of(frame: &IndicatorFrame, params: &SignalParams) -> Self {
        let width = frame.band_width();
        Self {
            low: width < params.low_vol,
            high: width > params.high_vol,
        }
    }
}

/// One rule of the decision table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RuleKind {
    /// Large upper wick into a reversal close above the upper band.
    BlowOffTop,
    /// Oversold tag of the lower band with RSI turning up.
    DeepDip,
    /// Controlled dip near the lower band or under EMA50.
    HealthyPullback,
    /// New trailing-window closing high above EMA20 with volume expansion.
    TrendBreakout,
    /// Close back above EMA50 after trading below it.
    Ema50Reclaim,
    /// Price stretched far above EMA20 with RSI rolling over from above 80.
    ExtremeOverheat,
    /// Close above the upper band with RSI turning down.
    Overheat,
    /// Close below EMA50 with weak, falling RSI.
    TrendBreak,
}

impl RuleKind {
    /// Evaluate this rule at `index` (>= 1). Returns the signal and reason
    /// when the rule matches.
    ///
    /// NaN indicator fields make every comparison false, so rules simply do
    /// not match during warmup.
    pub fn evaluate(
        &self,
        frames: &[IndicatorFrame],
        index: usize,
        params: &SignalParams,
        vol: VolRegime,
    ) -> Option<(Signal, String)> {
        let last = &frames[index];
        let prev = &frames[index - 1];

        let close = last.close();
        let rsi_now = last.rsi14;
        let rsi_prev = prev.rsi14;
        let rsi_rising = rsi_now > rsi_prev;
        let rsi_falling = rsi_now < rsi_prev;

        match self {
            RuleKind::BlowOffTop => {
                let range = last.high() - last.low();
                let upper_wick = last.high() - close.max(last.open());
                let matched = range > 0.0
                    && upper_wick > range * params.blowoff_wick_frac
                    && close < prev.close()
                    && close > last.bb_up
                    && rsi_now > params.blowoff_rsi;
                matched.then(|| {
                    (
                        Signal::StrongSell,
                        "Blow-off top: large upper wick, close above the upper band, \
                         overheated RSI on a reversal candle."
                            .to_string(),
                    )
                })
            }

            RuleKind::DeepDip => {
                let matched = close <= last.bb_lo && rsi_now < params.deep_dip_rsi && rsi_rising;
                matched.then(|| {
                    if vol.low && close < last.bb_lo * 0.995 {
                        (
                            Signal::StrongBuy,
                            "Deep dip into very low volatility — strong mean-reversion entry."
                                .to_string(),
                        )
                    } else {
                        (
                            Signal::StrongBuy,
                            "Deep dip: price at the lower Bollinger band, RSI oversold and \
                             turning up."
                                .to_string(),
                        )
                    }
                })
            }

            RuleKind::HealthyPullback => {
                // In high-volatility regimes the lower band gets 1% of slack
                let band_slack = if vol.high { 1.01 } else { 1.00 };
                let price_cond = close <= last.bb_lo * band_slack
                    || close <= last.ema50 * params.pullback_ema50_frac;
                let rsi_cond =
                    rsi_now > params.pullback_rsi_lo && rsi_now <= params.pullback_rsi_hi && rsi_rising;
                (price_cond && rsi_cond).then(|| {
                    (
                        Signal::Buy,
                        "Healthy pullback: near the lower band or under EMA50, RSI turning up \
                         from the 30–48 zone."
                            .to_string(),
                    )
                })
            }

            RuleKind::TrendBreakout => {
                let start = index.saturating_sub(params.breakout_lookback);
                let new_high = index > 0
                    && frames[start..index].iter().all(|f| close > f.close());
                let volume_ok = last.rvol20.is_nan() || last.rvol20 >= params.breakout_rvol_min;
                let matched = new_high
                    && close > last.ema20
                    && rsi_now >= params.breakout_rsi_lo
                    && rsi_now <= params.breakout_rsi_hi
                    && rsi_now >= rsi_prev
                    && volume_ok;
                matched.then(|| {
                    (
                        Signal::Buy,
                        "Trend breakout: new trailing-window closing high above EMA20 with \
                         firm RSI and volume expansion."
                            .to_string(),
                    )
                })
            }

            RuleKind::Ema50Reclaim => {
                let matched = prev.close() < prev.ema50
                    && close > last.ema50
                    && rsi_rising
                    && rsi_now >= params.reclaim_rsi_min;
                matched.then(|| {
                    (
                        Signal::Buy,
                        "EMA50 reclaim: close back above EMA50 after a flush, RSI rising."
                            .to_string(),
                    )
                })
            }

            RuleKind::ExtremeOverheat => {
                let matched = close > last.ema20 * params.extreme_overheat_ema20_mult
                    && rsi_now > params.extreme_overheat_rsi
                    && rsi_falling;
                matched.then(|| {
                    (
                        Signal::StrongSell,
                        "Extreme overheat: price stretched far above EMA20, RSI above 80 and \
                         rolling over."
                            .to_string(),
                    )
                })
            }

            RuleKind::Overheat => {
                let matched = close > last.bb_up && rsi_now > params.overheat_rsi && rsi_falling;
                matched.then(|| {
                    (
                        Signal::Sell,
                        "Overheated: close above the upper band, RSI turning down.".to_string(),
                    )
                })
            }

            RuleKind::TrendBreak => {
                let matched =
                    close < last.ema50 && rsi_now < params.trend_break_rsi && rsi_falling;
                matched.then(|| {
                    (
                        Signal::Sell,
                        "Trend break: close below EMA50 with weak, falling RSI.".to_string(),
                    )
                })
            }
        }
    }
}

/// Canonical rule order: sells that preempt everything first, then the buy
/// setups from strongest to weakest evidence, then the late-cycle sells.
pub fn default_rules() -> Vec<RuleKind> {
    vec![
        RuleKind::BlowOffTop,
        RuleKind::DeepDip,
        RuleKind::HealthyPullback,
        RuleKind::TrendBreakout,
        RuleKind::Ema50Reclaim,
        RuleKind::ExtremeOverheat,
        RuleKind::Overheat,
        RuleKind::TrendBreak,
    ]
}
