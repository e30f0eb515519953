//! Signal engine — a causal, single-pass rule evaluator.
//!
//! For each bar the engine runs the regime gate, then walks the ordered
//! rule table; the first matching rule decides the raw signal. A transition
//! filter then suppresses repeats: a raw decision identical to the last
//! actionable signal degrades to HOLD, so consecutive duplicate alerts
//! never reach the caller.
//!
//! The only mutable state is the last-actionable accumulator, threaded
//! through the single forward pass — it never escapes the function call.

pub mod params;
pub mod regime;
pub mod rules;

pub use params::SignalParams;
pub use regime::regime_hold_reason;
pub use rules::{default_rules, RuleKind, VolRegime};

use crate::domain::{IndicatorFrame, Signal, SignalRecord};
use serde::{Deserialize, Serialize};

/// An ordered rule table plus its thresholds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleSet {
    pub rules: Vec<RuleKind>,
    pub params: SignalParams,
}

impl Default for RuleSet {
    fn default() -> Self {
        Self {
            rules: default_rules(),
            params: SignalParams::default(),
        }
    }
}

impl RuleSet {
    /// Raw per-bar decision: regime gate, then first matching rule.
    /// `index` must be >= 1 (the rules compare against the previous bar).
    pub fn decide(&self, frames: &[IndicatorFrame], index: usize) -> (Signal, String) {
        let last = &frames[index];

        if let Some(reason) = regime_hold_reason(last, &self.params) {
            return (Signal::Hold, reason);
        }

        let vol = VolRegime::of(last, &self.params);
        for rule in &self.rules {
            if let Some(decision) = rule.evaluate(frames, index, &self.params, vol) {
                return decision;
            }
        }

        (
            Signal::Hold,
            "Neutral — neither a dip nor an extension detected.".to_string(),
        )
    }
}

/// Evaluate the default rule set over the full frame sequence.
pub fn compute_signals(frames: &[IndicatorFrame]) -> Vec<SignalRecord> {
    compute_signals_with(frames, &RuleSet::default())
}

/// Evaluate a rule set over the full frame sequence. O(n) single pass.
///
/// The record at index i depends only on frames `0..=i` and the running
/// last-actionable state — never on later bars.
pub fn compute_signals_with(frames: &[IndicatorFrame], rule_set: &RuleSet) -> Vec<SignalRecord> {
    let mut records = Vec::with_capacity(frames.len());
    let mut last_actionable = Signal::NoData;

    for index in 0..frames.len() {
        if index == 0 {
            records.push(SignalRecord {
                index,
                signal: Signal::NoData,
                reason: "First candle — no prior bar to evaluate.".to_string(),
            });
            continue;
        }

        let (raw, reason) = rule_set.decide(frames, index);

        if raw == last_actionable {
            records.push(SignalRecord {
                index,
                signal: Signal::Hold,
                reason: format!("Signal '{raw}' unchanged — no new alert."),
            });
        } else {
            if raw.is_actionable() {
                last_actionable = raw;
            }
            records.push(SignalRecord {
                index,
                signal: raw,
                reason,
            });
        }
    }

    records
}

/// The most recent valid signal (HOLD included), or NO DATA when the
/// sequence has produced none.
pub fn latest_signal(records: &[SignalRecord]) -> Signal {
    latest_record(records).map_or(Signal::NoData, |r| r.signal)
}

/// The most recent record carrying a valid signal.
pub fn latest_record(records: &[SignalRecord]) -> Option<&SignalRecord> {
    records.iter().rev().find(|r| r.signal.is_valid())
}

/// Shared test scaffolding for hand-built indicator frames.
#[cfg(test)]
pub mod test_frames {
    use crate::domain::{Candle, IndicatorFrame};
    use chrono::{TimeZone, Utc};

    /// A neutral frame: close 100, range [99, 101], all indicators NaN.
    /// The closure customizes whatever the test cares about.
    pub fn frame(customize: impl FnOnce(&mut IndicatorFrame)) -> IndicatorFrame {
        let mut f = IndicatorFrame {
            candle: Candle {
                timestamp: Utc.with_ymd_and_hms(2024, 1, 2, 0, 0, 0).unwrap(),
                open: 100.0,
                high: 101.0,
                low: 99.0,
                close: 100.0,
                volume: 1000.0,
            },
            ema20: f64::NAN,
            ema50: f64::NAN,
            ma200: f64::NAN,
            bb_mid: f64::NAN,
            bb_up: f64::NAN,
            bb_lo: f64::NAN,
            rsi14: f64::NAN,
            atr14: f64::NAN,
            adx14: f64::NAN,
            rvol20: f64::NAN,
        };
        customize(&mut f);
        f
    }

    /// A (prev, last) pair for the two-bar rules.
    pub fn frame_pair(
        customize_prev: impl FnOnce(&mut IndicatorFrame),
        customize_last: impl FnOnce(&mut IndicatorFrame),
    ) -> Vec<IndicatorFrame> {
        vec![frame(customize_prev), frame(customize_last)]
    }
}
