//! The position walk: replays a signal-annotated frame sequence as a
//! single-position, long-only account.
//!
//! State machine: FLAT → OPEN on a BUY / STRONG BUY record while flat,
//! OPEN → FLAT on the policy's exit trigger. No pyramiding; a bar that
//! force-closes a position may immediately open a new one when it also
//! carries an entry signal (exit and entry at the same close).

use super::policy::ExitPolicy;
use crate::domain::{ExitReason, IndicatorFrame, Signal, SignalRecord, Trade};

/// Fallback risk unit when ATR is not yet warm at the entry bar.
const FALLBACK_RISK_FRAC: f64 = 0.02;

/// Position state carried between bars while OPEN.
struct OpenPosition {
    entry_index: usize,
    entry_price: f64,
    entry_signal: Signal,
    entry_reason: String,
    /// Risk unit and target; only set by the take-profit policy.
    target: Option<Target>,
}

struct Target {
    risk: f64,
    tp_level: f64,
    touched: bool,
}

/// Replay the sequence under an exit policy. Empty input or a signal list
/// with no actionable records yields an empty trade list, never an error.
pub fn simulate(
    frames: &[IndicatorFrame],
    signals: &[SignalRecord],
    exit: &ExitPolicy,
) -> Vec<Trade> {
    let n = frames.len();
    let mut trades = Vec::new();
    if n == 0 {
        return trades;
    }

    // Index-aligned view of the records (records carry their frame index)
    let mut by_index: Vec<Option<&SignalRecord>> = vec![None; n];
    for record in signals {
        if record.index < n {
            by_index[record.index] = Some(record);
        }
    }

    let mut open: Option<OpenPosition> = None;

    for i in 0..n {
        let signal = by_index[i].map_or(Signal::NoData, |r| r.signal);

        if let Some(pos) = open.as_mut() {
            if let Some(target) = pos.target.as_mut() {
                if frames[i].high() >= target.tp_level {
                    target.touched = true;
                }
            }

            let exit_reason = if exit.exits_on_reverse_signal() && signal.is_exit() {
                Some(ExitReason::ReverseSignal)
            } else if i - pos.entry_index >= exit.max_age() {
                Some(match exit {
                    ExitPolicy::FixedHorizon { .. } => ExitReason::FixedHorizon,
                    _ => ExitReason::TimeStop,
                })
            } else {
                None
            };

            if let Some(reason) = exit_reason {
                let pos = open.take().unwrap();
                trades.push(close_trade(pos, frames, i, reason));
            }
        }

        if open.is_none() && signal.is_entry() {
            let entry_price = frames[i].close();
            if entry_price > 0.0 {
                let target = make_target(exit, &frames[i], entry_price);
                open = Some(OpenPosition {
                    entry_index: i,
                    entry_price,
                    entry_signal: signal,
                    entry_reason: by_index[i].map_or(String::new(), |r| r.reason.clone()),
                    target,
                });
            }
        }
    }

    // Whatever is still open closes at the last available bar
    if let Some(pos) = open {
        if pos.entry_index < n - 1 {
            trades.push(close_trade(pos, frames, n - 1, ExitReason::EndOfData));
        }
        // An entry on the very last bar never becomes a trade
    }

    trades
}

fn make_target(exit: &ExitPolicy, frame: &IndicatorFrame, entry_price: f64) -> Option<Target> {
    match exit {
        ExitPolicy::ReverseSignalWithTarget {
            atr_mult, tp_mult, ..
        } => {
            let risk = if frame.atr14.is_nan() {
                FALLBACK_RISK_FRAC * entry_price
            } else {
                frame.atr14 * atr_mult
            };
            Some(Target {
                risk,
                tp_level: entry_price + risk * tp_mult,
                touched: false,
            })
        }
        _ => None,
    }
}

fn close_trade(
    pos: OpenPosition,
    frames: &[IndicatorFrame],
    exit_index: usize,
    exit_reason: ExitReason,
) -> Trade {
    let exit_price = frames[exit_index].close();

    // Under a touched target, half the position exited at the target level
    let (effective_exit, r_multiple) = match &pos.target {
        Some(target) => {
            let effective = if target.touched {
                0.5 * target.tp_level + 0.5 * exit_price
            } else {
                exit_price
            };
            let r = if target.risk > 0.0 {
                Some((effective - pos.entry_price) / target.risk)
            } else {
                None
            };
            (effective, r)
        }
        None => (exit_price, None),
    };

    let return_pct = (effective_exit - pos.entry_price) / pos.entry_price * 100.0;

    Trade {
        entry_index: pos.entry_index,
        entry_time: frames[pos.entry_index].candle.timestamp,
        entry_price: pos.entry_price,
        entry_signal: pos.entry_signal,
        entry_reason: pos.entry_reason,
        exit_index,
        exit_time: frames[exit_index].candle.timestamp,
        exit_price,
        exit_reason,
        return_pct,
        r_multiple,
        hold_bars: exit_index - pos.entry_index,
        correct: return_pct > 0.0,
    }
}
