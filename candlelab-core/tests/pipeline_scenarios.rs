//! End-to-end scenarios through the public pipeline API.

use candlelab_core::backtest::{run_backtest, BacktestPolicy};
use candlelab_core::domain::{Candle, IndicatorFrame, Signal, SignalRecord};
use candlelab_core::indicators::compute_indicators;
use candlelab_core::pipeline::analyze;
use candlelab_core::signals::{compute_signals, latest_signal, RuleSet};
use chrono::{Duration, TimeZone, Utc};

fn make_candles(closes: &[f64]) -> Vec<Candle> {
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

/// Hand-built frame: close 100, all indicators NaN, customized per test.
fn frame(customize: impl FnOnce(&mut IndicatorFrame)) -> IndicatorFrame {
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

// ── Scenario: bear tape never signals ────────────────────────────────

#[test]
fn declining_tape_holds_everything() {
    // A steadily falling series stays below its own 200-bar mean, so the
    // regime gate holds every bar, before and after MA200 warmup.
    let closes: Vec<f64> = (0..400).map(|i| 300.0 - 0.5 * i as f64).collect();
    let candles = make_candles(&closes);

    let analysis = analyze(&candles, &RuleSet::default(), &BacktestPolicy::default()).unwrap();

    assert_eq!(analysis.records.len(), 400);
    assert_eq!(analysis.records[0].signal, Signal::NoData);
    for record in &analysis.records[1..] {
        assert_eq!(record.signal, Signal::Hold, "bar {}", record.index);
        assert!(record.reason.contains("MA200"), "bar {}", record.index);
    }
    assert!(analysis.backtest.trades.is_empty());
    assert_eq!(analysis.backtest.summary.total_trades, 0);
    assert_eq!(latest_signal(&analysis.records), Signal::Hold);
}

// ── Scenario: pullback buy fires once at the regime crossing ─────────

#[test]
fn pullback_buy_fires_once_after_regime_crossing() {
    let below = || {
        frame(|f| {
            f.candle.close = 95.0;
            f.ma200 = 100.0;
            f.rsi14 = 38.0;
        })
    };
    // Above MA200, close under EMA50's pullback threshold, RSI rising in
    // the 30–48 zone: the healthy-pullback rule matches on every bar.
    let pullback = |rsi: f64| {
        frame(|f| {
            f.candle.close = 101.0;
            f.ma200 = 100.0;
            f.ema20 = 104.0;
            f.ema50 = 106.0;
            f.bb_mid = 100.0;
            f.bb_up = 110.0;
            f.bb_lo = 90.0;
            f.rsi14 = rsi;
        })
    };

    let frames = vec![
        below(),
        below(),
        below(),
        pullback(42.0),
        pullback(43.0),
        pullback(44.0),
    ];
    let records = compute_signals(&frames);

    assert_eq!(records[0].signal, Signal::NoData);
    for record in &records[1..3] {
        assert_eq!(record.signal, Signal::Hold);
        assert!(record.reason.contains("below MA200"));
    }
    assert_eq!(records[3].signal, Signal::Buy);
    assert!(records[3].reason.contains("pullback"));
    // The same raw decision on the following bars degrades to HOLD
    for record in &records[4..] {
        assert_eq!(record.signal, Signal::Hold);
        assert!(record.reason.contains("unchanged"));
    }

    let buys = records
        .iter()
        .filter(|r| r.signal == Signal::Buy)
        .count();
    assert_eq!(buys, 1);
}

// ── Scenario: one round trip, summary figures by hand ────────────────

#[test]
fn single_round_trip_summary() {
    let frames: Vec<IndicatorFrame> = (0..20)
        .map(|i| {
            frame(|f| {
                f.candle.timestamp += Duration::hours(i as i64);
                let close = if i >= 15 { 110.0 } else { 100.0 };
                f.candle.close = close;
                f.candle.high = close + 1.0;
                f.candle.low = close - 1.0;
            })
        })
        .collect();
    let records = vec![
        SignalRecord {
            index: 5,
            signal: Signal::Buy,
            reason: "dip".into(),
        },
        SignalRecord {
            index: 15,
            signal: Signal::Sell,
            reason: "overheat".into(),
        },
    ];

    let result = run_backtest(&frames, &records, &BacktestPolicy::default());

    assert_eq!(result.trades.len(), 1);
    let trade = &result.trades[0];
    assert_eq!(trade.entry_index, 5);
    assert_eq!(trade.exit_index, 15);
    assert!((trade.return_pct - 10.0).abs() < 1e-12);
    assert_eq!(trade.hold_bars, 10);
    assert!(trade.correct);

    let summary = &result.summary;
    assert_eq!(summary.total_trades, 1);
    assert!((summary.avg_return_pct - 10.0).abs() < 1e-12);
    assert!((summary.hit_rate_pct - 100.0).abs() < 1e-12);
    assert_eq!(summary.max_drawdown_pct, 0.0);
    assert_eq!(summary.per_signal.len(), 1);
    assert_eq!(summary.per_signal[0].signal, Signal::Buy);
}

// ── Scenario: no trades at all ───────────────────────────────────────

#[test]
fn no_signals_zeroed_summary() {
    let result = run_backtest(&[], &[], &BacktestPolicy::default());
    assert!(result.trades.is_empty());
    assert_eq!(result.summary.total_trades, 0);
    assert_eq!(result.summary.avg_return_pct, 0.0);
    assert_eq!(result.summary.hit_rate_pct, 0.0);
    assert_eq!(result.summary.avg_r_multiple, None);
    assert_eq!(result.summary.max_drawdown_pct, 0.0);
    assert!(result.summary.per_signal.is_empty());
}

// ── Scenario: RSI saturates on a one-way tape ────────────────────────

#[test]
fn monotone_rise_saturates_rsi() {
    let closes: Vec<f64> = (0..60).map(|i| 100.0 + i as f64).collect();
    let frames = compute_indicators(&make_candles(&closes));

    // No down move ever: the average loss stays zero and RSI pins at 100
    assert!(frames[0].rsi14.is_nan());
    for frame in &frames[1..] {
        assert_eq!(frame.rsi14, 100.0);
    }
}

// ── Scenario: full pipeline on a realistic bull tape ─────────────────

#[test]
fn bull_tape_full_pipeline_is_consistent() {
    // Rising drift with a sinusoidal swing: crosses above MA200 and keeps
    // producing dips and extensions afterwards.
    let closes: Vec<f64> = (0..500)
        .map(|i| 100.0 + i as f64 * 0.2 + (i as f64 * 0.25).sin() * 6.0)
        .collect();
    let candles = make_candles(&closes);

    let analysis = analyze(&candles, &RuleSet::default(), &BacktestPolicy::default()).unwrap();

    assert_eq!(analysis.frames.len(), candles.len());
    assert_eq!(analysis.records.len(), candles.len());

    for trade in &analysis.backtest.trades {
        assert!(trade.entry_index < trade.exit_index);
        assert!(trade.entry_signal.is_entry());
        assert!(trade.entry_price > 0.0);
    }
    for pair in analysis.backtest.trades.windows(2) {
        assert!(pair[0].exit_index <= pair[1].entry_index);
    }
    assert_eq!(
        analysis.backtest.summary.total_trades,
        analysis.backtest.trades.len()
    );
}
