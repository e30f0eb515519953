//! CandleLab CLI — run the candle pipeline over a CSV file.
//!
//! Commands:
//! - `run` — load OHLCV candles from CSV, compute indicators and signals,
//!   replay the backtest under the chosen exit policy, print the summary

use anyhow::{bail, Context, Result};
use candlelab_core::backtest::{BacktestPolicy, ExitPolicy};
use candlelab_core::domain::Candle;
use candlelab_core::pipeline::{analyze, Analysis};
use candlelab_core::signals::{latest_record, RuleSet, SignalParams};
use chrono::{DateTime, TimeZone, Utc};
use clap::{Parser, Subcommand, ValueEnum};
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(
    name = "candlelab",
    about = "CandleLab CLI — OHLCV indicator, signal, and backtest pipeline"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the full pipeline over a candle CSV file.
    Run {
        /// Path to a CSV file with header: timestamp,open,high,low,close,volume.
        /// Timestamps may be RFC 3339 or unix seconds.
        #[arg(long)]
        csv: PathBuf,

        /// Exit policy for the backtest simulator.
        #[arg(long, value_enum, default_value_t = Policy::Reverse)]
        policy: Policy,

        /// Holding period in bars (fixed-horizon policy).
        #[arg(long, default_value_t = 10)]
        horizon: usize,

        /// Time stop in bars (reverse and target policies).
        #[arg(long, default_value_t = 30)]
        max_hold: usize,

        /// ATR multiple defining the risk unit (target policy).
        #[arg(long, default_value_t = 1.0)]
        atr_mult: f64,

        /// Take-profit distance in risk units (target policy).
        #[arg(long, default_value_t = 2.0)]
        tp_mult: f64,

        /// Require ADX at or above this value before any signal fires.
        #[arg(long)]
        adx_min: Option<f64>,

        /// Require relative volume at or above this value before any signal fires.
        #[arg(long)]
        rvol_min: Option<f64>,

        /// Suppress signals when ATR exceeds this percent of price.
        #[arg(long)]
        atr_pct_max: Option<f64>,

        /// Write the full analysis (frames, records, trades, summary) as JSON.
        #[arg(long)]
        json: Option<PathBuf>,
    },
}

/// Exit policy choice on the command line.
#[derive(Clone, Copy, ValueEnum)]
enum Policy {
    /// Close every trade after a fixed number of bars.
    FixedHorizon,
    /// Close on the first opposing signal, with a time stop.
    Reverse,
    /// Reverse-signal exits plus an ATR-based partial take-profit.
    Target,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            csv,
            policy,
            horizon,
            max_hold,
            atr_mult,
            tp_mult,
            adx_min,
            rvol_min,
            atr_pct_max,
            json,
        } => {
            let exit = match policy {
                Policy::FixedHorizon => ExitPolicy::FixedHorizon { horizon },
                Policy::Reverse => ExitPolicy::ReverseSignal {
                    max_hold_bars: max_hold,
                },
                Policy::Target => ExitPolicy::ReverseSignalWithTarget {
                    max_hold_bars: max_hold,
                    atr_mult,
                    tp_mult,
                },
            };
            let rule_set = RuleSet {
                params: SignalParams {
                    adx_min,
                    rvol_min,
                    atr_pct_max,
                    ..SignalParams::default()
                },
                ..RuleSet::default()
            };

            run_pipeline(&csv, &rule_set, &BacktestPolicy { exit }, json.as_deref())
        }
    }
}

fn run_pipeline(
    csv_path: &Path,
    rule_set: &RuleSet,
    policy: &BacktestPolicy,
    json_out: Option<&Path>,
) -> Result<()> {
    let candles = load_candles(csv_path)
        .with_context(|| format!("failed to load candles from {}", csv_path.display()))?;
    if candles.is_empty() {
        bail!("no candles in {}", csv_path.display());
    }

    let analysis = analyze(&candles, rule_set, policy)
        .with_context(|| format!("invalid candle series in {}", csv_path.display()))?;

    print_summary(&candles, &analysis);

    if let Some(path) = json_out {
        let file = std::fs::File::create(path)
            .with_context(|| format!("failed to create {}", path.display()))?;
        serde_json::to_writer_pretty(file, &analysis)?;
        println!();
        println!("Analysis saved to: {}", path.display());
    }

    Ok(())
}

/// One CSV row; the timestamp column is parsed separately because it may be
/// either RFC 3339 or unix seconds.
#[derive(Deserialize)]
struct CsvRow {
    timestamp: String,
    open: f64,
    high: f64,
    low: f64,
    close: f64,
    volume: f64,
}

fn load_candles(path: &Path) -> Result<Vec<Candle>> {
    let mut reader = csv::Reader::from_path(path)?;
    let mut candles = Vec::new();

    for (line, row) in reader.deserialize::<CsvRow>().enumerate() {
        let row = row.with_context(|| format!("bad CSV row {}", line + 2))?;
        let timestamp = parse_timestamp(&row.timestamp)
            .with_context(|| format!("bad timestamp '{}' at row {}", row.timestamp, line + 2))?;
        candles.push(Candle {
            timestamp,
            open: row.open,
            high: row.high,
            low: row.low,
            close: row.close,
            volume: row.volume,
        });
    }

    Ok(candles)
}

fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(dt.with_timezone(&Utc));
    }
    if let Ok(secs) = raw.parse::<i64>() {
        if let Some(dt) = Utc.timestamp_opt(secs, 0).single() {
            return Ok(dt);
        }
    }
    bail!("expected RFC 3339 or unix seconds");
}

fn print_summary(candles: &[Candle], analysis: &Analysis) {
    let first = candles[0].timestamp;
    let last = candles[candles.len() - 1].timestamp;

    println!();
    println!("=== CandleLab Analysis ===");
    println!("Bars:           {}", candles.len());
    println!("Period:         {} to {}", first, last);

    let alerts = analysis
        .records
        .iter()
        .filter(|r| r.signal.is_actionable())
        .count();
    println!("Alerts:         {alerts}");
    match latest_record(&analysis.records) {
        Some(record) => {
            println!("Latest signal:  {}", record.signal.label());
            println!("Reason:         {}", record.reason);
        }
        None => println!("Latest signal:  NO DATA"),
    }

    let summary = &analysis.backtest.summary;
    println!();
    println!("--- Backtest ---");
    println!("Trades:         {}", summary.total_trades);
    println!("Avg Return:     {:+.2}%", summary.avg_return_pct);
    println!("Hit Rate:       {:.1}%", summary.hit_rate_pct);
    if let Some(r) = summary.avg_r_multiple {
        println!("Avg R-Multiple: {r:.2}");
    }
    println!("Max Drawdown:   {:.2}%", summary.max_drawdown_pct);

    if !summary.per_signal.is_empty() {
        println!();
        println!("--- By Entry Signal ---");
        println!(
            "{:<12} {:>7} {:>12} {:>10}",
            "Signal", "Trades", "Avg Return", "Hit Rate"
        );
        for breakdown in &summary.per_signal {
            println!(
                "{:<12} {:>7} {:>11.2}% {:>9.1}%",
                breakdown.signal.label(),
                breakdown.trades,
                breakdown.avg_return_pct,
                breakdown.hit_rate_pct
            );
        }
    }
}
