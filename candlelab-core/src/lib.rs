//! CandleLab Core — indicator engine, signal engine, backtest simulator.
//!
//! The pipeline is three pure stages over an in-memory candle sequence:
//! - Indicator engine: candles → indicator-augmented frames (warmup = NaN)
//! - Signal engine: frames → per-bar signal records via an ordered rule
//!   table behind a regime gate, with a no-repeat transition filter
//! - Backtest simulator: signal-annotated frames → trades + summary under a
//!   caller-selected exit policy
//!
//! Everything is synchronous, deterministic, and free of I/O; identical
//! input always produces identical output.

pub mod backtest;
pub mod domain;
pub mod indicators;
pub mod pipeline;
pub mod signals;

#[cfg(test)]
mod tests {
    use super::*;

    /// Compile-time check: the pipeline's data types are Send + Sync, so a
    /// caller may hand results to a worker or UI thread freely.
    #[allow(dead_code)]
    fn assert_send_sync() {
        fn require_send<T: Send>() {}
        fn require_sync<T: Sync>() {}

        require_send::<domain::Candle>();
        require_sync::<domain::Candle>();
        require_send::<domain::IndicatorFrame>();
        require_sync::<domain::IndicatorFrame>();
        require_send::<domain::Signal>();
        require_sync::<domain::Signal>();
        require_send::<domain::SignalRecord>();
        require_sync::<domain::SignalRecord>();
        require_send::<domain::Trade>();
        require_sync::<domain::Trade>();
        require_send::<domain::SeriesError>();
        require_sync::<domain::SeriesError>();

        require_send::<signals::RuleSet>();
        require_sync::<signals::RuleSet>();
        require_send::<signals::SignalParams>();
        require_sync::<signals::SignalParams>();

        require_send::<backtest::BacktestPolicy>();
        require_sync::<backtest::BacktestPolicy>();
        require_send::<backtest::BacktestResult>();
        require_sync::<backtest::BacktestResult>();
        require_send::<backtest::BacktestSummary>();
        require_sync::<backtest::BacktestSummary>();

        require_send::<pipeline::Analysis>();
        require_sync::<pipeline::Analysis>();
    }
}
