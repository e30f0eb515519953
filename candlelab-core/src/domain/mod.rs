//! Domain types for CandleLab.

pub mod candle;
pub mod frame;
pub mod signal;
pub mod trade;

pub use candle::{validate_series, Candle, SeriesError};
pub use frame::IndicatorFrame;
pub use signal::{Signal, SignalRecord};
pub use trade::{ExitReason, Trade};
