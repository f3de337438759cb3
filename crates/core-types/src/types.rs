// In crates/core-types/src/types.rs

use serde::{Deserialize, Serialize};
use std::fmt;

/// A single normalized price bar.
///
/// Prices are plain `f64` and may be `NaN` when the upstream record held
/// something that could not be read as a number. The timestamp is kept as the
/// ISO-8601 text it arrived as and is only ever compared as a string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candle {
    pub open: f64,
    pub close: f64,
    pub low: f64,
    pub high: f64,
    pub timestamp: String,
}

/// The decision attached to one bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Signal {
    Buy,
    Sell,
    #[default]
    Hold,
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Signal::Buy => "buy",
            Signal::Sell => "sell",
            Signal::Hold => "hold",
        };
        f.write_str(label)
    }
}

/// One row of the pipeline's result: the bar itself, every indicator value
/// that went into the decision, and the decision.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignalOutput {
    pub open: f64,
    pub close: f64,
    pub low: f64,
    pub high: f64,
    pub timestamp: String,
    pub ema: f64,
    /// Lower edge of the EMA band.
    pub ema_buy: f64,
    /// Upper edge of the EMA band.
    pub ema_sell: f64,
    pub macd: f64,
    pub macd_signal: f64,
    pub macd_histogram: f64,
    pub williams_r: f64,
    /// True when the MACD line crossed its signal line since the previous bar.
    pub is_intersecting: bool,
    pub signal: Signal,
}
