// In crates/strategies/src/lib.rs

use core_types::{Candle, CandleRecord, Signal, SignalOutput};
use serde_json::Value;
use tracing::debug;

pub mod aligner;
pub mod classifier;
pub mod error;
pub mod indicators;
pub mod intersection;
pub mod macd_williams;
pub mod normalizer;
pub mod types;

pub use error::{Error, Result};
pub use types::SignalOptions;

/// The universal interface for a trading strategy.
///
/// A strategy is handed the candle history up to and including the newest
/// bar and answers with the decision for that bar.
pub trait Strategy {
    /// The name of the strategy.
    fn name(&self) -> &'static str;

    fn assess(&mut self, candles: &[Candle]) -> Signal;
}

/// Turns an unordered batch of candle records into one annotated decision
/// per bar, oldest first.
///
/// The result covers only the bars for which every indicator has a value,
/// so a batch shorter than the longest warm-up yields an empty list. The
/// same input and options always give the same output.
pub fn generate_signals<R: CandleRecord>(records: &[R], options: &SignalOptions) -> Result<Vec<SignalOutput>> {
    options.validate()?;

    let candles = normalizer::normalize(records, options);
    let closes: Vec<f64> = candles.iter().map(|c| c.close).collect();
    let highs: Vec<f64> = candles.iter().map(|c| c.high).collect();
    let lows: Vec<f64> = candles.iter().map(|c| c.low).collect();

    let ema = indicators::ema(&closes, options.ema_period)?;
    let macd = indicators::macd(
        &closes,
        options.macd_fast_period,
        options.macd_slow_period,
        options.macd_signal_period,
    )?;
    let williams_r = indicators::williams_r(&highs, &lows, &closes, options.williams_r_period)?;

    let mut aligned = aligner::align(&candles, &ema, &macd, &williams_r);
    intersection::mark_crossings(&mut aligned.macd);

    let outputs = classifier::classify(&aligned, options);
    debug!(
        candles = candles.len(),
        outputs = outputs.len(),
        crossings = outputs.iter().filter(|o| o.is_intersecting).count(),
        "Generated signals."
    );
    Ok(outputs)
}

/// Same as [`generate_signals`] for a parsed JSON document, which must be an
/// array of records.
pub fn signals_from_json(value: &Value, options: &SignalOptions) -> Result<Vec<SignalOutput>> {
    let records = value.as_array().ok_or_else(|| Error::NotASequence(json_kind(value).to_string()))?;
    generate_signals(records, options)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn non_array_input_fails_fast() {
        let err = signals_from_json(&json!({ "close": 1 }), &SignalOptions::default()).unwrap_err();
        assert!(matches!(err, Error::NotASequence(_)));
        assert!(err.to_string().contains("an object"));
    }

    #[test]
    fn empty_input_is_not_an_error() {
        let outputs = signals_from_json(&json!([]), &SignalOptions::default()).unwrap();
        assert!(outputs.is_empty());
    }

    #[test]
    fn invalid_options_are_rejected_before_any_work() {
        let options = SignalOptions { ema_period: 0, ..SignalOptions::default() };
        let err = signals_from_json(&json!([]), &options).unwrap_err();
        assert!(matches!(err, Error::InvalidParameters(_)));
    }
}
