// In crates/strategies/src/normalizer.rs

use core_types::coerce::{coerce_number, coerce_text};
use core_types::{Candle, CandleRecord};

use crate::types::SignalOptions;

/// Maps loosely typed records onto `Candle`s and orders them by timestamp.
///
/// Prices that do not read as numbers become `NaN`; a missing timestamp reads
/// as `"undefined"`. The sort compares timestamps as plain strings and is
/// stable, so records sharing a timestamp keep their input order.
pub fn normalize<R: CandleRecord>(records: &[R], options: &SignalOptions) -> Vec<Candle> {
    let mut candles: Vec<Candle> = records
        .iter()
        .map(|record| to_candle(record, options))
        .collect();

    candles.sort_by(|a, b| a.timestamp.cmp(&b.timestamp));
    candles
}

fn to_candle<R: CandleRecord>(record: &R, options: &SignalOptions) -> Candle {
    let number = |key: &str| coerce_number(record.field_text(key).as_deref());
    Candle {
        open: number(&options.open_key),
        close: number(&options.close_key),
        low: number(&options.low_key),
        high: number(&options.high_key),
        timestamp: coerce_text(record.field_text(&options.timestamp_key).as_deref()),
    }
}
