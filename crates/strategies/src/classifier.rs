// In crates/strategies/src/classifier.rs

use core_types::{Signal, SignalOutput};

use crate::aligner::AlignedSeries;
use crate::types::SignalOptions;

/// Williams %R at or above this level is overbought.
pub const OVERBOUGHT: f64 = -20.0;
/// Williams %R at or below this level is oversold.
pub const OVERSOLD: f64 = -80.0;

/// The buy and sell edges of the band around one EMA value.
pub fn ema_band(ema: f64, options: &SignalOptions) -> (f64, f64) {
    let buy = ema - ema * options.ema_buy_ratio;
    let sell = ema + ema * options.ema_sell_ratio;
    (buy, sell)
}

/// The decision for a bar on which the MACD lines crossed.
///
/// Sell is tested first and wins when both rules hold.
pub fn decide(close: f64, williams_r: f64, ema_buy: f64, ema_sell: f64) -> Option<Signal> {
    if williams_r >= OVERBOUGHT && close >= ema_sell {
        Some(Signal::Sell)
    } else if williams_r <= OVERSOLD && close <= ema_buy {
        Some(Signal::Buy)
    } else {
        None
    }
}

/// Builds one `SignalOutput` per aligned position. Crossing bars that match
/// a rule get its decision; everything else holds.
pub fn classify(aligned: &AlignedSeries, options: &SignalOptions) -> Vec<SignalOutput> {
    let bands: Vec<(f64, f64)> = aligned.ema.iter().map(|&ema| ema_band(ema, options)).collect();

    let mut signals = vec![Signal::Hold; aligned.len()];
    for entry in aligned.macd.iter().filter(|m| m.is_intersecting) {
        let i = entry.index;
        let (ema_buy, ema_sell) = bands[i];
        if let Some(signal) = decide(aligned.candles[i].close, aligned.williams_r[i], ema_buy, ema_sell) {
            signals[i] = signal;
        }
    }

    aligned
        .macd
        .iter()
        .map(|entry| {
            let i = entry.index;
            let candle = &aligned.candles[i];
            let (ema_buy, ema_sell) = bands[i];
            SignalOutput {
                open: candle.open,
                close: candle.close,
                low: candle.low,
                high: candle.high,
                timestamp: candle.timestamp.clone(),
                ema: aligned.ema[i],
                ema_buy,
                ema_sell,
                macd: entry.macd,
                macd_signal: entry.signal,
                macd_histogram: entry.histogram,
                williams_r: aligned.williams_r[i],
                is_intersecting: entry.is_intersecting,
                signal: signals[i],
            }
        })
        .collect()
}
