// In crates/strategies/src/aligner.rs

use core_types::Candle;
use tracing::{debug, warn};

use crate::indicators::{IndicatorSeries, MacdPoint};

/// A MACD reading after alignment, addressed by its aligned position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MacdEntry {
    /// Zero-based position shared with every other aligned series.
    pub index: usize,
    pub macd: f64,
    pub signal: f64,
    pub histogram: f64,
    pub is_intersecting: bool,
}

/// Which normalized candle each series' first kept entry came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeriesSources {
    pub candles: usize,
    pub ema: usize,
    pub macd: usize,
    pub williams_r: usize,
}

impl SeriesSources {
    /// True when every series starts on the same candle.
    pub fn agree(&self) -> bool {
        self.candles == self.ema && self.candles == self.macd && self.candles == self.williams_r
    }
}

/// Candles and indicator series cut down to a common trailing length.
#[derive(Debug, Clone, PartialEq)]
pub struct AlignedSeries {
    pub candles: Vec<Candle>,
    pub ema: Vec<f64>,
    pub macd: Vec<MacdEntry>,
    pub williams_r: Vec<f64>,
    pub sources: SeriesSources,
}

impl AlignedSeries {
    pub fn len(&self) -> usize {
        self.candles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candles.is_empty()
    }
}

/// Keeps the last `min_len` entries of every series, where `min_len` is the
/// shortest of the four.
///
/// Entries are paired by position from the end, not by timestamp. That holds
/// because every indicator consumed the same sorted candles and emits one
/// value per candle after its warm-up. The candle each series starts on is
/// recorded in `sources`; a mismatch is logged and left alone.
pub fn align(
    candles: &[Candle],
    ema: &IndicatorSeries<f64>,
    macd: &IndicatorSeries<MacdPoint>,
    williams_r: &IndicatorSeries<f64>,
) -> AlignedSeries {
    let min_len = candles
        .len()
        .min(ema.len())
        .min(macd.len())
        .min(williams_r.len());

    let sources = SeriesSources {
        candles: candles.len() - min_len,
        ema: ema.offset + ema.len() - min_len,
        macd: macd.offset + macd.len() - min_len,
        williams_r: williams_r.offset + williams_r.len() - min_len,
    };
    if min_len > 0 && !sources.agree() {
        warn!(?sources, "Aligned series start on different candles.");
    }
    debug!(
        candles = candles.len(),
        ema = ema.len(),
        macd = macd.len(),
        williams_r = williams_r.len(),
        aligned = min_len,
        "Aligned indicator series."
    );

    let macd_entries = tail(&macd.values, min_len)
        .iter()
        .enumerate()
        .map(|(index, point)| MacdEntry {
            index,
            macd: point.macd,
            signal: point.signal,
            histogram: point.histogram,
            is_intersecting: false,
        })
        .collect();

    AlignedSeries {
        candles: tail(candles, min_len).to_vec(),
        ema: tail(&ema.values, min_len).to_vec(),
        macd: macd_entries,
        williams_r: tail(&williams_r.values, min_len).to_vec(),
        sources,
    }
}

fn tail<T>(values: &[T], len: usize) -> &[T] {
    &values[values.len() - len..]
}
