// In crates/strategies/src/indicators.rs

//! Batch indicator math over a chronologically sorted price series.
//!
//! Each function returns an `IndicatorSeries` that remembers which input
//! position produced its first value. All three series end on the last input,
//! which is what lets the aligner pair them up from the tail.

use ta::Next;
use ta::indicators::{MovingAverageConvergenceDivergence as Macd, SimpleMovingAverage as Sma};

use crate::{Error, Result};

/// An indicator's output plus the input position of its first value.
#[derive(Debug, Clone, PartialEq)]
pub struct IndicatorSeries<T> {
    /// Index into the input series that produced `values[0]`.
    pub offset: usize,
    pub values: Vec<T>,
}

impl<T> IndicatorSeries<T> {
    fn empty(offset: usize) -> Self {
        Self { offset, values: Vec::new() }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// One MACD reading.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MacdPoint {
    /// Fast EMA minus slow EMA.
    pub macd: f64,
    /// EMA of the MACD line.
    pub signal: f64,
    pub histogram: f64,
}

fn check_period(name: &str, period: usize) -> Result<()> {
    if period == 0 {
        return Err(Error::InvalidParameters(format!("{name} must be greater than 0")));
    }
    Ok(())
}

/// Exponential moving average seeded with the simple mean of the first
/// `period` values.
///
/// The first value lines up with input index `period - 1`.
pub fn ema(values: &[f64], period: usize) -> Result<IndicatorSeries<f64>> {
    check_period("ema period", period)?;
    let offset = period - 1;
    if values.len() < period {
        return Ok(IndicatorSeries::empty(offset));
    }

    let mut sma = Sma::new(period).map_err(|e| Error::Indicator(format!("{e:?}")))?;
    let mut seed = f64::NAN;
    for value in &values[..period] {
        seed = sma.next(*value);
    }

    let k = 2.0 / (period as f64 + 1.0);
    let mut out = Vec::with_capacity(values.len() - offset);
    out.push(seed);
    let mut prev = seed;
    for value in &values[period..] {
        prev = (value - prev) * k + prev;
        out.push(prev);
    }

    Ok(IndicatorSeries { offset, values: out })
}

/// MACD with un-smoothed EMAs: the fast, slow and signal averages all start
/// from their first input rather than from a simple-mean seed.
///
/// The first `(slow - 1) + (signal - 1)` readings are warm-up and are not
/// returned, so the series is empty below `slow + signal - 1` inputs. That
/// is one bar looser than treating anything under `slow + signal` inputs as
/// too short: exactly `slow + signal - 1` inputs give a single reading.
pub fn macd(
    values: &[f64],
    fast_period: usize,
    slow_period: usize,
    signal_period: usize,
) -> Result<IndicatorSeries<MacdPoint>> {
    check_period("macd fast period", fast_period)?;
    check_period("macd slow period", slow_period)?;
    check_period("macd signal period", signal_period)?;

    let offset = (slow_period - 1) + (signal_period - 1);
    let mut indicator = Macd::new(fast_period, slow_period, signal_period)
        .map_err(|e| Error::Indicator(format!("{e:?}")))?;

    // Every value has to pass through the indicator, warm-up included.
    let mut points: Vec<MacdPoint> = values
        .iter()
        .map(|value| {
            let out = indicator.next(*value);
            MacdPoint {
                macd: out.macd,
                signal: out.signal,
                histogram: out.histogram,
            }
        })
        .collect();
    let points = points.split_off(offset.min(points.len()));

    Ok(IndicatorSeries { offset, values: points })
}

/// Williams %R: where the close sits inside the `period`-bar high/low range,
/// from 0 (at the high) down to -100 (at the low).
///
/// A `NaN` anywhere in a window makes that window's reading `NaN`.
pub fn williams_r(
    highs: &[f64],
    lows: &[f64],
    closes: &[f64],
    period: usize,
) -> Result<IndicatorSeries<f64>> {
    check_period("williams %r period", period)?;
    let offset = period - 1;
    let len = highs.len().min(lows.len()).min(closes.len());
    if len < period {
        return Ok(IndicatorSeries::empty(offset));
    }

    let out = (offset..len)
        .map(|i| {
            let window = i + 1 - period..=i;
            let highest = extreme(&highs[window.clone()], f64::max);
            let lowest = extreme(&lows[window], f64::min);
            (highest - closes[i]) / (highest - lowest) * -100.0
        })
        .collect();

    Ok(IndicatorSeries { offset, values: out })
}

fn extreme(window: &[f64], pick: fn(f64, f64) -> f64) -> f64 {
    window.iter().skip(1).fold(window[0], |acc, &v| {
        if acc.is_nan() || v.is_nan() { f64::NAN } else { pick(acc, v) }
    })
}
