// In crates/strategies/src/types.rs

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Parameters of the MACD / Williams %R / EMA-band signal pipeline.
///
/// Keys are snake_case; the camelCase names used by existing JSON callers
/// (`closeKey`, `timestampISO8601Key`, ...) are accepted as aliases. Any key
/// left out takes its default.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct SignalOptions {
    // Field names to read from each input record
    #[serde(alias = "openKey")]
    pub open_key: String,
    #[serde(alias = "closeKey")]
    pub close_key: String,
    #[serde(alias = "lowKey")]
    pub low_key: String,
    #[serde(alias = "highKey")]
    pub high_key: String,
    #[serde(alias = "timestampISO8601Key")]
    pub timestamp_key: String,

    #[serde(alias = "emaPeriod")]
    pub ema_period: usize,
    /// Fraction of the EMA subtracted to form the buy edge of the band.
    #[serde(alias = "emaBuyRatio")]
    pub ema_buy_ratio: f64,
    /// Fraction of the EMA added to form the sell edge of the band.
    #[serde(alias = "emaSellRatio")]
    pub ema_sell_ratio: f64,

    #[serde(alias = "macdFastPeriod")]
    pub macd_fast_period: usize,
    #[serde(alias = "macdSlowPeriod")]
    pub macd_slow_period: usize,
    #[serde(alias = "macdSignalPeriod")]
    pub macd_signal_period: usize,

    #[serde(alias = "williamsRPeriod")]
    pub williams_r_period: usize,
}

impl Default for SignalOptions {
    fn default() -> Self {
        Self {
            open_key: "open".to_string(),
            close_key: "close".to_string(),
            low_key: "low".to_string(),
            high_key: "high".to_string(),
            timestamp_key: "timestamp".to_string(),
            ema_period: 30,
            ema_buy_ratio: 0.005,
            ema_sell_ratio: 0.005,
            macd_fast_period: 5,
            macd_slow_period: 10,
            macd_signal_period: 7,
            williams_r_period: 20,
        }
    }
}

impl SignalOptions {
    /// Rejects zero-length indicator windows. Nothing else is checked.
    pub fn validate(&self) -> Result<()> {
        let periods = [
            ("ema_period", self.ema_period),
            ("macd_fast_period", self.macd_fast_period),
            ("macd_slow_period", self.macd_slow_period),
            ("macd_signal_period", self.macd_signal_period),
            ("williams_r_period", self.williams_r_period),
        ];
        for (name, period) in periods {
            if period == 0 {
                return Err(Error::InvalidParameters(format!("{name} must be greater than 0")));
            }
        }
        Ok(())
    }

    /// The same options reading the canonical `Candle` field names, for
    /// feeding already-normalized candles back through the pipeline.
    pub fn with_default_keys(self) -> Self {
        let defaults = Self::default();
        Self {
            open_key: defaults.open_key,
            close_key: defaults.close_key,
            low_key: defaults.low_key,
            high_key: defaults.high_key,
            timestamp_key: defaults.timestamp_key,
            ..self
        }
    }

    /// Number of bars the slowest indicator consumes before its first value.
    pub fn warm_up(&self) -> usize {
        let macd = (self.macd_slow_period + self.macd_signal_period).saturating_sub(2);
        self.ema_period
            .saturating_sub(1)
            .max(macd)
            .max(self.williams_r_period.saturating_sub(1))
    }
}
