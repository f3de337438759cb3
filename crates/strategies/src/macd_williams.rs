// In crates/strategies/src/macd_williams.rs

use core_types::{Candle, Signal, SignalOutput};
use tracing::warn;

use crate::types::SignalOptions;
use crate::{Result, Strategy, generate_signals};

/// Bar-by-bar front end for the MACD crossover / Williams %R / EMA band
/// pipeline.
///
/// Each assessment reruns the batch pipeline over the history it is given and
/// reports the decision for the newest bar that has a full set of indicator
/// values.
#[derive(Debug)]
pub struct MacdWilliams {
    options: SignalOptions,
    /// Output of the most recent assessment.
    last_outputs: Vec<SignalOutput>,
}

impl MacdWilliams {
    /// Creates a new `MacdWilliams` strategy, rejecting unusable periods up front.
    ///
    /// Record key settings are replaced by the canonical field names since
    /// the strategy is fed `Candle`s.
    pub fn new(options: SignalOptions) -> Result<Self> {
        options.validate()?;
        Ok(Self {
            options: options.with_default_keys(),
            last_outputs: Vec::new(),
        })
    }

    pub fn options(&self) -> &SignalOptions {
        &self.options
    }

    /// The newest annotated bar from the last assessment, if there was one.
    pub fn latest(&self) -> Option<&SignalOutput> {
        self.last_outputs.last()
    }
}

impl Strategy for MacdWilliams {
    fn name(&self) -> &'static str {
        "MacdWilliamsCrossover"
    }

    fn assess(&mut self, candles: &[Candle]) -> Signal {
        // Not enough data yet.
        if candles.len() <= self.options.warm_up() {
            self.last_outputs.clear();
            return Signal::Hold;
        }

        match generate_signals(candles, &self.options) {
            Ok(outputs) => self.last_outputs = outputs,
            Err(e) => {
                warn!(error = %e, "Signal pipeline failed; holding.");
                self.last_outputs.clear();
            }
        }

        self.latest().map_or(Signal::Hold, |out| out.signal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candles(closes: &[f64]) -> Vec<Candle> {
        closes
            .iter()
            .enumerate()
            .map(|(i, &close)| Candle {
                open: close,
                close,
                low: close - 1.0,
                high: close + 1.0,
                timestamp: format!("2022-08-01T{:02}:{:02}:00.000Z", i / 60, i % 60),
            })
            .collect()
    }

    #[test]
    fn rejects_zero_periods() {
        let options = SignalOptions { williams_r_period: 0, ..SignalOptions::default() };
        assert!(MacdWilliams::new(options).is_err());
    }

    #[test]
    fn ignores_custom_record_keys() {
        let options = SignalOptions { close_key: "c".to_string(), ..SignalOptions::default() };
        let strategy = MacdWilliams::new(options).unwrap();
        assert_eq!(strategy.options().close_key, "close");
    }

    #[test]
    fn holds_until_warmed_up() {
        let mut strategy = MacdWilliams::new(SignalOptions::default()).unwrap();
        let history = candles(&[100.0; 29]);
        assert_eq!(strategy.assess(&history), Signal::Hold);
        assert!(strategy.latest().is_none());
    }

    #[test]
    fn reports_the_newest_bar() {
        let mut strategy = MacdWilliams::new(SignalOptions::default()).unwrap();
        let closes: Vec<f64> = (0..80).map(|i| 100.0 + (i as f64 / 4.0).sin() * 5.0).collect();
        let history = candles(&closes);

        let signal = strategy.assess(&history);
        let latest = strategy.latest().unwrap();
        assert_eq!(latest.timestamp, history.last().unwrap().timestamp);
        assert_eq!(latest.signal, signal);
        assert_eq!(strategy.name(), "MacdWilliamsCrossover");
    }
}
