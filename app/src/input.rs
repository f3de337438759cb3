// In app/src/input.rs

use anyhow::{Context, Result};
use core_types::{Candle, SignalOutput};
use serde_json::Value;
use std::fs;
use std::path::Path;
use strategies::{SignalOptions, normalizer, signals_from_json};

/// Reads a JSON document from disk.
pub fn read_json(path: &Path) -> Result<Value> {
    let content = fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
    let value = serde_json::from_str(&content).with_context(|| format!("Invalid JSON in {}", path.display()))?;
    Ok(value)
}

/// Runs the whole pipeline over one candle file.
pub fn signals_for_file(path: &Path, options: &SignalOptions) -> Result<Vec<SignalOutput>> {
    let value = read_json(path)?;
    let outputs = signals_from_json(&value, options).with_context(|| format!("Cannot process {}", path.display()))?;
    Ok(outputs)
}

/// Reads a candle file into normalized, time-ordered candles.
pub fn candles_for_file(path: &Path, options: &SignalOptions) -> Result<Vec<Candle>> {
    let value = read_json(path)?;
    let records = value
        .as_array()
        .with_context(|| format!("{} does not hold a JSON array", path.display()))?;
    Ok(normalizer::normalize(records, options))
}
