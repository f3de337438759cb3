// In crates/core-types/src/record.rs

use std::borrow::Cow;
use std::collections::{BTreeMap, HashMap};

use serde_json::{Map, Value};

use crate::coerce::json_text;
use crate::types::Candle;

/// Anything that can hand out named fields as text.
///
/// This is the only thing the normalizer needs from an input record, so
/// exchange payloads, parsed JSON and plain string maps can all be fed to the
/// pipeline without first being converted into a fixed struct.
pub trait CandleRecord {
    /// Returns the textual form of `key`, or `None` when the record has no
    /// such field.
    fn field_text(&self, key: &str) -> Option<Cow<'_, str>>;
}

impl CandleRecord for Map<String, Value> {
    fn field_text(&self, key: &str) -> Option<Cow<'_, str>> {
        match self.get(key)? {
            Value::String(s) => Some(Cow::Borrowed(s.as_str())),
            other => Some(Cow::Owned(json_text(other))),
        }
    }
}

impl CandleRecord for Value {
    fn field_text(&self, key: &str) -> Option<Cow<'_, str>> {
        // Only objects carry named fields.
        self.as_object()?.field_text(key)
    }
}

impl CandleRecord for HashMap<String, String> {
    fn field_text(&self, key: &str) -> Option<Cow<'_, str>> {
        self.get(key).map(|s| Cow::Borrowed(s.as_str()))
    }
}

impl CandleRecord for BTreeMap<String, String> {
    fn field_text(&self, key: &str) -> Option<Cow<'_, str>> {
        self.get(key).map(|s| Cow::Borrowed(s.as_str()))
    }
}

impl CandleRecord for Candle {
    fn field_text(&self, key: &str) -> Option<Cow<'_, str>> {
        let value = match key {
            "open" => self.open,
            "close" => self.close,
            "low" => self.low,
            "high" => self.high,
            "timestamp" => return Some(Cow::Borrowed(self.timestamp.as_str())),
            _ => return None,
        };
        let text = match value {
            v if v == f64::INFINITY => "Infinity".to_string(),
            v if v == f64::NEG_INFINITY => "-Infinity".to_string(),
            v => v.to_string(),
        };
        Some(Cow::Owned(text))
    }
}

impl<T: CandleRecord + ?Sized> CandleRecord for &T {
    fn field_text(&self, key: &str) -> Option<Cow<'_, str>> {
        (**self).field_text(key)
    }
}
