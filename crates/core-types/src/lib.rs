// In crates/core-types/src/lib.rs

pub mod coerce;
pub mod record;
pub mod types;

// Re-export the most important types for easy access from other crates.
pub use record::CandleRecord;
pub use types::{Candle, Signal, SignalOutput};
