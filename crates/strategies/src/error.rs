// In crates/strategies/src/error.rs

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid signal parameters: {0}")]
    InvalidParameters(String),

    #[error("Expected a sequence of candle records, got {0}")]
    NotASequence(String),

    #[error("Indicator construction failed: {0}")]
    Indicator(String),
}

pub type Result<T> = std::result::Result<T, Error>;
