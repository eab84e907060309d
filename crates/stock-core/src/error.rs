// File: crates/stock-core/src/error.rs
// Summary: Error type for the few operations that can reject their input.

use thiserror::Error;

/// Errors surfaced by chart configuration, tool selection and indicator management.
///
/// Point ingestion and coordinate translation never produce these; malformed data
/// propagates as NaN and is filtered at draw time.
#[derive(Debug, Error)]
pub enum ChartError {
    #[error("unknown tool binding: {0}")]
    UnknownTool(String),
    #[error("unknown series id: {0}")]
    UnknownSeries(String),
    #[error("unknown indicator type: {0}")]
    UnknownIndicator(String),
    #[error("invalid value {value:?} for indicator parameter {name}")]
    InvalidParam { name: String, value: String },
    #[error("invalid color {0:?}, expected #rrggbb or #aarrggbb")]
    InvalidColor(String),
    #[error("invalid chart config: {0}")]
    Config(#[from] serde_json::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ChartError>;
