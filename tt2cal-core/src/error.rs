//! Error types for the tt2cal ecosystem.

use thiserror::Error;

/// Errors that can occur in tt2cal operations.
#[derive(Error, Debug)]
pub enum TtCalError {
    #[error("Invalid weekday: {0}")]
    InvalidWeekday(String),

    #[error("Invalid week type: {0}")]
    InvalidWeekType(String),

    #[error("Academic calendar table error: {0}")]
    CalendarTable(String),

    #[error("ICS parse error: {0}")]
    IcsParse(String),

    #[error("ICS generation error: {0}")]
    IcsGenerate(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Result type alias for tt2cal operations.
pub type TtCalResult<T> = Result<T, TtCalError>;
