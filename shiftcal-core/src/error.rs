//! Error types for shiftcal.

use thiserror::Error;

/// Errors that can occur while modelling, encoding or syncing events.
#[derive(Error, Debug)]
pub enum ShiftCalError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Calendar not found: {0}")]
    CalendarNotFound(String),

    #[error("Event '{0}' has no remote object to delete")]
    NoBackingObject(String),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Invalid {field} timestamp: '{value}'")]
    InvalidTimestamp { field: &'static str, value: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for shiftcal operations.
pub type ShiftCalResult<T> = Result<T, ShiftCalError>;
