//! The module contains the errors the engine can throw.
//!
//! The errors are:
//!
//! - [`InvalidTimestamp`] thrown when a CSV timestamp does not match the
//!   fixed format.
//! - [`InvalidDate`] thrown when a filter date does not match `%Y-%m-%d`.
//! - [`InvalidAmount`] thrown when a monetary string cannot be parsed.
//! - [`Row`] wraps any of the above with the CSV line it came from.
//!
//! [`InvalidTimestamp`]: EngineError::InvalidTimestamp
//! [`InvalidDate`]: EngineError::InvalidDate
//! [`InvalidAmount`]: EngineError::InvalidAmount
//! [`Row`]: EngineError::Row

use thiserror::Error;

/// Engine custom errors.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("invalid timestamp \"{0}\", expected YYYY-MM-DD HH:MM:SS")]
    InvalidTimestamp(String),
    #[error("invalid date \"{0}\", expected YYYY-MM-DD")]
    InvalidDate(String),
    #[error("invalid amount: {0}")]
    InvalidAmount(String),
    #[error("row {line}: {source}")]
    Row {
        line: u64,
        #[source]
        source: Box<EngineError>,
    },
    #[error(transparent)]
    Csv(#[from] csv::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl EngineError {
    /// Wraps the error with the CSV line (1-based, header included) it
    /// originated from.
    #[must_use]
    pub fn at_line(self, line: u64) -> Self {
        Self::Row {
            line,
            source: Box::new(self),
        }
    }
}

impl PartialEq for EngineError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::InvalidTimestamp(a), Self::InvalidTimestamp(b)) => a == b,
            (Self::InvalidDate(a), Self::InvalidDate(b)) => a == b,
            (Self::InvalidAmount(a), Self::InvalidAmount(b)) => a == b,
            (Self::Row { line: a, source: sa }, Self::Row { line: b, source: sb }) => {
                a == b && sa == sb
            }
            (Self::Csv(a), Self::Csv(b)) => a.to_string() == b.to_string(),
            (Self::Json(a), Self::Json(b)) => a.to_string() == b.to_string(),
            (Self::Io(a), Self::Io(b)) => a.to_string() == b.to_string(),
            _ => false,
        }
    }
}
