//! Error types for the proximity core.
//!
//! The library surface reports failures through [`ProximityError`]. File
//! loading, configuration and the binary wrap these in `anyhow::Error`.

use thiserror::Error;

/// Errors raised while normalizing records or computing proximities.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ProximityError {
    /// The proximity window was zero or negative.
    #[error("Invalid proximity window: {0} (must be a positive duration)")]
    InvalidWindow(String),

    /// A raw record is missing a required field or carries an unparsable value.
    #[error("Malformed record: field `{field}` {reason}")]
    MalformedRecord { field: &'static str, reason: String },

    /// Aggregation referenced a track the history does not contain, or a
    /// pair's time difference sum overflowed.
    #[error("Internal invariant violated: {0}")]
    InternalInvariantViolation(String),
}

impl ProximityError {
    pub(crate) fn malformed(field: &'static str, reason: impl Into<String>) -> Self {
        Self::MalformedRecord {
            field,
            reason: reason.into(),
        }
    }
}

pub type Result<T, E = ProximityError> = std::result::Result<T, E>;
