//! Unified error handling.
//!
//! Dirty coordinate data is never an error here: unparseable records are
//! skipped and malformed bounds disable filtering. The variants below cover
//! contract violations and the I/O surface of the CLI.

use thiserror::Error;

/// Result type alias for geocluster operations.
pub type Result<T> = std::result::Result<T, AggregateError>;

/// Errors that can occur while setting up an aggregation.
#[derive(Debug, Error)]
pub enum AggregateError {
    /// The resolution strategy selector is not `divide` or `multiply`.
    #[error("unsupported resolution strategy '{0}' (expected 'divide' or 'multiply')")]
    UnsupportedStrategy(String),

    /// A bounding box given in textual form could not be read.
    #[error("invalid bounds '{0}' (expected north,south,east,west)")]
    InvalidBounds(String),

    /// I/O error while reading records.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Records or query could not be (de)serialized.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Extension trait for turning a missing value into an [`AggregateError`].
pub trait OptionExt<T> {
    /// Convert `None` into [`AggregateError::InvalidBounds`] carrying the raw input.
    fn ok_or_invalid_bounds(self, raw: &str) -> Result<T>;
}

impl<T> OptionExt<T> for Option<T> {
    fn ok_or_invalid_bounds(self, raw: &str) -> Result<T> {
        self.ok_or_else(|| AggregateError::InvalidBounds(raw.to_string()))
    }
}
