//! CSV error types

use thiserror::Error;

/// Result type for CSV operations
pub type CsvResult<T> = std::result::Result<T, CsvError>;

/// Errors that can occur during CSV operations.
///
/// Malformed rows never produce an error; they are skipped. Only failures
/// affecting the whole file are reported.
#[derive(Debug, Error)]
pub enum CsvError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV library error (invalid UTF-8, write failure)
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}
