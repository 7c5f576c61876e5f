/// Error types for series construction and CSV exchange
use thiserror::Error;

use crate::quarter::Quarter;

/// Main error type for series operations
#[derive(Error, Debug)]
pub enum SeriesError {
    /// Failed to read or write CSV data
    #[error("Failed to process CSV: {0}")]
    Csv(#[from] csv::Error),

    /// Failed to flush CSV output
    #[error("Failed to write output: {0}")]
    Io(#[from] std::io::Error),

    /// CSV input carried no header row
    #[error("CSV input has no header row")]
    MissingHeader,

    /// The same column name appears twice in a header
    #[error("Duplicate column {0} in CSV header")]
    DuplicateColumn(String),

    /// A date or quarter label could not be parsed
    #[error("Failed to parse date: {0}")]
    InvalidDate(String),

    /// Quarter number outside 1..=4
    #[error("Invalid quarter number: {0}")]
    InvalidQuarter(u8),

    /// A cell could not be parsed as a number
    #[error("Invalid value {value:?} in row {row}, column {column}")]
    InvalidValue {
        row: usize,
        column: String,
        value: String,
    },

    /// The same quarter appears twice in one series
    #[error("Duplicate quarter {quarter} in series {series}")]
    DuplicateQuarter { series: String, quarter: Quarter },

    /// NaN or infinity where a real number is required
    #[error("Non-finite value in series {series}")]
    NonFiniteValue { series: String },
}

/// Type alias for Results using SeriesError
pub type Result<T> = std::result::Result<T, SeriesError>;
