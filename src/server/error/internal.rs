use std::num::{ParseIntError, TryFromIntError};
use thiserror::Error;

/// Internal issues with the codebase indicating unexpected behavior & possible bugs
#[derive(Error, Debug)]
pub enum InternalError {
    /// Failure to parse id from String
    ///
    /// Occurs when a Discord snowflake stored as text in the database cannot be
    /// read back as a `u64`.
    #[error("Failed to parse ID from String '{value}': {source}")]
    ParseStringId {
        /// The string value that failed to parse
        value: String,
        /// The underlying parse error
        #[source]
        source: ParseIntError,
    },

    /// A stored integer column does not fit the domain type
    #[error("Stored value {value} for column '{column}' is out of range: {source}")]
    ColumnOutOfRange {
        /// Name of the column
        column: &'static str,
        /// The stored value
        value: i64,
        /// The underlying conversion error
        #[source]
        source: TryFromIntError,
    },

    /// The shared HTTP client could not be constructed
    #[error("Failed to build HTTP client: {0}")]
    HttpClientBuild(#[source] reqwest::Error),
}
