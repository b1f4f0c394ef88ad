//! Error types for style values and style tables.
//!
//! Format setters never fail. Errors are only produced by explicit
//! validation and by index lookups into the style tables.
use thiserror::Error;

/// Main error type for xlstyle operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// An attribute holds a value outside the range the file format accepts
    #[error("Invalid attribute range: {attribute} = {value}")]
    InvalidAttributeRange {
        attribute: &'static str,
        value: i64,
    },

    /// A style table lookup used an index past the end of the table
    #[error("Index {index} out of range for {table} table")]
    IndexOutOfRange { table: &'static str, index: u32 },
}

/// Result type for xlstyle operations.
pub type Result<T> = std::result::Result<T, Error>;
