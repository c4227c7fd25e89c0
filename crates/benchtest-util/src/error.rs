//! Error types for the utility helpers.

use thiserror::Error;

/// A specialized Result type for the utility helpers.
pub type UtilResult<T> = Result<T, UtilError>;

/// Errors raised by the utility helpers.
#[derive(Error, Debug)]
pub enum UtilError {
    /// Colour name or code not in the alias table.
    #[error("Unknown colour: {0}")]
    UnknownColour(String),

    /// Writing to the terminal failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
