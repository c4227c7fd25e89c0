//! Error types for instrument adapters.

use thiserror::Error;

/// A specialized Result type for instrument operations.
pub type InstrumentResult<T> = Result<T, InstrumentError>;

/// Errors raised by the PCU and oscilloscope adapters.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InstrumentError {
    /// The first segment of a data-model path is not known to the driver.
    #[error("Top level datamodel item \"{top}\" does not exist")]
    UnknownTopLevel {
        /// The top-level segment.
        top: String,
    },

    /// The full data-model path does not resolve to a register.
    #[error("Datamodel item \"{path}\" does not exist")]
    UnknownItem {
        /// The dotted path that was searched.
        path: String,
    },

    /// An instrument reply could not be parsed.
    #[error("Invalid response to {command}: {response:?}")]
    InvalidResponse {
        /// The query that was sent.
        command: String,
        /// The raw reply.
        response: String,
    },

    /// A command argument cannot be encoded.
    #[error("Invalid argument: {reason}")]
    InvalidArgument {
        /// Description of the problem.
        reason: String,
    },

    /// The underlying driver or transport failed.
    #[error("Transport error: {reason}")]
    Transport {
        /// Description from the driver.
        reason: String,
    },
}

impl InstrumentError {
    /// Creates an invalid argument error.
    #[must_use]
    pub fn invalid_argument(reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            reason: reason.into(),
        }
    }

    /// Creates a transport error.
    #[must_use]
    pub fn transport(reason: impl Into<String>) -> Self {
        Self::Transport {
            reason: reason.into(),
        }
    }

    /// Creates an invalid response error.
    #[must_use]
    pub fn invalid_response(command: impl Into<String>, response: impl Into<String>) -> Self {
        Self::InvalidResponse {
            command: command.into(),
            response: response.into(),
        }
    }
}
