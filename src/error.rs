//! Error Types
//!
//! Typed failures for decoding, lookup and the query protocol.

use std::io;
use thiserror::Error;

/// Errors produced by wordvec operations
#[derive(Error, Debug)]
pub enum Error {
    /// Underlying read/write failure
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Malformed or truncated vector file
    #[error("Format error: {0}")]
    Format(String),

    /// Query referenced a word that is not in the table
    #[error("Unknown word: {0}")]
    UnknownWord(String),

    /// Vector with zero (or non-finite) norm, only raised in strict mode
    #[error("Degenerate vector for word: {0}")]
    DegenerateVector(String),

    /// Vector length differs from the table dimension
    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    /// Malformed server command
    #[error("Protocol error: {0}")]
    Protocol(String),
}

/// Result alias for wordvec operations
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create a format error
    pub fn format(msg: impl Into<String>) -> Self {
        Error::Format(msg.into())
    }

    /// Create a protocol error
    pub fn protocol(msg: impl Into<String>) -> Self {
        Error::Protocol(msg.into())
    }

    /// Create an unknown word error
    pub fn unknown_word(word: impl Into<String>) -> Self {
        Error::UnknownWord(word.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(Error::unknown_word("bird").to_string(), "Unknown word: bird");
        assert_eq!(
            Error::format("truncated").to_string(),
            "Format error: truncated"
        );
        assert_eq!(
            Error::DimensionMismatch {
                expected: 3,
                actual: 2
            }
            .to_string(),
            "Dimension mismatch: expected 3, got 2"
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let err: Error = io::Error::new(io::ErrorKind::NotFound, "missing").into();
        assert!(matches!(err, Error::Io(_)));
    }
}
