//! Error types for the crowd lemmatizer.
//!
//! All fallible operations return [`Result`], whose error side is the
//! [`LemmatizeError`] enum.
//!
//! # Examples
//!
//! ```
//! use crowd_lemmatizer::error::{LemmatizeError, Result};
//!
//! fn example_operation() -> Result<()> {
//!     Err(LemmatizeError::morphology("unknown tag"))
//! }
//!
//! match example_operation() {
//!     Ok(_) => println!("Success"),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use std::io;

use thiserror::Error;

/// The main error type for lemmatization operations.
///
/// Unknown `calculate` modes are deliberately absent here: they fall back to
/// the default mode instead of failing.
#[derive(Error, Debug)]
pub enum LemmatizeError {
    /// I/O errors (dictionary files, message streams)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Failures raised by a morphological analyzer
    #[error("Morphology error: {0}")]
    Morphology(String),

    /// Configuration with an unusable shape
    #[error("Configuration error: {0}")]
    Config(String),

    /// Malformed dictionary resources
    #[error("Dictionary error: {0}")]
    Dictionary(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error for other cases
    #[error("Error: {0}")]
    Other(String),

    /// Errors carrying a context chain (file paths in the CLI)
    #[error("{0:#}")]
    Anyhow(#[from] anyhow::Error),
}

/// Result type alias for operations that may fail with LemmatizeError.
pub type Result<T> = std::result::Result<T, LemmatizeError>;

impl LemmatizeError {
    /// Create a new morphology error.
    pub fn morphology<S: Into<String>>(msg: S) -> Self {
        LemmatizeError::Morphology(msg.into())
    }

    /// Create a new configuration error.
    pub fn config<S: Into<String>>(msg: S) -> Self {
        LemmatizeError::Config(msg.into())
    }

    /// Create a new dictionary error.
    pub fn dictionary<S: Into<String>>(msg: S) -> Self {
        LemmatizeError::Dictionary(msg.into())
    }

    /// Create a new invalid argument error.
    pub fn invalid_argument<S: Into<String>>(msg: S) -> Self {
        LemmatizeError::Other(format!("Invalid argument: {}", msg.into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_construction() {
        let error = LemmatizeError::morphology("bad tag");
        assert_eq!(error.to_string(), "Morphology error: bad tag");

        let error = LemmatizeError::config("expected an object");
        assert_eq!(error.to_string(), "Configuration error: expected an object");

        let error = LemmatizeError::dictionary("line 3");
        assert_eq!(error.to_string(), "Dictionary error: line 3");

        let error = LemmatizeError::invalid_argument("empty word");
        assert_eq!(error.to_string(), "Error: Invalid argument: empty word");
    }

    #[test]
    fn test_anyhow_conversion_keeps_context() {
        use anyhow::Context;

        let result: std::result::Result<(), io::Error> =
            Err(io::Error::new(io::ErrorKind::NotFound, "no such file"));
        let error = LemmatizeError::from(result.context("failed to open input in.jsonl").unwrap_err());

        assert!(matches!(error, LemmatizeError::Anyhow(_)));
        assert_eq!(error.to_string(), "failed to open input in.jsonl: no such file");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error = io::Error::new(io::ErrorKind::NotFound, "File not found");
        let error = LemmatizeError::from(io_error);

        match error {
            LemmatizeError::Io(_) => {}
            _ => panic!("Expected IO error variant"),
        }
    }
}
