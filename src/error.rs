//! Error types for the SkinMatch library.
//!
//! All fallible operations return [`Result`], whose error side is the
//! [`SkinMatchError`] enum. Text normalization and feature extraction never
//! fail; errors come from classifier output handling, batch prediction,
//! model loading and file I/O.
//!
//! # Examples
//!
//! ```
//! use skinmatch::error::{SkinMatchError, Result};
//!
//! fn example_operation() -> Result<()> {
//!     Err(SkinMatchError::invalid_argument("Invalid input"))
//! }
//!
//! match example_operation() {
//!     Ok(_) => println!("Success"),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use std::io;

use thiserror::Error;

/// The main error type for SkinMatch operations.
#[derive(Error, Debug)]
pub enum SkinMatchError {
    /// I/O errors (file operations)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV reading/writing errors
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Analysis-related errors (pattern compilation, filter setup)
    #[error("Analysis error: {0}")]
    Analysis(String),

    /// Classifier output did not match any recognized probability shape
    #[error("Format error: {0}")]
    Format(String),

    /// The classifier call over a batch failed; no rows were produced
    #[error("Batch prediction error: {0}")]
    BatchPrediction(String),

    /// No classifier is loaded
    #[error("Model unavailable: {0}")]
    ModelUnavailable(String),

    /// Model fitting or inference errors
    #[error("Model error: {0}")]
    Model(String),

    /// Dataset errors (missing columns, bad label values)
    #[error("Dataset error: {0}")]
    Dataset(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Generic error for other cases
    #[error("Error: {0}")]
    Other(String),

    /// Generic anyhow error
    #[error("Anyhow error: {0}")]
    Anyhow(#[from] anyhow::Error),
}

/// Result type alias for operations that may fail with SkinMatchError.
pub type Result<T> = std::result::Result<T, SkinMatchError>;

impl SkinMatchError {
    /// Create a new analysis error.
    pub fn analysis<S: Into<String>>(msg: S) -> Self {
        SkinMatchError::Analysis(msg.into())
    }

    /// Create a new format error.
    pub fn format<S: Into<String>>(msg: S) -> Self {
        SkinMatchError::Format(msg.into())
    }

    /// Create a new batch prediction error.
    pub fn batch_prediction<S: Into<String>>(msg: S) -> Self {
        SkinMatchError::BatchPrediction(msg.into())
    }

    /// Create a new model unavailable error.
    pub fn model_unavailable<S: Into<String>>(msg: S) -> Self {
        SkinMatchError::ModelUnavailable(msg.into())
    }

    /// Create a new model error.
    pub fn model<S: Into<String>>(msg: S) -> Self {
        SkinMatchError::Model(msg.into())
    }

    /// Create a new dataset error.
    pub fn dataset<S: Into<String>>(msg: S) -> Self {
        SkinMatchError::Dataset(msg.into())
    }

    /// Create a new invalid config error.
    pub fn invalid_config<S: Into<String>>(msg: S) -> Self {
        SkinMatchError::Config(msg.into())
    }

    /// Create a new generic error.
    pub fn other<S: Into<String>>(msg: S) -> Self {
        SkinMatchError::Other(msg.into())
    }

    /// Create a new invalid argument error.
    pub fn invalid_argument<S: Into<String>>(msg: S) -> Self {
        SkinMatchError::Other(format!("Invalid argument: {}", msg.into()))
    }

    /// Whether this error means the classifier broke its output contract.
    pub fn is_format_error(&self) -> bool {
        matches!(self, SkinMatchError::Format(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_construction() {
        let error = SkinMatchError::format("rank 4 output");
        assert_eq!(error.to_string(), "Format error: rank 4 output");
        assert!(error.is_format_error());

        let error = SkinMatchError::batch_prediction("schema mismatch");
        assert_eq!(error.to_string(), "Batch prediction error: schema mismatch");

        let error = SkinMatchError::model_unavailable("missing file");
        assert_eq!(error.to_string(), "Model unavailable: missing file");
        assert!(!error.is_format_error());
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error = io::Error::new(io::ErrorKind::NotFound, "File not found");
        let error = SkinMatchError::from(io_error);

        match error {
            SkinMatchError::Io(_) => {} // Expected
            _ => panic!("Expected IO error variant"),
        }
    }
}
