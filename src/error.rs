//! Error types for the classification post-processing pipeline

use thiserror::Error;

/// Errors that can occur while post-processing classifier output
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ClassifyError {
    /// Malformed score vector or invalid parameters (empty vector, wrong
    /// length, non-finite values, `top_k < 1`)
    #[error("Invalid input: {0}")]
    Validation(String),

    /// The external model oracle failed to produce scores
    #[error("Oracle inference failed: {0}")]
    OracleInference(String),

    /// The model handle could not be initialised
    #[error("Model unavailable: {0}")]
    Model(String),

    /// Serialization of an export format failed
    #[error("Export failed: {0}")]
    Export(String),
}

impl ClassifyError {
    /// Short machine-friendly name of the error kind
    pub fn kind(&self) -> &'static str {
        match self {
            ClassifyError::Validation(_) => "validation",
            ClassifyError::OracleInference(_) => "oracle_inference",
            ClassifyError::Model(_) => "model",
            ClassifyError::Export(_) => "export",
        }
    }
}

impl From<serde_json::Error> for ClassifyError {
    fn from(err: serde_json::Error) -> Self {
        ClassifyError::Export(err.to_string())
    }
}

impl From<csv::Error> for ClassifyError {
    fn from(err: csv::Error) -> Self {
        ClassifyError::Export(err.to_string())
    }
}

/// Convenience alias used throughout the crate
pub type Result<T> = std::result::Result<T, ClassifyError>;
