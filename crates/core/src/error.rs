//! Error types for DocQA.
//!
//! This module defines a unified error enum that covers all error categories
//! in the application: configuration, I/O, LLM transport, prompt rendering,
//! document lookup, file processing and storage.
//!
//! Failures in classification and answering are deliberately absent here.
//! Those are absorbed into safe defaults by the LLM service layer and never
//! reach a caller as an `AppError`.

use thiserror::Error;

/// Unified error type for DocQA.
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O and filesystem errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// LLM transport and response errors
    #[error("LLM error: {0}")]
    Llm(String),

    /// Prompt rendering errors
    #[error("Prompt error: {0}")]
    Prompt(String),

    /// Referenced document does not exist
    #[error("Document not found with id: {0}")]
    DocumentNotFound(i64),

    /// A document with the same file name was already uploaded
    #[error("Document with file name '{0}' already exists")]
    DocumentAlreadyExists(String),

    /// File integrity or file I/O failure while processing a document
    #[error("Document processing error: {0}")]
    Processing(String),

    /// Parse-level failure inside a format extractor
    #[error("Extraction error: {0}")]
    Extraction(String),

    /// Document repository errors
    #[error("Storage error: {0}")]
    Storage(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Generic errors
    #[error("{0}")]
    Other(String),
}

impl AppError {
    /// Whether this error means the referenced document does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, AppError::DocumentNotFound(_))
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Serialization(err.to_string())
    }
}

impl From<serde_yaml::Error> for AppError {
    fn from(err: serde_yaml::Error) -> Self {
        AppError::Serialization(err.to_string())
    }
}

/// Convenience type alias for Results with AppError.
pub type AppResult<T> = Result<T, AppError>;
