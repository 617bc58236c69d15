//! Error types for newsrag.
//!
//! This module defines a unified error enum that covers every failure
//! category in the workspace: configuration, I/O, generation, storage,
//! ingestion, prompts and user input validation.

use thiserror::Error;

/// Unified error type for newsrag.
///
/// Library functions return `Result<T, AppError>` and propagate with `?`.
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration-related errors (missing secrets, bad config file)
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O and filesystem errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Generation (LLM provider) errors
    #[error("LLM error: {0}")]
    Llm(String),

    /// Embedding and vector collection errors
    #[error("Knowledge error: {0}")]
    Knowledge(String),

    /// News ingestion errors
    #[error("Ingest error: {0}")]
    Ingest(String),

    /// Prompt system errors
    #[error("Prompt error: {0}")]
    Prompt(String),

    /// Rejected user input
    #[error("{0}")]
    Validation(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Generic errors
    #[error("{0}")]
    Other(String),
}

impl AppError {
    /// Whether this error was caused by the caller's input rather than a backend.
    pub fn is_client_error(&self) -> bool {
        matches!(self, AppError::Validation(_))
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
