// SPDX-FileCopyrightText: 2026 Docent Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Docent document chatbot.

use thiserror::Error;

/// The primary error type used across all Docent adapter traits and core operations.
#[derive(Debug, Error)]
pub enum DocentError {
    /// Configuration errors (invalid TOML, missing API key, out-of-range values).
    #[error("configuration error: {0}")]
    Config(String),

    /// Vector store errors (database open, query failure, file system access).
    #[error("storage error: {source}")]
    Storage {
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Language model or embedding provider errors (API failure, malformed response).
    #[error("provider error: {message}")]
    Provider {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Text extraction failed for a source document.
    #[error("failed to extract text from {path}: {message}")]
    Extraction { path: String, message: String },

    /// Caller-supplied input was rejected before any processing.
    #[error("invalid input: {0}")]
    Validation(String),

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl DocentError {
    /// Wraps any error as a storage failure.
    pub fn storage(source: impl std::error::Error + Send + Sync + 'static) -> Self {
        DocentError::Storage {
            source: Box::new(source),
        }
    }

    /// Builds a provider error without an underlying source.
    pub fn provider(message: impl Into<String>) -> Self {
        DocentError::Provider {
            message: message.into(),
            source: None,
        }
    }
}
