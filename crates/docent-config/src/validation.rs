// SPDX-FileCopyrightText: 2026 Docent Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Validates semantic constraints that cannot be expressed via serde attributes,
//! such as non-empty paths, chunk geometry, and batch bounds.

use crate::diagnostic::ConfigError;
use crate::model::DocentConfig;

/// Largest batch the embedding endpoint accepts in one request.
pub const MAX_EMBED_BATCH: usize = 100;

/// Validate a deserialized configuration for semantic correctness.
///
/// Returns `Ok(())` if all validations pass, or `Err(Vec<ConfigError>)` with
/// all collected validation errors (does not fail fast).
pub fn validate_config(config: &DocentConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    let mut non_empty = |key: &str, value: &str| {
        if value.trim().is_empty() {
            errors.push(ConfigError::Validation {
                message: format!("{key} must not be empty"),
            });
        }
    };
    non_empty("server.host", &config.server.host);
    non_empty("storage.pdf_folder", &config.storage.pdf_folder);
    non_empty("storage.persist_dir", &config.storage.persist_dir);
    non_empty("gemini.chat_model", &config.gemini.chat_model);
    non_empty("gemini.embedding_model", &config.gemini.embedding_model);

    let ingest = &config.ingest;
    if ingest.chunk_size == 0 {
        errors.push(ConfigError::Validation {
            message: "ingest.chunk_size must be greater than 0".to_string(),
        });
    } else if ingest.chunk_overlap >= ingest.chunk_size {
        errors.push(ConfigError::Validation {
            message: format!(
                "ingest.chunk_overlap ({}) must be less than ingest.chunk_size ({})",
                ingest.chunk_overlap, ingest.chunk_size
            ),
        });
    }

    if !(1..=MAX_EMBED_BATCH).contains(&ingest.embed_batch_size) {
        errors.push(ConfigError::Validation {
            message: format!(
                "ingest.embed_batch_size must be between 1 and {MAX_EMBED_BATCH}, got {}",
                ingest.embed_batch_size
            ),
        });
    }

    if config.retrieval.faq_k == 0 {
        errors.push(ConfigError::Validation {
            message: "retrieval.faq_k must be greater than 0".to_string(),
        });
    }

    if config.retrieval.summarize_k == 0 {
        errors.push(ConfigError::Validation {
            message: "retrieval.summarize_k must be greater than 0".to_string(),
        });
    }

    if config.gemini.timeout_secs == 0 {
        errors.push(ConfigError::Validation {
            message: "gemini.timeout_secs must be greater than 0".to_string(),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn has_message(errors: &[ConfigError], needle: &str) -> bool {
        errors
            .iter()
            .any(|e| matches!(e, ConfigError::Validation { message } if message.contains(needle)))
    }

    #[test]
    fn default_config_validates() {
        let config = DocentConfig::default();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn empty_persist_dir_fails_validation() {
        let mut config = DocentConfig::default();
        config.storage.persist_dir = "  ".to_string();
        let errors = validate_config(&config).unwrap_err();
        assert!(has_message(&errors, "storage.persist_dir"));
    }

    #[test]
    fn overlap_equal_to_size_fails_validation() {
        let mut config = DocentConfig::default();
        config.ingest.chunk_size = 100;
        config.ingest.chunk_overlap = 100;
        let errors = validate_config(&config).unwrap_err();
        assert!(has_message(&errors, "chunk_overlap"));
    }

    #[test]
    fn zero_chunk_size_reports_size_not_overlap() {
        let mut config = DocentConfig::default();
        config.ingest.chunk_size = 0;
        config.ingest.chunk_overlap = 0;
        let errors = validate_config(&config).unwrap_err();
        assert!(has_message(&errors, "chunk_size must be greater than 0"));
        assert!(!has_message(&errors, "chunk_overlap"));
    }

    #[test]
    fn oversized_batch_fails_validation() {
        let mut config = DocentConfig::default();
        config.ingest.embed_batch_size = 101;
        let errors = validate_config(&config).unwrap_err();
        assert!(has_message(&errors, "embed_batch_size"));
    }

    #[test]
    fn zero_k_values_fail_validation() {
        let mut config = DocentConfig::default();
        config.retrieval.faq_k = 0;
        config.retrieval.summarize_k = 0;
        let errors = validate_config(&config).unwrap_err();
        assert!(has_message(&errors, "faq_k"));
        assert!(has_message(&errors, "summarize_k"));
    }

    #[test]
    fn all_errors_are_collected() {
        let mut config = DocentConfig::default();
        config.server.host = String::new();
        config.storage.pdf_folder = String::new();
        config.ingest.embed_batch_size = 0;
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 3);
    }
}
