// SPDX-FileCopyrightText: 2026 Docent Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for the Docent document chatbot.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages.

use serde::{Deserialize, Serialize};

/// Top-level Docent configuration.
///
/// Loaded from TOML files following XDG hierarchy, with environment variable overrides.
/// All sections are optional and default to sensible values.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct DocentConfig {
    /// HTTP server settings.
    #[serde(default)]
    pub server: ServerConfig,

    /// Gemini API settings for chat and embeddings.
    #[serde(default)]
    pub gemini: GeminiConfig,

    /// Source document and index locations.
    #[serde(default)]
    pub storage: StorageConfig,

    /// Chunking and embedding batch settings.
    #[serde(default)]
    pub ingest: IngestConfig,

    /// Result counts for similarity search.
    #[serde(default)]
    pub retrieval: RetrievalConfig,
}

/// HTTP server configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    /// Address to bind.
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to bind.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Maximum accepted request body, in bytes. Bounds PDF uploads.
    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            log_level: default_log_level(),
            max_upload_bytes: default_max_upload_bytes(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_max_upload_bytes() -> usize {
    25 * 1024 * 1024
}

/// Gemini API configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct GeminiConfig {
    /// API key. `None` falls back to the `GOOGLE_API_KEY` environment variable.
    #[serde(default)]
    pub api_key: Option<String>,

    /// Model used for classification and answer generation.
    #[serde(default = "default_chat_model")]
    pub chat_model: String,

    /// Model used for document and query embeddings.
    #[serde(default = "default_embedding_model")]
    pub embedding_model: String,

    /// API root. Overridable for proxies and tests.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Retries for transient HTTP failures (429, 500, 503).
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// Upper bound on generated tokens for answers.
    #[serde(default = "default_max_output_tokens")]
    pub max_output_tokens: u32,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            chat_model: default_chat_model(),
            embedding_model: default_embedding_model(),
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            max_retries: default_max_retries(),
            max_output_tokens: default_max_output_tokens(),
        }
    }
}

fn default_chat_model() -> String {
    "gemini-2.0-flash".to_string()
}

fn default_embedding_model() -> String {
    "gemini-embedding-001".to_string()
}

fn default_base_url() -> String {
    "https://generativelanguage.googleapis.com/v1beta".to_string()
}

fn default_timeout_secs() -> u64 {
    120
}

fn default_max_retries() -> u32 {
    1
}

fn default_max_output_tokens() -> u32 {
    2048
}

/// Filesystem locations for source PDFs and the persisted index.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct StorageConfig {
    /// Directory scanned by `docent ingest` and written to by uploads.
    #[serde(default = "default_pdf_folder")]
    pub pdf_folder: String,

    /// Directory holding the SQLite vector index.
    #[serde(default = "default_persist_dir")]
    pub persist_dir: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            pdf_folder: default_pdf_folder(),
            persist_dir: default_persist_dir(),
        }
    }
}

fn default_pdf_folder() -> String {
    "pdf_data".to_string()
}

fn default_persist_dir() -> String {
    "vector_store".to_string()
}

/// Ingestion configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct IngestConfig {
    /// Maximum chunk length in characters.
    #[serde(default = "default_chunk_size")]
    pub chunk_size: usize,

    /// Characters shared between consecutive chunks.
    #[serde(default = "default_chunk_overlap")]
    pub chunk_overlap: usize,

    /// Texts per embedding request.
    #[serde(default = "default_embed_batch_size")]
    pub embed_batch_size: usize,
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            chunk_size: default_chunk_size(),
            chunk_overlap: default_chunk_overlap(),
            embed_batch_size: default_embed_batch_size(),
        }
    }
}

fn default_chunk_size() -> usize {
    500
}

fn default_chunk_overlap() -> usize {
    100
}

fn default_embed_batch_size() -> usize {
    100
}

/// Retrieval configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct RetrievalConfig {
    /// Chunks retrieved to answer a question.
    #[serde(default = "default_faq_k")]
    pub faq_k: usize,

    /// Chunks retrieved for a summary.
    #[serde(default = "default_summarize_k")]
    pub summarize_k: usize,
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            faq_k: default_faq_k(),
            summarize_k: default_summarize_k(),
        }
    }
}

fn default_faq_k() -> usize {
    5
}

fn default_summarize_k() -> usize {
    5
}
