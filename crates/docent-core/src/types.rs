// SPDX-FileCopyrightText: 2026 Docent Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common types used across adapter traits and the Docent workspace.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::error::DocentError;

/// Identifies the kind of external collaborator behind an adapter.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
pub enum AdapterType {
    Provider,
    Embedding,
    Extractor,
}

// --- Provider types ---

/// A single message sent to a language model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderMessage {
    /// "user" or "model".
    pub role: String,
    /// Plain text content.
    pub content: String,
}

/// A request to a language model provider.
#[derive(Debug, Clone, PartialEq)]
pub struct ProviderRequest {
    /// Model override. `None` uses the provider's configured chat model.
    pub model: Option<String>,
    /// Conversation turns, oldest first.
    pub messages: Vec<ProviderMessage>,
    /// Upper bound on generated tokens.
    pub max_output_tokens: Option<u32>,
    /// Sampling temperature.
    pub temperature: Option<f32>,
}

impl ProviderRequest {
    /// Builds a single-turn request carrying one user prompt.
    pub fn user(prompt: impl Into<String>) -> Self {
        Self {
            model: None,
            messages: vec![ProviderMessage {
                role: "user".to_string(),
                content: prompt.into(),
            }],
            max_output_tokens: None,
            temperature: None,
        }
    }

    /// Caps the number of generated tokens.
    pub fn with_max_output_tokens(mut self, max: u32) -> Self {
        self.max_output_tokens = Some(max);
        self
    }

    /// Sets the sampling temperature.
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// The text of the last user turn, if any.
    pub fn prompt(&self) -> Option<&str> {
        self.messages
            .iter()
            .rev()
            .find(|m| m.role == "user")
            .map(|m| m.content.as_str())
    }
}

/// Token accounting reported by the provider.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenUsage {
    pub input_tokens: u32,
    pub output_tokens: u32,
}

/// A completed response from a language model provider.
#[derive(Debug, Clone, PartialEq)]
pub struct ProviderResponse {
    /// Concatenated text of the first candidate.
    pub text: String,
    /// Model that produced the response.
    pub model: String,
    /// Provider-reported finish reason (e.g. "STOP").
    pub finish_reason: Option<String>,
    /// Token usage, zeroed when the provider omits it.
    pub usage: TokenUsage,
}

/// Outcome of a single language model invocation.
///
/// Every generation boundary returns this uniformly; callers decide how a
/// failure is rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelResponse {
    /// The model produced text.
    Success(String),
    /// The call failed; carries a human-readable reason.
    Failure(String),
}

impl ModelResponse {
    /// Returns the text, or `"[ERROR] {tag}: {reason}"` on failure.
    pub fn into_text_or_tagged(self, tag: &str) -> String {
        match self {
            ModelResponse::Success(text) => text,
            ModelResponse::Failure(reason) => error_tagged(tag, &reason),
        }
    }
}

impl From<Result<ProviderResponse, DocentError>> for ModelResponse {
    fn from(result: Result<ProviderResponse, DocentError>) -> Self {
        match result {
            Ok(response) => ModelResponse::Success(response.text),
            Err(e) => ModelResponse::Failure(e.to_string()),
        }
    }
}

/// Prefix marking a response string that carries a failure.
pub const ERROR_TAG: &str = "[ERROR]";

/// Formats a failure as an error-tagged response string.
pub fn error_tagged(context: &str, detail: &str) -> String {
    format!("{ERROR_TAG} {context}: {detail}")
}

// --- Embedding types ---

/// What the embedded text will be used for. Providers may embed
/// documents and queries asymmetrically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EmbeddingTask {
    /// Text being written to the index.
    #[default]
    Document,
    /// Text used to search the index.
    Query,
}

/// Input for an embedding adapter.
#[derive(Debug, Clone, PartialEq)]
pub struct EmbeddingInput {
    pub texts: Vec<String>,
    pub task: EmbeddingTask,
}

impl EmbeddingInput {
    /// Input for indexing a batch of document chunks.
    pub fn documents(texts: Vec<String>) -> Self {
        Self {
            texts,
            task: EmbeddingTask::Document,
        }
    }

    /// Input for embedding a single search query.
    pub fn query(text: impl Into<String>) -> Self {
        Self {
            texts: vec![text.into()],
            task: EmbeddingTask::Query,
        }
    }
}

/// Output from an embedding adapter, one vector per input text, in order.
#[derive(Debug, Clone, PartialEq)]
pub struct EmbeddingOutput {
    pub embeddings: Vec<Vec<f32>>,
    pub dimensions: usize,
}

// --- Conversation and document types ---

/// Per-request state threaded through the routing workflow.
///
/// `response` is empty only until the dispatched handler runs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationState {
    pub user_query: String,
    pub response: String,
}

impl ConversationState {
    pub fn new(user_query: impl Into<String>) -> Self {
        Self {
            user_query: user_query.into(),
            response: String::new(),
        }
    }
}

/// A bounded, overlapping window of source document text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentChunk {
    pub text: String,
}

impl DocumentChunk {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}
