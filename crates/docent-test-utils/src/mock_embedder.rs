// SPDX-FileCopyrightText: 2026 Docent Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Deterministic bag-of-words embedding adapter.
//!
//! Each lowercase alphanumeric token is hashed into one of `dimensions`
//! buckets, so texts sharing words have positive cosine similarity and the
//! same text always embeds identically.

use async_trait::async_trait;
use tokio::sync::Mutex;

use docent_core::DocentError;
use docent_core::traits::{EmbeddingAdapter, PluginAdapter};
use docent_core::types::{AdapterType, EmbeddingInput, EmbeddingOutput, EmbeddingTask};

/// Default vector width.
pub const DEFAULT_DIMENSIONS: usize = 64;

pub struct MockEmbedder {
    dimensions: usize,
    failure: Option<String>,
    calls: Mutex<Vec<(EmbeddingTask, usize)>>,
}

impl MockEmbedder {
    pub fn new() -> Self {
        Self::with_dimensions(DEFAULT_DIMENSIONS)
    }

    pub fn with_dimensions(dimensions: usize) -> Self {
        Self {
            dimensions: dimensions.max(1),
            failure: None,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// An embedder whose every call fails with `message`.
    pub fn failing(message: &str) -> Self {
        Self {
            failure: Some(message.to_string()),
            ..Self::new()
        }
    }

    /// Embeds one text synchronously.
    pub fn vector_for(&self, text: &str) -> Vec<f32> {
        let mut v = vec![0.0f32; self.dimensions];
        for token in text
            .split(|c: char| !c.is_alphanumeric())
            .filter(|t| !t.is_empty())
        {
            let bucket = fnv1a(&token.to_lowercase()) as usize % self.dimensions;
            v[bucket] += 1.0;
        }
        v
    }

    /// `(task, batch length)` of every call so far.
    pub async fn calls(&self) -> Vec<(EmbeddingTask, usize)> {
        self.calls.lock().await.clone()
    }

    pub async fn call_count(&self) -> usize {
        self.calls.lock().await.len()
    }
}

impl Default for MockEmbedder {
    fn default() -> Self {
        Self::new()
    }
}

fn fnv1a(s: &str) -> u64 {
    let mut hash: u64 = 0xcbf2_9ce4_8422_2325;
    for byte in s.bytes() {
        hash ^= u64::from(byte);
        hash = hash.wrapping_mul(0x0100_0000_01b3);
    }
    hash
}

impl PluginAdapter for MockEmbedder {
    fn name(&self) -> &str {
        "mock-embedder"
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Embedding
    }
}

#[async_trait]
impl EmbeddingAdapter for MockEmbedder {
    async fn embed(&self, input: EmbeddingInput) -> Result<EmbeddingOutput, DocentError> {
        self.calls.lock().await.push((input.task, input.texts.len()));
        if let Some(message) = &self.failure {
            return Err(DocentError::provider(message.clone()));
        }
        Ok(EmbeddingOutput {
            embeddings: input.texts.iter().map(|t| self.vector_for(t)).collect(),
            dimensions: self.dimensions,
        })
    }
}
