// SPDX-FileCopyrightText: 2026 Docent Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Query-time retrieval: embed the query, search the store, join the text.

use std::sync::Arc;

use docent_core::error::DocentError;
use docent_core::traits::EmbeddingAdapter;
use docent_core::types::EmbeddingInput;
use tracing::debug;

use crate::handle::StoreHandle;
use crate::types::ScoredChunk;

/// Dense retriever over the shared store handle.
pub struct Retriever {
    embedder: Arc<dyn EmbeddingAdapter>,
    store: Arc<StoreHandle>,
}

impl Retriever {
    pub fn new(embedder: Arc<dyn EmbeddingAdapter>, store: Arc<StoreHandle>) -> Self {
        Self { embedder, store }
    }

    /// Returns up to `k` chunks nearest to `query`, most similar first.
    pub async fn retrieve(&self, query: &str, k: usize) -> Result<Vec<ScoredChunk>, DocentError> {
        let output = self.embedder.embed(EmbeddingInput::query(query)).await?;
        let query_embedding = output.embeddings.into_iter().next().ok_or_else(|| {
            DocentError::Internal("Embedding returned no results".to_string())
        })?;

        let results = self.store.search(&query_embedding, k).await?;
        debug!(k, found = results.len(), "retrieved chunks");
        Ok(results)
    }

    /// Retrieves and newline-joins chunk text into a context block.
    ///
    /// No matches yield an empty string.
    pub async fn retrieve_context(&self, query: &str, k: usize) -> Result<String, DocentError> {
        let chunks = self.retrieve(query, k).await?;
        Ok(join_context(&chunks))
    }
}

/// Joins chunk contents with `\n`, in the given order.
pub fn join_context(chunks: &[ScoredChunk]) -> String {
    chunks
        .iter()
        .map(|c| c.content.as_str())
        .collect::<Vec<_>>()
        .join("\n")
}
