// SPDX-FileCopyrightText: 2026 Docent Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `docent check` command: an embedding round trip against the live API.

use docent_config::model::DocentConfig;
use docent_core::error::DocentError;
use docent_core::traits::EmbeddingAdapter;
use docent_core::types::EmbeddingInput;

use crate::components::Components;

const PROBE_TEXT: &str = "test";

/// Embeds a probe string and prints the vector dimension.
pub async fn run_check(config: DocentConfig) -> Result<usize, DocentError> {
    let components = Components::init(&config).await?;
    let dimension = probe_dimension(components.embedder.as_ref()).await?;
    println!(
        "Embedding model {} OK, dimension {dimension}",
        config.gemini.embedding_model
    );
    Ok(dimension)
}

pub async fn probe_dimension(embedder: &dyn EmbeddingAdapter) -> Result<usize, DocentError> {
    let output = embedder.embed(EmbeddingInput::query(PROBE_TEXT)).await?;
    output
        .embeddings
        .first()
        .map(Vec::len)
        .ok_or_else(|| DocentError::provider("embedding probe returned no vectors"))
}
