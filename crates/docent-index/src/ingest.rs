// SPDX-FileCopyrightText: 2026 Docent Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Ingestion: discover PDFs, extract, chunk, embed, and write to the store.
//!
//! Embedding happens in batches; every chunk of a run is written in one
//! transaction after all batches succeed. Empty input stops the run before
//! the embedding model is called.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use docent_config::model::IngestConfig;
use docent_core::error::DocentError;
use docent_core::traits::{EmbeddingAdapter, TextExtractor};
use docent_core::types::{DocumentChunk, EmbeddingInput};
use tracing::{debug, info, warn};

use crate::chunker::Chunker;
use crate::handle::StoreHandle;
use crate::types::{IngestionReport, NewChunk};

/// Whether a file name ends in `.pdf`, any case. A bare `.pdf` counts.
pub fn is_pdf_name(name: &str) -> bool {
    let bytes = name.as_bytes();
    bytes.len() >= 4 && bytes[bytes.len() - 4..].eq_ignore_ascii_case(b".pdf")
}

/// Lists `*.pdf` files directly inside `folder`, sorted by path.
///
/// A missing folder is treated as empty.
pub async fn discover_pdfs(folder: &Path) -> Result<Vec<PathBuf>, DocentError> {
    let mut entries = match tokio::fs::read_dir(folder).await {
        Ok(entries) => entries,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            warn!(folder = %folder.display(), "pdf folder does not exist");
            return Ok(Vec::new());
        }
        Err(e) => return Err(DocentError::storage(e)),
    };

    let mut pdfs = Vec::new();
    while let Some(entry) = entries.next_entry().await.map_err(DocentError::storage)? {
        let file_type = entry.file_type().await.map_err(DocentError::storage)?;
        if !file_type.is_file() {
            continue;
        }
        let path = entry.path();
        if path
            .file_name()
            .and_then(|n| n.to_str())
            .is_some_and(is_pdf_name)
        {
            pdfs.push(path);
        }
    }
    pdfs.sort();
    Ok(pdfs)
}

/// Turns source files into embedded chunks in the vector store.
pub struct IngestionPipeline {
    extractor: Arc<dyn TextExtractor>,
    embedder: Arc<dyn EmbeddingAdapter>,
    store: Arc<StoreHandle>,
    chunker: Chunker,
    batch_size: usize,
}

impl IngestionPipeline {
    pub fn new(
        extractor: Arc<dyn TextExtractor>,
        embedder: Arc<dyn EmbeddingAdapter>,
        store: Arc<StoreHandle>,
        config: &IngestConfig,
    ) -> Result<Self, DocentError> {
        if config.embed_batch_size == 0 {
            return Err(DocentError::Validation(
                "embed batch size must be greater than 0".into(),
            ));
        }
        Ok(Self {
            extractor,
            embedder,
            store,
            chunker: Chunker::from_config(config)?,
            batch_size: config.embed_batch_size,
        })
    }

    pub fn chunker(&self) -> &Chunker {
        &self.chunker
    }

    /// Ingests every PDF in `folder`. Files that fail extraction are skipped.
    pub async fn ingest_folder(&self, folder: &Path) -> Result<IngestionReport, DocentError> {
        let pdfs = discover_pdfs(folder).await?;
        info!(folder = %folder.display(), files = pdfs.len(), "ingesting pdf folder");

        let mut report = IngestionReport::default();
        let mut pending = Vec::new();
        for path in &pdfs {
            match self.extractor.extract(path).await {
                Ok(text) => {
                    report.documents_loaded += 1;
                    let source = source_name(path);
                    let chunks = self.chunker.split(&text);
                    debug!(source = %source, chunks = chunks.len(), "document chunked");
                    pending.extend(chunks.into_iter().map(|c| (source.clone(), c)));
                }
                Err(e) => {
                    report.documents_skipped += 1;
                    warn!(path = %path.display(), error = %e, "skipping unreadable pdf");
                }
            }
        }

        if report.documents_loaded == 0 {
            warn!(folder = %folder.display(), "no documents loaded, nothing to index");
            return Ok(report);
        }
        if pending.is_empty() {
            warn!("documents contained no text, nothing to index");
            return Ok(report);
        }

        report.chunks_added = self.embed_and_store(pending).await?;
        info!(
            documents_loaded = report.documents_loaded,
            documents_skipped = report.documents_skipped,
            chunks_added = report.chunks_added,
            "ingestion finished"
        );
        Ok(report)
    }

    /// Ingests one file and returns the number of chunks added.
    ///
    /// Unlike folder ingestion, an extraction failure is an error.
    pub async fn ingest_file(&self, path: &Path) -> Result<usize, DocentError> {
        let text = self.extractor.extract(path).await?;
        let source = source_name(path);
        let chunks = self.chunker.split(&text);
        if chunks.is_empty() {
            warn!(source = %source, "document contained no text, nothing to index");
            return Ok(0);
        }
        let pending = chunks.into_iter().map(|c| (source.clone(), c)).collect();
        let added = self.embed_and_store(pending).await?;
        info!(source = %source, chunks_added = added, "file ingested");
        Ok(added)
    }

    async fn embed_and_store(
        &self,
        pending: Vec<(String, DocumentChunk)>,
    ) -> Result<usize, DocentError> {
        let mut records = Vec::with_capacity(pending.len());

        for batch in pending.chunks(self.batch_size) {
            let texts: Vec<String> = batch.iter().map(|(_, c)| c.text.clone()).collect();
            let output = self.embedder.embed(EmbeddingInput::documents(texts)).await?;
            if output.embeddings.len() != batch.len() {
                return Err(DocentError::provider(format!(
                    "expected {} embeddings, got {}",
                    batch.len(),
                    output.embeddings.len()
                )));
            }
            records.extend(batch.iter().zip(output.embeddings).map(|((source, chunk), embedding)| {
                NewChunk {
                    content: chunk.text.clone(),
                    embedding,
                    source: source.clone(),
                }
            }));
            debug!(embedded = records.len(), total = pending.len(), "embedding progress");
        }

        self.store.add_chunks(records).await
    }
}

fn source_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
