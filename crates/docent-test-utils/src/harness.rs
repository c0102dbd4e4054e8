// SPDX-FileCopyrightText: 2026 Docent Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test harness for end-to-end integration testing.
//!
//! `TestHarness` assembles the full chat and ingestion stack with mock
//! adapters and a temp directory holding both the source folder and the
//! vector store, so upload-then-reload flows behave as in production.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use docent_config::model::{DocentConfig, RetrievalConfig};
use docent_core::DocentError;
use docent_index::{IngestionPipeline, IngestionReport, Retriever, StoreHandle};
use docent_router::RoutingWorkflow;

use crate::mock_embedder::MockEmbedder;
use crate::mock_provider::MockProvider;
use crate::stub_extractor::StubExtractor;

/// Builder for creating test environments with configurable options.
pub struct TestHarnessBuilder {
    provider: Option<MockProvider>,
    extractor: StubExtractor,
    documents: Vec<String>,
    retrieval: RetrievalConfig,
}

impl TestHarnessBuilder {
    fn new() -> Self {
        Self {
            provider: None,
            extractor: StubExtractor::new(),
            documents: Vec::new(),
            retrieval: RetrievalConfig::default(),
        }
    }

    /// Set mock provider responses, consumed in order.
    pub fn with_mock_responses(mut self, responses: Vec<String>) -> Self {
        self.provider = Some(MockProvider::with_responses(responses));
        self
    }

    /// Use a preconfigured provider.
    pub fn with_provider(mut self, provider: MockProvider) -> Self {
        self.provider = Some(provider);
        self
    }

    /// Use a preconfigured extractor.
    pub fn with_extractor(mut self, extractor: StubExtractor) -> Self {
        self.extractor = extractor;
        self
    }

    /// Place `file_name` in the source folder; it extracts to `text`.
    pub fn with_document(mut self, file_name: &str, text: &str) -> Self {
        self.extractor = self.extractor.with_text(file_name, text);
        self.documents.push(file_name.to_string());
        self
    }

    pub fn with_retrieval(mut self, retrieval: RetrievalConfig) -> Self {
        self.retrieval = retrieval;
        self
    }

    /// Build the test harness, creating all required subsystems.
    pub async fn build(self) -> Result<TestHarness, DocentError> {
        let temp_dir = tempfile::TempDir::new().map_err(DocentError::storage)?;

        let mut config = DocentConfig::default();
        config.storage.pdf_folder = temp_dir.path().join("pdf_data").display().to_string();
        config.storage.persist_dir = temp_dir.path().join("vector_store").display().to_string();
        config.retrieval = self.retrieval;

        let pdf_folder = PathBuf::from(&config.storage.pdf_folder);
        tokio::fs::create_dir_all(&pdf_folder)
            .await
            .map_err(DocentError::storage)?;
        for name in &self.documents {
            // Placeholder bytes; the stub extractor serves the text.
            tokio::fs::write(pdf_folder.join(name), b"%PDF-1.4 stub")
                .await
                .map_err(DocentError::storage)?;
        }

        let store = Arc::new(StoreHandle::open(&config.storage.persist_dir).await);
        let mock_provider = Arc::new(self.provider.unwrap_or_default());
        let mock_embedder = Arc::new(MockEmbedder::new());
        let extractor = Arc::new(self.extractor);

        let retriever = Arc::new(Retriever::new(mock_embedder.clone(), store.clone()));
        let workflow = Arc::new(RoutingWorkflow::new(
            mock_provider.clone(),
            retriever,
            &config.retrieval,
        ));
        let pipeline = Arc::new(IngestionPipeline::new(
            extractor.clone(),
            mock_embedder.clone(),
            store.clone(),
            &config.ingest,
        )?);

        Ok(TestHarness {
            mock_provider,
            mock_embedder,
            extractor,
            store,
            workflow,
            pipeline,
            config,
            _temp_dir: temp_dir,
        })
    }
}

/// A complete test environment with mock adapters and temp storage.
pub struct TestHarness {
    /// The mock LLM provider.
    pub mock_provider: Arc<MockProvider>,
    /// The bag-of-words embedder shared by ingestion and retrieval.
    pub mock_embedder: Arc<MockEmbedder>,
    pub extractor: Arc<StubExtractor>,
    /// Store handle over the temp persist directory.
    pub store: Arc<StoreHandle>,
    pub workflow: Arc<RoutingWorkflow>,
    pub pipeline: Arc<IngestionPipeline>,
    /// Configuration with storage paths inside the temp directory.
    pub config: DocentConfig,
    /// Temp directory kept alive for cleanup on drop.
    _temp_dir: tempfile::TempDir,
}

impl TestHarness {
    /// Create a new builder for configuring the test harness.
    pub fn builder() -> TestHarnessBuilder {
        TestHarnessBuilder::new()
    }

    pub fn pdf_folder(&self) -> &Path {
        Path::new(&self.config.storage.pdf_folder)
    }

    pub fn persist_dir(&self) -> &Path {
        Path::new(&self.config.storage.persist_dir)
    }

    /// Ingests the source folder into the store.
    pub async fn ingest(&self) -> Result<IngestionReport, DocentError> {
        self.pipeline.ingest_folder(self.pdf_folder()).await
    }

    /// Runs one query through the routing workflow.
    pub async fn ask(&self, query: &str) -> String {
        self.workflow.handle_query(query).await
    }
}
