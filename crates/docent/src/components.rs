// SPDX-FileCopyrightText: 2026 Docent Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Construction of the long-lived collaborators shared by every command.

use std::sync::Arc;

use docent_config::model::DocentConfig;
use docent_core::error::DocentError;
use docent_core::traits::{EmbeddingAdapter, ProviderAdapter, TextExtractor};
use docent_gemini::{GeminiEmbedder, GeminiProvider, client_from_config};
use docent_index::{IngestionPipeline, PdfExtractor, Retriever, StoreHandle};
use docent_router::RoutingWorkflow;
use tracing::{error, info};

/// Chat model, embedder and store handle, built once per process.
pub struct Components {
    pub provider: Arc<dyn ProviderAdapter>,
    pub embedder: Arc<dyn EmbeddingAdapter>,
    pub store: Arc<StoreHandle>,
}

impl Components {
    /// Builds the Gemini adapters and opens the vector store.
    ///
    /// A missing API key is fatal. An unreadable store is not: the handle
    /// starts empty and queries see no results until a reload succeeds.
    pub async fn init(config: &DocentConfig) -> Result<Self, DocentError> {
        let client = client_from_config(&config.gemini).map_err(|e| {
            error!(error = %e, "failed to initialize Gemini client");
            eprintln!("error: Google API key required. Set via: config gemini.api_key or GOOGLE_API_KEY env var");
            e
        })?;

        let provider = Arc::new(GeminiProvider::new(client.clone(), &config.gemini));
        let embedder = Arc::new(GeminiEmbedder::new(client, &config.gemini));
        let store = Arc::new(StoreHandle::open(&config.storage.persist_dir).await);
        info!(
            persist_dir = %config.storage.persist_dir,
            loaded = store.is_loaded(),
            "vector store handle ready"
        );

        Ok(Self {
            provider,
            embedder,
            store,
        })
    }

    pub fn workflow(&self, config: &DocentConfig) -> Arc<RoutingWorkflow> {
        let retriever = Arc::new(Retriever::new(self.embedder.clone(), self.store.clone()));
        Arc::new(RoutingWorkflow::new(
            self.provider.clone(),
            retriever,
            &config.retrieval,
        ))
    }

    pub fn pipeline(&self, config: &DocentConfig) -> Result<Arc<IngestionPipeline>, DocentError> {
        let extractor: Arc<dyn TextExtractor> = Arc::new(PdfExtractor);
        Ok(Arc::new(IngestionPipeline::new(
            extractor,
            self.embedder.clone(),
            self.store.clone(),
            &config.ingest,
        )?))
    }
}
