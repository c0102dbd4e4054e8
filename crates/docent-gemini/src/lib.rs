// SPDX-FileCopyrightText: 2026 Docent Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Google Gemini adapters for the Docent document chatbot.
//!
//! [`GeminiProvider`] implements [`ProviderAdapter`] over `generateContent`,
//! and [`GeminiEmbedder`] implements [`EmbeddingAdapter`] over
//! `batchEmbedContents`. Both share one [`GeminiClient`].

pub mod client;
pub mod types;

use std::time::Duration;

use async_trait::async_trait;
use docent_config::model::GeminiConfig;
use docent_core::error::DocentError;
use docent_core::traits::{EmbeddingAdapter, PluginAdapter, ProviderAdapter};
use docent_core::types::{
    AdapterType, EmbeddingInput, EmbeddingOutput, EmbeddingTask, ProviderRequest,
    ProviderResponse, TokenUsage,
};
use tracing::{debug, info};

use crate::client::{GeminiClient, bare_model_name};
use crate::types::{
    BatchEmbedRequest, Content, EmbedContentRequest, GenerateContentRequest, GenerationConfig,
};

/// Largest number of texts `batchEmbedContents` accepts per call.
pub const MAX_BATCH: usize = 100;

/// Builds the shared HTTP client from `[gemini]` settings.
///
/// # API Key Resolution
/// 1. `gemini.api_key` if set (the config loader already folds in `GOOGLE_API_KEY`)
/// 2. `GOOGLE_API_KEY` environment variable
/// 3. Returns error if neither is available
pub fn client_from_config(config: &GeminiConfig) -> Result<GeminiClient, DocentError> {
    let api_key = resolve_api_key(&config.api_key)?;
    Ok(GeminiClient::new(
        &api_key,
        &config.base_url,
        Duration::from_secs(config.timeout_secs),
    )?
    .with_max_retries(config.max_retries))
}

/// Gemini chat model implementing [`ProviderAdapter`].
pub struct GeminiProvider {
    client: GeminiClient,
    model: String,
    max_output_tokens: u32,
}

impl GeminiProvider {
    pub fn new(client: GeminiClient, config: &GeminiConfig) -> Self {
        info!(model = %config.chat_model, "Gemini chat provider initialized");
        Self {
            client,
            model: config.chat_model.clone(),
            max_output_tokens: config.max_output_tokens,
        }
    }

    /// The model used when a request carries no override.
    pub fn model(&self) -> &str {
        &self.model
    }

    fn to_generate_request(&self, request: &ProviderRequest) -> GenerateContentRequest {
        let contents = request
            .messages
            .iter()
            .map(|m| Content::text(Some(m.role.as_str()), m.content.clone()))
            .collect();
        GenerateContentRequest {
            contents,
            generation_config: Some(GenerationConfig {
                max_output_tokens: Some(request.max_output_tokens.unwrap_or(self.max_output_tokens)),
                temperature: request.temperature,
            }),
        }
    }
}

impl PluginAdapter for GeminiProvider {
    fn name(&self) -> &str {
        "gemini"
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Provider
    }
}

#[async_trait]
impl ProviderAdapter for GeminiProvider {
    async fn complete(&self, request: ProviderRequest) -> Result<ProviderResponse, DocentError> {
        let model = request.model.clone().unwrap_or_else(|| self.model.clone());
        let body = self.to_generate_request(&request);
        let response = self.client.generate_content(&model, &body).await?;

        let text = response.first_text().ok_or_else(|| {
            DocentError::provider("Gemini returned no candidates (the prompt may have been blocked)")
        })?;
        let finish_reason = response
            .candidates
            .first()
            .and_then(|c| c.finish_reason.clone());
        let usage = response
            .usage_metadata
            .map(|u| TokenUsage {
                input_tokens: u.prompt_token_count,
                output_tokens: u.candidates_token_count,
            })
            .unwrap_or_default();

        debug!(
            model = %model,
            finish_reason = ?finish_reason,
            input_tokens = usage.input_tokens,
            output_tokens = usage.output_tokens,
            "completion finished"
        );

        Ok(ProviderResponse {
            text,
            model: response.model_version.unwrap_or(model),
            finish_reason,
            usage,
        })
    }
}

/// Gemini embedding model implementing [`EmbeddingAdapter`].
pub struct GeminiEmbedder {
    client: GeminiClient,
    model: String,
}

impl GeminiEmbedder {
    pub fn new(client: GeminiClient, config: &GeminiConfig) -> Self {
        info!(model = %config.embedding_model, "Gemini embedder initialized");
        Self {
            client,
            model: config.embedding_model.clone(),
        }
    }
}

impl PluginAdapter for GeminiEmbedder {
    fn name(&self) -> &str {
        "gemini-embedding"
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Embedding
    }
}

#[async_trait]
impl EmbeddingAdapter for GeminiEmbedder {
    async fn embed(&self, input: EmbeddingInput) -> Result<EmbeddingOutput, DocentError> {
        let qualified = format!("models/{}", bare_model_name(&self.model));
        let task_type = task_type(input.task);
        let mut embeddings = Vec::with_capacity(input.texts.len());

        for batch in input.texts.chunks(MAX_BATCH) {
            let request = BatchEmbedRequest {
                requests: batch
                    .iter()
                    .map(|text| EmbedContentRequest {
                        model: qualified.clone(),
                        content: Content::text(None, text.clone()),
                        task_type,
                    })
                    .collect(),
            };
            let response = self.client.batch_embed_contents(&self.model, &request).await?;
            if response.embeddings.len() != batch.len() {
                return Err(DocentError::provider(format!(
                    "expected {} embeddings, Gemini returned {}",
                    batch.len(),
                    response.embeddings.len()
                )));
            }
            embeddings.extend(response.embeddings.into_iter().map(|e| e.values));
        }

        let dimensions = embeddings.first().map(Vec::len).unwrap_or(0);
        debug!(count = embeddings.len(), dimensions, task = task_type, "embedded texts");
        Ok(EmbeddingOutput {
            embeddings,
            dimensions,
        })
    }
}

fn task_type(task: EmbeddingTask) -> &'static str {
    match task {
        EmbeddingTask::Document => "RETRIEVAL_DOCUMENT",
        EmbeddingTask::Query => "RETRIEVAL_QUERY",
    }
}

const API_KEY_ENV: &str = "GOOGLE_API_KEY";

/// Resolves the API key from config, then environment variable.
fn resolve_api_key(config_key: &Option<String>) -> Result<String, DocentError> {
    pick_api_key(config_key, std::env::var(API_KEY_ENV).ok())
}

fn pick_api_key(
    config_key: &Option<String>,
    env_key: Option<String>,
) -> Result<String, DocentError> {
    if let Some(key) = config_key
        && !key.is_empty()
    {
        return Ok(key.clone());
    }

    env_key
        .filter(|k| !k.is_empty())
        .ok_or_else(|| {
            DocentError::Config(
                "Gemini API key not found. Set gemini.api_key in config or GOOGLE_API_KEY environment variable.".into(),
            )
        })
}
