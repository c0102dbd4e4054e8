// SPDX-FileCopyrightText: 2026 Docent Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Single-shot text generation against the configured chat model.

use std::sync::Arc;

use docent_core::traits::ProviderAdapter;
use docent_core::types::{ModelResponse, ProviderRequest};
use tracing::{debug, warn};

/// Sends one prompt to the language model and reports the outcome as a
/// [`ModelResponse`]. Never returns an error.
pub struct ResponseGenerator {
    provider: Arc<dyn ProviderAdapter>,
}

impl ResponseGenerator {
    pub fn new(provider: Arc<dyn ProviderAdapter>) -> Self {
        Self { provider }
    }

    pub async fn generate(&self, prompt: String) -> ModelResponse {
        let result = self.provider.complete(ProviderRequest::user(prompt)).await;
        match &result {
            Ok(resp) => debug!(
                model = resp.model.as_str(),
                input_tokens = resp.usage.input_tokens,
                output_tokens = resp.usage.output_tokens,
                "generation complete"
            ),
            Err(e) => warn!(error = %e, "generation failed"),
        }
        result.into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use docent_test_utils::MockProvider;

    #[tokio::test]
    async fn success_carries_text() {
        let provider = Arc::new(MockProvider::with_responses(vec!["answer".into()]));
        let generator = ResponseGenerator::new(provider.clone());
        let out = generator.generate("question".into()).await;
        assert_eq!(out, ModelResponse::Success("answer".into()));
        assert_eq!(provider.prompts().await, vec!["question"]);
    }

    #[tokio::test]
    async fn provider_error_becomes_failure() {
        let generator = ResponseGenerator::new(Arc::new(MockProvider::failing("quota exceeded")));
        match generator.generate("q".into()).await {
            ModelResponse::Failure(reason) => assert!(reason.contains("quota exceeded")),
            other => panic!("expected failure, got {other:?}"),
        }
    }
}
