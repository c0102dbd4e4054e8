// SPDX-FileCopyrightText: 2026 Docent Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock LLM provider adapter for deterministic testing.
//!
//! `MockProvider` implements `ProviderAdapter` with pre-configured responses,
//! enabling fast, CI-runnable tests without external API calls.

use std::collections::VecDeque;

use async_trait::async_trait;
use tokio::sync::Mutex;

use docent_core::DocentError;
use docent_core::traits::{PluginAdapter, ProviderAdapter};
use docent_core::types::{AdapterType, ProviderRequest, ProviderResponse, TokenUsage};

type Responder = Box<dyn Fn(&str) -> Result<String, String> + Send + Sync>;

/// A mock LLM provider that returns pre-configured responses.
///
/// Queued responses are popped first (FIFO). When the queue is empty the
/// responder closure answers, if one is set; otherwise a default
/// "mock response" text is returned. Every request is recorded.
pub struct MockProvider {
    queue: Mutex<VecDeque<Result<String, String>>>,
    responder: Option<Responder>,
    requests: Mutex<Vec<ProviderRequest>>,
}

impl MockProvider {
    /// Create a new mock provider with an empty response queue.
    pub fn new() -> Self {
        Self {
            queue: Mutex::new(VecDeque::new()),
            responder: None,
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Create a mock provider pre-loaded with the given responses.
    pub fn with_responses(responses: Vec<String>) -> Self {
        Self {
            queue: Mutex::new(responses.into_iter().map(Ok).collect()),
            ..Self::new()
        }
    }

    /// Create a mock provider that answers every prompt with `f(prompt)`.
    pub fn with_responder<F>(f: F) -> Self
    where
        F: Fn(&str) -> Result<String, String> + Send + Sync + 'static,
    {
        Self {
            responder: Some(Box::new(f)),
            ..Self::new()
        }
    }

    /// Create a mock provider whose every call fails with `message`.
    pub fn failing(message: &str) -> Self {
        let message = message.to_string();
        Self::with_responder(move |_| Err(message.clone()))
    }

    /// Add a response to the end of the queue.
    pub async fn add_response(&self, text: impl Into<String>) {
        self.queue.lock().await.push_back(Ok(text.into()));
    }

    /// Queue a failure; the call that pops it returns a provider error.
    pub async fn add_failure(&self, message: impl Into<String>) {
        self.queue.lock().await.push_back(Err(message.into()));
    }

    /// All requests received so far, oldest first.
    pub async fn requests(&self) -> Vec<ProviderRequest> {
        self.requests.lock().await.clone()
    }

    /// The user prompt of every request received so far.
    pub async fn prompts(&self) -> Vec<String> {
        self.requests
            .lock()
            .await
            .iter()
            .map(|r| r.prompt().unwrap_or_default().to_string())
            .collect()
    }

    pub async fn call_count(&self) -> usize {
        self.requests.lock().await.len()
    }

    async fn next_response(&self, prompt: &str) -> Result<String, String> {
        if let Some(queued) = self.queue.lock().await.pop_front() {
            return queued;
        }
        match &self.responder {
            Some(f) => f(prompt),
            None => Ok("mock response".to_string()),
        }
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl PluginAdapter for MockProvider {
    fn name(&self) -> &str {
        "mock-provider"
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Provider
    }
}

#[async_trait]
impl ProviderAdapter for MockProvider {
    async fn complete(&self, request: ProviderRequest) -> Result<ProviderResponse, DocentError> {
        let prompt = request.prompt().unwrap_or_default().to_string();
        let model = request.model.clone().unwrap_or_else(|| "mock-model".to_string());
        self.requests.lock().await.push(request);

        let text = self
            .next_response(&prompt)
            .await
            .map_err(DocentError::provider)?;
        Ok(ProviderResponse {
            text,
            model,
            finish_reason: Some("STOP".to_string()),
            usage: TokenUsage {
                input_tokens: 10,
                output_tokens: 20,
            },
        })
    }
}
