// SPDX-FileCopyrightText: 2026 Docent Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Per-intent handlers.
//!
//! Each handler turns a query into the final response text. Failures are
//! rendered as `[ERROR] <context>: <detail>` strings rather than returned.

use std::sync::Arc;

use docent_core::types::error_tagged;
use docent_index::Retriever;
use tracing::warn;

use crate::generator::ResponseGenerator;
use crate::prompts::{faq_prompt, greeting_prompt, summarize_prompt};

pub struct GreetingHandler {
    generator: Arc<ResponseGenerator>,
}

impl GreetingHandler {
    pub fn new(generator: Arc<ResponseGenerator>) -> Self {
        Self { generator }
    }

    pub async fn handle(&self, query: &str) -> String {
        self.generator
            .generate(greeting_prompt(query))
            .await
            .into_text_or_tagged("Greeting LLM failed")
    }
}

/// Answers questions from the top `k` retrieved chunks.
pub struct FaqHandler {
    retriever: Arc<Retriever>,
    generator: Arc<ResponseGenerator>,
    k: usize,
}

impl FaqHandler {
    pub fn new(retriever: Arc<Retriever>, generator: Arc<ResponseGenerator>, k: usize) -> Self {
        Self {
            retriever,
            generator,
            k,
        }
    }

    /// An empty store yields an empty context; the model is still asked.
    pub async fn handle(&self, query: &str) -> String {
        let context = match self.retriever.retrieve_context(query, self.k).await {
            Ok(context) => context,
            Err(e) => {
                warn!(error = %e, "faq retrieval failed");
                return error_tagged("FAQ retrieval failed", &e.to_string());
            }
        };

        self.generator
            .generate(faq_prompt(&context, query))
            .await
            .into_text_or_tagged("FAQ LLM failed")
    }
}

/// Summarizes the top `k` chunks nearest to the query.
pub struct SummarizeHandler {
    retriever: Arc<Retriever>,
    generator: Arc<ResponseGenerator>,
    k: usize,
}

impl SummarizeHandler {
    pub fn new(retriever: Arc<Retriever>, generator: Arc<ResponseGenerator>, k: usize) -> Self {
        Self {
            retriever,
            generator,
            k,
        }
    }

    pub async fn handle(&self, query: &str) -> String {
        const TAG: &str = "Summarization failed";

        let context = match self.retriever.retrieve_context(query, self.k).await {
            Ok(context) => context,
            Err(e) => {
                warn!(error = %e, "summarize retrieval failed");
                return error_tagged(TAG, &e.to_string());
            }
        };

        self.generator
            .generate(summarize_prompt(&context))
            .await
            .into_text_or_tagged(TAG)
    }
}
