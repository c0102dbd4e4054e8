// SPDX-FileCopyrightText: 2026 Docent Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Intent classification.
//!
//! Asks the language model for a one-word label and maps the reply onto an
//! [`Intent`] by substring. A failed call falls back to [`Intent::Faq`].

use std::sync::Arc;

use docent_core::traits::ProviderAdapter;
use docent_core::types::ProviderRequest;
use strum::{Display, EnumString};
use tracing::{debug, warn};

use crate::prompts::classify_prompt;

/// Output budget for the one-word classification reply.
const CLASSIFY_MAX_TOKENS: u32 = 16;

/// Which conversation state handles a query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum Intent {
    /// Salutation or general chat.
    Greeting,
    /// Question answered from the knowledge base.
    Faq,
    /// Request to summarize indexed material.
    Summarize,
}

/// Maps raw model output onto an intent.
///
/// `summarize` is checked before `greet`; anything else is a question. The
/// match is a plain substring test, so a reply like "greeting-ish" still
/// counts as a greeting.
pub fn parse_intent(raw: &str) -> Intent {
    let label = raw.trim().to_lowercase();
    if label.contains("summarize") {
        Intent::Summarize
    } else if label.contains("greet") {
        Intent::Greeting
    } else {
        Intent::Faq
    }
}

/// LLM-backed intent classifier.
pub struct IntentClassifier {
    provider: Arc<dyn ProviderAdapter>,
}

impl IntentClassifier {
    pub fn new(provider: Arc<dyn ProviderAdapter>) -> Self {
        Self { provider }
    }

    /// Classifies `query`. Never fails.
    pub async fn classify(&self, query: &str) -> Intent {
        let request = ProviderRequest::user(classify_prompt(query))
            .with_max_output_tokens(CLASSIFY_MAX_TOKENS)
            .with_temperature(0.0);

        match self.provider.complete(request).await {
            Ok(resp) => {
                let intent = parse_intent(&resp.text);
                debug!(raw = resp.text.trim(), %intent, "classified query");
                intent
            }
            Err(e) => {
                warn!(error = %e, "intent classification failed, defaulting to faq");
                Intent::Faq
            }
        }
    }
}
