// SPDX-FileCopyrightText: 2026 Docent Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Conversation routing: classify the query, dispatch to one handler.

use std::sync::Arc;
use std::time::Instant;

use docent_config::model::RetrievalConfig;
use docent_core::traits::ProviderAdapter;
use docent_core::types::ConversationState;
use docent_index::Retriever;
use tracing::{Instrument, info, info_span};

use crate::classifier::{Intent, IntentClassifier};
use crate::generator::ResponseGenerator;
use crate::handlers::{FaqHandler, GreetingHandler, SummarizeHandler};

/// Returned if a handler somehow leaves the response empty.
pub const NO_RESPONSE: &str = "[ERROR] No response generated.";

/// Routes each query through exactly one handler.
///
/// Every path sets [`ConversationState::response`]; failures surface as
/// error-tagged text, never as an `Err`.
pub struct RoutingWorkflow {
    classifier: IntentClassifier,
    greeting: GreetingHandler,
    faq: FaqHandler,
    summarize: SummarizeHandler,
}

impl RoutingWorkflow {
    pub fn new(
        provider: Arc<dyn ProviderAdapter>,
        retriever: Arc<Retriever>,
        config: &RetrievalConfig,
    ) -> Self {
        let generator = Arc::new(ResponseGenerator::new(provider.clone()));
        Self {
            classifier: IntentClassifier::new(provider),
            greeting: GreetingHandler::new(generator.clone()),
            faq: FaqHandler::new(retriever.clone(), generator.clone(), config.faq_k),
            summarize: SummarizeHandler::new(retriever, generator, config.summarize_k),
        }
    }

    /// Runs one query through classification and its handler.
    pub async fn run(&self, query: &str) -> ConversationState {
        let started = Instant::now();
        let span = info_span!("workflow", intent = tracing::field::Empty);

        async {
            let mut state = ConversationState::new(query);
            let intent = self.classifier.classify(&state.user_query).await;
            tracing::Span::current().record("intent", tracing::field::display(intent));

            state.response = match intent {
                Intent::Greeting => self.greeting.handle(&state.user_query).await,
                Intent::Faq => self.faq.handle(&state.user_query).await,
                Intent::Summarize => self.summarize.handle(&state.user_query).await,
            };
            if state.response.is_empty() {
                state.response = NO_RESPONSE.to_string();
            }

            info!(
                %intent,
                elapsed_ms = started.elapsed().as_millis() as u64,
                "query handled"
            );
            state
        }
        .instrument(span)
        .await
    }

    /// Convenience wrapper returning only the response text.
    pub async fn handle_query(&self, query: &str) -> String {
        self.run(query).await.response
    }
}
