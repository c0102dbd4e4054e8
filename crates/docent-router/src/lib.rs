// SPDX-FileCopyrightText: 2026 Docent Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Intent classification and conversation routing for the Docent chatbot.
//!
//! This crate provides:
//! - [`IntentClassifier`]: one-word LLM classification into greeting/faq/summarize
//! - [`GreetingHandler`], [`FaqHandler`], [`SummarizeHandler`]: per-intent responses
//! - [`RoutingWorkflow`]: classify then dispatch, always producing a response
//!
//! Handler failures are reported inline as `[ERROR] ...` text so the chat
//! endpoint always has something to return.

pub mod classifier;
pub mod generator;
pub mod handlers;
pub mod prompts;
pub mod workflow;

pub use classifier::{Intent, IntentClassifier, parse_intent};
pub use generator::ResponseGenerator;
pub use handlers::{FaqHandler, GreetingHandler, SummarizeHandler};
pub use workflow::{NO_RESPONSE, RoutingWorkflow};
