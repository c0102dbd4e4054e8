// SPDX-FileCopyrightText: 2026 Docent Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Docent document chatbot.
//!
//! This crate provides the foundational trait definitions, error types, and
//! common types used throughout the Docent workspace. The language model,
//! embedding model, and text extractor are all reached through the adapter
//! traits defined here.

pub mod error;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::DocentError;
pub use types::{AdapterType, ConversationState, DocumentChunk, ModelResponse};

pub use traits::{EmbeddingAdapter, PluginAdapter, ProviderAdapter, TextExtractor};
