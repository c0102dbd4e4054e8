// SPDX-FileCopyrightText: 2026 Docent Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for Docent integration tests.
//!
//! Provides mock adapters and test harness infrastructure for fast,
//! deterministic, CI-runnable tests without external services.
//!
//! # Components
//!
//! - [`MockProvider`] - Mock LLM provider with queued or computed responses
//! - [`MockEmbedder`] - Deterministic bag-of-words embedder
//! - [`StubExtractor`] - Text extractor serving canned document text
//! - [`TestHarness`] - Full stack over a temp directory
//! - [`fixtures`] - Real PDF bytes for the `pdf-extract` path

pub mod fixtures;
pub mod harness;
pub mod mock_embedder;
pub mod mock_provider;
pub mod stub_extractor;

pub use harness::{TestHarness, TestHarnessBuilder};
pub use mock_embedder::MockEmbedder;
pub use mock_provider::MockProvider;
pub use stub_extractor::StubExtractor;
