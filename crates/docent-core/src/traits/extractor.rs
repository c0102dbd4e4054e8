// SPDX-FileCopyrightText: 2026 Docent Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Text extractor trait for turning source documents into plain text.

use std::path::Path;

use async_trait::async_trait;

use crate::error::DocentError;
use crate::traits::adapter::PluginAdapter;

/// Adapter that extracts the plain text of a document on disk.
#[async_trait]
pub trait TextExtractor: PluginAdapter {
    /// Extracts the full text of the document at `path`, pages concatenated.
    async fn extract(&self, path: &Path) -> Result<String, DocentError>;
}
