// SPDX-FileCopyrightText: 2026 Docent Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! PDF text extraction via `pdf-extract`.

use std::path::Path;

use async_trait::async_trait;
use docent_core::error::DocentError;
use docent_core::traits::{PluginAdapter, TextExtractor};
use docent_core::types::AdapterType;
use tracing::debug;

/// Extracts the text layer of a PDF, pages concatenated in order.
///
/// Parsing runs on the blocking pool; a panic inside the parser (malformed
/// files can trigger one) is reported as an extraction error.
#[derive(Debug, Default, Clone, Copy)]
pub struct PdfExtractor;

impl PluginAdapter for PdfExtractor {
    fn name(&self) -> &str {
        "pdf-extract"
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Extractor
    }
}

#[async_trait]
impl TextExtractor for PdfExtractor {
    async fn extract(&self, path: &Path) -> Result<String, DocentError> {
        let shown = path.display().to_string();
        let owned = path.to_path_buf();

        let result = tokio::task::spawn_blocking(move || pdf_extract::extract_text(&owned))
            .await
            .map_err(|e| DocentError::Extraction {
                path: shown.clone(),
                message: format!("parser aborted: {e}"),
            })?;

        let text = result.map_err(|e| DocentError::Extraction {
            path: shown.clone(),
            message: e.to_string(),
        })?;
        debug!(path = %shown, chars = text.chars().count(), "extracted pdf text");
        Ok(text)
    }
}
