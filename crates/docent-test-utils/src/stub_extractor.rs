// SPDX-FileCopyrightText: 2026 Docent Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Text extractor that serves canned text instead of parsing PDFs.

use std::collections::HashMap;
use std::path::Path;

use async_trait::async_trait;

use docent_core::DocentError;
use docent_core::traits::{PluginAdapter, TextExtractor};
use docent_core::types::AdapterType;

/// Serves text by file name. Names without an entry fall back to the
/// default text when one is set, and fail otherwise.
#[derive(Debug, Default, Clone)]
pub struct StubExtractor {
    texts: HashMap<String, String>,
    fallback: Option<String>,
}

impl StubExtractor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every file extracts to `text`.
    pub fn uniform(text: impl Into<String>) -> Self {
        Self {
            texts: HashMap::new(),
            fallback: Some(text.into()),
        }
    }

    /// Registers the text returned for `file_name`.
    pub fn with_text(mut self, file_name: &str, text: impl Into<String>) -> Self {
        self.texts.insert(file_name.to_string(), text.into());
        self
    }
}

impl PluginAdapter for StubExtractor {
    fn name(&self) -> &str {
        "stub-extractor"
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Extractor
    }
}

#[async_trait]
impl TextExtractor for StubExtractor {
    async fn extract(&self, path: &Path) -> Result<String, DocentError> {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        self.texts
            .get(&name)
            .or(self.fallback.as_ref())
            .cloned()
            .ok_or_else(|| DocentError::Extraction {
                path: path.display().to_string(),
                message: "no stub text registered".into(),
            })
    }
}
