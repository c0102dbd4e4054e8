// SPDX-FileCopyrightText: 2026 Docent Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `docent ingest` command implementation.

use std::path::PathBuf;

use docent_config::model::DocentConfig;
use docent_core::error::DocentError;
use docent_index::IngestionReport;
use tracing::info;

use crate::components::Components;

/// Embeds every PDF in `folder` (default `storage.pdf_folder`) into the store.
pub async fn run_ingest(
    config: DocentConfig,
    folder: Option<PathBuf>,
) -> Result<IngestionReport, DocentError> {
    let folder = folder.unwrap_or_else(|| PathBuf::from(&config.storage.pdf_folder));
    info!(folder = %folder.display(), "starting docent ingest");

    let components = Components::init(&config).await?;
    let pipeline = components.pipeline(&config)?;
    let report = pipeline.ingest_folder(&folder).await?;

    println!("{}", summary(&report));
    Ok(report)
}

/// One-line human summary of an ingestion run.
pub fn summary(report: &IngestionReport) -> String {
    if report.documents_loaded == 0 {
        return "No documents to process.".to_string();
    }
    let mut line = format!(
        "Ingested {} document(s): {} chunk(s) embedded and stored.",
        report.documents_loaded, report.chunks_added
    );
    if report.documents_skipped > 0 {
        line.push_str(&format!(" {} unreadable file(s) skipped.", report.documents_skipped));
    }
    line
}
