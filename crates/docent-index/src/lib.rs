// SPDX-FileCopyrightText: 2026 Docent Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Document index for the Docent document chatbot.
//!
//! ## Architecture
//!
//! - **PdfExtractor**: `TextExtractor` over `pdf-extract`
//! - **Chunker**: overlapping character windows
//! - **VectorStore**: SQLite persistence with BLOB vectors and a cosine scan
//! - **StoreHandle**: reloadable shared handle, empty when the store is unavailable
//! - **Retriever**: query embedding plus top-k search, joined into a context block
//! - **IngestionPipeline**: folder and single-file ingestion with batched embedding

pub mod chunker;
pub mod extractor;
pub mod handle;
pub mod ingest;
pub mod retriever;
pub mod store;
pub mod types;

pub use chunker::Chunker;
pub use extractor::PdfExtractor;
pub use handle::StoreHandle;
pub use ingest::{IngestionPipeline, discover_pdfs, is_pdf_name};
pub use retriever::Retriever;
pub use store::VectorStore;
pub use types::*;
