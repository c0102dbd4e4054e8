// SPDX-FileCopyrightText: 2026 Docent Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP gateway for the Docent document chatbot.
//!
//! Exposes the routing workflow as `POST /chat` and single-file ingestion as
//! `POST /upload`, plus liveness endpoints. Handlers share an [`AppState`]
//! holding the workflow, the ingestion pipeline and the store handle.

pub mod handlers;
pub mod server;

pub use handlers::{ChatRequest, ChatResponse, DetailResponse, UploadResponse};
pub use server::{AppState, build_router, start_server};
