// SPDX-FileCopyrightText: 2026 Docent Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP request handlers.
//!
//! Handles POST /chat, POST /upload, GET /health and GET /.

use std::path::Path;

use axum::{
    Json,
    extract::{Multipart, State, multipart::Field},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use docent_core::types::ERROR_TAG;
use docent_index::is_pdf_name;
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};

use crate::server::AppState;

/// Multipart field carrying the uploaded document.
pub const UPLOAD_FIELD: &str = "file";

pub const NOT_PDF_DETAIL: &str = "Only PDF files are allowed.";

/// Request body for POST /chat.
#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub query: String,
}

/// Response body for POST /chat, also used for its 500 case.
#[derive(Debug, Serialize, Deserialize)]
pub struct ChatResponse {
    pub response: String,
}

/// Response body for a successful POST /upload.
#[derive(Debug, Serialize, Deserialize)]
pub struct UploadResponse {
    pub message: String,
    pub chunks_added: usize,
}

/// Error body for POST /upload.
#[derive(Debug, Serialize, Deserialize)]
pub struct DetailResponse {
    pub detail: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct StatusResponse {
    pub status: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

fn detail(status: StatusCode, detail: impl Into<String>) -> Response {
    (
        status,
        Json(DetailResponse {
            detail: detail.into(),
        }),
    )
        .into_response()
}

/// GET /
pub async fn get_root() -> Json<MessageResponse> {
    Json(MessageResponse {
        message: "RAG Chatbot API is running".to_string(),
    })
}

/// GET /health
pub async fn get_health() -> Json<StatusResponse> {
    Json(StatusResponse {
        status: "healthy".to_string(),
    })
}

/// POST /chat
///
/// The workflow runs on its own task so a panic inside it becomes a 500
/// carrying an `[ERROR]` response instead of a dropped connection.
pub async fn post_chat(
    State(state): State<AppState>,
    Json(body): Json<ChatRequest>,
) -> Response {
    let workflow = state.workflow.clone();
    let task = tokio::spawn(async move { workflow.handle_query(&body.query).await });

    match task.await {
        Ok(response) => (StatusCode::OK, Json(ChatResponse { response })).into_response(),
        Err(e) => {
            error!(error = %e, "chat handler task failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ChatResponse {
                    response: format!("{ERROR_TAG} {e}"),
                }),
            )
                .into_response()
        }
    }
}

/// Reduces a client-supplied file name to its final path component.
pub fn sanitize_file_name(raw: &str) -> Option<String> {
    let name = Path::new(raw).file_name()?.to_str()?.trim();
    (!name.is_empty()).then(|| name.to_string())
}

/// POST /upload
///
/// Saves the PDF into the source folder, ingests it, then reloads the store.
/// Non-PDF names are rejected before anything is written.
pub async fn post_upload(State(state): State<AppState>, mut multipart: Multipart) -> Response {
    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => {
                return detail(
                    StatusCode::BAD_REQUEST,
                    format!("Missing '{UPLOAD_FIELD}' field."),
                );
            }
            Err(e) => return detail(e.status(), e.body_text()),
        };
        if field.name() == Some(UPLOAD_FIELD) {
            return save_and_ingest(&state, field).await;
        }
    }
}

async fn save_and_ingest(state: &AppState, field: Field<'_>) -> Response {
    let Some(file_name) = field
        .file_name()
        .and_then(sanitize_file_name)
        .filter(|n| is_pdf_name(n))
    else {
        warn!(file_name = ?field.file_name(), "rejected non-pdf upload");
        return detail(StatusCode::BAD_REQUEST, NOT_PDF_DETAIL);
    };

    let bytes = match field.bytes().await {
        Ok(bytes) => bytes,
        Err(e) => return detail(e.status(), e.body_text()),
    };

    let _guard = state.upload_lock.lock().await;

    if let Err(e) = tokio::fs::create_dir_all(&state.pdf_folder).await {
        error!(error = %e, "failed to create pdf folder");
        return detail(StatusCode::INTERNAL_SERVER_ERROR, e.to_string());
    }
    let path = state.pdf_folder.join(&file_name);
    if let Err(e) = tokio::fs::write(&path, &bytes).await {
        error!(path = %path.display(), error = %e, "failed to save upload");
        return detail(StatusCode::INTERNAL_SERVER_ERROR, e.to_string());
    }

    let chunks_added = match state.pipeline.ingest_file(&path).await {
        Ok(n) => n,
        Err(e) => {
            error!(file = %file_name, error = %e, "upload ingestion failed");
            return detail(StatusCode::INTERNAL_SERVER_ERROR, e.to_string());
        }
    };
    if let Err(e) = state.store.reload().await {
        error!(error = %e, "store reload after upload failed");
        return detail(StatusCode::INTERNAL_SERVER_ERROR, e.to_string());
    }

    info!(file = %file_name, bytes = bytes.len(), chunks_added, "upload embedded");
    (
        StatusCode::OK,
        Json(UploadResponse {
            message: format!("Uploaded and embedded {file_name}."),
            chunks_added,
        }),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitize_strips_directories() {
        assert_eq!(sanitize_file_name("../../etc/a.pdf").as_deref(), Some("a.pdf"));
        assert_eq!(sanitize_file_name("/abs/path/B.PDF").as_deref(), Some("B.PDF"));
        assert_eq!(sanitize_file_name("plain.pdf").as_deref(), Some("plain.pdf"));
    }

    #[test]
    fn sanitize_rejects_empty_names() {
        assert_eq!(sanitize_file_name(""), None);
        assert_eq!(sanitize_file_name(".."), None);
        assert_eq!(sanitize_file_name("dir/"), Some("dir".to_string()));
    }

    #[tokio::test]
    async fn root_and_health_bodies() {
        assert_eq!(get_root().await.0.message, "RAG Chatbot API is running");
        assert_eq!(get_health().await.0.status, "healthy");
    }
}
