// SPDX-FileCopyrightText: 2026 Docent Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Gateway HTTP server built on axum.
//!
//! Sets up routes, middleware, and shared state for the gateway.

use std::future::Future;
use std::path::PathBuf;
use std::sync::Arc;

use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post},
};
use docent_config::model::ServerConfig;
use docent_core::DocentError;
use docent_index::{IngestionPipeline, StoreHandle};
use docent_router::RoutingWorkflow;
use tokio::sync::Mutex;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::handlers;

/// Shared state for axum request handlers.
#[derive(Clone)]
pub struct AppState {
    /// Classify-and-dispatch workflow behind `/chat`.
    pub workflow: Arc<RoutingWorkflow>,
    /// Single-file ingestion behind `/upload`.
    pub pipeline: Arc<IngestionPipeline>,
    /// Store handle reloaded after each upload.
    pub store: Arc<StoreHandle>,
    /// Folder uploaded PDFs are saved into.
    pub pdf_folder: PathBuf,
    /// Serialises uploads so save, ingest and reload do not interleave.
    pub upload_lock: Arc<Mutex<()>>,
}

impl AppState {
    pub fn new(
        workflow: Arc<RoutingWorkflow>,
        pipeline: Arc<IngestionPipeline>,
        store: Arc<StoreHandle>,
        pdf_folder: impl Into<PathBuf>,
    ) -> Self {
        Self {
            workflow,
            pipeline,
            store,
            pdf_folder: pdf_folder.into(),
            upload_lock: Arc::new(Mutex::new(())),
        }
    }
}

/// Builds the application router.
///
/// Routes:
/// - GET / and GET /health (liveness)
/// - POST /chat
/// - POST /upload (multipart, body capped at `max_upload_bytes`)
pub fn build_router(state: AppState, max_upload_bytes: usize) -> Router {
    Router::new()
        .route("/", get(handlers::get_root))
        .route("/health", get(handlers::get_health))
        .route("/chat", post(handlers::post_chat))
        .route("/upload", post(handlers::post_upload))
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Binds `host:port` and serves until `shutdown` resolves.
pub async fn start_server(
    config: &ServerConfig,
    state: AppState,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> Result<(), DocentError> {
    let app = build_router(state, config.max_upload_bytes);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| DocentError::Internal(format!("failed to bind {addr}: {e}")))?;

    tracing::info!("HTTP server listening on {addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await
        .map_err(|e| DocentError::Internal(format!("server error: {e}")))?;

    tracing::info!("HTTP server stopped");
    Ok(())
}
