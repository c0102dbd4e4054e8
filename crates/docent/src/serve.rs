// SPDX-FileCopyrightText: 2026 Docent Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `docent serve` command implementation.
//!
//! Builds the Gemini adapters, opens the vector store and serves the HTTP
//! API until SIGINT or SIGTERM.

use docent_config::model::DocentConfig;
use docent_core::error::DocentError;
use docent_gateway::{AppState, start_server};
use tracing::info;

use crate::components::Components;

/// Runs the `docent serve` command.
pub async fn run_serve(config: DocentConfig) -> Result<(), DocentError> {
    info!("starting docent serve");

    let components = Components::init(&config).await?;
    let state = AppState::new(
        components.workflow(&config),
        components.pipeline(&config)?,
        components.store.clone(),
        &config.storage.pdf_folder,
    );

    start_server(&config.server, state, shutdown_signal()).await?;
    info!("docent serve shutdown complete");
    Ok(())
}

/// Resolves on SIGINT (Ctrl+C) or, on unix, SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!(error = %e, "failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    {
        use tokio::signal::unix::{SignalKind, signal};
        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                tokio::select! {
                    _ = ctrl_c => info!("received SIGINT (Ctrl+C), initiating shutdown"),
                    _ = sigterm.recv() => info!("received SIGTERM, initiating shutdown"),
                }
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to install SIGTERM handler");
                ctrl_c.await;
                info!("received SIGINT (Ctrl+C), initiating shutdown");
            }
        }
    }

    #[cfg(not(unix))]
    {
        ctrl_c.await;
        info!("received Ctrl+C, initiating shutdown");
    }
}
