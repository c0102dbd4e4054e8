// SPDX-FileCopyrightText: 2026 Docent Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Docent - a retrieval-augmented chatbot over a folder of PDFs.
//!
//! This is the binary entry point.

#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

mod check;
mod components;
mod ingest;
mod serve;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Docent - a retrieval-augmented chatbot over a folder of PDFs.
#[derive(Parser, Debug)]
#[command(name = "docent", version, about, long_about = None)]
struct Cli {
    /// Config file to load instead of the standard locations.
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Start the HTTP API server.
    Serve,
    /// Embed every PDF in the source folder into the vector store.
    Ingest {
        /// Folder to ingest instead of `storage.pdf_folder`.
        #[arg(long, value_name = "DIR")]
        folder: Option<PathBuf>,
    },
    /// Verify the embedding API by embedding a probe string.
    Check,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let loaded = match &cli.config {
        Some(path) => docent_config::load_and_validate_path(path),
        None => docent_config::load_and_validate(),
    };
    let config = match loaded {
        Ok(config) => config,
        Err(errors) => {
            docent_config::render_errors(&errors);
            std::process::exit(1);
        }
    };

    init_tracing(&config.server.log_level);

    let result = match cli.command {
        Some(Commands::Serve) => serve::run_serve(config).await,
        Some(Commands::Ingest { folder }) => ingest::run_ingest(config, folder).await.map(|_| ()),
        Some(Commands::Check) => check::run_check(config).await.map(|_| ()),
        None => {
            println!("docent: use --help for available commands");
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

/// Initializes the tracing subscriber with the given log level.
fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter_directive(log_level)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_names(false)
        .init();
}

/// Workspace crates (all `docent*` targets) and request tracing log at
/// `log_level`, everything else at `warn`.
fn filter_directive(log_level: &str) -> String {
    format!("docent={log_level},tower_http={log_level},warn")
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    #[cfg(not(target_env = "msvc"))]
    fn jemalloc_is_active() {
        // Only jemalloc supports advancing the epoch.
        use tikv_jemalloc_ctl::{epoch, stats};
        epoch::advance().unwrap();
        let allocated = stats::allocated::read().unwrap();
        assert!(allocated > 0, "jemalloc should report non-zero allocation");
    }

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_ingest_with_folder_and_global_config() {
        let cli = Cli::parse_from(["docent", "ingest", "--folder", "docs", "--config", "d.toml"]);
        assert_eq!(cli.config, Some(PathBuf::from("d.toml")));
        match cli.command {
            Some(Commands::Ingest { folder }) => assert_eq!(folder, Some(PathBuf::from("docs"))),
            other => panic!("expected ingest, got {other:?}"),
        }
    }

    #[test]
    fn parses_serve_and_check() {
        assert!(matches!(
            Cli::parse_from(["docent", "serve"]).command,
            Some(Commands::Serve)
        ));
        assert!(matches!(
            Cli::parse_from(["docent", "check"]).command,
            Some(Commands::Check)
        ));
    }

    #[test]
    fn filter_directive_format() {
        assert_eq!(
            filter_directive("debug"),
            "docent=debug,tower_http=debug,warn"
        );
    }

    #[test]
    fn binary_loads_config_defaults() {
        let config =
            docent_config::load_and_validate_str("").expect("default config should be valid");
        assert_eq!(config.server.port, 8000);
        assert_eq!(config.retrieval.summarize_k, 5);
    }
}
