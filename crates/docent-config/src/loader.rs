// SPDX-FileCopyrightText: 2026 Docent Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./docent.toml` > `~/.config/docent/docent.toml` > `/etc/docent/docent.toml`
//! with environment variable overrides via `DOCENT_` prefix, then the
//! provider variables `GOOGLE_API_KEY`, `GOOGLE_GEMINI_MODEL` and
//! `GOOGLE_GEMINI_EMBEDDING_MODEL`.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::{Path, PathBuf};

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};

use crate::model::DocentConfig;

/// System-wide config file.
pub const SYSTEM_CONFIG_PATH: &str = "/etc/docent/docent.toml";

/// Config file in the working directory.
pub const LOCAL_CONFIG_PATH: &str = "docent.toml";

/// `~/.config/docent/docent.toml`, when a config directory exists.
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("docent/docent.toml"))
}

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/docent/docent.toml` (system-wide)
/// 3. `~/.config/docent/docent.toml` (user XDG config)
/// 4. `./docent.toml` (local directory)
/// 5. `DOCENT_*` environment variables
/// 6. `GOOGLE_*` provider variables
pub fn load_config() -> Result<DocentConfig, figment::Error> {
    build_figment().extract()
}

/// Load configuration from a TOML string only (no files, no env).
///
/// Used for testing and explicit configuration.
pub fn load_config_from_str(toml_content: &str) -> Result<DocentConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(DocentConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<DocentConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(DocentConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .merge(google_env_provider())
        .extract()
}

/// Build the Figment used internally for config loading.
///
/// Returns the Figment before extraction so callers can inspect metadata.
pub fn build_figment() -> Figment {
    Figment::new()
        .merge(Serialized::defaults(DocentConfig::default()))
        .merge(Toml::file(SYSTEM_CONFIG_PATH))
        .merge(Toml::file(user_config_path().unwrap_or_default()))
        .merge(Toml::file(LOCAL_CONFIG_PATH))
        .merge(env_provider())
        .merge(google_env_provider())
}

/// Create the `DOCENT_` provider using explicit `map()` for section-to-dot mapping.
///
/// Uses `Env::map()` rather than `Env::split("_")` because key names contain
/// underscores: `DOCENT_INGEST_CHUNK_SIZE` must map to `ingest.chunk_size`,
/// not `ingest.chunk.size`.
fn env_provider() -> Env {
    Env::prefixed("DOCENT_").map(|key| {
        // Prefix stripped, original case, e.g. "GEMINI_API_KEY".
        map_section_key(&key.as_str().to_ascii_lowercase()).into()
    })
}

fn map_section_key(key: &str) -> String {
    const SECTIONS: [&str; 5] = ["server", "gemini", "storage", "ingest", "retrieval"];
    for section in SECTIONS {
        if let Some(rest) = key.strip_prefix(section).and_then(|r| r.strip_prefix('_')) {
            return format!("{section}.{rest}");
        }
    }
    key.to_string()
}

/// The provider-native variable names, mapped onto the `[gemini]` section.
fn google_env_provider() -> Env {
    Env::raw()
        .only(&[
            "GOOGLE_API_KEY",
            "GOOGLE_GEMINI_MODEL",
            "GOOGLE_GEMINI_EMBEDDING_MODEL",
        ])
        .map(|key| match key.as_str().to_ascii_lowercase().as_str() {
            "google_api_key" => "gemini.api_key".into(),
            "google_gemini_model" => "gemini.chat_model".into(),
            "google_gemini_embedding_model" => "gemini.embedding_model".into(),
            other => other.to_string().into(),
        })
}
