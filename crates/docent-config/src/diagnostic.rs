// SPDX-FileCopyrightText: 2026 Docent Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Turns figment extraction errors into miette diagnostics that point into
//! `docent.toml`.
//!
//! Unknown tables, unknown keys inside a table, and ill-typed values each get
//! their own diagnostic with a span into the offending file when it can be
//! located, plus a Jaro-Winkler "did you mean" suggestion for names.

#![allow(unused_assignments)] // miette's Diagnostic derive generates code triggering this lint

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// Minimum Jaro-Winkler similarity score to suggest a correction.
/// Catches typos like `chunk_sise` -> `chunk_size` or `retreival` -> `retrieval`.
const SUGGESTION_THRESHOLD: f64 = 0.75;

/// Source name used for configuration passed as a string.
pub const INLINE_SOURCE: &str = "<inline>";

/// A configuration error with rich diagnostic information.
#[derive(Debug, Error, Diagnostic)]
pub enum ConfigError {
    /// A top-level table that Docent does not read, e.g. `[retreival]`.
    #[error("unknown configuration section `[{section}]`")]
    #[diagnostic(
        code(docent::config::unknown_section),
        help("{}", section_help(suggestion.as_deref(), sections))
    )]
    UnknownSection {
        section: String,
        suggestion: Option<String>,
        /// Comma-separated `[name]` list of the sections Docent reads.
        sections: String,
        #[label("not a docent section")]
        span: Option<SourceSpan>,
        #[source_code]
        src: Option<NamedSource<String>>,
    },

    /// A key that the enclosing section does not define.
    #[error("unknown key `{key}` in `[{section}]`")]
    #[diagnostic(
        code(docent::config::unknown_key),
        help("{}", key_help(suggestion.as_deref(), valid_keys))
    )]
    UnknownKey {
        key: String,
        section: String,
        suggestion: Option<String>,
        /// Comma-separated keys accepted by `section`.
        valid_keys: String,
        #[label("this key is not recognized")]
        span: Option<SourceSpan>,
        #[source_code]
        src: Option<NamedSource<String>>,
    },

    /// A value that does not deserialize into the key's type.
    #[error("`{key}` must be {expected}, found {found}")]
    #[diagnostic(code(docent::config::invalid_type))]
    InvalidType {
        /// Dotted path, e.g. `server.port`.
        key: String,
        found: String,
        expected: String,
        #[label("expected {expected}")]
        span: Option<SourceSpan>,
        #[source_code]
        src: Option<NamedSource<String>>,
    },

    /// A value that parsed but violates a cross-field or range rule.
    #[error("validation error: {message}")]
    #[diagnostic(code(docent::config::validation))]
    Validation { message: String },

    #[error("configuration error: {0}")]
    #[diagnostic(code(docent::config::other))]
    Other(String),
}

fn section_help(suggestion: Option<&str>, sections: &str) -> String {
    match suggestion {
        Some(s) => format!("did you mean `[{s}]`? Docent reads {sections}"),
        None => format!("Docent reads {sections}"),
    }
}

fn key_help(suggestion: Option<&str>, valid_keys: &str) -> String {
    match suggestion {
        Some(s) => format!("did you mean `{s}`? Valid keys: {valid_keys}"),
        None => format!("valid keys: {valid_keys}"),
    }
}

/// Convert a `figment::Error` into a list of `ConfigError` diagnostics.
///
/// `toml_sources` pairs a file path (or [`INLINE_SOURCE`]) with its content
/// and is only used to attach spans.
pub fn figment_to_config_errors(
    err: figment::Error,
    toml_sources: &[(String, String)],
) -> Vec<ConfigError> {
    use figment::error::Kind;

    err.into_iter()
        .map(|error| {
            let path: Vec<String> = error.path.iter().map(|s| s.to_string()).collect();
            let source = matching_source(&error, toml_sources);

            match &error.kind {
                Kind::UnknownField(field, expected) if path.is_empty() => {
                    let span = source.and_then(|(_, content)| find_section_offset(content, field));
                    let (span, src) = attach(source, span.map(|o| (o, field.len() + 2)));
                    ConfigError::UnknownSection {
                        section: field.clone(),
                        suggestion: suggest_key(field, expected),
                        sections: expected
                            .iter()
                            .map(|s| format!("[{s}]"))
                            .collect::<Vec<_>>()
                            .join(", "),
                        span,
                        src,
                    }
                }
                Kind::UnknownField(field, expected) => {
                    let span = source
                        .and_then(|(_, content)| find_key_offset(content, &path, field))
                        .map(|o| (o, field.len()));
                    let (span, src) = attach(source, span);
                    ConfigError::UnknownKey {
                        key: field.clone(),
                        section: path.join("."),
                        suggestion: suggest_key(field, expected),
                        valid_keys: expected.join(", "),
                        span,
                        src,
                    }
                }
                Kind::InvalidType(found, expected) | Kind::InvalidValue(found, expected) => {
                    let span = match path.split_last() {
                        Some((field, section)) => source
                            .and_then(|(_, content)| find_value_span(content, section, field)),
                        None => None,
                    };
                    let (span, src) = attach(source, span);
                    ConfigError::InvalidType {
                        key: path.join("."),
                        found: found.to_string(),
                        expected: expected.clone(),
                        span,
                        src,
                    }
                }
                _ => ConfigError::Other(error.to_string()),
            }
        })
        .collect()
}

/// Picks the TOML text an error came from: the named file, or the inline
/// string when the value was not read from a file.
fn matching_source<'a>(
    error: &figment::error::Error,
    toml_sources: &'a [(String, String)],
) -> Option<(&'a str, &'a str)> {
    let file = error
        .metadata
        .as_ref()
        .and_then(|m| m.source.as_ref())
        .and_then(|s| match s {
            figment::Source::File(path) => Some(path.display().to_string()),
            _ => None,
        });
    let wanted = file.as_deref().unwrap_or(INLINE_SOURCE);

    toml_sources
        .iter()
        .find(|(p, _)| p == wanted)
        .map(|(p, content)| (p.as_str(), content.as_str()))
}

fn attach(
    source: Option<(&str, &str)>,
    span: Option<(usize, usize)>,
) -> (Option<SourceSpan>, Option<NamedSource<String>>) {
    match (source, span) {
        (Some((name, content)), Some((offset, len))) => (
            Some(SourceSpan::new(offset.into(), len)),
            Some(NamedSource::new(name, content.to_string())),
        ),
        _ => (None, None),
    }
}

/// Byte offset of the `[section]` header line.
pub fn find_section_offset(content: &str, section: &str) -> Option<usize> {
    let header = format!("[{section}]");
    let mut offset = 0;
    for line in content.split_inclusive('\n') {
        let trimmed = line.trim_start();
        if trimmed.trim_end() == header {
            return Some(offset + line.len() - trimmed.len());
        }
        offset += line.len();
    }
    None
}

/// Find the byte offset of a key in TOML content, relative to a section path.
///
/// For `path = ["ingest"]` and `field = "chunk_sise"`, finds the `[ingest]`
/// header then searches for the key after it, stopping at the next header.
/// An empty path searches the root table.
pub fn find_key_offset(content: &str, path: &[String], field: &str) -> Option<usize> {
    let search_start = match path.first() {
        None => 0,
        Some(section) => {
            let header = find_section_offset(content, section)?;
            header + content[header..].find('\n').map_or(content.len() - header, |n| n + 1)
        }
    };

    let mut offset = search_start;
    for line in content[search_start..].split_inclusive('\n') {
        let trimmed = line.trim_start();
        if trimmed.starts_with('[') {
            break;
        }
        if let Some(after) = trimmed.strip_prefix(field) {
            if after.starts_with([' ', '\t', '=']) {
                return Some(offset + line.len() - trimmed.len());
            }
        }
        offset += line.len();
    }

    None
}

/// Offset and length of the value assigned to `field`, with any trailing
/// comment and whitespace excluded.
pub fn find_value_span(content: &str, section: &[String], field: &str) -> Option<(usize, usize)> {
    let key = find_key_offset(content, section, field)?;
    let line_end = content[key..].find('\n').map_or(content.len(), |n| key + n);
    let eq = key + content[key..line_end].find('=')?;

    let raw = &content[eq + 1..line_end];
    let value_start = eq + 1 + (raw.len() - raw.trim_start().len());
    let value = content[value_start..line_end].trim_end();
    let value = match value.strip_prefix('"').and_then(|rest| rest.find('"')) {
        Some(close) => &value[..close + 2],
        None => value.split('#').next().unwrap_or(value).trim_end(),
    };
    (!value.is_empty()).then_some((value_start, value.len()))
}

/// Suggest a similar name using Jaro-Winkler string similarity.
///
/// Returns the best match above the similarity threshold, or `None` if
/// nothing is close enough.
pub fn suggest_key(unknown: &str, valid_keys: &[&str]) -> Option<String> {
    let mut best_score = SUGGESTION_THRESHOLD;
    let mut best_match = None;

    for &key in valid_keys {
        let score = strsim::jaro_winkler(unknown, key);
        if score > best_score {
            best_score = score;
            best_match = Some(key.to_string());
        }
    }

    best_match
}

/// Render a list of `ConfigError`s to stderr using miette's graphical handler.
pub fn render_errors(errors: &[ConfigError]) {
    use miette::GraphicalReportHandler;

    let handler = GraphicalReportHandler::new();
    for error in errors {
        let mut buf = String::new();
        let diagnostic: &dyn Diagnostic = error;
        if handler.render_report(&mut buf, diagnostic).is_ok() {
            eprint!("{buf}");
        } else {
            eprintln!("Error: {error}");
        }
    }
}
