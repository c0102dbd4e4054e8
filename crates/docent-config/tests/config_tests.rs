// SPDX-FileCopyrightText: 2026 Docent Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Integration tests for the Docent configuration system.

use docent_config::diagnostic::{ConfigError, suggest_key};
use docent_config::model::DocentConfig;
use docent_config::{load_and_validate_path, load_and_validate_str, load_config_from_str};

/// Valid TOML with all known fields deserializes successfully.
#[test]
fn valid_toml_deserializes_into_docent_config() {
    let toml = r#"
[server]
host = "127.0.0.1"
port = 9000
log_level = "debug"
max_upload_bytes = 1048576

[gemini]
api_key = "AIza-test"
chat_model = "gemini-2.5-flash"
embedding_model = "models/embedding-001"
base_url = "http://localhost:8080/v1beta"
timeout_secs = 30
max_retries = 2
max_output_tokens = 512

[storage]
pdf_folder = "/srv/pdfs"
persist_dir = "/srv/index"

[ingest]
chunk_size = 800
chunk_overlap = 150
embed_batch_size = 50

[retrieval]
faq_k = 4
summarize_k = 3
"#;

    let config = load_config_from_str(toml).expect("valid TOML should deserialize");
    assert_eq!(config.server.host, "127.0.0.1");
    assert_eq!(config.server.port, 9000);
    assert_eq!(config.server.log_level, "debug");
    assert_eq!(config.server.max_upload_bytes, 1_048_576);
    assert_eq!(config.gemini.api_key.as_deref(), Some("AIza-test"));
    assert_eq!(config.gemini.chat_model, "gemini-2.5-flash");
    assert_eq!(config.gemini.embedding_model, "models/embedding-001");
    assert_eq!(config.gemini.base_url, "http://localhost:8080/v1beta");
    assert_eq!(config.gemini.timeout_secs, 30);
    assert_eq!(config.gemini.max_retries, 2);
    assert_eq!(config.gemini.max_output_tokens, 512);
    assert_eq!(config.storage.pdf_folder, "/srv/pdfs");
    assert_eq!(config.storage.persist_dir, "/srv/index");
    assert_eq!(config.ingest.chunk_size, 800);
    assert_eq!(config.ingest.chunk_overlap, 150);
    assert_eq!(config.ingest.embed_batch_size, 50);
    assert_eq!(config.retrieval.faq_k, 4);
    assert_eq!(config.retrieval.summarize_k, 3);
}

/// Unknown field in a section produces an UnknownField error.
#[test]
fn unknown_field_in_ingest_produces_error() {
    let toml = r#"
[ingest]
chunk_sise = 400
"#;

    let err = load_config_from_str(toml).expect_err("unknown field should be rejected");
    let err_str = format!("{err}");
    assert!(
        err_str.contains("chunk_sise"),
        "error should mention the unknown key, got: {err_str}"
    );
}

/// Unexpected top-level section is rejected by deny_unknown_fields.
#[test]
fn deny_unknown_fields_at_top_level() {
    let toml = r#"
[logging]
level = "debug"
"#;

    let err = load_config_from_str(toml).expect_err("unknown top-level section should be rejected");
    let err_str = format!("{err}");
    assert!(
        err_str.contains("unknown field") || err_str.contains("logging"),
        "error should mention unknown field, got: {err_str}"
    );
}

/// Serialized defaults provide sensible values for all fields.
#[test]
fn serialized_defaults_are_sensible() {
    let config = DocentConfig::default();

    assert_eq!(config.server.host, "0.0.0.0");
    assert_eq!(config.server.port, 8000);
    assert_eq!(config.server.log_level, "info");
    assert!(config.gemini.api_key.is_none());
    assert_eq!(config.gemini.chat_model, "gemini-2.0-flash");
    assert_eq!(config.gemini.embedding_model, "gemini-embedding-001");
    assert_eq!(config.storage.pdf_folder, "pdf_data");
    assert_eq!(config.storage.persist_dir, "vector_store");
}

/// Missing config files are silently skipped (Figment's Toml::file() behavior).
#[test]
fn missing_config_files_silently_skipped() {
    use figment::{
        Figment,
        providers::{Format, Serialized, Toml},
    };

    let config: DocentConfig = Figment::new()
        .merge(Serialized::defaults(DocentConfig::default()))
        .merge(Toml::file("/nonexistent/path/docent.toml"))
        .extract()
        .expect("missing file should be silently skipped");

    assert_eq!(config.ingest.chunk_size, 500);
}

/// Dotted overrides land on the right nested key.
#[test]
fn dotted_override_sets_nested_key() {
    use figment::{Figment, providers::Serialized};

    let config: DocentConfig = Figment::new()
        .merge(Serialized::defaults(DocentConfig::default()))
        .merge(("retrieval.summarize_k", 9))
        .extract()
        .expect("should set summarize_k via dot notation");

    assert_eq!(config.retrieval.summarize_k, 9);
    assert_eq!(config.retrieval.faq_k, 5);
}

#[test]
fn diagnostic_chunk_sise_suggests_chunk_size() {
    let valid_keys = &["chunk_size", "chunk_overlap", "embed_batch_size"];
    let suggestion = suggest_key("chunk_sise", valid_keys);
    assert_eq!(suggestion, Some("chunk_size".to_string()));
}

/// Error output from load_and_validate_str includes the unknown key, a
/// suggestion, and the valid keys for the section.
#[test]
fn diagnostic_error_includes_unknown_key_and_suggestion() {
    let toml = r#"
[retrieval]
fak_k = 3
"#;

    let errors = load_and_validate_str(toml).expect_err("should produce errors");
    let found = errors.iter().any(|e| {
        matches!(e, ConfigError::UnknownKey { key, suggestion, valid_keys, .. } if {
            key == "fak_k"
                && suggestion.as_deref() == Some("faq_k")
                && valid_keys.contains("summarize_k")
        })
    });
    assert!(found, "expected UnknownKey for 'fak_k', got: {errors:?}");
}

/// Unknown keys are reported even when no source file is involved.
#[test]
fn diagnostic_unknown_key_in_inline_source() {
    let toml = "[storage]\npdf_folderr = \"x\"\n";
    let errors = load_and_validate_str(toml).expect_err("should produce errors");
    let has_key = errors
        .iter()
        .any(|e| matches!(e, ConfigError::UnknownKey { key, .. } if key == "pdf_folderr"));
    assert!(has_key, "got: {errors:?}");
}

/// A misspelled table name is reported as a section, with the sections
/// Docent reads listed in the help.
#[test]
fn diagnostic_unknown_section_lists_docent_sections() {
    use miette::Diagnostic;

    let toml = "[retreival]\nfaq_k = 3\n";
    let errors = load_and_validate_str(toml).expect_err("unknown section should fail");
    let error = errors
        .iter()
        .find(|e| matches!(e, ConfigError::UnknownSection { .. }))
        .unwrap_or_else(|| panic!("expected UnknownSection, got: {errors:?}"));

    match error {
        ConfigError::UnknownSection {
            section,
            suggestion,
            span,
            ..
        } => {
            assert_eq!(section, "retreival");
            assert_eq!(suggestion.as_deref(), Some("retrieval"));
            let span = span.as_ref().expect("span into the inline source");
            assert_eq!(span.offset(), 0);
            assert_eq!(span.len(), "[retreival]".len());
        }
        _ => unreachable!(),
    }
    let help = error.help().expect("help").to_string();
    for section in ["[server]", "[gemini]", "[storage]", "[ingest]", "[retrieval]"] {
        assert!(help.contains(section), "help should list {section}: {help}");
    }
}

/// Unknown keys name their section and point at the key.
#[test]
fn diagnostic_unknown_key_names_section_and_span() {
    let toml = "[server]\nport = 8000\n\n[ingest]\nchunk_sise = 10\n";
    let errors = load_and_validate_str(toml).expect_err("should fail");
    let found = errors.iter().any(|e| match e {
        ConfigError::UnknownKey {
            key, section, span: Some(span), ..
        } => {
            key == "chunk_sise"
                && section == "ingest"
                && &toml[span.offset()..span.offset() + span.len()] == "chunk_sise"
        }
        _ => false,
    });
    assert!(found, "got: {errors:?}");
}

/// A wrongly typed value is reported with its dotted key and a span over
/// the value itself.
#[test]
fn diagnostic_invalid_type_points_at_value() {
    let toml = "[server]\nhost = \"0.0.0.0\"\nport = \"eighty\"\n";
    let errors = load_and_validate_str(toml).expect_err("should reject invalid type");
    let found = errors.iter().any(|e| match e {
        ConfigError::InvalidType {
            key, span: Some(span), ..
        } => {
            key == "server.port"
                && &toml[span.offset()..span.offset() + span.len()] == "\"eighty\""
        }
        _ => false,
    });
    assert!(found, "got: {errors:?}");
}

/// Invalid type (string where number expected) produces clear message.
#[test]
fn diagnostic_invalid_type_message() {
    let toml = r#"
[server]
port = "eighty"
"#;

    let err = load_config_from_str(toml).expect_err("should reject invalid type");
    let err_str = format!("{err}");
    assert!(
        err_str.contains("invalid type") || err_str.contains("port"),
        "error should mention type mismatch, got: {err_str}"
    );
}

/// ConfigError implements miette::Diagnostic with a code and help.
#[test]
fn config_error_implements_diagnostic() {
    use miette::Diagnostic;

    let error = ConfigError::UnknownKey {
        key: "fak_k".to_string(),
        section: "retrieval".to_string(),
        suggestion: Some("faq_k".to_string()),
        valid_keys: "faq_k, summarize_k".to_string(),
        span: None,
        src: None,
    };

    let code = error.code().expect("should have diagnostic code").to_string();
    assert_eq!(code, "docent::config::unknown_key");

    let help = error.help().expect("should have help text").to_string();
    assert!(
        help.contains("did you mean `faq_k`"),
        "help should contain suggestion, got: {help}"
    );
}

/// ConfigError can be rendered using miette's graphical handler.
#[test]
fn config_error_renders_with_miette() {
    use miette::GraphicalReportHandler;

    let error = ConfigError::Validation {
        message: "ingest.chunk_overlap (600) must be less than ingest.chunk_size (500)".into(),
    };

    let handler = GraphicalReportHandler::new();
    let mut buf = String::new();
    handler
        .render_report(&mut buf, &error)
        .expect("should render without error");
    assert!(buf.contains("chunk_overlap"));
}

#[test]
fn load_and_validate_valid_toml() {
    let toml = r#"
[ingest]
chunk_size = 1000
chunk_overlap = 200
"#;

    let config = load_and_validate_str(toml).expect("valid TOML should validate");
    assert_eq!(config.ingest.chunk_size, 1000);
}

/// Overlap not smaller than size is caught after deserialization.
#[test]
fn validation_catches_overlap_not_below_size() {
    let toml = r#"
[ingest]
chunk_size = 100
chunk_overlap = 200
"#;

    let errors = load_and_validate_str(toml).expect_err("overlap >= size should fail");
    assert!(errors.iter().any(|e| {
        matches!(e, ConfigError::Validation { message } if message.contains("chunk_overlap"))
    }));
}

#[test]
fn load_and_validate_path_reads_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("custom.toml");
    std::fs::write(&path, "[storage]\npersist_dir = \"/data/index\"\n").expect("write");

    let config = load_and_validate_path(&path).expect("file should validate");
    assert_eq!(config.storage.persist_dir, "/data/index");
}

#[test]
fn load_and_validate_path_missing_file_is_error() {
    let errors = load_and_validate_path(std::path::Path::new("/nonexistent/docent.toml"))
        .expect_err("missing explicit config should fail");
    assert!(matches!(&errors[0], ConfigError::Other(msg) if msg.contains("does not exist")));
}

#[test]
fn load_and_validate_path_reports_unknown_key() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("docent.toml");
    std::fs::write(&path, "[ingest]\nchunk_sise = 10\n").expect("write");

    let errors = load_and_validate_path(&path).expect_err("unknown key should fail");
    assert!(errors.iter().any(|e| matches!(
        e,
        ConfigError::UnknownKey { key, suggestion, .. }
            if key == "chunk_sise" && suggestion.as_deref() == Some("chunk_size")
    )));
}
