//! Backend selection tests for the logger factory.

use logfacade_config::LoggerConfig;
use logfacade_infra::{BackendSelector, ConstructionError, build_logger};
use logfacade_shared::{ErrorCode, ErrorEnvelope};
use std::error::Error as _;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

fn temp_log_path(label: &str) -> std::io::Result<PathBuf> {
    let unique = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    let dir = std::env::temp_dir().join(format!("logfacade-infra-{label}-{unique}"));
    std::fs::create_dir_all(&dir)?;
    Ok(dir.join("app.log"))
}

fn file_config(path: &std::path::Path, json: bool) -> LoggerConfig {
    LoggerConfig {
        enable_console: false,
        enable_file: true,
        file_json_format: json,
        file_level: "debug".to_string(),
        file_location: path.to_string_lossy().to_string(),
        ..LoggerConfig::default()
    }
}

#[test]
fn structured_selection_writes_to_configured_file() {
    let path = temp_log_path("structured").expect("temp path");
    let logger = build_logger(&file_config(&path, true), BackendSelector::STRUCTURED)
        .expect("structured backend");

    logger.debug(&["cache".into(), "warm".into()]);
    logger.flush();

    let contents = std::fs::read_to_string(&path).expect("log file");
    let payload: serde_json::Value =
        serde_json::from_str(contents.trim()).expect("one json line");
    assert_eq!(payload["level"], "debug");
    assert_eq!(payload["message"], "cache warm");
}

#[test]
fn tracing_selection_writes_to_configured_file() {
    let path = temp_log_path("tracing").expect("temp path");
    let logger =
        build_logger(&file_config(&path, false), BackendSelector::TRACING).expect("tracing backend");

    logger.warnf(format_args!("retry {} of {}", 2, 3));

    let contents = std::fs::read_to_string(&path).expect("log file");
    assert!(contents.contains("WARN"));
    assert!(contents.contains("retry 2 of 3"));
}

#[test]
fn unknown_selector_is_rejected() {
    let error = build_logger(&LoggerConfig::default(), BackendSelector::from_id(99))
        .err()
        .expect("unsupported backend");
    assert!(matches!(
        error,
        ConstructionError::UnsupportedBackend { selector } if selector.id() == 99
    ));

    let envelope = ErrorEnvelope::from(error);
    assert_eq!(envelope.code, ErrorCode::new("logger", "unsupported_backend"));
    assert_eq!(
        envelope.metadata.get("backendId").map(String::as_str),
        Some("99")
    );
}

#[test]
fn unopenable_file_fails_construction_for_every_backend() {
    let config = LoggerConfig {
        enable_file: true,
        file_location: "/nonexistent-logfacade-dir/nested/app.log".to_string(),
        ..LoggerConfig::default()
    };

    for selector in [BackendSelector::STRUCTURED, BackendSelector::TRACING] {
        let error = build_logger(&config, selector)
            .err()
            .expect("construction should fail");
        assert_eq!(error.selector(), selector);
        assert!(matches!(
            error,
            ConstructionError::BackendConstructionFailed { .. }
        ));
        assert!(error.source().is_some());
    }
}

#[test]
fn invalid_level_fails_construction() {
    let config = LoggerConfig {
        console_level: "verbose".to_string(),
        ..LoggerConfig::default()
    };
    let error = build_logger(&config, BackendSelector::STRUCTURED)
        .err()
        .expect("construction should fail");
    assert!(error.to_string().contains("consoleLevel"));
}

#[test]
fn instances_do_not_track_later_config_changes() {
    let path = temp_log_path("detached").expect("temp path");
    let mut config = file_config(&path, false);
    let logger = build_logger(&config, BackendSelector::STRUCTURED).expect("structured backend");

    config.file_level = "error".to_string();
    config.file_location = "/nonexistent-logfacade-dir/other.log".to_string();
    logger.info(&["still here".into()]);

    let contents = std::fs::read_to_string(&path).expect("log file");
    assert!(contents.contains("still here"));
}
