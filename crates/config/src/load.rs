//! Config loading helpers.
//!
//! Reads a `LoggerConfig` from a JSON or TOML file and surfaces user-facing
//! errors as typed `ErrorEnvelope`s. Level validation is left to the backend.

use crate::schema::{LoggerConfig, parse_logger_config_json, parse_logger_config_toml};
use logfacade_shared::{ErrorClass, ErrorCode, ErrorEnvelope, Result};
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ConfigFormat {
    Json,
    Toml,
}

/// Load a logger config from a `.json` or `.toml` file.
pub fn load_logger_config_from_path(path: &Path) -> Result<LoggerConfig> {
    let format = detect_config_format(path)?;
    let text = read_config_file(path)?;
    let config = match format {
        ConfigFormat::Json => parse_logger_config_json(&text),
        ConfigFormat::Toml => parse_logger_config_toml(&text),
    }
    .map_err(|error| error.with_metadata("path", path.to_string_lossy().to_string()))?;

    tracing::debug!(path = %path.display(), ?format, "loaded logger config");
    Ok(config)
}

/// Serialize the config as deterministic pretty JSON (with trailing newline).
pub fn to_pretty_json(config: &LoggerConfig) -> Result<String> {
    let mut output = serde_json::to_string_pretty(config).map_err(|error| {
        ErrorEnvelope::unexpected(
            ErrorCode::internal(),
            format!("failed to serialize config: {error}"),
            ErrorClass::NonRetriable,
        )
    })?;
    output.push('\n');
    Ok(output)
}

/// Serialize the config as deterministic pretty TOML (with trailing newline).
pub fn to_pretty_toml(config: &LoggerConfig) -> Result<String> {
    let mut output = toml::to_string_pretty(config).map_err(|error| {
        ErrorEnvelope::unexpected(
            ErrorCode::new("config", "serialize_toml"),
            format!("failed to serialize config TOML: {error}"),
            ErrorClass::NonRetriable,
        )
    })?;
    output.push('\n');
    Ok(output)
}

fn read_config_file(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|error| {
        let code = match error.kind() {
            std::io::ErrorKind::NotFound => ErrorCode::new("config", "config_file_not_found"),
            std::io::ErrorKind::PermissionDenied => {
                ErrorCode::new("config", "config_file_permission_denied")
            },
            _ => ErrorCode::new("config", "config_file_io"),
        };

        let mut envelope =
            ErrorEnvelope::expected(code, format!("failed to read config file: {error}"))
                .with_metadata("path", path.to_string_lossy().to_string());
        envelope.class = ErrorClass::from_io_kind(error.kind());
        envelope
    })
}

fn detect_config_format(path: &Path) -> Result<ConfigFormat> {
    let ext = path
        .extension()
        .and_then(|value| value.to_str())
        .map(str::to_ascii_lowercase);
    match ext.as_deref() {
        None | Some("json") => Ok(ConfigFormat::Json),
        Some("toml") => Ok(ConfigFormat::Toml),
        Some(other) => Err(ErrorEnvelope::expected(
            ErrorCode::new("config", "unsupported_format"),
            "unsupported config format; use .json or .toml",
        )
        .with_metadata("extension", other.to_string())),
    }
}
