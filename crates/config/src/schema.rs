//! Logger configuration schema and resolution.
//!
//! `LoggerConfig` is a plain value holder. Backends call
//! [`LoggerConfig::resolve`] at construction time to get an owned, typed copy
//! of the settings they need; nothing keeps a reference to the original.

use logfacade_ports::{ParseSeverityError, Severity};
use logfacade_shared::{ErrorCode, ErrorEnvelope};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// How each sink should behave.
///
/// Some backends only support one level across all sinks; those use the
/// console level and document it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields, default)]
pub struct LoggerConfig {
    /// Write records to the console (stderr).
    pub enable_console: bool,
    /// JSON lines on the console instead of human-readable text.
    pub console_json_format: bool,
    /// Minimum severity for the console.
    pub console_level: String,
    /// Write records to `file_location`.
    pub enable_file: bool,
    /// JSON lines in the file instead of human-readable text.
    pub file_json_format: bool,
    /// Minimum severity for the file.
    pub file_level: String,
    /// Path of the log file; opened in append mode.
    pub file_location: String,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            enable_console: true,
            console_json_format: false,
            console_level: Severity::Info.as_str().to_string(),
            enable_file: false,
            file_json_format: true,
            file_level: Severity::Info.as_str().to_string(),
            file_location: String::new(),
        }
    }
}

impl LoggerConfig {
    /// Validate and extract owned sink settings.
    ///
    /// Only enabled sinks are checked; a disabled sink's level and path are
    /// ignored.
    pub fn resolve(&self) -> Result<ResolvedLoggerConfig, ConfigSchemaError> {
        let console = if self.enable_console {
            Some(SinkSettings {
                format: SinkFormat::from_json_flag(self.console_json_format),
                level: parse_level("consoleLevel", &self.console_level)?,
            })
        } else {
            None
        };

        let file = if self.enable_file {
            let location = self.file_location.trim();
            if location.is_empty() {
                return Err(ConfigSchemaError::MissingFileLocation);
            }
            Some(FileSinkSettings {
                path: PathBuf::from(location),
                sink: SinkSettings {
                    format: SinkFormat::from_json_flag(self.file_json_format),
                    level: parse_level("fileLevel", &self.file_level)?,
                },
            })
        } else {
            None
        };

        Ok(ResolvedLoggerConfig { console, file })
    }
}

fn parse_level(field: &'static str, value: &str) -> Result<Severity, ConfigSchemaError> {
    value
        .parse()
        .map_err(|error: ParseSeverityError| ConfigSchemaError::InvalidLevel {
            field,
            value: error.input,
        })
}

/// Record encoding for a sink.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SinkFormat {
    /// One JSON object per line.
    Json,
    /// Human-readable `key=value` text.
    Text,
}

impl SinkFormat {
    const fn from_json_flag(json: bool) -> Self {
        if json { Self::Json } else { Self::Text }
    }
}

/// Typed settings for one sink.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SinkSettings {
    /// Encoding.
    pub format: SinkFormat,
    /// Minimum severity.
    pub level: Severity,
}

/// Typed settings for the file sink.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileSinkSettings {
    /// Destination path.
    pub path: PathBuf,
    /// Encoding and level.
    pub sink: SinkSettings,
}

/// Owned, validated copy of a [`LoggerConfig`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedLoggerConfig {
    /// Console sink, when enabled.
    pub console: Option<SinkSettings>,
    /// File sink, when enabled.
    pub file: Option<FileSinkSettings>,
}

impl ResolvedLoggerConfig {
    /// The single level for backends that cannot filter per sink.
    ///
    /// The console level wins when the console is enabled; otherwise the file
    /// level is used. With no sinks enabled this is `Severity::Fatal`.
    #[must_use]
    pub fn single_level(&self) -> Severity {
        self.console
            .map(|console| console.level)
            .or_else(|| self.file.as_ref().map(|file| file.sink.level))
            .unwrap_or(Severity::Fatal)
    }
}

/// Parse a logger config from a JSON string.
pub fn parse_logger_config_json(input: &str) -> Result<LoggerConfig, ErrorEnvelope> {
    serde_json::from_str(input).map_err(|error| {
        ErrorEnvelope::expected(
            ErrorCode::new("config", "invalid_json"),
            format!("invalid config JSON: {error}"),
        )
    })
}

/// Parse a logger config from a TOML string.
pub fn parse_logger_config_toml(input: &str) -> Result<LoggerConfig, ErrorEnvelope> {
    toml::from_str(input).map_err(|error| {
        ErrorEnvelope::expected(
            ErrorCode::new("config", "invalid_toml"),
            format!("invalid config TOML: {error}"),
        )
    })
}

/// Typed validation errors for the logger configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSchemaError {
    /// A level field does not name a known severity.
    InvalidLevel {
        /// Field name in the config (e.g. `consoleLevel`).
        field: &'static str,
        /// Value provided.
        value: String,
    },
    /// The file sink is enabled without a location.
    MissingFileLocation,
}

impl ConfigSchemaError {
    fn error_code(&self) -> ErrorCode {
        match self {
            Self::InvalidLevel { .. } => ErrorCode::new("config", "invalid_level"),
            Self::MissingFileLocation => ErrorCode::new("config", "missing_file_location"),
        }
    }
}

impl fmt::Display for ConfigSchemaError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidLevel { field, value } => write!(
                formatter,
                "{field} must be one of debug, info, warn, error, fatal (got {value:?})"
            ),
            Self::MissingFileLocation => {
                formatter.write_str("fileLocation is required when enableFile is true")
            },
        }
    }
}

impl std::error::Error for ConfigSchemaError {}

impl From<ConfigSchemaError> for ErrorEnvelope {
    fn from(error: ConfigSchemaError) -> Self {
        let code = error.error_code();
        let message = error.to_string();
        let envelope = Self::expected(code, message);

        match error {
            ConfigSchemaError::InvalidLevel { field, value } => envelope
                .with_metadata("field", field)
                .with_metadata("value", value),
            ConfigSchemaError::MissingFileLocation => {
                envelope.with_metadata("field", "fileLocation")
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_enables_console_at_info() -> Result<(), ConfigSchemaError> {
        let resolved = LoggerConfig::default().resolve()?;
        assert_eq!(
            resolved.console,
            Some(SinkSettings {
                format: SinkFormat::Text,
                level: Severity::Info,
            })
        );
        assert_eq!(resolved.file, None);
        Ok(())
    }

    #[test]
    fn invalid_console_level_is_rejected() {
        let config = LoggerConfig {
            console_level: "loud".to_string(),
            ..LoggerConfig::default()
        };
        assert_eq!(
            config.resolve(),
            Err(ConfigSchemaError::InvalidLevel {
                field: "consoleLevel",
                value: "loud".to_string(),
            })
        );
    }

    #[test]
    fn disabled_sinks_are_not_validated() -> Result<(), ConfigSchemaError> {
        let config = LoggerConfig {
            enable_console: false,
            console_level: String::new(),
            enable_file: false,
            file_level: "nonsense".to_string(),
            ..LoggerConfig::default()
        };
        let resolved = config.resolve()?;
        assert!(resolved.console.is_none());
        assert!(resolved.file.is_none());
        assert_eq!(resolved.single_level(), Severity::Fatal);
        Ok(())
    }

    #[test]
    fn file_sink_requires_location() {
        let config = LoggerConfig {
            enable_file: true,
            file_location: "   ".to_string(),
            ..LoggerConfig::default()
        };
        let error = config.resolve().err();
        assert_eq!(error, Some(ConfigSchemaError::MissingFileLocation));

        let envelope = ErrorEnvelope::from(ConfigSchemaError::MissingFileLocation);
        assert_eq!(envelope.code, ErrorCode::new("config", "missing_file_location"));
    }

    #[test]
    fn console_level_takes_precedence_for_single_level_backends() -> Result<(), ConfigSchemaError>
    {
        let config = LoggerConfig {
            console_level: "warn".to_string(),
            enable_file: true,
            file_level: "debug".to_string(),
            file_location: "app.log".to_string(),
            ..LoggerConfig::default()
        };
        let resolved = config.resolve()?;
        assert_eq!(resolved.single_level(), Severity::Warn);

        let file_only = LoggerConfig {
            enable_console: false,
            ..config
        }
        .resolve()?;
        assert_eq!(file_only.single_level(), Severity::Debug);
        Ok(())
    }

    #[test]
    fn json_uses_camel_case_keys() -> Result<(), ErrorEnvelope> {
        let config = parse_logger_config_json(
            r#"{"enableConsole":false,"enableFile":true,"fileLevel":"error","fileLocation":"/tmp/x.log"}"#,
        )?;
        assert!(!config.enable_console);
        assert!(config.enable_file);
        assert_eq!(config.file_level, "error");
        assert_eq!(config.console_level, "info");

        let error = parse_logger_config_json(r#"{"consoleColour":true}"#).err();
        assert_eq!(
            error.map(|error| error.code),
            Some(ErrorCode::new("config", "invalid_json"))
        );
        Ok(())
    }
}
