//! Severity levels shared by every backend and config field.

use logfacade_shared::{ErrorCode, ErrorEnvelope};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Canonical identifier for [`Severity::Debug`].
pub const DEBUG_LEVEL: &str = "debug";
/// Canonical identifier for [`Severity::Info`].
pub const INFO_LEVEL: &str = "info";
/// Canonical identifier for [`Severity::Warn`].
pub const WARN_LEVEL: &str = "warn";
/// Canonical identifier for [`Severity::Error`].
pub const ERROR_LEVEL: &str = "error";
/// Canonical identifier for [`Severity::Fatal`].
pub const FATAL_LEVEL: &str = "fatal";

/// Log severity, ordered by increasing urgency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Verbose diagnostics.
    Debug,
    /// Default level for normal operation.
    Info,
    /// Possible issues.
    #[serde(alias = "warning")]
    Warn,
    /// Failed operations.
    Error,
    /// Unrecoverable conditions; the process exits after logging.
    Fatal,
}

impl Severity {
    /// Every severity, least urgent first.
    pub const ALL: [Self; 5] = [
        Self::Debug,
        Self::Info,
        Self::Warn,
        Self::Error,
        Self::Fatal,
    ];

    /// Stable lowercase identifier.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Debug => DEBUG_LEVEL,
            Self::Info => INFO_LEVEL,
            Self::Warn => WARN_LEVEL,
            Self::Error => ERROR_LEVEL,
            Self::Fatal => FATAL_LEVEL,
        }
    }

    /// Returns true when a record at `self` passes a `min` threshold.
    #[must_use]
    pub fn passes(self, min: Self) -> bool {
        self >= min
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

impl FromStr for Severity {
    type Err = ParseSeverityError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let normalized = input.trim().to_ascii_lowercase();
        match normalized.as_str() {
            DEBUG_LEVEL => Ok(Self::Debug),
            INFO_LEVEL => Ok(Self::Info),
            WARN_LEVEL | "warning" => Ok(Self::Warn),
            ERROR_LEVEL => Ok(Self::Error),
            FATAL_LEVEL => Ok(Self::Fatal),
            _ => Err(ParseSeverityError {
                input: input.to_string(),
            }),
        }
    }
}

/// A level string did not name a known severity.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown log level: {input:?} (expected one of debug, info, warn, error, fatal)")]
pub struct ParseSeverityError {
    /// The rejected input.
    pub input: String,
}

impl From<ParseSeverityError> for ErrorEnvelope {
    fn from(error: ParseSeverityError) -> Self {
        let input = error.input.clone();
        Self::expected(ErrorCode::new("logger", "invalid_level"), error.to_string())
            .with_metadata("level", input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn severities_are_ordered_by_urgency() {
        assert!(Severity::Debug < Severity::Info);
        assert!(Severity::Info < Severity::Warn);
        assert!(Severity::Warn < Severity::Error);
        assert!(Severity::Error < Severity::Fatal);
        assert!(Severity::Warn.passes(Severity::Warn));
        assert!(!Severity::Info.passes(Severity::Warn));
    }

    #[test]
    fn parse_is_case_insensitive_and_accepts_warning() {
        assert_eq!(" INFO ".parse::<Severity>(), Ok(Severity::Info));
        assert_eq!("Warning".parse::<Severity>(), Ok(Severity::Warn));
        assert_eq!("fatal".parse::<Severity>(), Ok(Severity::Fatal));
    }

    #[test]
    fn parse_rejects_unknown_levels() {
        let error = "verbose".parse::<Severity>().err();
        assert_eq!(
            error,
            Some(ParseSeverityError {
                input: "verbose".to_string()
            })
        );

        let envelope = ErrorEnvelope::from(ParseSeverityError {
            input: "panic".to_string(),
        });
        assert_eq!(envelope.code, ErrorCode::new("logger", "invalid_level"));
        assert_eq!(envelope.metadata.get("level").map(String::as_str), Some("panic"));
    }

    #[test]
    fn identifiers_are_stable() {
        let names: Vec<&str> = Severity::ALL.iter().map(|level| level.as_str()).collect();
        assert_eq!(names, ["debug", "info", "warn", "error", "fatal"]);
        for level in Severity::ALL {
            assert_eq!(level.to_string().parse::<Severity>(), Ok(level));
        }
    }

    #[test]
    fn serde_uses_lowercase_identifiers() -> Result<(), serde_json::Error> {
        assert_eq!(serde_json::to_string(&Severity::Error)?, "\"error\"");
        let parsed: Severity = serde_json::from_str("\"warning\"")?;
        assert_eq!(parsed, Severity::Warn);
        Ok(())
    }
}
