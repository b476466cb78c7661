//! Logger backend selection and construction.
//!
//! The registry maps a [`BackendSelector`] to a constructor. Adding a backend
//! means registering one more entry; the `LoggerPort` contract and the slot
//! logic stay untouched.

use logfacade_adapters::{StructuredLogger, TracingLogger};
use logfacade_config::LoggerConfig;
use logfacade_ports::LoggerPort;
use logfacade_shared::{ErrorCode, ErrorEnvelope};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// Error type returned by backend constructors.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Backend constructor. Must not keep a reference to the config.
pub type BackendConstructor = fn(&LoggerConfig) -> Result<Arc<dyn LoggerPort>, BoxError>;

/// Tag naming a logging backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BackendSelector(u8);

impl BackendSelector {
    /// Reserved id; never registered.
    pub const UNSET: Self = Self(0);
    /// Structured console/file backend (the default).
    pub const STRUCTURED: Self = Self(1);
    /// Backend forwarding to a private `tracing` dispatcher.
    pub const TRACING: Self = Self(2);

    /// Selector from a raw id. Ids without a registered backend are accepted
    /// here and rejected at construction time.
    #[must_use]
    pub const fn from_id(id: u8) -> Self {
        Self(id)
    }

    /// Raw id.
    #[must_use]
    pub const fn id(self) -> u8 {
        self.0
    }

    /// Canonical name for the built-in selectors.
    #[must_use]
    pub const fn name(self) -> Option<&'static str> {
        match self.0 {
            1 => Some("structured"),
            2 => Some("tracing"),
            _ => None,
        }
    }
}

impl Default for BackendSelector {
    fn default() -> Self {
        Self::STRUCTURED
    }
}

impl fmt::Display for BackendSelector {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => formatter.write_str(name),
            None => write!(formatter, "backend#{}", self.0),
        }
    }
}

/// A backend name that did not parse.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown logger backend {input:?}; expected structured, tracing, or a numeric id")]
pub struct ParseSelectorError {
    /// The rejected input.
    pub input: String,
}

impl FromStr for BackendSelector {
    type Err = ParseSelectorError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let raw = value.trim();
        let normalized = raw.to_ascii_lowercase();
        match normalized.as_str() {
            "structured" | "logrus" | "default" => Ok(Self::STRUCTURED),
            "tracing" => Ok(Self::TRACING),
            other => other.parse::<u8>().map(Self).map_err(|_| ParseSelectorError {
                input: raw.to_string(),
            }),
        }
    }
}

impl Serialize for BackendSelector {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.name() {
            Some(name) => serializer.serialize_str(name),
            None => serializer.serialize_u8(self.0),
        }
    }
}

impl<'de> Deserialize<'de> for BackendSelector {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Id(u8),
            Name(String),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Id(id) => Ok(Self(id)),
            Raw::Name(name) => name.parse().map_err(serde::de::Error::custom),
        }
    }
}

/// Backend construction failures.
#[derive(Debug, thiserror::Error)]
pub enum ConstructionError {
    /// No constructor is registered for the selector.
    #[error("unsupported logger backend: {selector}")]
    UnsupportedBackend {
        /// The requested selector.
        selector: BackendSelector,
    },
    /// The backend constructor failed.
    #[error("failed to construct logger backend {selector}: {source}")]
    BackendConstructionFailed {
        /// The requested selector.
        selector: BackendSelector,
        /// Constructor error.
        #[source]
        source: BoxError,
    },
}

impl ConstructionError {
    /// The selector that was requested.
    #[must_use]
    pub const fn selector(&self) -> BackendSelector {
        match self {
            Self::UnsupportedBackend { selector }
            | Self::BackendConstructionFailed { selector, .. } => *selector,
        }
    }

    fn error_code(&self) -> ErrorCode {
        match self {
            Self::UnsupportedBackend { .. } => ErrorCode::new("logger", "unsupported_backend"),
            Self::BackendConstructionFailed { .. } => {
                ErrorCode::new("logger", "backend_construction_failed")
            },
        }
    }
}

impl From<ConstructionError> for ErrorEnvelope {
    fn from(error: ConstructionError) -> Self {
        let code = error.error_code();
        let selector = error.selector();
        Self::expected(code, error.to_string())
            .with_metadata("backend", selector.to_string())
            .with_metadata("backendId", selector.id().to_string())
    }
}

/// Selector to constructor table.
#[derive(Debug, Clone, Default)]
pub struct BackendRegistry {
    constructors: BTreeMap<BackendSelector, BackendConstructor>,
}

impl BackendRegistry {
    /// Registry with no backends.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Registry with the built-in backends.
    #[must_use]
    pub fn builtin() -> Self {
        Self::empty()
            .with(BackendSelector::STRUCTURED, build_structured)
            .with(BackendSelector::TRACING, build_tracing)
    }

    /// Add or replace the constructor for `selector`.
    pub fn register(&mut self, selector: BackendSelector, constructor: BackendConstructor) {
        if self.constructors.insert(selector, constructor).is_some() {
            tracing::debug!(%selector, "replaced logger backend constructor");
        }
    }

    /// Builder form of [`register`](Self::register).
    #[must_use]
    pub fn with(mut self, selector: BackendSelector, constructor: BackendConstructor) -> Self {
        self.register(selector, constructor);
        self
    }

    /// Whether `selector` has a constructor.
    #[must_use]
    pub fn contains(&self, selector: BackendSelector) -> bool {
        self.constructors.contains_key(&selector)
    }

    /// Registered selectors in id order.
    pub fn selectors(&self) -> impl Iterator<Item = BackendSelector> + '_ {
        self.constructors.keys().copied()
    }

    /// Build a fresh backend instance.
    pub fn construct(
        &self,
        config: &LoggerConfig,
        selector: BackendSelector,
    ) -> Result<Arc<dyn LoggerPort>, ConstructionError> {
        let Some(constructor) = self.constructors.get(&selector) else {
            tracing::debug!(%selector, "no logger backend registered");
            return Err(ConstructionError::UnsupportedBackend { selector });
        };

        let logger = constructor(config)
            .map_err(|source| ConstructionError::BackendConstructionFailed { selector, source })?;
        tracing::debug!(%selector, "constructed logger backend");
        Ok(logger)
    }
}

/// Build a backend from the built-in registry.
pub fn build_logger(
    config: &LoggerConfig,
    selector: BackendSelector,
) -> Result<Arc<dyn LoggerPort>, ConstructionError> {
    BackendRegistry::builtin().construct(config, selector)
}

fn build_structured(config: &LoggerConfig) -> Result<Arc<dyn LoggerPort>, BoxError> {
    Ok(Arc::new(StructuredLogger::from_config(config)?))
}

fn build_tracing(config: &LoggerConfig) -> Result<Arc<dyn LoggerPort>, BoxError> {
    Ok(Arc::new(TracingLogger::from_config(config)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use logfacade_ports::{Fields, LogRecord};

    struct Silent;

    impl LoggerPort for Silent {
        fn log(&self, _record: LogRecord) {}

        fn with_fields(&self, _fields: Fields) -> Box<dyn LoggerPort> {
            Box::new(Self)
        }
    }

    fn build_silent(_config: &LoggerConfig) -> Result<Arc<dyn LoggerPort>, BoxError> {
        Ok(Arc::new(Silent))
    }

    #[test]
    fn selector_names_parse() {
        assert_eq!("structured".parse(), Ok(BackendSelector::STRUCTURED));
        assert_eq!(" Logrus ".parse(), Ok(BackendSelector::STRUCTURED));
        assert_eq!("default".parse(), Ok(BackendSelector::STRUCTURED));
        assert_eq!("TRACING".parse(), Ok(BackendSelector::TRACING));
        assert_eq!("9".parse(), Ok(BackendSelector::from_id(9)));
        assert_eq!(
            "syslog".parse::<BackendSelector>(),
            Err(ParseSelectorError {
                input: "syslog".to_string()
            })
        );
    }

    #[test]
    fn selector_serde_uses_names_when_known() -> Result<(), serde_json::Error> {
        assert_eq!(serde_json::to_string(&BackendSelector::TRACING)?, "\"tracing\"");
        assert_eq!(serde_json::to_string(&BackendSelector::from_id(7))?, "7");
        let parsed: BackendSelector = serde_json::from_str("\"logrus\"")?;
        assert_eq!(parsed, BackendSelector::STRUCTURED);
        let parsed: BackendSelector = serde_json::from_str("2")?;
        assert_eq!(parsed, BackendSelector::TRACING);
        Ok(())
    }

    #[test]
    fn default_selector_is_structured() {
        assert_eq!(BackendSelector::default(), BackendSelector::STRUCTURED);
        assert_eq!(BackendSelector::default().id(), 1);
    }

    #[test]
    fn reserved_selector_is_unsupported() {
        let registry = BackendRegistry::builtin();
        assert!(!registry.contains(BackendSelector::UNSET));

        let error = registry
            .construct(&LoggerConfig::default(), BackendSelector::UNSET)
            .err();
        assert!(matches!(
            error,
            Some(ConstructionError::UnsupportedBackend {
                selector: BackendSelector::UNSET
            })
        ));
    }

    #[test]
    fn registering_adds_a_backend() {
        let custom = BackendSelector::from_id(42);
        let mut registry = BackendRegistry::builtin();
        assert!(registry.construct(&LoggerConfig::default(), custom).is_err());

        registry.register(custom, build_silent);
        assert!(registry.construct(&LoggerConfig::default(), custom).is_ok());
        assert_eq!(
            registry.selectors().collect::<Vec<_>>(),
            vec![BackendSelector::STRUCTURED, BackendSelector::TRACING, custom]
        );
    }

    #[test]
    fn construction_errors_map_to_envelope_codes() {
        let envelope = ErrorEnvelope::from(ConstructionError::UnsupportedBackend {
            selector: BackendSelector::from_id(9),
        });
        assert_eq!(envelope.code, ErrorCode::new("logger", "unsupported_backend"));
        assert!(envelope.message.contains("backend#9"));
    }
}
