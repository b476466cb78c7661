//! # logfacade-adapters
//!
//! Logging backends implementing `LoggerPort`: a structured line logger with
//! per-sink levels, and a backend forwarding to `tracing`.
//! This crate depends on `ports`, `config`, and `shared`.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

pub mod encoding;
pub mod log_sink;
pub mod structured;
pub mod tracing_logger;

pub use log_sink::{FileLogSink, LogSink, StderrLogSink};
pub use structured::StructuredLogger;
pub use tracing_logger::TracingLogger;

use logfacade_config::ConfigSchemaError;
use logfacade_shared::{ErrorClass, ErrorCode, ErrorEnvelope};
use std::io;
use std::path::PathBuf;

/// Failure while building a backend from a config.
#[derive(Debug, thiserror::Error)]
pub enum BackendBuildError {
    /// The config did not validate.
    #[error(transparent)]
    Config(#[from] ConfigSchemaError),
    /// The log file could not be opened for appending.
    #[error("failed to open log file {}: {source}", .path.display())]
    OpenFile {
        /// Configured location.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },
}

impl From<BackendBuildError> for ErrorEnvelope {
    fn from(error: BackendBuildError) -> Self {
        match error {
            BackendBuildError::Config(inner) => inner.into(),
            BackendBuildError::OpenFile { path, source } => {
                let kind = source.kind();
                let mut envelope =
                    Self::expected(ErrorCode::from_io_kind(kind), format!("failed to open log file: {source}"))
                        .with_metadata("path", path.to_string_lossy().to_string());
                envelope.class = ErrorClass::from_io_kind(kind);
                envelope
            },
        }
    }
}

/// Returns the adapters crate version.
#[must_use]
pub const fn adapters_crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
