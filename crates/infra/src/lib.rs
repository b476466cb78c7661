//! # logfacade-infra
//!
//! Backend selection: maps a `BackendSelector` to a constructor and builds
//! fresh `LoggerPort` instances from a `LoggerConfig`.
//! This crate depends on `adapters`, `config`, `ports`, and `shared`.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

/// Backend registry and construction.
pub mod logger_factory;

pub use logger_factory::{
    BackendConstructor, BackendRegistry, BackendSelector, BoxError, ConstructionError,
    ParseSelectorError, build_logger,
};

/// Returns the infra crate version.
#[must_use]
pub const fn infra_crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
