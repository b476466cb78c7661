//! # logfacade-config
//!
//! Logger configuration schema, resolution, and file loading.
//! This crate depends on `ports` and `shared` only.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

/// Config loading helpers (JSON / TOML files).
pub mod load;
/// Configuration schema types and helpers.
pub mod schema;

pub use load::{load_logger_config_from_path, to_pretty_json, to_pretty_toml};
pub use schema::{
    ConfigSchemaError, FileSinkSettings, LoggerConfig, ResolvedLoggerConfig, SinkFormat,
    SinkSettings, parse_logger_config_json, parse_logger_config_toml,
};

/// Returns the config crate version.
#[must_use]
pub const fn config_crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
