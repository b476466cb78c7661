//! # logfacade-ports
//!
//! The logger capability contract every backend implements.
//!
//! This crate defines the severity vocabulary, the variadic argument type,
//! structured fields, and the `LoggerPort` trait. It depends only on `shared`.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

/// Returns the ports crate version.
#[must_use]
pub const fn ports_crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

pub mod logger;
pub mod severity;
pub mod value;

pub use logger::*;
pub use severity::*;
pub use value::*;
