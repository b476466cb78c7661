//! # logfacade-testkit
//!
//! Test doubles for code that logs through `LoggerPort`.
//! This crate depends on `ports` and `adapters`.

pub mod in_memory;

pub use in_memory::{MemorySink, NoopLogger, RecordingLogger};

/// Returns the testkit crate version.
#[must_use]
pub const fn testkit_crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
