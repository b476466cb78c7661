//! # logfacade
//!
//! A logging facade: code logs through a stable interface while the backend
//! is chosen at startup from a [`LoggerConfig`] and a [`BackendSelector`].
//!
//! ```no_run
//! use logfacade::{BackendSelector, LoggerConfig};
//!
//! # fn main() -> Result<(), logfacade::ConstructionError> {
//! logfacade::initialize(&LoggerConfig::default(), BackendSelector::STRUCTURED)?;
//! logfacade::log_info!("listening on", 8080_u16);
//! logfacade::infof!("{} workers ready", 4);
//!
//! let request_log = logfacade::with_fields(logfacade::Fields::from([(
//!     "requestId".into(),
//!     "r-1".into(),
//! )]));
//! request_log.info(&["handled".into()]);
//! # Ok(())
//! # }
//! ```
//!
//! Tests and embedders that need isolation use their own [`LoggerSlot`]
//! instead of the process default.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

mod global;
mod macros;
pub mod slot;

pub use global::{
    debug, debugf, default_slot, error, errorf, fatal, fatalf, flush, info, infof,
    initialize, initialize_from_path, initialize_with, install, is_initialized, log, logger,
    panic, panicf, warn, warnf, with_fields,
};
pub use slot::{LoggerSlot, UNINITIALIZED_MESSAGE};

pub use logfacade_config::{LoggerConfig, load_logger_config_from_path, to_pretty_json};
pub use logfacade_infra::{
    BackendConstructor, BackendRegistry, BackendSelector, BoxError, ConstructionError,
    build_logger,
};
pub use logfacade_ports::{
    FATAL_EXIT_CODE, Fields, LogPanic, LogRecord, LogValue, LoggerPort, Severity,
};
pub use logfacade_shared::ErrorEnvelope;

/// Returns the facade crate version.
#[must_use]
pub const fn facade_crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::*;
    use logfacade_infra::infra_crate_version;

    #[test]
    fn facade_crate_compiles() {
        assert!(!facade_crate_version().is_empty());
        assert!(!infra_crate_version().is_empty());
    }
}
