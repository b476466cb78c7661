//! The process-wide default slot and its free functions.
//!
//! Every function here forwards to [`default_slot`]. Forwarding before a
//! logger is installed panics with [`UNINITIALIZED_MESSAGE`](crate::UNINITIALIZED_MESSAGE).

use crate::slot::LoggerSlot;
use logfacade_config::{LoggerConfig, load_logger_config_from_path};
use logfacade_infra::{BackendRegistry, BackendSelector, ConstructionError};
use logfacade_ports::{Fields, LogRecord, LogValue, LoggerPort};
use logfacade_shared::ErrorEnvelope;
use std::fmt;
use std::path::Path;
use std::sync::Arc;

static DEFAULT_SLOT: LoggerSlot = LoggerSlot::new();

/// The slot behind the free functions.
pub fn default_slot() -> &'static LoggerSlot {
    &DEFAULT_SLOT
}

/// Build a logger with the built-in backends and make it the process default.
///
/// On error the previous default (if any) stays active.
pub fn initialize(config: &LoggerConfig, selector: BackendSelector) -> Result<(), ConstructionError> {
    DEFAULT_SLOT.initialize(config, selector)
}

/// Like [`initialize`] with a caller-supplied registry.
pub fn initialize_with(
    registry: &BackendRegistry,
    config: &LoggerConfig,
    selector: BackendSelector,
) -> Result<(), ConstructionError> {
    DEFAULT_SLOT.initialize_with(registry, config, selector)
}

/// Load a `.json` or `.toml` config file and initialize from it.
pub fn initialize_from_path(path: &Path, selector: BackendSelector) -> Result<(), ErrorEnvelope> {
    let config = load_logger_config_from_path(path)?;
    initialize(&config, selector).map_err(ErrorEnvelope::from)
}

/// Make `logger` the process default, returning the one it replaced.
pub fn install(logger: Arc<dyn LoggerPort>) -> Option<Arc<dyn LoggerPort>> {
    DEFAULT_SLOT.install(logger)
}

/// Whether a process default is installed.
pub fn is_initialized() -> bool {
    DEFAULT_SLOT.is_initialized()
}

/// The process default logger.
///
/// # Panics
///
/// Panics with [`UNINITIALIZED_MESSAGE`](crate::UNINITIALIZED_MESSAGE) when nothing
/// is installed.
#[track_caller]
pub fn logger() -> Arc<dyn LoggerPort> {
    DEFAULT_SLOT.logger()
}

/// Forward a prepared record.
#[track_caller]
pub fn log(record: LogRecord) {
    DEFAULT_SLOT.log(record);
}

/// Debug record joined from `values`.
#[track_caller]
pub fn debug(values: &[LogValue]) {
    DEFAULT_SLOT.debug(values);
}

/// Info record joined from `values`.
#[track_caller]
pub fn info(values: &[LogValue]) {
    DEFAULT_SLOT.info(values);
}

/// Warn record joined from `values`.
#[track_caller]
pub fn warn(values: &[LogValue]) {
    DEFAULT_SLOT.warn(values);
}

/// Error record joined from `values`.
#[track_caller]
pub fn error(values: &[LogValue]) {
    DEFAULT_SLOT.error(values);
}

/// Fatal record joined from `values`, then exit with status 1.
#[track_caller]
pub fn fatal(values: &[LogValue]) -> ! {
    DEFAULT_SLOT.fatal(values)
}

/// Fatal-severity record joined from `values`, then unwind with `LogPanic`.
#[track_caller]
pub fn panic(values: &[LogValue]) -> ! {
    DEFAULT_SLOT.panic(values)
}

/// Debug record from a format template.
#[track_caller]
pub fn debugf(args: fmt::Arguments<'_>) {
    DEFAULT_SLOT.debugf(args);
}

/// Info record from a format template.
#[track_caller]
pub fn infof(args: fmt::Arguments<'_>) {
    DEFAULT_SLOT.infof(args);
}

/// Warn record from a format template.
#[track_caller]
pub fn warnf(args: fmt::Arguments<'_>) {
    DEFAULT_SLOT.warnf(args);
}

/// Error record from a format template.
#[track_caller]
pub fn errorf(args: fmt::Arguments<'_>) {
    DEFAULT_SLOT.errorf(args);
}

/// Fatal record from a format template, then exit with status 1.
#[track_caller]
pub fn fatalf(args: fmt::Arguments<'_>) -> ! {
    DEFAULT_SLOT.fatalf(args)
}

/// Fatal-severity record from a format template, then unwind with `LogPanic`.
#[track_caller]
pub fn panicf(args: fmt::Arguments<'_>) -> ! {
    DEFAULT_SLOT.panicf(args)
}

/// Detached logger carrying `fields`, derived from the process default.
#[track_caller]
pub fn with_fields(fields: Fields) -> Box<dyn LoggerPort> {
    DEFAULT_SLOT.with_fields(fields)
}

/// Flush the process default.
#[track_caller]
pub fn flush() {
    DEFAULT_SLOT.flush();
}
