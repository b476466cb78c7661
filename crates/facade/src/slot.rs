//! Atomically swappable holder for the active logger.

use arc_swap::ArcSwapOption;
use logfacade_config::LoggerConfig;
use logfacade_infra::{BackendRegistry, BackendSelector, ConstructionError, build_logger};
use logfacade_ports::{Fields, LogRecord, LogValue, LoggerPort};
use std::fmt;
use std::sync::Arc;

/// Panic message for forwarding through an empty slot.
pub const UNINITIALIZED_MESSAGE: &str = "logfacade used before initialize";

// `ArcSwapOption` needs a sized pointee.
struct Installed {
    logger: Arc<dyn LoggerPort>,
}

/// Holds at most one logger and forwards calls to it.
///
/// Installing is a single atomic pointer publish: a concurrent caller sees
/// either the previous logger or the new one, never a partial state. Loggers
/// obtained earlier (via [`current`](Self::current) or `with_fields`) keep
/// working after a swap.
pub struct LoggerSlot {
    current: ArcSwapOption<Installed>,
}

impl LoggerSlot {
    /// An empty slot; usable in a `static`.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            current: ArcSwapOption::const_empty(),
        }
    }

    /// Publish `logger`, returning the one it replaced.
    pub fn install(&self, logger: Arc<dyn LoggerPort>) -> Option<Arc<dyn LoggerPort>> {
        let previous = self.current.swap(Some(Arc::new(Installed { logger })));
        tracing::debug!(replaced = previous.is_some(), "installed logger");
        previous.map(|installed| Arc::clone(&installed.logger))
    }

    /// Build a logger with the built-in backends and install it.
    ///
    /// On error the slot is left as it was.
    pub fn initialize(
        &self,
        config: &LoggerConfig,
        selector: BackendSelector,
    ) -> Result<(), ConstructionError> {
        let logger = build_logger(config, selector)?;
        self.install(logger);
        Ok(())
    }

    /// Like [`initialize`](Self::initialize) with a caller-supplied registry.
    pub fn initialize_with(
        &self,
        registry: &BackendRegistry,
        config: &LoggerConfig,
        selector: BackendSelector,
    ) -> Result<(), ConstructionError> {
        let logger = registry.construct(config, selector)?;
        self.install(logger);
        Ok(())
    }

    /// Snapshot of the installed logger.
    pub fn current(&self) -> Option<Arc<dyn LoggerPort>> {
        self.current
            .load()
            .as_ref()
            .map(|installed| Arc::clone(&installed.logger))
    }

    /// Whether a logger is installed.
    pub fn is_initialized(&self) -> bool {
        self.current.load().is_some()
    }

    /// The installed logger.
    ///
    /// # Panics
    ///
    /// Panics with [`UNINITIALIZED_MESSAGE`] when the slot is empty.
    #[track_caller]
    pub fn logger(&self) -> Arc<dyn LoggerPort> {
        match self.current() {
            Some(logger) => logger,
            None => uninitialized(),
        }
    }

    #[track_caller]
    fn forward(&self, call: impl FnOnce(&dyn LoggerPort)) {
        let guard = self.current.load();
        match guard.as_ref() {
            Some(installed) => call(installed.logger.as_ref()),
            None => uninitialized(),
        }
    }

    /// Forward a prepared record.
    #[track_caller]
    pub fn log(&self, record: LogRecord) {
        self.forward(|logger| logger.log(record));
    }

    /// Forward to [`LoggerPort::debug`].
    #[track_caller]
    pub fn debug(&self, values: &[LogValue]) {
        self.forward(|logger| logger.debug(values));
    }

    /// Forward to [`LoggerPort::info`].
    #[track_caller]
    pub fn info(&self, values: &[LogValue]) {
        self.forward(|logger| logger.info(values));
    }

    /// Forward to [`LoggerPort::warn`].
    #[track_caller]
    pub fn warn(&self, values: &[LogValue]) {
        self.forward(|logger| logger.warn(values));
    }

    /// Forward to [`LoggerPort::error`].
    #[track_caller]
    pub fn error(&self, values: &[LogValue]) {
        self.forward(|logger| logger.error(values));
    }

    /// Forward to [`LoggerPort::fatal`]; exits the process.
    #[track_caller]
    pub fn fatal(&self, values: &[LogValue]) -> ! {
        self.logger().fatal(values)
    }

    /// Forward to [`LoggerPort::panic`]; unwinds with `LogPanic`.
    #[track_caller]
    pub fn panic(&self, values: &[LogValue]) -> ! {
        self.logger().panic(values)
    }

    /// Forward to [`LoggerPort::debugf`].
    #[track_caller]
    pub fn debugf(&self, args: fmt::Arguments<'_>) {
        self.forward(|logger| logger.debugf(args));
    }

    /// Forward to [`LoggerPort::infof`].
    #[track_caller]
    pub fn infof(&self, args: fmt::Arguments<'_>) {
        self.forward(|logger| logger.infof(args));
    }

    /// Forward to [`LoggerPort::warnf`].
    #[track_caller]
    pub fn warnf(&self, args: fmt::Arguments<'_>) {
        self.forward(|logger| logger.warnf(args));
    }

    /// Forward to [`LoggerPort::errorf`].
    #[track_caller]
    pub fn errorf(&self, args: fmt::Arguments<'_>) {
        self.forward(|logger| logger.errorf(args));
    }

    /// Forward to [`LoggerPort::fatalf`]; exits the process.
    #[track_caller]
    pub fn fatalf(&self, args: fmt::Arguments<'_>) -> ! {
        self.logger().fatalf(args)
    }

    /// Forward to [`LoggerPort::panicf`]; unwinds with `LogPanic`.
    #[track_caller]
    pub fn panicf(&self, args: fmt::Arguments<'_>) -> ! {
        self.logger().panicf(args)
    }

    /// Derive a detached logger from the installed one.
    ///
    /// The result keeps its backend even if the slot is re-initialized.
    #[track_caller]
    pub fn with_fields(&self, fields: Fields) -> Box<dyn LoggerPort> {
        self.logger().with_fields(fields)
    }

    /// Flush the installed logger.
    #[track_caller]
    pub fn flush(&self) {
        self.forward(|logger| logger.flush());
    }
}

impl Default for LoggerSlot {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for LoggerSlot {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("LoggerSlot")
            .field("initialized", &self.is_initialized())
            .finish()
    }
}

#[cold]
#[track_caller]
fn uninitialized() -> ! {
    std::panic::panic_any(UNINITIALIZED_MESSAGE)
}
