//! Structured logging boundary contract.

use crate::severity::Severity;
use crate::value::{LogValue, join_values};
use std::collections::BTreeMap;
use std::fmt;

/// Structured context attached to records.
pub type Fields = BTreeMap<Box<str>, serde_json::Value>;

/// Exit code used by the fatal operations.
pub const FATAL_EXIT_CODE: i32 = 1;

/// A single record handed to a backend.
#[derive(Debug, Clone, PartialEq)]
pub struct LogRecord {
    /// Severity.
    pub severity: Severity,
    /// Fully rendered message.
    pub message: Box<str>,
    /// Call-level fields, merged over the logger's own fields.
    pub fields: Option<Fields>,
}

impl LogRecord {
    /// Record with a message and no call-level fields.
    pub fn new(severity: Severity, message: impl Into<Box<str>>) -> Self {
        Self {
            severity,
            message: message.into(),
            fields: None,
        }
    }

    /// Attach call-level fields.
    #[must_use]
    pub fn with_fields(mut self, fields: Fields) -> Self {
        self.fields = Some(fields);
        self
    }
}

/// Panic payload raised by [`LoggerPort::panic`] and [`LoggerPort::panicf`].
///
/// A supervisor can recover it with `std::panic::catch_unwind` and
/// `downcast_ref::<LogPanic>()`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogPanic {
    /// The logged message.
    pub message: String,
}

impl fmt::Display for LogPanic {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(&self.message)
    }
}

/// Merge `overlay` into `base`; keys in `overlay` win.
pub fn merge_fields(base: &mut Fields, overlay: Fields) {
    for (key, value) in overlay {
        base.insert(key, value);
    }
}

/// Boundary contract every logging backend implements.
///
/// Backends supply [`log`](Self::log) and [`with_fields`](Self::with_fields);
/// the leveled, formatted, fatal and panic operations are provided on top.
/// Level filtering and encoding belong to the backend.
pub trait LoggerPort: Send + Sync {
    /// Emit a record. Records below the backend's threshold are dropped.
    fn log(&self, record: LogRecord);

    /// Derive a logger carrying `fields` on every record.
    ///
    /// The receiver is left untouched. Fields already on the receiver are
    /// kept unless `fields` has the same key, in which case the new value wins.
    fn with_fields(&self, fields: Fields) -> Box<dyn LoggerPort>;

    /// Flush buffered output. Called before the fatal and panic operations
    /// leave the current control flow.
    fn flush(&self) {}

    /// Debug record built from `values`.
    fn debug(&self, values: &[LogValue]) {
        self.log(LogRecord::new(Severity::Debug, join_values(values)));
    }

    /// Info record built from `values`.
    fn info(&self, values: &[LogValue]) {
        self.log(LogRecord::new(Severity::Info, join_values(values)));
    }

    /// Warn record built from `values`.
    fn warn(&self, values: &[LogValue]) {
        self.log(LogRecord::new(Severity::Warn, join_values(values)));
    }

    /// Error record built from `values`.
    fn error(&self, values: &[LogValue]) {
        self.log(LogRecord::new(Severity::Error, join_values(values)));
    }

    /// Fatal record built from `values`, then process exit.
    fn fatal(&self, values: &[LogValue]) -> ! {
        self.log(LogRecord::new(Severity::Fatal, join_values(values)));
        self.flush();
        std::process::exit(FATAL_EXIT_CODE)
    }

    /// Fatal-severity record built from `values`, then unwinds with [`LogPanic`].
    fn panic(&self, values: &[LogValue]) -> ! {
        let message = join_values(values);
        self.log(LogRecord::new(Severity::Fatal, message.as_str()));
        self.flush();
        std::panic::panic_any(LogPanic { message })
    }

    /// Debug record from a format template.
    fn debugf(&self, args: fmt::Arguments<'_>) {
        self.log(LogRecord::new(Severity::Debug, fmt::format(args)));
    }

    /// Info record from a format template.
    fn infof(&self, args: fmt::Arguments<'_>) {
        self.log(LogRecord::new(Severity::Info, fmt::format(args)));
    }

    /// Warn record from a format template.
    fn warnf(&self, args: fmt::Arguments<'_>) {
        self.log(LogRecord::new(Severity::Warn, fmt::format(args)));
    }

    /// Error record from a format template.
    fn errorf(&self, args: fmt::Arguments<'_>) {
        self.log(LogRecord::new(Severity::Error, fmt::format(args)));
    }

    /// Fatal record from a format template, then process exit.
    fn fatalf(&self, args: fmt::Arguments<'_>) -> ! {
        self.log(LogRecord::new(Severity::Fatal, fmt::format(args)));
        self.flush();
        std::process::exit(FATAL_EXIT_CODE)
    }

    /// Fatal-severity record from a format template, then unwinds with [`LogPanic`].
    fn panicf(&self, args: fmt::Arguments<'_>) -> ! {
        let message = fmt::format(args);
        self.log(LogRecord::new(Severity::Fatal, message.as_str()));
        self.flush();
        std::panic::panic_any(LogPanic { message })
    }
}
