//! In-memory logger doubles.
//!
//! These implementations are intended for:
//! - Unit/integration tests of code that logs through `LoggerPort`
//! - Asserting on merged fields without parsing encoded lines
//! - Capturing encoded backend output via [`MemorySink`]

use logfacade_adapters::LogSink;
use logfacade_ports::{Fields, LogRecord, LoggerPort, Severity, merge_fields};
use std::sync::{Arc, Mutex, PoisonError};

/// A no-op logger implementation.
#[derive(Debug, Default)]
pub struct NoopLogger;

impl LoggerPort for NoopLogger {
    fn log(&self, _record: LogRecord) {}

    fn with_fields(&self, _fields: Fields) -> Box<dyn LoggerPort> {
        Box::new(Self)
    }
}

/// Sink collecting encoded lines in memory.
#[derive(Debug, Default)]
pub struct MemorySink {
    lines: Mutex<Vec<String>>,
    flushes: Mutex<usize>,
}

impl MemorySink {
    /// Create an empty sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of the lines written so far (each ends with `\n`).
    pub fn lines(&self) -> Vec<String> {
        self.lines
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Drain the lines written so far.
    pub fn take(&self) -> Vec<String> {
        let mut guard = self.lines.lock().unwrap_or_else(PoisonError::into_inner);
        std::mem::take(&mut *guard)
    }

    /// Number of `flush` calls observed.
    pub fn flush_count(&self) -> usize {
        *self.flushes.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl LogSink for MemorySink {
    fn write_line(&self, line: &str) {
        self.lines
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(line.to_string());
    }

    fn flush(&self) {
        *self.flushes.lock().unwrap_or_else(PoisonError::into_inner) += 1;
    }
}

/// Logger that records every accepted record with its merged fields.
///
/// Loggers derived with `with_fields` share the same record buffer, so a test
/// can hand out children and assert on everything from the root.
#[derive(Debug, Clone)]
pub struct RecordingLogger {
    level: Severity,
    base_fields: Fields,
    records: Arc<Mutex<Vec<LogRecord>>>,
    flushes: Arc<Mutex<usize>>,
}

impl Default for RecordingLogger {
    fn default() -> Self {
        Self::new(Severity::Debug)
    }
}

impl RecordingLogger {
    /// Recorder dropping records below `level`.
    #[must_use]
    pub fn new(level: Severity) -> Self {
        Self {
            level,
            base_fields: Fields::new(),
            records: Arc::default(),
            flushes: Arc::default(),
        }
    }

    /// Copy of the recorded records. `fields` is always `Some`, holding the
    /// merged base and call-level fields.
    pub fn records(&self) -> Vec<LogRecord> {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Drain the recorded records.
    pub fn take(&self) -> Vec<LogRecord> {
        let mut guard = self.records.lock().unwrap_or_else(PoisonError::into_inner);
        std::mem::take(&mut *guard)
    }

    /// Recorded messages in order.
    pub fn messages(&self) -> Vec<String> {
        self.records()
            .into_iter()
            .map(|record| record.message.into_string())
            .collect()
    }

    /// Number of `flush` calls observed across the family.
    pub fn flush_count(&self) -> usize {
        *self.flushes.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl LoggerPort for RecordingLogger {
    fn log(&self, mut record: LogRecord) {
        if !record.severity.passes(self.level) {
            return;
        }
        let mut fields = self.base_fields.clone();
        if let Some(extra) = record.fields.take() {
            merge_fields(&mut fields, extra);
        }
        record.fields = Some(fields);
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(record);
    }

    fn with_fields(&self, fields: Fields) -> Box<dyn LoggerPort> {
        let mut child = self.clone();
        merge_fields(&mut child.base_fields, fields);
        Box::new(child)
    }

    fn flush(&self) {
        *self.flushes.lock().unwrap_or_else(PoisonError::into_inner) += 1;
    }
}
