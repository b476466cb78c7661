//! Structured logger backend: console and file sinks, JSON or text lines.
//!
//! Each sink filters on its own level, so `consoleLevel` and `fileLevel` are
//! honoured independently.

use crate::BackendBuildError;
use crate::encoding::{EncodedRecord, encode_json, encode_text, now_epoch_ms};
use crate::log_sink::{FileLogSink, LogSink, StderrLogSink};
use logfacade_config::{LoggerConfig, SinkFormat, SinkSettings};
use logfacade_ports::{Fields, LogRecord, LoggerPort, merge_fields};
use std::sync::Arc;

#[derive(Clone)]
struct SinkTarget {
    sink: Arc<dyn LogSink>,
    settings: SinkSettings,
}

/// Logger writing one line per record to each enabled sink.
#[derive(Clone, Default)]
pub struct StructuredLogger {
    console: Option<SinkTarget>,
    file: Option<SinkTarget>,
    base_fields: Fields,
}

impl StructuredLogger {
    /// Logger with no sinks; every record is discarded.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from a config: stderr for the console, append-mode file for the
    /// file sink.
    pub fn from_config(config: &LoggerConfig) -> Result<Self, BackendBuildError> {
        let resolved = config.resolve()?;
        let mut logger = Self::new();

        if let Some(settings) = resolved.console {
            logger = logger.with_console(Arc::new(StderrLogSink), settings);
        }
        if let Some(file) = resolved.file {
            let sink = FileLogSink::open(&file.path).map_err(|source| {
                BackendBuildError::OpenFile {
                    path: file.path.clone(),
                    source,
                }
            })?;
            logger = logger.with_file(Arc::new(sink), file.sink);
        }

        Ok(logger)
    }

    /// Set the console sink.
    #[must_use]
    pub fn with_console(mut self, sink: Arc<dyn LogSink>, settings: SinkSettings) -> Self {
        self.console = Some(SinkTarget { sink, settings });
        self
    }

    /// Set the file sink.
    #[must_use]
    pub fn with_file(mut self, sink: Arc<dyn LogSink>, settings: SinkSettings) -> Self {
        self.file = Some(SinkTarget { sink, settings });
        self
    }

    fn targets(&self) -> impl Iterator<Item = &SinkTarget> {
        self.console.iter().chain(self.file.iter())
    }
}

impl LoggerPort for StructuredLogger {
    fn log(&self, record: LogRecord) {
        if !self
            .targets()
            .any(|target| record.severity.passes(target.settings.level))
        {
            return;
        }

        let mut fields = self.base_fields.clone();
        if let Some(extra) = record.fields {
            merge_fields(&mut fields, extra);
        }
        let encoded = EncodedRecord {
            timestamp_ms: now_epoch_ms(),
            severity: record.severity,
            message: &record.message,
            fields: &fields,
        };

        let mut json_line: Option<String> = None;
        let mut text_line: Option<String> = None;
        for target in self.targets() {
            if !record.severity.passes(target.settings.level) {
                continue;
            }
            let line = match target.settings.format {
                SinkFormat::Json => json_line.get_or_insert_with(|| encode_json(&encoded)),
                SinkFormat::Text => text_line.get_or_insert_with(|| encode_text(&encoded)),
            };
            target.sink.write_line(line);
        }
    }

    fn with_fields(&self, fields: Fields) -> Box<dyn LoggerPort> {
        let mut merged = self.base_fields.clone();
        merge_fields(&mut merged, fields);
        Box::new(Self {
            console: self.console.clone(),
            file: self.file.clone(),
            base_fields: merged,
        })
    }

    fn flush(&self) {
        for target in self.targets() {
            target.sink.flush();
        }
    }
}
