//! Backend that forwards records to a `tracing` subscriber.
//!
//! Each instance owns its own `Dispatch` built from `tracing-subscriber` fmt
//! layers, so several instances (and re-initialization) can coexist without a
//! global subscriber.
//!
//! This backend has a single level for all sinks: the console level when the
//! console is enabled, the file level otherwise.
//!
//! Context fields travel on the event as one JSON-encoded `context` value and
//! are decoded again by the event formatter, so JSON sinks keep their types:
//! `{"timestamp":..,"level":"INFO","fields":{"message":..,"severity":..,<context>},"target":"logfacade"}`.
//! A context key named `message` or `severity` is shadowed by the event's own.

use crate::BackendBuildError;
use crate::encoding::render_text_fields;
use logfacade_config::{LoggerConfig, ResolvedLoggerConfig, SinkFormat};
use logfacade_ports::{Fields, LogRecord, LoggerPort, Severity, merge_fields};
use serde_json::{Map, Value};
use std::fmt;
use std::fs::OpenOptions;
use std::io;
use std::sync::Mutex;
use tracing::field::{Field, Visit};
use tracing::{Dispatch, Event, Level, Subscriber};
use tracing_subscriber::Layer;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::time::{FormatTime, SystemTime};
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::fmt::{FmtContext, FormatEvent, FormatFields};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry::{LookupSpan, Registry};

/// Target attached to every forwarded event.
pub const EVENT_TARGET: &str = "logfacade";

const CONTEXT_FIELD: &str = "context";
const SEVERITY_FIELD: &str = "severity";
const MESSAGE_FIELD: &str = "message";

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

/// Logger emitting `tracing` events into a private dispatcher.
#[derive(Clone)]
pub struct TracingLogger {
    dispatch: Dispatch,
    level: Severity,
    base_fields: Fields,
}

impl TracingLogger {
    /// Build from a config: stderr for the console, append-mode file for the
    /// file sink.
    pub fn from_config(config: &LoggerConfig) -> Result<Self, BackendBuildError> {
        Self::with_console_writer(config, BoxMakeWriter::new(io::stderr))
    }

    /// Build from a config with a custom console writer.
    pub fn with_console_writer(
        config: &LoggerConfig,
        console_writer: BoxMakeWriter,
    ) -> Result<Self, BackendBuildError> {
        let resolved = config.resolve()?;
        let level = resolved.single_level();
        let layers = build_layers(&resolved, console_writer)?;

        let subscriber = Registry::default()
            .with(layers)
            .with(level_filter(level));

        Ok(Self {
            dispatch: Dispatch::new(subscriber),
            level,
            base_fields: Fields::new(),
        })
    }

    /// The single level applied to every sink.
    #[must_use]
    pub const fn level(&self) -> Severity {
        self.level
    }
}

fn build_layers(
    resolved: &ResolvedLoggerConfig,
    console_writer: BoxMakeWriter,
) -> Result<Vec<BoxedLayer>, BackendBuildError> {
    let mut layers = Vec::new();
    if let Some(console) = resolved.console {
        layers.push(fmt_layer(console_writer, console.format));
    }
    if let Some(file) = &resolved.file {
        let handle = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&file.path)
            .map_err(|source| BackendBuildError::OpenFile {
                path: file.path.clone(),
                source,
            })?;
        layers.push(fmt_layer(
            BoxMakeWriter::new(Mutex::new(handle)),
            file.sink.format,
        ));
    }
    Ok(layers)
}

fn fmt_layer(writer: BoxMakeWriter, format: SinkFormat) -> BoxedLayer {
    tracing_subscriber::fmt::layer()
        .with_writer(writer)
        .event_format(RecordFormat { format })
        .boxed()
}

/// Event formatter for forwarded records.
///
/// JSON lines carry the decoded context as typed values; text lines render it
/// as `key=value` pairs after the message.
#[derive(Debug, Clone, Copy)]
struct RecordFormat {
    format: SinkFormat,
}

impl<S, N> FormatEvent<S, N> for RecordFormat
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        _ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> fmt::Result {
        let mut recorded = RecordedEvent::default();
        event.record(&mut recorded);

        let mut timestamp = String::new();
        SystemTime.format_time(&mut Writer::new(&mut timestamp))?;
        let metadata = event.metadata();

        match self.format {
            SinkFormat::Json => {
                let mut fields = Map::new();
                for (key, value) in recorded.context {
                    fields.insert(key.into_string(), value);
                }
                fields.insert(MESSAGE_FIELD.to_string(), Value::String(recorded.message));
                fields.insert(SEVERITY_FIELD.to_string(), Value::String(recorded.severity));

                let mut payload = Map::new();
                payload.insert("timestamp".to_string(), Value::String(timestamp));
                payload.insert(
                    "level".to_string(),
                    Value::String(metadata.level().to_string()),
                );
                payload.insert("fields".to_string(), Value::Object(fields));
                payload.insert(
                    "target".to_string(),
                    Value::String(metadata.target().to_string()),
                );
                let line = serde_json::to_string(&Value::Object(payload)).map_err(|_| fmt::Error)?;
                writeln!(writer, "{line}")
            },
            SinkFormat::Text => {
                write!(
                    writer,
                    "{timestamp} {:>5} {} severity={}",
                    metadata.level(),
                    recorded.message,
                    recorded.severity
                )?;
                let context = render_text_fields(&recorded.context, &[SEVERITY_FIELD]);
                if !context.is_empty() {
                    write!(writer, " {context}")?;
                }
                writeln!(writer)
            },
        }
    }
}

#[derive(Default)]
struct RecordedEvent {
    message: String,
    severity: String,
    context: Fields,
}

impl Visit for RecordedEvent {
    fn record_str(&mut self, field: &Field, value: &str) {
        match field.name() {
            MESSAGE_FIELD => self.message = value.to_string(),
            SEVERITY_FIELD => self.severity = value.to_string(),
            CONTEXT_FIELD => self.context = serde_json::from_str(value).unwrap_or_default(),
            _ => {},
        }
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        if field.name() == MESSAGE_FIELD {
            self.message = format!("{value:?}");
        }
    }
}

const fn level_filter(severity: Severity) -> LevelFilter {
    match severity {
        Severity::Debug => LevelFilter::DEBUG,
        Severity::Info => LevelFilter::INFO,
        Severity::Warn => LevelFilter::WARN,
        Severity::Error | Severity::Fatal => LevelFilter::ERROR,
    }
}

macro_rules! forward_event {
    ($level:expr, $severity:expr, $message:expr, $context:expr) => {
        match $context {
            None => tracing::event!(target: EVENT_TARGET, $level, severity = $severity, "{}", $message),
            Some(context) => tracing::event!(
                target: EVENT_TARGET,
                $level,
                severity = $severity,
                context = context,
                "{}",
                $message
            ),
        }
    };
}

impl LoggerPort for TracingLogger {
    fn log(&self, record: LogRecord) {
        if !record.severity.passes(self.level) {
            return;
        }

        let mut fields = self.base_fields.clone();
        if let Some(extra) = record.fields {
            merge_fields(&mut fields, extra);
        }
        let encoded = if fields.is_empty() {
            None
        } else {
            serde_json::to_string(&fields).ok()
        };
        let context: Option<&str> = encoded.as_deref();
        let message: &str = &record.message;
        let severity = record.severity.as_str();

        tracing::dispatcher::with_default(&self.dispatch, || match record.severity {
            Severity::Debug => forward_event!(Level::DEBUG, severity, message, context),
            Severity::Info => forward_event!(Level::INFO, severity, message, context),
            Severity::Warn => forward_event!(Level::WARN, severity, message, context),
            Severity::Error | Severity::Fatal => {
                forward_event!(Level::ERROR, severity, message, context);
            },
        });
    }

    fn with_fields(&self, fields: Fields) -> Box<dyn LoggerPort> {
        let mut merged = self.base_fields.clone();
        merge_fields(&mut merged, fields);
        Box::new(Self {
            dispatch: self.dispatch.clone(),
            level: self.level,
            base_fields: merged,
        })
    }
}
