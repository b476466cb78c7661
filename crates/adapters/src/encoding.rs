//! Line encoders shared by the structured backend's sinks.

use logfacade_ports::{Fields, Severity};
use serde_json::Value;
use std::fmt::Write as _;
use std::time::{SystemTime, UNIX_EPOCH};

/// One record ready for encoding, fields already merged.
#[derive(Debug, Clone, Copy)]
pub struct EncodedRecord<'a> {
    /// Milliseconds since the Unix epoch.
    pub timestamp_ms: u64,
    /// Severity.
    pub severity: Severity,
    /// Message text.
    pub message: &'a str,
    /// Merged structured fields.
    pub fields: &'a Fields,
}

/// Encode as a single JSON object followed by a newline.
///
/// Shape: `{"timestampMs":..,"level":"info","message":"..","fields":{..}}`;
/// `fields` is omitted when empty.
pub fn encode_json(record: &EncodedRecord<'_>) -> String {
    let mut payload = serde_json::Map::new();
    payload.insert(
        "timestampMs".to_string(),
        Value::from(record.timestamp_ms),
    );
    payload.insert(
        "level".to_string(),
        Value::String(record.severity.as_str().to_string()),
    );
    payload.insert(
        "message".to_string(),
        Value::String(record.message.to_string()),
    );
    if !record.fields.is_empty() {
        let mut map = serde_json::Map::new();
        for (key, value) in record.fields {
            map.insert(key.to_string(), value.clone());
        }
        payload.insert("fields".to_string(), Value::Object(map));
    }

    serde_json::to_string(&Value::Object(payload)).map_or_else(
        |_| {
            "{\"timestampMs\":0,\"level\":\"error\",\"message\":\"log serialization failed\"}\n"
                .to_string()
        },
        |mut encoded| {
            encoded.push('\n');
            encoded
        },
    )
}

/// Header keys of a text line.
pub const TEXT_HEADER_KEYS: [&str; 3] = ["ts", "level", "msg"];

/// Encode as human-readable `key=value` text followed by a newline.
///
/// Shape: `ts=<ms> level=info msg="starting v1" key=value ...`. Field keys
/// that collide with the header are written as `fields.<key>`.
pub fn encode_text(record: &EncodedRecord<'_>) -> String {
    let mut line = format!(
        "ts={} level={} msg={}",
        record.timestamp_ms,
        record.severity,
        quote_if_needed(record.message)
    );
    let fields = render_text_fields(record.fields, &TEXT_HEADER_KEYS);
    if !fields.is_empty() {
        line.push(' ');
        line.push_str(&fields);
    }
    line.push('\n');
    line
}

/// Render fields as space separated `key=value` pairs in key order.
///
/// Keys listed in `reserved` get a `fields.` prefix.
pub fn render_text_fields(fields: &Fields, reserved: &[&str]) -> String {
    let mut output = String::new();
    for (key, value) in fields {
        if !output.is_empty() {
            output.push(' ');
        }
        let rendered = match value {
            Value::String(text) => quote_if_needed(text),
            other => other.to_string(),
        };
        let prefix = if reserved.contains(&&**key) { "fields." } else { "" };
        let _ = write!(output, "{prefix}{}={rendered}", quote_if_needed(key));
    }
    output
}

fn quote_if_needed(text: &str) -> String {
    let needs_quotes = text.is_empty()
        || text
            .chars()
            .any(|ch| ch.is_whitespace() || ch == '"' || ch == '=' || ch.is_control());
    if needs_quotes {
        format!("{text:?}")
    } else {
        text.to_string()
    }
}

/// Current time in milliseconds since the Unix epoch (0 if the clock is unset).
pub fn now_epoch_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .ok()
        .and_then(|duration| u64::try_from(duration.as_millis()).ok())
        .unwrap_or_default()
}
