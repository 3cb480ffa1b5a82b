//! OTLP-JSON span export to a local file.
//!
//! Each exported batch becomes one line holding a complete
//! `resourceSpans` document, so the file can be replayed into any OTLP
//! collector. The file is capped in size; when it grows past the cap it is
//! moved aside to `<name>.1` (replacing any older backup) and a fresh file is
//! started.

use futures_util::future::BoxFuture;
use opentelemetry::trace::{SpanId, SpanKind, Status, TraceError};
use opentelemetry::{KeyValue, Value};
use opentelemetry_sdk::export::trace::{ExportResult, SpanData, SpanExporter};
use opentelemetry_sdk::resource::Resource;
use opentelemetry_sdk::trace::TracerProvider;
use serde_json::{json, Value as JsonValue};
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;
use std::time::{SystemTime, UNIX_EPOCH};

const MAX_FILE_BYTES: u64 = 10 * 1024 * 1024;

/// Append-only line sink with a single rotated backup.
pub(crate) struct LineSink {
    path: PathBuf,
    max_bytes: u64,
    file: Mutex<Option<File>>,
}

impl LineSink {
    pub(crate) const fn new(path: PathBuf, max_bytes: u64) -> Self {
        Self {
            path,
            max_bytes,
            file: Mutex::new(None),
        }
    }

    fn backup_path(&self) -> PathBuf {
        let mut name = self.path.file_name().unwrap_or_default().to_os_string();
        name.push(".1");
        self.path.with_file_name(name)
    }

    pub(crate) fn write_line(&self, line: &str) -> std::io::Result<()> {
        let mut guard = self
            .file
            .lock()
            .map_err(|e| std::io::Error::other(format!("sink lock poisoned: {e}")))?;

        let oversized = fs::metadata(&self.path).is_ok_and(|m| m.len() > self.max_bytes);
        if oversized {
            *guard = None;
            fs::rename(&self.path, self.backup_path())?;
        }

        let file = match guard.as_mut() {
            Some(file) => file,
            None => guard.insert(OpenOptions::new().create(true).append(true).open(&self.path)?),
        };

        writeln!(file, "{line}")?;
        file.flush()
    }

    pub(crate) fn path(&self) -> &Path {
        &self.path
    }
}

fn unix_nanos(time: SystemTime) -> String {
    time.duration_since(UNIX_EPOCH).unwrap_or_default().as_nanos().to_string()
}

fn otlp_value(value: &Value) -> JsonValue {
    match value {
        Value::Bool(b) => json!({ "boolValue": b }),
        Value::I64(i) => json!({ "intValue": i.to_string() }),
        Value::F64(f) => json!({ "doubleValue": f }),
        Value::String(s) => json!({ "stringValue": s.as_str() }),
        Value::Array(_) => json!({ "stringValue": value.to_string() }),
    }
}

fn otlp_attributes<'a>(attributes: impl IntoIterator<Item = &'a KeyValue>) -> Vec<JsonValue> {
    attributes
        .into_iter()
        .map(|kv| json!({ "key": kv.key.as_str(), "value": otlp_value(&kv.value) }))
        .collect()
}

const fn otlp_kind(kind: &SpanKind) -> u8 {
    match kind {
        SpanKind::Internal => 1,
        SpanKind::Server => 2,
        SpanKind::Client => 3,
        SpanKind::Producer => 4,
        SpanKind::Consumer => 5,
    }
}

fn otlp_span(span: &SpanData) -> JsonValue {
    let (code, message) = match &span.status {
        Status::Unset => (0, String::new()),
        Status::Ok => (1, String::new()),
        Status::Error { description } => (2, description.to_string()),
    };
    let parent = if span.parent_span_id == SpanId::INVALID {
        String::new()
    } else {
        format!("{:016x}", span.parent_span_id)
    };

    json!({
        "traceId": format!("{:032x}", span.span_context.trace_id()),
        "spanId": format!("{:016x}", span.span_context.span_id()),
        "parentSpanId": parent,
        "name": span.name,
        "kind": otlp_kind(&span.span_kind),
        "startTimeUnixNano": unix_nanos(span.start_time),
        "endTimeUnixNano": unix_nanos(span.end_time),
        "attributes": otlp_attributes(span.attributes.iter()),
        "status": { "code": code, "message": message },
    })
}

/// Span exporter writing OTLP-JSON batches through a [`LineSink`].
struct FileExporter {
    sink: LineSink,
    resource: Resource,
    is_shutdown: AtomicBool,
}

impl FileExporter {
    fn document(&self, batch: &[SpanData]) -> JsonValue {
        let resource_attributes: Vec<JsonValue> = self
            .resource
            .iter()
            .map(|(key, value)| json!({ "key": key.as_str(), "value": otlp_value(value) }))
            .collect();

        json!({
            "resourceSpans": [{
                "resource": { "attributes": resource_attributes },
                "scopeSpans": [{
                    "scope": { "name": "repolens" },
                    "spans": batch.iter().map(otlp_span).collect::<Vec<_>>(),
                }],
            }],
        })
    }
}

impl SpanExporter for FileExporter {
    fn export(&mut self, batch: Vec<SpanData>) -> BoxFuture<'static, ExportResult> {
        if self.is_shutdown.load(Ordering::SeqCst) {
            return Box::pin(std::future::ready(Err(TraceError::from("exporter is shut down"))));
        }

        let line = self.document(&batch).to_string();
        let result = self
            .sink
            .write_line(&line)
            .map_err(|e| TraceError::from(format!("{}: {e}", self.sink.path().display())));
        Box::pin(std::future::ready(result))
    }

    fn shutdown(&mut self) {
        self.is_shutdown.store(true, Ordering::SeqCst);
    }
}

impl std::fmt::Debug for FileExporter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileExporter")
            .field("path", &self.sink.path())
            .field("is_shutdown", &self.is_shutdown)
            .finish_non_exhaustive()
    }
}

/// Builds a tracer provider exporting every finished span to `path`.
pub(crate) fn file_tracer_provider(path: PathBuf, resource: Resource) -> TracerProvider {
    let exporter = FileExporter {
        sink: LineSink::new(path, MAX_FILE_BYTES),
        resource: resource.clone(),
        is_shutdown: AtomicBool::new(false),
    };

    TracerProvider::builder()
        .with_config(opentelemetry_sdk::trace::Config::default().with_resource(resource))
        .with_simple_exporter(exporter)
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sink_appends_lines() {
        let dir = tempfile::tempdir().unwrap();
        let sink = LineSink::new(dir.path().join("spans.json"), MAX_FILE_BYTES);

        sink.write_line("{\"a\":1}").unwrap();
        sink.write_line("{\"b\":2}").unwrap();

        let text = fs::read_to_string(sink.path()).unwrap();
        assert_eq!(text, "{\"a\":1}\n{\"b\":2}\n");
    }

    #[test]
    fn oversized_file_is_moved_to_backup() {
        let dir = tempfile::tempdir().unwrap();
        let sink = LineSink::new(dir.path().join("spans.json"), 8);

        sink.write_line("0123456789").unwrap();
        sink.write_line("next").unwrap();

        assert_eq!(fs::read_to_string(dir.path().join("spans.json")).unwrap(), "next\n");
        assert_eq!(fs::read_to_string(dir.path().join("spans.json.1")).unwrap(), "0123456789\n");
    }

    #[test]
    fn attribute_values_use_otlp_shapes() {
        assert_eq!(otlp_value(&Value::I64(3)), json!({ "intValue": "3" }));
        assert_eq!(otlp_value(&Value::Bool(true)), json!({ "boolValue": true }));
        assert_eq!(
            otlp_attributes(&[KeyValue::new("service.name", "repolens")]),
            vec![json!({ "key": "service.name", "value": { "stringValue": "repolens" } })]
        );
    }
}
