//! Span exporter that writes one JSON object per finished span.
//!
//! Each line looks like:
//!
//! ```json
//! {"service":"MachineTracker","name":"locate","traceId":"…","spanId":"…",
//!  "parentSpanId":"","startUnixNano":"…","durationMicros":412,
//!  "attributes":{"item_code":"A1"},"events":[{"name":"lookup failed","attributes":{}}],
//!  "status":"unset"}
//! ```

use super::sink::{RotatingSink, RotationPolicy};
use futures_util::future::BoxFuture;
use opentelemetry::trace::{SpanId, Status, TraceError};
use opentelemetry::{KeyValue, Value};
use opentelemetry_sdk::export::trace::{ExportResult, SpanData, SpanExporter};
use opentelemetry_sdk::resource::Resource;
use opentelemetry_sdk::trace::TracerProvider;
use serde_json::{json, Map, Value as JsonValue};
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

struct FileSpanExporter {
    service: String,
    sink: RotatingSink,
    stopped: bool,
}

impl SpanExporter for FileSpanExporter {
    fn export(&mut self, batch: Vec<SpanData>) -> BoxFuture<'static, ExportResult> {
        if self.stopped {
            return Box::pin(std::future::ready(Err(TraceError::from(
                "span exporter already shut down",
            ))));
        }

        let result = batch
            .iter()
            .map(|span| span_record(&self.service, span).to_string())
            .try_for_each(|line| self.sink.append(&line))
            .map_err(|e| TraceError::from(e.to_string()));

        Box::pin(std::future::ready(result))
    }

    fn shutdown(&mut self) {
        self.stopped = true;
    }
}

impl std::fmt::Debug for FileSpanExporter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileSpanExporter")
            .field("service", &self.service)
            .field("sink", &self.sink)
            .field("stopped", &self.stopped)
            .finish()
    }
}

/// Builds a provider whose spans are exported synchronously to `file_path`.
pub fn file_tracer_provider(file_path: PathBuf, service: &str) -> TracerProvider {
    let exporter = FileSpanExporter {
        service: service.to_string(),
        sink: RotatingSink::new(file_path, RotationPolicy::default()),
        stopped: false,
    };

    let resource = Resource::new(vec![KeyValue::new("service.name", service.to_string())]);

    TracerProvider::builder()
        .with_config(opentelemetry_sdk::trace::Config::default().with_resource(resource))
        .with_simple_exporter(exporter)
        .build()
}

fn span_record(service: &str, span: &SpanData) -> JsonValue {
    let parent = if span.parent_span_id == SpanId::INVALID {
        String::new()
    } else {
        format!("{:016x}", span.parent_span_id)
    };

    let duration = span
        .end_time
        .duration_since(span.start_time)
        .map_or(0, |d| d.as_micros());

    let events: Vec<JsonValue> = span
        .events
        .iter()
        .map(|event| {
            json!({
                "name": event.name,
                "attributes": attribute_map(&event.attributes),
            })
        })
        .collect();

    json!({
        "service": service,
        "name": span.name,
        "traceId": format!("{:032x}", span.span_context.trace_id()),
        "spanId": format!("{:016x}", span.span_context.span_id()),
        "parentSpanId": parent,
        "startUnixNano": unix_nanos(span.start_time).to_string(),
        "durationMicros": duration,
        "attributes": attribute_map(&span.attributes),
        "events": events,
        "status": status_label(&span.status),
    })
}

fn unix_nanos(time: SystemTime) -> u128 {
    time.duration_since(UNIX_EPOCH).map_or(0, |d| d.as_nanos())
}

/// Flattens key/value pairs into one JSON object; later keys win.
fn attribute_map(attributes: &[KeyValue]) -> JsonValue {
    let map: Map<String, JsonValue> = attributes
        .iter()
        .map(|kv| (kv.key.to_string(), attribute_value(&kv.value)))
        .collect();
    JsonValue::Object(map)
}

fn attribute_value(value: &Value) -> JsonValue {
    match value {
        Value::Bool(b) => json!(b),
        Value::I64(i) => json!(i),
        Value::F64(f) => json!(f),
        Value::String(s) => json!(s.as_str()),
        Value::Array(_) => json!(value.to_string()),
    }
}

fn status_label(status: &Status) -> String {
    match status {
        Status::Unset => "unset".to_string(),
        Status::Ok => "ok".to_string(),
        Status::Error { description } => format!("error: {description}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attributes_flatten_to_object() {
        let attrs = [
            KeyValue::new("item_code", "A1"),
            KeyValue::new("status", 404_i64),
            KeyValue::new("found", false),
        ];
        assert_eq!(
            attribute_map(&attrs),
            json!({"item_code": "A1", "status": 404, "found": false})
        );
    }

    #[test]
    fn status_labels() {
        assert_eq!(status_label(&Status::Ok), "ok");
        assert_eq!(
            status_label(&Status::error("API request failed")),
            "error: API request failed"
        );
    }
}
