//! In-memory event capture for log assertions in tests
//!
//! Installs a global subscriber whose only layer records every event's
//! fields as strings. Tests in one binary share the buffer, so filter by op
//! name or by request id.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex, OnceLock};
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::Layer;

use celltrack_core_types::schema::{FIELD_COMPONENT, FIELD_EVENT, FIELD_OP, FIELD_REQUEST_ID};

/// One recorded event
#[derive(Clone, Debug)]
pub struct CapturedEvent {
    pub level: Level,
    pub component: Option<String>,
    pub op: Option<String>,
    pub event: Option<String>,
    pub fields: HashMap<String, String>,
}

impl CapturedEvent {
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    fn is(&self, op: &str, event: &str) -> bool {
        self.op.as_deref() == Some(op) && self.event.as_deref() == Some(event)
    }
}

#[derive(Default)]
struct Fields(HashMap<String, String>);

impl Visit for Fields {
    // Numbers and bools arrive here too; their Debug form is the plain value
    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        self.0.insert(field.name().to_string(), format!("{:?}", value));
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        self.0.insert(field.name().to_string(), value.to_string());
    }
}

type Buffer = Arc<Mutex<Vec<CapturedEvent>>>;

struct CaptureLayer {
    buffer: Buffer,
}

impl<S: Subscriber> Layer<S> for CaptureLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let mut fields = Fields::default();
        event.record(&mut fields);
        let fields = fields.0;

        let captured = CapturedEvent {
            level: *event.metadata().level(),
            component: fields.get(FIELD_COMPONENT).cloned(),
            op: fields.get(FIELD_OP).cloned(),
            event: fields.get(FIELD_EVENT).cloned(),
            fields,
        };
        if let Ok(mut buffer) = self.buffer.lock() {
            buffer.push(captured);
        }
    }
}

/// Read handle over the shared buffer
#[derive(Clone)]
pub struct TestCapture {
    buffer: Buffer,
}

impl TestCapture {
    /// Everything recorded so far, in emission order
    pub fn events(&self) -> Vec<CapturedEvent> {
        self.buffer
            .lock()
            .map(|buffer| buffer.clone())
            .unwrap_or_default()
    }

    pub fn events_for(&self, op: &str) -> Vec<CapturedEvent> {
        self.select(|e| e.op.as_deref() == Some(op))
    }

    /// Events tagged with one gateway call's request id
    pub fn events_for_request(&self, request_id: &str) -> Vec<CapturedEvent> {
        self.select(|e| e.field(FIELD_REQUEST_ID) == Some(request_id))
    }

    pub fn count(&self, op: &str, event: &str) -> usize {
        self.select(|e| e.is(op, event)).len()
    }

    /// # Panics
    ///
    /// Panics when no `event` was recorded for `op`
    pub fn assert_event_exists(&self, op: &str, event: &str) {
        assert!(
            self.count(op, event) > 0,
            "no {} event recorded for op {}",
            event,
            op
        );
    }

    fn select(&self, keep: impl Fn(&CapturedEvent) -> bool) -> Vec<CapturedEvent> {
        self.events().into_iter().filter(|e| keep(e)).collect()
    }
}

static CAPTURE: OnceLock<TestCapture> = OnceLock::new();

/// Install the capture subscriber on first use and return the shared handle
pub fn init_test_capture() -> TestCapture {
    CAPTURE
        .get_or_init(|| {
            let buffer = Buffer::default();
            let layer = CaptureLayer {
                buffer: buffer.clone(),
            };
            let _ = tracing_subscriber::registry().with(layer).try_init();
            TestCapture { buffer }
        })
        .clone()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_matching() {
        let mut fields = HashMap::new();
        fields.insert("rows".to_string(), "3".to_string());
        let event = CapturedEvent {
            level: Level::INFO,
            component: Some("celltrack_engine::gateway".to_string()),
            op: Some("list_cells".to_string()),
            event: Some("end".to_string()),
            fields,
        };

        assert_eq!(event.field("rows"), Some("3"));
        assert_eq!(event.field("missing"), None);
        assert!(event.is("list_cells", "end"));
        assert!(!event.is("list_cells", "start"));
    }
}
