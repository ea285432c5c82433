#![allow(dead_code)]
use std::{
    collections::VecDeque,
    sync::{Arc, Once},
};

use async_trait::async_trait;
use incident_notifier::transport::{Response, Transport};
use reqwest::StatusCode;
use serde_json::Value;
use tracing::{
    field::{Field, Visit},
    span, Subscriber,
};
use tracing_subscriber::{
    layer::{Context, SubscriberExt},
    registry::LookupSpan,
    Layer, Registry,
};

pub const SERVICE_ID: &str = "PSERVICE";

#[derive(Clone, Debug)]
pub struct Call {
    pub method: &'static str,
    pub path: String,
    pub body: Value,
}

/// Records every request and answers with queued responses, in order
#[derive(Default)]
pub struct TestTransport {
    calls: Arc<parking_lot::Mutex<Vec<Call>>>,
    responses: parking_lot::Mutex<VecDeque<anyhow::Result<Response>>>,
}

impl TestTransport {
    pub fn calls(&self) -> Arc<parking_lot::Mutex<Vec<Call>>> {
        self.calls.clone()
    }

    pub fn respond(self, status: u16, body: Value) -> Self {
        self.responses.lock().push_back(Ok(Response {
            status: StatusCode::from_u16(status).unwrap(),
            body,
        }));
        self
    }

    pub fn fail(self, message: &str) -> Self {
        self.responses
            .lock()
            .push_back(Err(anyhow::format_err!(message.to_owned())));
        self
    }

    fn answer(
        &self,
        method: &'static str,
        path: &[&str],
        body: &Value,
    ) -> anyhow::Result<Response> {
        self.calls.lock().push(Call {
            method,
            path: format!("/{}", path.join("/")),
            body: body.clone(),
        });
        self.responses
            .lock()
            .pop_front()
            .unwrap_or_else(|| Err(anyhow::format_err!("No response queued")))
    }
}

#[async_trait]
impl Transport for TestTransport {
    async fn post(&self, path: &[&str], body: &Value) -> anyhow::Result<Response> {
        self.answer("POST", path, body)
    }

    async fn put(&self, path: &[&str], body: &Value) -> anyhow::Result<Response> {
        self.answer("PUT", path, body)
    }
}

const RECORDED_FIELDS: [&str; 3] = ["request", "response", "error"];

/// Collects `request`, `response` and `error` fields recorded on spans
#[derive(Clone, Default)]
pub struct SpanFields {
    fields: Arc<parking_lot::Mutex<Vec<SpanField>>>,
}

#[derive(Clone, Debug)]
pub struct SpanField {
    pub span: &'static str,
    pub name: &'static str,
    pub value: String,
}

impl SpanFields {
    /// Installs a collector for the current thread
    pub fn install() -> (Self, tracing::subscriber::DefaultGuard) {
        let fields = Self::default();
        let guard = tracing::subscriber::set_default(Registry::default().with(fields.clone()));
        (fields, guard)
    }

    /// (span name, value) pairs recorded for field `name`, in order
    pub fn get(&self, name: &str) -> Vec<(&'static str, String)> {
        self.fields
            .lock()
            .iter()
            .filter(|field| field.name == name)
            .map(|field| (field.span, field.value.clone()))
            .collect()
    }
}

impl<S> Layer<S> for SpanFields
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    fn on_record(&self, id: &span::Id, values: &span::Record<'_>, ctx: Context<'_, S>) {
        let Some(span) = ctx.span(id) else {
            return;
        };
        let mut visitor = FieldVisitor {
            span: span.name(),
            recorded: Vec::new(),
        };
        values.record(&mut visitor);
        self.fields.lock().extend(visitor.recorded);
    }
}

struct FieldVisitor {
    span: &'static str,
    recorded: Vec<SpanField>,
}

impl Visit for FieldVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        if let Some(name) = RECORDED_FIELDS
            .iter()
            .copied()
            .find(|name| *name == field.name()) {
            self.recorded.push(SpanField {
                span: self.span,
                name,
                value: format!("{value:?}"),
            });
        }
    }
}

struct CapturedLogs;

static LOG_LINES: std::sync::Mutex<Vec<(log::Level, String)>> = std::sync::Mutex::new(Vec::new());
static LOGGER: CapturedLogs = CapturedLogs;

impl log::Log for CapturedLogs {
    fn enabled(&self, _metadata: &log::Metadata) -> bool {
        true
    }

    fn log(&self, record: &log::Record) {
        LOG_LINES
            .lock()
            .unwrap()
            .push((record.level(), record.args().to_string()));
    }

    fn flush(&self) {}
}

pub fn capture_logs() {
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        log::set_logger(&LOGGER).unwrap();
        log::set_max_level(log::LevelFilter::Trace);
    });
}

/// Every line logged at `level`
pub fn log_lines(level: log::Level) -> Vec<String> {
    LOG_LINES
        .lock()
        .unwrap()
        .iter()
        .filter(|(l, _)| *l == level)
        .map(|(_, line)| line.clone())
        .collect()
}

/// Whether a line at `level` containing every one of `needles` was logged
pub fn logged(level: log::Level, needles: &[&str]) -> bool {
    LOG_LINES
        .lock()
        .unwrap()
        .iter()
        .any(|(l, line)| *l == level && needles.iter().all(|needle| line.contains(needle)))
}
