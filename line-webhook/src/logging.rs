//! JSON log lines for CloudWatch.
//!
//! Every event is written as a single JSON object:
//! `{"severity":"info","message":"...","timestamp":"2024-06-11T01:02:03.456Z", ...fields}`

use chrono::{SecondsFormat, Utc};
use serde_json::{Map, Value};
use std::fmt;
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::{FmtContext, FormatEvent, FormatFields};
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::EnvFilter;

pub const SEVERITY: &str = "severity";
pub const MESSAGE: &str = "message";
pub const TIMESTAMP: &str = "timestamp";

/// Initializes the tracing from RUST_LOG env var if present or sets INFO level for everything.
/// Output goes to stdout which is collected by CloudWatch.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .from_env_lossy(),
        )
        .with_ansi(false)
        .event_format(JsonLineFormat)
        .init();
}

/// Formats events as JSON lines with `severity`, `message` and `timestamp` keys.
/// Structured fields of the event are added as top-level keys.
/// Span context is not included.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonLineFormat;

impl<S, N> FormatEvent<S, N> for JsonLineFormat
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(&self, _ctx: &FmtContext<'_, S, N>, mut writer: Writer<'_>, event: &Event<'_>) -> fmt::Result {
        let mut visitor = JsonVisitor::default();
        event.record(&mut visitor);

        let mut line = Map::new();
        line.insert(SEVERITY.to_owned(), Value::from(severity(event.metadata().level())));
        line.insert(MESSAGE.to_owned(), Value::from(visitor.message));
        line.insert(
            TIMESTAMP.to_owned(),
            Value::from(Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)),
        );
        // fields cannot override the three keys above
        for (key, value) in visitor.fields {
            line.entry(key).or_insert(value);
        }

        writeln!(writer, "{}", Value::Object(line))
    }
}

/// Level names as used by logrus-style JSON loggers.
fn severity(level: &Level) -> &'static str {
    match *level {
        Level::ERROR => "error",
        Level::WARN => "warning",
        Level::INFO => "info",
        Level::DEBUG => "debug",
        _ => "trace",
    }
}

/// Collects the message and the fields of a single event.
#[derive(Default)]
struct JsonVisitor {
    message: String,
    fields: Vec<(String, Value)>,
}

impl JsonVisitor {
    fn record(&mut self, field: &Field, value: Value) {
        if field.name() == MESSAGE {
            match value {
                Value::String(v) => self.message = v,
                v => self.message = v.to_string(),
            }
        } else {
            self.fields.push((field.name().to_owned(), value));
        }
    }
}

impl Visit for JsonVisitor {
    fn record_f64(&mut self, field: &Field, value: f64) {
        self.record(field, Value::from(value));
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.record(field, Value::from(value));
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        self.record(field, Value::from(value));
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        self.record(field, Value::from(value));
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        self.record(field, Value::from(value));
    }

    fn record_error(&mut self, field: &Field, value: &(dyn std::error::Error + 'static)) {
        self.record(field, Value::from(value.to_string()));
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        self.record(field, Value::from(format!("{value:?}")));
    }
}
