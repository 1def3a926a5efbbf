//! Unified JSON logging.
//!
//! Log format:
//! ```json
//! {"ts":"2026-01-28T15:04:05.123Z","level":"info","type":"app","msg":"Server started","ctx":{"service":"hpp_guard"},"data":{}}
//! ```
//!
//! Events with target `access` are rendered as `"METHOD /path STATUS"`.

use std::collections::HashMap;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use tracing::{Event, Level, Subscriber};
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::{FmtContext, FormatEvent, FormatFields};
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::{LogFormat, LoggingConfig};

/// Install the global subscriber described by `config`.
///
/// Fails if a global subscriber is already set.
pub fn init(config: &LoggingConfig) -> Result<(), tracing_subscriber::util::TryInitError> {
    let filter = EnvFilter::try_new(&config.filter).unwrap_or_else(|_| EnvFilter::new("info"));

    match config.format {
        LogFormat::Json => tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .event_format(JsonFormatter::new(config.service_name.clone())),
            )
            .try_init(),
        LogFormat::Pretty => tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .try_init(),
    }
}

/// Custom JSON formatter for tracing.
pub struct JsonFormatter {
    service_name: String,
}

impl JsonFormatter {
    pub fn new(service_name: impl Into<String>) -> Self {
        Self {
            service_name: service_name.into(),
        }
    }
}

impl<S, N> FormatEvent<S, N> for JsonFormatter
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        _ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> std::fmt::Result {
        let meta = event.metadata();
        let level = match *meta.level() {
            Level::TRACE | Level::DEBUG => "debug",
            Level::INFO => "info",
            Level::WARN => "warn",
            Level::ERROR => "error",
        };

        let log_type = if meta.target() == "access" {
            "access"
        } else if *meta.level() == Level::ERROR {
            "error"
        } else {
            "app"
        };

        let mut visitor = FieldVisitor::new();
        event.record(&mut visitor);

        let msg = if log_type == "access" {
            access_message(&visitor.fields)
        } else {
            visitor.message.clone().unwrap_or_default()
        };

        let mut data = visitor.fields;
        if log_type != "access" {
            data.remove("message");
        }

        let entry = serde_json::json!({
            "ts": iso8601(SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default()),
            "level": level,
            "type": log_type,
            "msg": msg,
            "ctx": { "service": &self.service_name },
            "data": data,
        });

        writeln!(
            writer,
            "{}",
            serde_json::to_string(&entry).unwrap_or_default()
        )
    }
}

/// "METHOD /path STATUS" for access events.
fn access_message(fields: &HashMap<String, serde_json::Value>) -> String {
    let method = fields.get("method").and_then(|v| v.as_str()).unwrap_or("?");
    let path = fields.get("path").and_then(|v| v.as_str()).unwrap_or("?");
    let status = fields.get("status").and_then(|v| v.as_u64()).unwrap_or(0);
    format!("{} {} {}", method, path, status)
}

/// Field visitor for collecting tracing fields.
struct FieldVisitor {
    message: Option<String>,
    fields: HashMap<String, serde_json::Value>,
}

impl FieldVisitor {
    fn new() -> Self {
        Self {
            message: None,
            fields: HashMap::new(),
        }
    }
}

impl tracing::field::Visit for FieldVisitor {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        if field.name() == "message" {
            self.message = Some(format!("{:?}", value).trim_matches('"').to_string());
        } else {
            self.fields.insert(
                field.name().to_string(),
                serde_json::Value::String(format!("{:?}", value)),
            );
        }
    }

    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        if field.name() == "message" {
            self.message = Some(value.to_string());
        } else {
            self.fields.insert(
                field.name().to_string(),
                serde_json::Value::String(value.to_string()),
            );
        }
    }

    fn record_i64(&mut self, field: &tracing::field::Field, value: i64) {
        self.fields
            .insert(field.name().to_string(), serde_json::json!(value));
    }

    fn record_u64(&mut self, field: &tracing::field::Field, value: u64) {
        self.fields
            .insert(field.name().to_string(), serde_json::json!(value));
    }

    fn record_f64(&mut self, field: &tracing::field::Field, value: f64) {
        self.fields
            .insert(field.name().to_string(), serde_json::json!(value));
    }

    fn record_bool(&mut self, field: &tracing::field::Field, value: bool) {
        self.fields
            .insert(field.name().to_string(), serde_json::json!(value));
    }
}

/// Format a UNIX-epoch offset as `YYYY-MM-DDTHH:MM:SS.mmmZ` (UTC).
fn iso8601(since_epoch: Duration) -> String {
    let secs = since_epoch.as_secs();
    let millis = since_epoch.subsec_millis();

    let day_secs = secs % 86400;
    let (hours, minutes, seconds) = (day_secs / 3600, (day_secs % 3600) / 60, day_secs % 60);

    let mut remaining = secs / 86400;
    let mut year = 1970u64;
    loop {
        let year_days = if is_leap_year(year) { 366 } else { 365 };
        if remaining < year_days {
            break;
        }
        remaining -= year_days;
        year += 1;
    }

    let month_days: [u64; 12] = if is_leap_year(year) {
        [31, 29, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31]
    } else {
        [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31]
    };

    let mut month = 1;
    for days_in_month in month_days {
        if remaining < days_in_month {
            break;
        }
        remaining -= days_in_month;
        month += 1;
    }

    format!(
        "{:04}-{:02}-{:02}T{:02}:{:02}:{:02}.{:03}Z",
        year,
        month,
        remaining + 1,
        hours,
        minutes,
        seconds,
        millis
    )
}

#[inline]
const fn is_leap_year(year: u64) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}
