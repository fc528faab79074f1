//! Render `tracing` events into concise logfmt lines.
//!
//! [`render_event`] extracts level, target, message and the remaining fields
//! from an event. [`Logfmt`] plugs the same rendering into a
//! `tracing_subscriber` fmt layer.

use std::fmt::{Debug, Result as FmtResult, Write};

use tracing::{
    Event, Metadata, Subscriber,
    field::{Field, Visit},
};
use tracing_subscriber::{
    fmt::{FmtContext, FormatEvent, FormatFields, format::Writer},
    registry::LookupSpan,
};

/// Rendered fields extracted from a tracing Event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedLog {
    /// Severity level (e.g., INFO, WARN) for the event.
    pub level: String,
    /// Event target (typically the module path).
    pub target: String,
    /// The `message` field, or the rendered fields when there is none.
    pub message: String,
    /// Non-message fields as space-separated `key=value` pairs.
    pub fields: String,
}

impl RenderedLog {
    /// Single-line logfmt rendering.
    pub fn line(&self) -> String {
        let mut out = format!("level={} target={}", self.level, self.target);
        if !self.message.is_empty() {
            let _ignored = write!(out, " msg={:?}", self.message);
        }
        if !self.fields.is_empty() && self.fields != self.message {
            out.push(' ');
            out.push_str(&self.fields);
        }
        out
    }
}

/// Extract level, target, message and fields from a tracing Event.
///
/// Behavior:
/// - If the event contains a `message` field, use it.
/// - Otherwise, the message is the concatenated `key=value` pairs.
pub fn render_event(event: &Event<'_>) -> RenderedLog {
    struct MsgVisitor {
        /// Captured `message` field, if present.
        msg: Option<String>,
        /// Accumulated non-message fields rendered as `key=value`.
        fields: String,
    }
    impl Visit for MsgVisitor {
        fn record_str(&mut self, field: &Field, value: &str) {
            if field.name() == "message" {
                self.msg = Some(value.to_string());
            } else {
                let _ignored = write!(&mut self.fields, "{}=\"{}\" ", field.name(), value);
            }
        }
        fn record_debug(&mut self, field: &Field, value: &dyn Debug) {
            if field.name() == "message" {
                self.msg = Some(format!("{:?}", value));
            } else {
                let _ignored = write!(&mut self.fields, "{}={:?} ", field.name(), value);
            }
        }
    }
    let meta: &Metadata<'_> = event.metadata();
    let mut vis = MsgVisitor {
        msg: None,
        fields: String::new(),
    };
    event.record(&mut vis);
    let fields = vis.fields.trim_end().to_string();
    RenderedLog {
        level: meta.level().to_string(),
        target: meta.target().to_string(),
        message: vis.msg.unwrap_or_else(|| fields.clone()),
        fields,
    }
}

/// Event formatter producing one logfmt line per event.
#[derive(Debug, Clone, Copy, Default)]
pub struct Logfmt;

impl<S, N> FormatEvent<S, N> for Logfmt
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        _ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> FmtResult {
        writeln!(writer, "{}", render_event(event).line())
    }
}
