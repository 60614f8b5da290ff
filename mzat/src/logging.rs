use anyhow::Result;
use chrono::Local;
use std::path::PathBuf;
use tracing::Subscriber;
use tracing_subscriber::{
    fmt, layer::SubscriberExt, registry::LookupSpan, util::SubscriberInitExt, EnvFilter, Layer,
};

use crate::log_buffer::{LogBuffer, LogEntry};

/// One log file per run under the platform data dir, plus the in-memory
/// layer that feeds the logs screen.
///
/// Returns the path of the file created for this run, named
/// `mzat-YYYY-MM-DD-HH-MM-SS.log`.
pub fn init_logging_with_buffer(buffer: LogBuffer) -> Result<PathBuf> {
    let logs_dir = dirs::data_dir()
        .ok_or(anyhow::anyhow!("Could not find data directory"))?
        .join("mzat")
        .join("logs");
    std::fs::create_dir_all(&logs_dir)?;

    let file_name = format!("mzat-{}.log", Local::now().format("%Y-%m-%d-%H-%M-%S"));
    let (writer, guard) =
        tracing_appender::non_blocking(tracing_appender::rolling::never(&logs_dir, &file_name));

    let file_layer = fmt::layer()
        .with_writer(writer)
        .with_ansi(false) // plain text in the file
        .with_target(true)
        .with_thread_ids(true)
        .with_line_number(true);

    // INFO unless RUST_LOG says otherwise
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .with(LogBufferLayer::new(buffer))
        .init();

    // The non-blocking writer stops on guard drop; leak it so the file
    // keeps receiving events for the whole run
    std::mem::forget(guard);

    Ok(logs_dir.join(file_name))
}

/// Forwards every accepted event into the ring buffer behind the logs
/// screen.
pub struct LogBufferLayer {
    buffer: LogBuffer,
}

impl LogBufferLayer {
    pub fn new(buffer: LogBuffer) -> Self {
        Self { buffer }
    }
}

impl<S> Layer<S> for LogBufferLayer
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    fn on_event(
        &self,
        event: &tracing::Event<'_>,
        _ctx: tracing_subscriber::layer::Context<'_, S>,
    ) {
        let mut visitor = MessageVisitor::default();
        event.record(&mut visitor);

        self.buffer.push(LogEntry {
            timestamp: chrono::Local::now(),
            level: *event.metadata().level(),
            target: event.metadata().target().to_string(),
            message: visitor.message.unwrap_or_default(),
        });
    }
}

/// Pulls the `message` field out of an event; other fields are dropped.
#[derive(Default)]
struct MessageVisitor {
    message: Option<String>,
}

impl tracing::field::Visit for MessageVisitor {
    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        if field.name() == "message" {
            self.message = Some(value.to_string());
        }
    }

    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        if field.name() == "message" {
            self.message = Some(format!("{value:?}"));
        }
    }
}
