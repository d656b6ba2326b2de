/*!
 * Structured Tracing
 * Logging setup and run-level spans using the tracing crate
 *
 * Log output always goes to stderr; stdout is reserved for the report.
 */

use crate::core::limits::TRACE_JSON_ENV;
use crate::core::types::Tick;
use std::time::Instant;
use tracing::{debug, info, span, Level, Span};
use tracing_subscriber::{
    fmt::format::FmtSpan, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter,
};
use uuid::Uuid;

/// Initialize structured tracing
///
/// Environment variables:
/// - RUST_LOG: Set log level (default: info)
/// - KERNEL_TRACE_JSON: Enable JSON output (default: false)
///
/// Calling this more than once is harmless; later calls keep the first subscriber.
pub fn init_tracing() {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let use_json = std::env::var(TRACE_JSON_ENV)
        .map(|v| v == "1" || v == "true")
        .unwrap_or(false);

    let registry = tracing_subscriber::registry().with(env_filter);

    let installed = if use_json {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr)
                    .with_target(true)
                    .with_line_number(true)
                    .with_file(true)
                    .with_current_span(true)
                    .with_span_list(true)
                    .with_span_events(FmtSpan::CLOSE),
            )
            .try_init()
    } else {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(true)
                    .with_line_number(true)
                    .with_span_events(FmtSpan::CLOSE)
                    .compact(),
            )
            .try_init()
    };

    if installed.is_ok() {
        debug!(json = use_json, "structured tracing initialized");
    }
}

/// Generate a unique ID correlating the logs of one simulation run
pub fn generate_run_id() -> String {
    Uuid::new_v4().to_string()
}

/// Span covering one simulation run
pub struct RunSpan {
    span: Span,
    start: Instant,
    run_id: String,
}

impl RunSpan {
    pub fn new(run_id: String, processes: usize) -> Self {
        let span = span!(
            Level::INFO,
            "simulation",
            run_id = %run_id,
            processes,
            total_cpu_time = tracing::field::Empty,
            dispatches = tracing::field::Empty,
        );

        Self {
            span,
            start: Instant::now(),
            run_id,
        }
    }

    pub fn run_id(&self) -> &str {
        &self.run_id
    }

    pub fn span(&self) -> &Span {
        &self.span
    }

    /// Record the final numbers of the run
    pub fn record_finish(&self, total_cpu_time: Tick, dispatches: u64) {
        self.span.record("total_cpu_time", total_cpu_time);
        self.span.record("dispatches", dispatches);
        let _entered = self.span.enter();
        info!(
            run_id = %self.run_id,
            total_cpu_time,
            dispatches,
            wall_us = self.start.elapsed().as_micros() as u64,
            "simulation drained"
        );
    }
}
