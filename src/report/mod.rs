/*!
 * Report Module
 * Everything a finished run produced, and its renderings
 */

mod json;
mod text;

pub use json::render_json;
pub use text::render_text;

use crate::core::config::SystemConfig;
use crate::core::limits::REPORT_FORMAT_ENV;
use crate::core::types::{KernelResult, Tick, Word};
use crate::monitoring::EventLog;
use crate::scheduler::{CompletionRecord, LoadRejection, SchedulerStats};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Outcome of one simulation run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationReport {
    /// Correlates the report with the run's log lines
    pub run_id: String,
    pub config: SystemConfig,
    pub rejections: Vec<LoadRejection>,
    /// Memory image right after every job was loaded
    pub memory_after_load: Vec<Word>,
    /// Chronological event log, load phase included
    pub events: EventLog,
    /// Termination records in termination order
    pub completions: Vec<CompletionRecord>,
    pub stats: SchedulerStats,
    pub total_cpu_time: Tick,
    pub final_memory: Vec<Word>,
}

/// Output format of the report
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ReportFormat {
    #[default]
    Text,
    Json,
}

impl ReportFormat {
    /// Read the format from `KERNEL_REPORT_FORMAT`, defaulting to text
    pub fn from_env() -> Self {
        std::env::var(REPORT_FORMAT_ENV)
            .ok()
            .and_then(|value| value.parse().ok())
            .unwrap_or_default()
    }

    pub fn render(self, report: &SimulationReport) -> KernelResult<String> {
        match self {
            ReportFormat::Text => Ok(render_text(report)),
            ReportFormat::Json => render_json(report),
        }
    }
}

impl FromStr for ReportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" | "txt" => Ok(ReportFormat::Text),
            "json" => Ok(ReportFormat::Json),
            other => Err(format!("unknown report format: {other}")),
        }
    }
}
