/*!
 * Scheduler Types
 * Records produced by the scheduler for its consumers
 */

use crate::core::types::{Pid, Tick};
use crate::execution::SliceReport;
use crate::process::{PcbHeader, ProcessError};
use serde::{Deserialize, Serialize};

/// Termination metrics for one process
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct CompletionRecord {
    /// Header as it stood at termination
    pub header: PcbHeader,
    /// Clock value of the first dispatch
    pub started_at: Tick,
    pub terminated_at: Tick,
    /// `terminated_at - started_at`
    pub total_execution_time: Tick,
}

impl CompletionRecord {
    #[inline]
    pub fn pid(&self) -> Pid {
        self.header.process_id
    }
}

/// A job that never made it into memory
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadRejection {
    pub pid: Pid,
    pub error: ProcessError,
}

impl LoadRejection {
    /// Whether the job was dropped for lack of memory
    pub fn is_capacity(&self) -> bool {
        matches!(self.error, ProcessError::InsufficientMemory { .. })
    }
}

/// Result of one scheduling pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepOutcome {
    pub pid: Pid,
    pub slice: SliceReport,
}

/// Scheduler statistics
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchedulerStats {
    pub loaded: u64,
    pub rejected: u64,
    pub dispatches: u64,
    pub timeouts: u64,
    pub io_interrupts: u64,
    pub io_completions: u64,
    pub idle_ticks: u64,
    pub address_faults: u64,
    pub invariant_violations: u64,
    pub terminated: u64,
}
