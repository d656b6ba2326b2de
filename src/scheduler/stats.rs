/*!
 * Scheduler Statistics
 * Counters and derived metrics for a run
 */

use super::types::SchedulerStats;
use super::Scheduler;

impl Scheduler {
    /// Snapshot of the run counters
    #[inline]
    pub fn stats(&self) -> SchedulerStats {
        self.stats
    }

    /// Mean of `terminated_at - started_at` over completed processes
    pub fn average_execution_time(&self) -> Option<f64> {
        if self.completions.is_empty() {
            return None;
        }
        let total: u64 = self
            .completions
            .iter()
            .map(|record| record.total_execution_time)
            .sum();
        Some(total as f64 / self.completions.len() as f64)
    }
}
