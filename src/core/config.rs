/*!
 * System Configuration
 * Machine parameters read from the head of the job file
 */

use super::errors::ConfigError;
use super::types::{Cycles, Size};
use serde::{Deserialize, Serialize};

/// Parameters shared by every process in a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct SystemConfig {
    /// Number of cells in the memory image
    pub max_memory: Size,
    /// Time slice length in cycles
    pub cpu_allocated: Cycles,
    /// Clock charge for every dispatch
    pub context_switch_time: Cycles,
}

impl SystemConfig {
    #[inline]
    #[must_use]
    pub const fn new(max_memory: Size, cpu_allocated: Cycles, context_switch_time: Cycles) -> Self {
        Self {
            max_memory,
            cpu_allocated,
            context_switch_time,
        }
    }

    /// Reject parameters the scheduler cannot make progress with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_memory == 0 {
            return Err(ConfigError::EmptyMemory);
        }
        if self.cpu_allocated == 0 {
            return Err(ConfigError::ZeroTimeSlice);
        }
        Ok(())
    }
}
