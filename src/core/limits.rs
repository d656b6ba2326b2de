/*!
 * System Limits and Constants
 *
 * Centralized location for the fixed numbers of the simulated machine.
 */

use super::types::{Cycles, Size, Word};

// =============================================================================
// MEMORY LAYOUT
// =============================================================================

/// Number of cells reserved at the start of every process region for the PCB header
pub const PCB_HEADER_SIZE: Size = 10;

/// Value of a memory cell that no process has written
pub const SENTINEL: Word = -1;

/// Register value left behind by a failed LOAD
pub const REGISTER_FAULT: Word = -1;

// =============================================================================
// INSTRUCTION COSTS
// =============================================================================

/// Cycles charged by a STORE or LOAD, regardless of outcome
pub const MEMORY_ACCESS_COST: Cycles = 1;

// =============================================================================
// SCHEDULER
// =============================================================================

/// Smallest clock advance while the CPU idles on I/O.
/// Used when the context switch cost is zero so the busy-wait still makes progress.
pub const MIN_IDLE_STEP: Cycles = 1;

// =============================================================================
// ENVIRONMENT
// =============================================================================

/// Enables JSON log output when set to `1` or `true`
pub const TRACE_JSON_ENV: &str = "KERNEL_TRACE_JSON";

/// Selects the report format (`text` or `json`)
pub const REPORT_FORMAT_ENV: &str = "KERNEL_REPORT_FORMAT";
