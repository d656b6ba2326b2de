/*!
 * Simulated Kernel Library
 * Single-CPU round-robin scheduler over a flat simulated memory image
 */

pub mod core;
pub mod execution;
pub mod input;
pub mod memory;
pub mod monitoring;
pub mod process;
pub mod report;
pub mod scheduler;
pub mod simulation;

// Re-exports
pub use crate::core::errors::*;
pub use crate::core::types::{Address, Cycles, KernelResult, Pid, Tick, Word};
pub use crate::core::{SimClock, SystemConfig};
pub use execution::{run_slice, ExecutionContext, SliceOutcome, SliceReport};
pub use input::{parse, read_input, SimulationInput};
pub use memory::{MemoryImage, MemoryStats};
pub use monitoring::{init_tracing, Event, EventLog, Payload};
pub use process::{Instruction, JobDescriptor, Pcb, PcbHeader, ProcessState, Program};
pub use report::{render_json, render_text, ReportFormat, SimulationReport};
pub use scheduler::{CompletionRecord, LoadRejection, Scheduler, SchedulerStats, StepOutcome};
pub use simulation::simulate;
