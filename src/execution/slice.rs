/*!
 * Time Slice Execution
 * Runs one process until timeout, I/O, or program exhaustion
 */

use super::handlers::{self, Effect};
use crate::core::clock::SimClock;
use crate::core::types::{Cycles, Tick};
use crate::memory::MemoryImage;
use crate::monitoring::{EventLog, Payload};
use crate::process::{HeaderField, Pcb, ProcessResult, ProcessState};
use tracing::trace;

/// Why a slice ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SliceOutcome {
    /// Program counter reached the instruction count
    Terminated,
    /// A PRINT blocked the process until `release_at`
    IoWait { release_at: Tick },
    /// Slice budget used up
    Timeout,
    /// Nothing ran and nothing finished; only reachable with an empty budget
    Stalled,
}

/// Summary of one slice
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SliceReport {
    pub outcome: SliceOutcome,
    pub cycles_used: Cycles,
    pub instructions: usize,
    /// STORE/LOAD operands that fell outside the process limit
    pub address_faults: usize,
}

/// Shared machine state borrowed for the duration of a slice
pub struct ExecutionContext<'a> {
    pub memory: &'a mut MemoryImage,
    pub clock: &'a mut SimClock,
    pub events: &'a mut EventLog,
}

/// Execute `pcb` for at most `budget` cycles.
///
/// The slice ends after the instruction that reaches or crosses the budget, so
/// a long COMPUTE may overrun it. Header fields 1, 2, 6 and 7 are synced after
/// every instruction.
pub fn run_slice(
    pcb: &mut Pcb,
    ctx: &mut ExecutionContext<'_>,
    budget: Cycles,
) -> ProcessResult<SliceReport> {
    let pid = Some(pcb.pid());
    let mut report = SliceReport {
        outcome: SliceOutcome::Stalled,
        cycles_used: 0,
        instructions: 0,
        address_faults: 0,
    };

    while report.cycles_used < budget {
        let Some(instruction) = pcb.current_instruction() else {
            break;
        };

        let step = handlers::execute(instruction, pcb, ctx.memory)?;
        report.cycles_used = report.cycles_used.saturating_add(step.cycles_charged);
        pcb.charge(step.cycles_charged);
        let now = ctx.clock.advance(step.cycles_charged);

        if let Some(value) = step.effect.register() {
            pcb.set_register(value);
        }
        let limit = pcb.header().memory_limit;
        match step.effect {
            Effect::None if step.io.is_none() => ctx.events.emit(
                now,
                pid,
                Payload::Computed {
                    cycles: step.cycles_charged,
                },
            ),
            Effect::None => {}
            Effect::Stored { address, value } => {
                ctx.events.emit(now, pid, Payload::Stored { address, value })
            }
            Effect::StoreFault { address } => {
                report.address_faults += 1;
                ctx.events.emit(now, pid, Payload::StoreFault { address, limit })
            }
            Effect::Loaded { address, value } => {
                ctx.events.emit(now, pid, Payload::Loaded { address, value })
            }
            Effect::LoadFault { address } => {
                report.address_faults += 1;
                ctx.events.emit(now, pid, Payload::LoadFault { address, limit })
            }
        }

        pcb.advance_program_counter();
        report.instructions += 1;
        if let Some(io_cycles) = step.io {
            pcb.charge(io_cycles);
        }
        for field in [
            HeaderField::State,
            HeaderField::ProgramCounter,
            HeaderField::CpuCyclesUsed,
            HeaderField::RegisterValue,
        ] {
            pcb.sync(ctx.memory, field)?;
        }
        trace!(
            pid = pcb.pid(),
            pc = pcb.program_counter(),
            ?instruction,
            cycles_used = report.cycles_used,
            "instruction retired"
        );

        if let Some(io_cycles) = step.io {
            if pcb.is_exhausted() {
                // A trailing PRINT finishes the program; termination wins over I/O
                break;
            }
            let release_at = now.saturating_add(io_cycles);
            pcb.set_io_release(release_at);
            pcb.transition(ProcessState::IoWaiting, ctx.memory)?;
            ctx.events
                .emit(now, pid, Payload::IoRequested { release_at });
            report.outcome = SliceOutcome::IoWait { release_at };
            return Ok(report);
        }
    }

    report.outcome = if pcb.is_exhausted() {
        SliceOutcome::Terminated
    } else if report.instructions > 0 {
        SliceOutcome::Timeout
    } else {
        SliceOutcome::Stalled
    };
    Ok(report)
}
