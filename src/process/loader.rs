/*!
 * Process Loader
 * Materializes job descriptors into PCBs inside the memory image
 */

use super::pcb::{Pcb, PcbHeader};
use super::program::Program;
use super::types::{ProcessError, ProcessResult, ProcessState};
use crate::core::limits::PCB_HEADER_SIZE;
use crate::core::types::{Pid, Size};
use crate::memory::{MemoryError, MemoryImage};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// A parsed job, before it owns any memory
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct JobDescriptor {
    pub pid: Pid,
    pub memory_needed: Size,
    pub program: Program,
}

impl JobDescriptor {
    #[must_use]
    pub fn new(pid: Pid, memory_needed: Size, program: impl Into<Program>) -> Self {
        Self {
            pid,
            memory_needed,
            program: program.into(),
        }
    }

    /// Cells the job occupies including its PCB header.
    ///
    /// `None` when the request does not fit in the address space.
    #[inline]
    pub fn footprint(&self) -> Option<Size> {
        PCB_HEADER_SIZE.checked_add(self.memory_needed)
    }
}

/// Allocate a region for `job`, write its header and program, and return the PCB.
///
/// The PCB comes back in the `New` state; admitting it to a queue is the
/// scheduler's job. Nothing is allocated when the job is rejected.
pub fn load(job: JobDescriptor, memory: &mut MemoryImage) -> ProcessResult<Pcb> {
    let payload = job.program.encoded_len();
    if payload > job.memory_needed {
        warn!(
            pid = job.pid,
            payload,
            memory_needed = job.memory_needed,
            "program does not fit in requested memory"
        );
        return Err(ProcessError::ProgramTooLarge {
            pid: job.pid,
            payload,
            memory_needed: job.memory_needed,
        });
    }

    let Some(footprint) = job.footprint() else {
        warn!(
            pid = job.pid,
            memory_needed = job.memory_needed,
            "memory request overflows the address space"
        );
        return Err(ProcessError::InsufficientMemory {
            pid: job.pid,
            requested: Size::MAX,
            available: memory.available(),
        });
    };

    let region = memory
        .allocate(footprint)
        .map_err(|err| match err {
            MemoryError::OutOfMemory {
                requested,
                available,
                ..
            } => ProcessError::InsufficientMemory {
                pid: job.pid,
                requested,
                available,
            },
            other => ProcessError::Memory(other),
        })?;

    let instruction_base = region.base + PCB_HEADER_SIZE;
    let header = PcbHeader {
        process_id: job.pid,
        state: ProcessState::New,
        program_counter: 0,
        instruction_base,
        data_base: instruction_base + job.program.len(),
        memory_limit: job.memory_needed,
        cpu_cycles_used: 0,
        register_value: 0,
        max_memory_needed: job.memory_needed,
        main_memory_base: region.base,
    };

    let pcb = Pcb::new(header, job.program);
    pcb.project(memory)?;
    pcb.program()
        .write_to(memory, header.instruction_base, header.data_base)?;

    info!(
        pid = pcb.pid(),
        base = region.base,
        footprint = region.size,
        instructions = pcb.program().len(),
        "process loaded"
    );
    Ok(pcb)
}
