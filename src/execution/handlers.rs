/*!
 * Instruction Handlers
 * One handler per instruction kind, each returning a uniform step result
 */

use crate::core::limits::{MEMORY_ACCESS_COST, REGISTER_FAULT};
use crate::core::types::{Address, Cycles, Word};
use crate::memory::{MemoryImage, MemoryResult};
use crate::process::{Instruction, Pcb};

/// Side effect of a single instruction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    None,
    Stored { address: Word, value: Word },
    StoreFault { address: Word },
    Loaded { address: Word, value: Word },
    LoadFault { address: Word },
}

impl Effect {
    /// Register value after the instruction, if it changes
    #[inline]
    pub fn register(&self) -> Option<Word> {
        match *self {
            Effect::Stored { value, .. } | Effect::Loaded { value, .. } => Some(value),
            Effect::LoadFault { .. } => Some(REGISTER_FAULT),
            Effect::None | Effect::StoreFault { .. } => None,
        }
    }
}

/// What one instruction did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepResult {
    /// Cycles billed to the slice and the clock
    pub cycles_charged: Cycles,
    pub effect: Effect,
    /// I/O duration when the instruction blocks
    pub io: Option<Cycles>,
}

impl StepResult {
    const fn charged(cycles_charged: Cycles, effect: Effect) -> Self {
        Self {
            cycles_charged,
            effect,
            io: None,
        }
    }
}

/// Execute `instruction` on behalf of `pcb`.
///
/// Only STORE touches the image. Address faults are reported through the
/// effect, never as an error.
pub fn execute(
    instruction: Instruction,
    pcb: &Pcb,
    memory: &mut MemoryImage,
) -> MemoryResult<StepResult> {
    match instruction {
        Instruction::Compute { iterations, cycles } => Ok(compute(iterations, cycles)),
        Instruction::Print { cycles } => Ok(print(cycles)),
        Instruction::Store { value, address } => store(pcb, memory, value, address),
        Instruction::Load { address } => load(pcb, memory, address),
    }
}

fn compute(iterations: u32, cycles: u32) -> StepResult {
    StepResult::charged(u64::from(iterations) * u64::from(cycles), Effect::None)
}

fn print(cycles: u32) -> StepResult {
    StepResult {
        cycles_charged: 0,
        effect: Effect::None,
        io: Some(Cycles::from(cycles)),
    }
}

fn store(pcb: &Pcb, memory: &mut MemoryImage, value: Word, address: Word) -> MemoryResult<StepResult> {
    let effect = match translate(pcb, memory, address) {
        Some(absolute) => {
            memory.write(absolute, value)?;
            Effect::Stored { address, value }
        }
        None => Effect::StoreFault { address },
    };
    Ok(StepResult::charged(MEMORY_ACCESS_COST, effect))
}

fn load(pcb: &Pcb, memory: &MemoryImage, address: Word) -> MemoryResult<StepResult> {
    let effect = match translate(pcb, memory, address) {
        Some(absolute) => Effect::Loaded {
            address,
            value: memory.read(absolute)?,
        },
        None => Effect::LoadFault { address },
    };
    Ok(StepResult::charged(MEMORY_ACCESS_COST, effect))
}

/// Map a process-relative offset to an absolute address.
///
/// The offset must lie in `[0, memory_limit)` of the process and the result
/// inside the image.
pub fn translate(pcb: &Pcb, memory: &MemoryImage, offset: Word) -> Option<Address> {
    let offset = Address::try_from(offset).ok()?;
    if offset >= pcb.header().memory_limit {
        return None;
    }
    let absolute = pcb.header().main_memory_base.checked_add(offset)?;
    (absolute < memory.len()).then_some(absolute)
}
