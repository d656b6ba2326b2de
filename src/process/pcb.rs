/*!
 * Process Control Block
 * Typed working copy of a process and its projection into the memory image
 */

use super::program::{Instruction, Program};
use super::types::{ProcessError, ProcessResult, ProcessState};
use crate::core::limits::PCB_HEADER_SIZE;
use crate::core::types::{to_word, Address, Cycles, Pid, Size, Tick, Word};
use crate::memory::{MemoryImage, MemoryResult};
use serde::{Deserialize, Serialize};

/// Offsets of the header fields from `main_memory_base`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(usize)]
pub enum HeaderField {
    ProcessId = 0,
    State = 1,
    ProgramCounter = 2,
    InstructionBase = 3,
    DataBase = 4,
    MemoryLimit = 5,
    CpuCyclesUsed = 6,
    RegisterValue = 7,
    MaxMemoryNeeded = 8,
    MainMemoryBase = 9,
}

impl HeaderField {
    pub const ALL: [HeaderField; PCB_HEADER_SIZE] = [
        HeaderField::ProcessId,
        HeaderField::State,
        HeaderField::ProgramCounter,
        HeaderField::InstructionBase,
        HeaderField::DataBase,
        HeaderField::MemoryLimit,
        HeaderField::CpuCyclesUsed,
        HeaderField::RegisterValue,
        HeaderField::MaxMemoryNeeded,
        HeaderField::MainMemoryBase,
    ];

    #[inline]
    #[must_use]
    pub const fn offset(self) -> usize {
        self as usize
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            HeaderField::ProcessId => "process id",
            HeaderField::State => "state",
            HeaderField::ProgramCounter => "program counter",
            HeaderField::InstructionBase => "instruction base",
            HeaderField::DataBase => "data base",
            HeaderField::MemoryLimit => "memory limit",
            HeaderField::CpuCyclesUsed => "cpu cycles used",
            HeaderField::RegisterValue => "register value",
            HeaderField::MaxMemoryNeeded => "max memory needed",
            HeaderField::MainMemoryBase => "main memory base",
        }
    }
}

/// The ten-cell PCB header
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct PcbHeader {
    pub process_id: Pid,
    pub state: ProcessState,
    pub program_counter: usize,
    pub instruction_base: Address,
    pub data_base: Address,
    pub memory_limit: Size,
    pub cpu_cycles_used: Cycles,
    pub register_value: Word,
    pub max_memory_needed: Size,
    pub main_memory_base: Address,
}

impl PcbHeader {
    /// Memory word for a single field
    #[must_use]
    pub fn field(&self, field: HeaderField) -> Word {
        match field {
            HeaderField::ProcessId => Word::from(self.process_id),
            HeaderField::State => self.state.code(),
            HeaderField::ProgramCounter => to_word(self.program_counter),
            HeaderField::InstructionBase => to_word(self.instruction_base),
            HeaderField::DataBase => to_word(self.data_base),
            HeaderField::MemoryLimit => to_word(self.memory_limit),
            HeaderField::CpuCyclesUsed => to_word(self.cpu_cycles_used),
            HeaderField::RegisterValue => self.register_value,
            HeaderField::MaxMemoryNeeded => to_word(self.max_memory_needed),
            HeaderField::MainMemoryBase => to_word(self.main_memory_base),
        }
    }

    #[must_use]
    pub fn to_words(&self) -> [Word; PCB_HEADER_SIZE] {
        HeaderField::ALL.map(|field| self.field(field))
    }

    /// Deserialize a header. `base` is only used to locate errors.
    pub fn from_words(base: Address, words: &[Word]) -> ProcessResult<Self> {
        if words.len() < PCB_HEADER_SIZE {
            return Err(ProcessError::CorruptHeader {
                address: base + words.len(),
                field: "header length".to_string(),
                value: to_word(words.len()),
            });
        }

        let corrupt = |field: HeaderField| ProcessError::CorruptHeader {
            address: base + field.offset(),
            field: field.name().to_string(),
            value: words[field.offset()],
        };
        let unsigned = |field: HeaderField| {
            usize::try_from(words[field.offset()]).map_err(|_| corrupt(field))
        };

        Ok(Self {
            process_id: Pid::try_from(words[HeaderField::ProcessId.offset()])
                .map_err(|_| corrupt(HeaderField::ProcessId))?,
            state: ProcessState::from_code(words[HeaderField::State.offset()])
                .ok_or_else(|| corrupt(HeaderField::State))?,
            program_counter: unsigned(HeaderField::ProgramCounter)?,
            instruction_base: unsigned(HeaderField::InstructionBase)?,
            data_base: unsigned(HeaderField::DataBase)?,
            memory_limit: unsigned(HeaderField::MemoryLimit)?,
            cpu_cycles_used: Cycles::try_from(words[HeaderField::CpuCyclesUsed.offset()])
                .map_err(|_| corrupt(HeaderField::CpuCyclesUsed))?,
            register_value: words[HeaderField::RegisterValue.offset()],
            max_memory_needed: unsigned(HeaderField::MaxMemoryNeeded)?,
            main_memory_base: unsigned(HeaderField::MainMemoryBase)?,
        })
    }

    pub fn read_from(memory: &MemoryImage, base: Address) -> ProcessResult<Self> {
        let words = memory.read_block(base, base + PCB_HEADER_SIZE)?;
        Self::from_words(base, words)
    }
}

/// Process control block
///
/// The header is the durable part and is projected into the memory image;
/// the remaining fields only live here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pcb {
    header: PcbHeader,
    program: Program,
    started_at: Option<Tick>,
    terminated_at: Option<Tick>,
    io_release_at: Option<Tick>,
}

impl Pcb {
    #[must_use]
    pub fn new(header: PcbHeader, program: Program) -> Self {
        Self {
            header,
            program,
            started_at: None,
            terminated_at: None,
            io_release_at: None,
        }
    }

    #[inline(always)]
    pub fn pid(&self) -> Pid {
        self.header.process_id
    }

    #[inline(always)]
    pub fn state(&self) -> ProcessState {
        self.header.state
    }

    #[inline]
    pub fn header(&self) -> &PcbHeader {
        &self.header
    }

    #[inline]
    pub fn program(&self) -> &Program {
        &self.program
    }

    #[inline]
    pub fn program_counter(&self) -> usize {
        self.header.program_counter
    }

    pub fn remaining_instructions(&self) -> usize {
        self.program.len().saturating_sub(self.header.program_counter)
    }

    #[inline]
    pub fn is_exhausted(&self) -> bool {
        self.remaining_instructions() == 0
    }

    pub fn current_instruction(&self) -> Option<Instruction> {
        self.program.get(self.header.program_counter)
    }

    /// Clock value of the first dispatch
    pub fn started_at(&self) -> Option<Tick> {
        self.started_at
    }

    pub fn terminated_at(&self) -> Option<Tick> {
        self.terminated_at
    }

    pub fn io_release_at(&self) -> Option<Tick> {
        self.io_release_at
    }

    /// Clock time between first dispatch and termination
    pub fn total_execution_time(&self) -> Option<Tick> {
        Some(self.terminated_at?.saturating_sub(self.started_at?))
    }

    /// Whether a pending I/O request has elapsed at `now`
    pub fn io_complete(&self, now: Tick) -> bool {
        self.io_release_at.is_some_and(|release| release <= now)
    }

    /// Move to `to` and project the state field
    pub fn transition(&mut self, to: ProcessState, memory: &mut MemoryImage) -> ProcessResult<()> {
        let from = self.header.state;
        if !from.can_transition_to(to) {
            return Err(ProcessError::InvalidStateTransition {
                pid: self.pid(),
                from,
                to,
            });
        }
        self.header.state = to;
        self.sync(memory, HeaderField::State)?;
        Ok(())
    }

    /// Record the first dispatch; later calls keep the original value
    pub(crate) fn mark_started(&mut self, now: Tick) {
        self.started_at.get_or_insert(now);
    }

    pub(crate) fn mark_terminated(&mut self, now: Tick) {
        self.terminated_at = Some(now);
        self.io_release_at = None;
    }

    pub(crate) fn set_io_release(&mut self, release_at: Tick) {
        self.io_release_at = Some(release_at);
    }

    pub(crate) fn clear_io_release(&mut self) {
        self.io_release_at = None;
    }

    pub(crate) fn advance_program_counter(&mut self) {
        self.header.program_counter += 1;
    }

    pub(crate) fn charge(&mut self, cycles: Cycles) {
        self.header.cpu_cycles_used = self.header.cpu_cycles_used.saturating_add(cycles);
    }

    pub(crate) fn set_register(&mut self, value: Word) {
        self.header.register_value = value;
    }

    /// Write the whole header into the image
    pub fn project(&self, memory: &mut MemoryImage) -> MemoryResult<()> {
        memory.write_block(self.header.main_memory_base, &self.header.to_words())
    }

    /// Write a single header field into the image
    pub fn sync(&self, memory: &mut MemoryImage, field: HeaderField) -> MemoryResult<()> {
        memory.write(
            self.header.main_memory_base + field.offset(),
            self.header.field(field),
        )
    }
}
