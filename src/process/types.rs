/*!
 * Process Types
 * Common types for process management
 */

use crate::core::types::{Address, Pid, Size, Word};
use crate::memory::MemoryError;
use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Process operation result
///
/// # Must Use
/// Process operations can fail and must be handled to keep the memory image consistent
pub type ProcessResult<T> = Result<T, ProcessError>;

/// Process errors
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Diagnostic)]
#[serde(tag = "error_type", content = "details", rename_all = "snake_case")]
pub enum ProcessError {
    #[error("Not enough memory for process {pid}: needs {requested} cells, {available} available")]
    #[diagnostic(
        code(process::insufficient_memory),
        help("The job is skipped. Later jobs may still fit.")
    )]
    InsufficientMemory {
        pid: Pid,
        requested: Size,
        available: Size,
    },

    #[error("Program of process {pid} needs {payload} cells but only {memory_needed} were requested")]
    #[diagnostic(
        code(process::program_too_large),
        help("Instructions and operands must fit inside the memory the job asks for.")
    )]
    ProgramTooLarge {
        pid: Pid,
        payload: Size,
        memory_needed: Size,
    },

    #[error("Process {0} is already loaded")]
    #[diagnostic(code(process::duplicate_pid))]
    DuplicatePid(Pid),

    #[error("Process {0} not found")]
    #[diagnostic(code(process::not_found))]
    NotFound(Pid),

    #[error("Invalid state transition for process {pid}: {from} -> {to}")]
    #[diagnostic(code(process::invalid_state_transition))]
    InvalidStateTransition {
        pid: Pid,
        from: ProcessState,
        to: ProcessState,
    },

    #[error("Corrupt PCB header at {address}: {value} is not a valid {field}")]
    #[diagnostic(code(process::corrupt_header))]
    CorruptHeader {
        address: Address,
        field: String,
        value: Word,
    },

    #[error("Corrupt program at {address}: unexpected word {value}")]
    #[diagnostic(code(process::corrupt_program))]
    CorruptProgram { address: Address, value: Word },

    #[error("Memory error: {0}")]
    #[diagnostic(transparent)]
    Memory(#[from] MemoryError),
}

/// Process state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProcessState {
    /// Header materialized, not yet admitted to the ready queue
    New,
    /// Waiting in the ready queue
    Ready,
    /// Owns the CPU
    Running,
    /// Blocked until its I/O release time
    IoWaiting,
    /// Program counter exhausted; absorbing
    Terminated,
}

impl ProcessState {
    /// Encoding stored in header field 1
    #[inline]
    #[must_use]
    pub const fn code(self) -> Word {
        match self {
            ProcessState::New => 1,
            ProcessState::Ready => 2,
            ProcessState::Running => 3,
            ProcessState::IoWaiting => 4,
            ProcessState::Terminated => 5,
        }
    }

    #[must_use]
    pub const fn from_code(code: Word) -> Option<Self> {
        match code {
            1 => Some(ProcessState::New),
            2 => Some(ProcessState::Ready),
            3 => Some(ProcessState::Running),
            4 => Some(ProcessState::IoWaiting),
            5 => Some(ProcessState::Terminated),
            _ => None,
        }
    }

    #[must_use]
    pub const fn can_transition_to(self, to: ProcessState) -> bool {
        matches!(
            (self, to),
            (ProcessState::New, ProcessState::Ready)
                | (ProcessState::Ready, ProcessState::Running)
                | (ProcessState::Running, ProcessState::Ready)
                | (ProcessState::Running, ProcessState::IoWaiting)
                | (ProcessState::Running, ProcessState::Terminated)
                | (ProcessState::IoWaiting, ProcessState::Ready)
        )
    }

    #[inline(always)]
    #[must_use]
    pub const fn is_terminated(self) -> bool {
        matches!(self, ProcessState::Terminated)
    }
}

impl fmt::Display for ProcessState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProcessState::New => write!(f, "NEW"),
            ProcessState::Ready => write!(f, "READY"),
            ProcessState::Running => write!(f, "RUNNING"),
            ProcessState::IoWaiting => write!(f, "IOWAITING"),
            ProcessState::Terminated => write!(f, "TERMINATED"),
        }
    }
}
