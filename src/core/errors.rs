/*!
 * Error Types
 * Centralized error handling with thiserror, miette, and serde support
 */

use super::types::Pid;
use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use thiserror::Error;

// Re-export MemoryError from memory module
pub use crate::memory::MemoryError;

// Re-export ProcessError from process module
pub use crate::process::ProcessError;

/// Configuration errors
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Diagnostic)]
#[serde(tag = "error_type", content = "details", rename_all = "snake_case")]
pub enum ConfigError {
    #[error("Memory image must hold at least one cell")]
    #[diagnostic(
        code(config::empty_memory),
        help("The first value of the job file is the memory size and must be positive.")
    )]
    EmptyMemory,

    #[error("Time slice must be at least one cycle")]
    #[diagnostic(
        code(config::zero_time_slice),
        help("A zero-cycle slice never lets a process run. Use a positive CPU allocation.")
    )]
    ZeroTimeSlice,
}

/// Job file parsing errors
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Diagnostic)]
#[serde(tag = "error_type", content = "details", rename_all = "snake_case")]
pub enum ParseError {
    #[error("Unexpected end of input: expected {expected}")]
    #[diagnostic(
        code(parse::unexpected_eof),
        help("The job file is truncated. Check the declared process and instruction counts.")
    )]
    UnexpectedEof { expected: String },

    #[error("Invalid {expected} at token {position}: {token:?}")]
    #[diagnostic(
        code(parse::invalid_integer),
        help("Every token must be a whole number in range for its field.")
    )]
    InvalidInteger {
        token: String,
        position: usize,
        expected: String,
    },

    #[error("Unknown opcode {opcode} in process {pid} at token {position}")]
    #[diagnostic(
        code(parse::unknown_opcode),
        help("Valid opcodes are 1 (compute), 2 (print), 3 (store) and 4 (load).")
    )]
    UnknownOpcode {
        opcode: i64,
        pid: Pid,
        position: usize,
    },

    #[error("Invalid system configuration: {0}")]
    #[diagnostic(transparent)]
    Config(#[from] ConfigError),
}

/// Unified kernel error type with miette diagnostics
#[derive(Error, Debug, Diagnostic)]
pub enum KernelError {
    #[error("Memory error: {0}")]
    #[diagnostic(transparent)]
    Memory(#[from] MemoryError),

    #[error("Process error: {0}")]
    #[diagnostic(transparent)]
    Process(#[from] ProcessError),

    #[error("Configuration error: {0}")]
    #[diagnostic(transparent)]
    Config(#[from] ConfigError),

    #[error("Parse error: {0}")]
    #[diagnostic(transparent)]
    Parse(#[from] ParseError),

    #[error("I/O error: {0}")]
    #[diagnostic(
        code(kernel::io_error),
        help("Check that the job file exists and is readable.")
    )]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    #[diagnostic(code(kernel::serialization_error))]
    Serialization(#[from] serde_json::Error),
}
