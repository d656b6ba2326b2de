/*!
 * Memory Types
 * Common types for the simulated memory image
 */

use crate::core::types::{Address, Size};
use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Memory operation result
pub type MemoryResult<T> = Result<T, MemoryError>;

/// Memory errors
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Diagnostic)]
#[serde(tag = "error_type", content = "details", rename_all = "snake_case")]
pub enum MemoryError {
    #[error("Out of memory: requested {requested} cells, available {available} cells ({used} used / {total} total)")]
    #[diagnostic(
        code(memory::out_of_memory),
        help("Increase the memory size or reduce the memory needed by the job.")
    )]
    OutOfMemory {
        requested: Size,
        available: Size,
        used: Size,
        total: Size,
    },

    #[error("Invalid memory address: {address} (image holds {size} cells)")]
    #[diagnostic(code(memory::invalid_address))]
    InvalidAddress { address: Address, size: Size },

    #[error("Invalid memory range: {start}..{end} (image holds {size} cells)")]
    #[diagnostic(code(memory::invalid_range))]
    InvalidRange {
        start: Address,
        end: Address,
        size: Size,
    },
}

/// Contiguous block handed out by the allocator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Region {
    pub base: Address,
    pub size: Size,
}

impl Region {
    #[inline]
    #[must_use]
    pub const fn new(base: Address, size: Size) -> Self {
        Self { base, size }
    }

    /// One past the last cell of the region
    #[inline]
    #[must_use]
    pub const fn end(&self) -> Address {
        self.base + self.size
    }

    #[inline]
    #[must_use]
    pub const fn contains(&self, address: Address) -> bool {
        address >= self.base && address < self.end()
    }
}

/// Memory statistics
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemoryStats {
    pub total_memory: Size,
    pub used_memory: Size,
    pub available_memory: Size,
    pub usage_percentage: f64,
    pub allocated_regions: usize,
}
