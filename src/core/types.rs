/*!
 * Core Types
 * Common types used across the kernel
 */

/// Process ID type
pub type Pid = u32;

/// A single cell of the simulated memory image
pub type Word = i64;

/// Absolute index into the memory image
pub type Address = usize;

/// Size type for memory regions
pub type Size = usize;

/// Simulated clock value
pub type Tick = u64;

/// CPU cycle count
pub type Cycles = u64;

/// Common result type for kernel operations
pub type KernelResult<T> = Result<T, super::errors::KernelError>;

/// Convert a count into a memory word, saturating at `Word::MAX`
#[inline]
#[must_use]
pub fn to_word<T: TryInto<Word>>(value: T) -> Word {
    value.try_into().unwrap_or(Word::MAX)
}
