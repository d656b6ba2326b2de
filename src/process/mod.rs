/*!
 * Process Module
 * Process control blocks, programs and loading
 */

pub mod loader;
pub mod pcb;
pub mod program;
pub mod types;

// Re-export for convenience
pub use loader::{load, JobDescriptor};
pub use pcb::{HeaderField, Pcb, PcbHeader};
pub use program::{Instruction, Program};
pub use types::*;
