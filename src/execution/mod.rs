/*!
 * Execution Module
 * Instruction decoding and time-slice execution
 */

pub mod handlers;
pub mod slice;

// Re-export for convenience
pub use handlers::{Effect, StepResult};
pub use slice::{run_slice, ExecutionContext, SliceOutcome, SliceReport};
