/*!
 * Monitoring
 * Structured logging and the simulation event stream
 */

pub mod events;
mod tracer;

pub use events::{Event, EventLog, Payload};
pub use tracer::{generate_run_id, init_tracing, RunSpan};
