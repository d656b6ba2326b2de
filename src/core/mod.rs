/*!
 * Core Module
 * Fundamental kernel types, limits, configuration and error handling
 */

pub mod clock;
pub mod config;
pub mod errors;
pub mod limits;
pub mod types;

// Re-export for convenience
pub use clock::SimClock;
pub use config::SystemConfig;
pub use errors::*;
pub use types::*;
