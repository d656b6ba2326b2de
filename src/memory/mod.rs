/*!
 * Memory Module
 * Simulated main memory and region allocation
 */

pub mod image;
pub mod types;

// Re-export for convenience
pub use image::MemoryImage;
pub use types::*;
