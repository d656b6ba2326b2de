/*!
 * Input Module
 * Reads the machine configuration and job list that seed a run
 */

mod parser;

pub use parser::parse;

use crate::core::config::SystemConfig;
use crate::core::types::KernelResult;
use crate::process::JobDescriptor;
use serde::{Deserialize, Serialize};
use std::io::Read;
use std::path::Path;
use tracing::info;

/// Everything a simulation run starts from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationInput {
    pub config: SystemConfig,
    /// Jobs in load order
    pub jobs: Vec<JobDescriptor>,
}

/// Read and parse a job file, or standard input when `path` is `None`
pub fn read_input(path: Option<&Path>) -> KernelResult<SimulationInput> {
    let text = match path {
        Some(path) => {
            info!(path = %path.display(), "reading job file");
            std::fs::read_to_string(path)?
        }
        None => {
            info!("reading job file from stdin");
            let mut text = String::new();
            std::io::stdin().read_to_string(&mut text)?;
            text
        }
    };
    Ok(parse(&text)?)
}
