/*!
 * Job File Parser
 * Whitespace-token reader for the machine header and job list
 *
 * Layout:
 *   maxMemory CPUAllocated contextSwitchTime numProcesses
 *   numProcesses x { processID memoryNeeded instructionCount
 *                    instructionCount x { opcode operands... } }
 */

use super::SimulationInput;
use crate::core::config::SystemConfig;
use crate::core::errors::ParseError;
use crate::core::types::{Pid, Word};
use crate::process::{Instruction, JobDescriptor, Program};
use std::iter::Enumerate;
use std::str::{FromStr, SplitWhitespace};
use tracing::{debug, warn};

/// Token cursor that remembers the 1-based position of every token
struct Tokens<'a> {
    inner: Enumerate<SplitWhitespace<'a>>,
}

impl<'a> Tokens<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            inner: text.split_whitespace().enumerate(),
        }
    }

    /// Next token parsed as `T`, with its position
    fn next<T: FromStr>(&mut self, expected: &str) -> Result<(T, usize), ParseError> {
        let (index, token) = self.inner.next().ok_or_else(|| ParseError::UnexpectedEof {
            expected: expected.to_string(),
        })?;
        let position = index + 1;
        token
            .parse::<T>()
            .map(|value| (value, position))
            .map_err(|_| ParseError::InvalidInteger {
                token: token.to_string(),
                position,
                expected: expected.to_string(),
            })
    }

    fn value<T: FromStr>(&mut self, expected: &str) -> Result<T, ParseError> {
        self.next(expected).map(|(value, _)| value)
    }

    fn remaining(self) -> usize {
        self.inner.count()
    }
}

/// Parse a complete job file.
///
/// The machine header is validated before any job is read. Tokens after the
/// last declared job are ignored with a warning.
pub fn parse(text: &str) -> Result<SimulationInput, ParseError> {
    let mut tokens = Tokens::new(text);

    let config = SystemConfig::new(
        tokens.value("memory size")?,
        tokens.value("CPU allocation")?,
        tokens.value("context switch time")?,
    );
    config.validate()?;

    let count: usize = tokens.value("process count")?;
    let mut jobs = Vec::with_capacity(count.min(1024));
    for _ in 0..count {
        jobs.push(parse_job(&mut tokens)?);
    }

    let trailing = tokens.remaining();
    if trailing > 0 {
        warn!(trailing, "ignoring tokens after the last job");
    }
    debug!(jobs = jobs.len(), "job file parsed");

    Ok(SimulationInput { config, jobs })
}

fn parse_job(tokens: &mut Tokens<'_>) -> Result<JobDescriptor, ParseError> {
    let pid: Pid = tokens.value("process id")?;
    let memory_needed = tokens.value("memory requirement")?;
    let count: usize = tokens.value("instruction count")?;

    let program = (0..count)
        .map(|_| parse_instruction(tokens, pid))
        .collect::<Result<Program, _>>()?;

    Ok(JobDescriptor::new(pid, memory_needed, program))
}

fn parse_instruction(tokens: &mut Tokens<'_>, pid: Pid) -> Result<Instruction, ParseError> {
    let (opcode, position): (Word, usize) = tokens.next("opcode")?;
    let arity =
        Instruction::arity_of(opcode).ok_or(ParseError::UnknownOpcode { opcode, pid, position })?;

    let mut operands = Vec::with_capacity(arity);
    let mut positions = Vec::with_capacity(arity);
    for _ in 0..arity {
        let (operand, at) = tokens.next::<Word>("operand")?;
        operands.push(operand);
        positions.push(at);
    }

    Instruction::from_words(opcode, &operands).map_err(|bad| ParseError::InvalidInteger {
        token: operands[bad].to_string(),
        position: positions[bad],
        expected: "non-negative cycle count".to_string(),
    })
}
