/*!
 * Program Encoding
 * The four-instruction register machine and its split in-memory layout
 *
 * Opcodes occupy one cell each starting at the instruction base. Operands are
 * packed in program order starting at the data base, which sits directly after
 * the last opcode.
 */

use super::types::{ProcessError, ProcessResult};
use crate::core::types::{Address, Size, Word};
use crate::memory::MemoryImage;
use serde::{Deserialize, Serialize};

pub const OP_COMPUTE: Word = 1;
pub const OP_PRINT: Word = 2;
pub const OP_STORE: Word = 3;
pub const OP_LOAD: Word = 4;

/// One machine instruction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Instruction {
    /// Burn `iterations × cycles` CPU cycles
    Compute { iterations: u32, cycles: u32 },
    /// Block on I/O for `cycles` ticks
    Print { cycles: u32 },
    /// Write `value` at offset `address` of the process region
    Store { value: Word, address: Word },
    /// Read offset `address` of the process region into the register
    Load { address: Word },
}

impl Instruction {
    #[inline]
    #[must_use]
    pub const fn opcode(&self) -> Word {
        match self {
            Instruction::Compute { .. } => OP_COMPUTE,
            Instruction::Print { .. } => OP_PRINT,
            Instruction::Store { .. } => OP_STORE,
            Instruction::Load { .. } => OP_LOAD,
        }
    }

    /// Number of operand cells for an opcode, `None` if the opcode is unknown
    #[must_use]
    pub const fn arity_of(opcode: Word) -> Option<usize> {
        match opcode {
            OP_COMPUTE | OP_STORE => Some(2),
            OP_PRINT | OP_LOAD => Some(1),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub const fn arity(&self) -> usize {
        match self {
            Instruction::Compute { .. } | Instruction::Store { .. } => 2,
            Instruction::Print { .. } | Instruction::Load { .. } => 1,
        }
    }

    /// Build an instruction from its opcode and operand words.
    ///
    /// Returns the index of the first offending operand on failure, or
    /// `operands.len()` when the opcode itself is unknown or the count is wrong.
    pub fn from_words(opcode: Word, operands: &[Word]) -> Result<Self, usize> {
        let cycles = |idx: usize| u32::try_from(operands[idx]).map_err(|_| idx);
        match (opcode, operands.len()) {
            (OP_COMPUTE, 2) => Ok(Instruction::Compute {
                iterations: cycles(0)?,
                cycles: cycles(1)?,
            }),
            (OP_PRINT, 1) => Ok(Instruction::Print { cycles: cycles(0)? }),
            (OP_STORE, 2) => Ok(Instruction::Store {
                value: operands[0],
                address: operands[1],
            }),
            (OP_LOAD, 1) => Ok(Instruction::Load {
                address: operands[0],
            }),
            _ => Err(operands.len()),
        }
    }

    fn push_operands(&self, out: &mut Vec<Word>) {
        match *self {
            Instruction::Compute { iterations, cycles } => {
                out.push(Word::from(iterations));
                out.push(Word::from(cycles));
            }
            Instruction::Print { cycles } => out.push(Word::from(cycles)),
            Instruction::Store { value, address } => {
                out.push(value);
                out.push(address);
            }
            Instruction::Load { address } => out.push(address),
        }
    }
}

/// An ordered instruction sequence
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Program(Vec<Instruction>);

impl Program {
    #[inline]
    #[must_use]
    pub fn new(instructions: Vec<Instruction>) -> Self {
        Self(instructions)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<Instruction> {
        self.0.get(index).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Instruction> {
        self.0.iter()
    }

    /// Cells taken by the operand block
    pub fn operand_len(&self) -> Size {
        self.0.iter().map(Instruction::arity).sum()
    }

    /// Cells taken by opcodes plus operands
    pub fn encoded_len(&self) -> Size {
        self.len() + self.operand_len()
    }

    /// Split the program into its opcode block and operand block
    pub fn encode(&self) -> (Vec<Word>, Vec<Word>) {
        let opcodes = self.0.iter().map(Instruction::opcode).collect();
        let mut operands = Vec::with_capacity(self.operand_len());
        for instruction in &self.0 {
            instruction.push_operands(&mut operands);
        }
        (opcodes, operands)
    }

    pub fn write_to(
        &self,
        memory: &mut MemoryImage,
        instruction_base: Address,
        data_base: Address,
    ) -> ProcessResult<()> {
        let (opcodes, operands) = self.encode();
        memory.write_block(instruction_base, &opcodes)?;
        memory.write_block(data_base, &operands)?;
        Ok(())
    }

    /// Rebuild a program from its encoded form.
    ///
    /// The instruction count is implied by `data_base - instruction_base`.
    pub fn read_from(
        memory: &MemoryImage,
        instruction_base: Address,
        data_base: Address,
    ) -> ProcessResult<Self> {
        let opcodes = memory.read_block(instruction_base, data_base)?;
        let mut instructions = Vec::with_capacity(opcodes.len());
        let mut cursor = data_base;

        for (idx, &opcode) in opcodes.iter().enumerate() {
            let arity = Instruction::arity_of(opcode).ok_or(ProcessError::CorruptProgram {
                address: instruction_base + idx,
                value: opcode,
            })?;
            let operands = memory.read_block(cursor, cursor + arity)?;
            let instruction =
                Instruction::from_words(opcode, operands).map_err(|bad| {
                    ProcessError::CorruptProgram {
                        address: cursor + bad,
                        value: operands.get(bad).copied().unwrap_or(opcode),
                    }
                })?;
            instructions.push(instruction);
            cursor += arity;
        }

        Ok(Self(instructions))
    }
}

impl From<Vec<Instruction>> for Program {
    fn from(instructions: Vec<Instruction>) -> Self {
        Self(instructions)
    }
}

impl FromIterator<Instruction> for Program {
    fn from_iter<I: IntoIterator<Item = Instruction>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
