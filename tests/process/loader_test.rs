/*!
 * Loader Tests
 * Header projection and program layout of admitted jobs
 */

use pretty_assertions::assert_eq;
use sim_kernel::memory::MemoryImage;
use sim_kernel::process::{
    load, HeaderField, Instruction, JobDescriptor, PcbHeader, ProcessError, ProcessState, Program,
};

fn sample_program() -> Vec<Instruction> {
    vec![
        Instruction::Compute {
            iterations: 3,
            cycles: 4,
        },
        Instruction::Print { cycles: 2 },
        Instruction::Store {
            value: 11,
            address: 8,
        },
        Instruction::Load { address: 8 },
    ]
}

#[test]
fn test_header_layout_in_image() {
    let mut memory = MemoryImage::new(64);
    memory.allocate(5).unwrap();

    let pcb = load(JobDescriptor::new(3, 12, sample_program()), &mut memory).unwrap();
    let header = pcb.header();

    assert_eq!(header.main_memory_base, 5);
    assert_eq!(header.instruction_base, 15);
    assert_eq!(header.data_base, 19);
    assert_eq!(header.memory_limit, 12);
    assert_eq!(header.max_memory_needed, 12);
    assert_eq!(header.state, ProcessState::New);

    assert_eq!(
        memory.read_block(5, 15).unwrap(),
        &[3, ProcessState::New.code(), 0, 15, 19, 12, 0, 0, 12, 5]
    );
    assert_eq!(PcbHeader::read_from(&memory, 5).unwrap(), *header);
}

#[test]
fn test_split_instruction_and_data_regions() {
    let mut memory = MemoryImage::new(64);
    let pcb = load(JobDescriptor::new(1, 12, sample_program()), &mut memory).unwrap();

    // Opcodes, then operands packed in program order
    assert_eq!(memory.read_block(10, 14).unwrap(), &[1, 2, 3, 4]);
    assert_eq!(memory.read_block(14, 20).unwrap(), &[3, 4, 2, 11, 8, 8]);
    assert_eq!(memory.read(20).unwrap(), -1);

    let header = pcb.header();
    let decoded = Program::read_from(&memory, header.instruction_base, header.data_base).unwrap();
    assert_eq!(decoded, Program::new(sample_program()));
}

#[test]
fn test_program_larger_than_request_is_rejected() {
    let mut memory = MemoryImage::new(64);
    let err = load(JobDescriptor::new(2, 5, sample_program()), &mut memory).unwrap_err();

    assert_eq!(
        err,
        ProcessError::ProgramTooLarge {
            pid: 2,
            payload: 10,
            memory_needed: 5,
        }
    );
    assert_eq!(memory.available(), 64);
}

#[test]
fn test_insufficient_memory() {
    let mut memory = MemoryImage::new(20);
    let err = load(JobDescriptor::new(6, 12, sample_program()), &mut memory).unwrap_err();

    assert_eq!(
        err,
        ProcessError::InsufficientMemory {
            pid: 6,
            requested: 22,
            available: 20,
        }
    );
}

#[test]
fn test_header_field_offsets() {
    let offsets: Vec<usize> = HeaderField::ALL.iter().map(|f| f.offset()).collect();
    assert_eq!(offsets, (0..10).collect::<Vec<_>>());
}
