/*!
 * Parser Tests
 * Job files read from disk through the public API
 */

use pretty_assertions::assert_eq;
use sim_kernel::{read_input, simulate, Instruction, KernelError, ParseError};
use std::io::Write;

fn job_file(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

#[test]
fn test_multi_line_job_file() {
    let file = job_file(
        "120 6 2 2\n\
         1 20 3\n\
         1 2 3\n\
         2 4\n\
         3 9 0\n\
         2 15 1\n\
         4 0\n",
    );

    let input = read_input(Some(file.path())).unwrap();
    assert_eq!(input.config.cpu_allocated, 6);
    assert_eq!(input.jobs.len(), 2);
    assert_eq!(
        input.jobs[0].program.get(2),
        Some(Instruction::Store {
            value: 9,
            address: 0
        })
    );
    assert_eq!(input.jobs[1].memory_needed, 15);
}

#[test]
fn test_unknown_opcode_reports_position() {
    let file = job_file("100 5 1 1\n4 10 2\n1 1 1\n7 3\n");

    match read_input(Some(file.path())) {
        Err(KernelError::Parse(ParseError::UnknownOpcode {
            opcode,
            pid,
            position,
        })) => {
            assert_eq!((opcode, pid, position), (7, 4, 11));
        }
        other => panic!("expected unknown opcode, got {other:?}"),
    }
}

#[test]
fn test_file_to_report() {
    let file = job_file("100 5 1 1 1 10 1 1 2 2");
    let report = simulate(read_input(Some(file.path())).unwrap()).unwrap();
    assert_eq!(report.total_cpu_time, 6);
}
