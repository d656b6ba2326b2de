/*!
 * Executor Tests
 * Time slices driven through the public execution API
 */

use pretty_assertions::assert_eq;
use sim_kernel::memory::MemoryImage;
use sim_kernel::process::{load, Instruction, JobDescriptor, Pcb, ProcessState};
use sim_kernel::{run_slice, EventLog, ExecutionContext, Payload, SimClock, SliceOutcome};

struct Cpu {
    memory: MemoryImage,
    clock: SimClock,
    events: EventLog,
}

impl Cpu {
    fn with(memory_size: usize) -> Self {
        Self {
            memory: MemoryImage::new(memory_size),
            clock: SimClock::new(),
            events: EventLog::new(),
        }
    }

    fn admit(&mut self, pid: u32, memory_needed: usize, program: Vec<Instruction>) -> Pcb {
        let mut pcb = load(JobDescriptor::new(pid, memory_needed, program), &mut self.memory).unwrap();
        pcb.transition(ProcessState::Ready, &mut self.memory).unwrap();
        pcb
    }

    fn slice(&mut self, pcb: &mut Pcb, budget: u64) -> SliceOutcome {
        pcb.transition(ProcessState::Running, &mut self.memory).unwrap();
        let mut ctx = ExecutionContext {
            memory: &mut self.memory,
            clock: &mut self.clock,
            events: &mut self.events,
        };
        let report = run_slice(pcb, &mut ctx, budget).unwrap();
        if report.outcome == SliceOutcome::Timeout {
            pcb.transition(ProcessState::Ready, &mut self.memory).unwrap();
        }
        report.outcome
    }
}

#[test]
fn test_remaining_instructions_decrease_by_one() {
    let mut cpu = Cpu::with(100);
    let mut pcb = cpu.admit(
        1,
        20,
        (0..4)
            .map(|_| Instruction::Compute {
                iterations: 1,
                cycles: 1,
            })
            .collect(),
    );

    let mut remaining = vec![pcb.remaining_instructions()];
    while cpu.slice(&mut pcb, 1) == SliceOutcome::Timeout {
        remaining.push(pcb.remaining_instructions());
    }
    remaining.push(pcb.remaining_instructions());

    assert_eq!(remaining, vec![4, 3, 2, 1, 0]);
}

#[test]
fn test_store_load_isolated_per_process() {
    let mut cpu = Cpu::with(100);
    let mut first = cpu.admit(
        1,
        15,
        vec![Instruction::Store {
            value: 31,
            address: 14,
        }],
    );
    let mut second = cpu.admit(2, 15, vec![Instruction::Load { address: 14 }]);

    cpu.slice(&mut first, 5);
    cpu.slice(&mut second, 5);

    // Same offset, different regions
    assert_eq!(cpu.memory.read(14).unwrap(), 31);
    assert_eq!(second.header().main_memory_base, 25);
    assert_eq!(second.header().register_value, -1);
}

#[test]
fn test_events_are_clock_ordered() {
    let mut cpu = Cpu::with(100);
    let mut pcb = cpu.admit(
        1,
        20,
        vec![
            Instruction::Compute {
                iterations: 2,
                cycles: 3,
            },
            Instruction::Store {
                value: 4,
                address: 19,
            },
            Instruction::Load { address: 19 },
            Instruction::Print { cycles: 7 },
            Instruction::Load { address: 19 },
        ],
    );

    let outcome = cpu.slice(&mut pcb, 100);
    assert_eq!(outcome, SliceOutcome::IoWait { release_at: 15 });

    let clocks: Vec<u64> = cpu.events.iter().map(|e| e.clock).collect();
    assert_eq!(clocks, vec![6, 7, 8, 8]);
    assert_eq!(
        cpu.events.as_slice()[3].payload,
        Payload::IoRequested { release_at: 15 }
    );
    assert_eq!(pcb.header().cpu_cycles_used, 15);
}
