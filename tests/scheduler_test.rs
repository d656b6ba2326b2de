/*!
 * Scheduler Tests
 * End-to-end round-robin scenarios over the public API
 */

use pretty_assertions::assert_eq;
use sim_kernel::{
    Instruction, JobDescriptor, Payload, ProcessState, Scheduler, SliceOutcome, SystemConfig,
};

fn compute(iterations: u32, cycles: u32) -> Instruction {
    Instruction::Compute { iterations, cycles }
}

#[test]
fn test_reference_scenario_total_cpu_time() {
    let mut scheduler = Scheduler::new(SystemConfig::new(100, 5, 1)).unwrap();
    scheduler
        .admit(JobDescriptor::new(1, 10, vec![compute(2, 2)]))
        .unwrap();

    let step = scheduler.step().unwrap().unwrap();
    assert_eq!(step.slice.outcome, SliceOutcome::Terminated);
    assert_eq!(step.slice.cycles_used, 4);

    assert_eq!(scheduler.run().unwrap(), 6);
    assert_eq!(scheduler.total_cpu_time(), 6);
}

#[test]
fn test_print_release_time() {
    let mut scheduler = Scheduler::new(SystemConfig::new(100, 10, 1)).unwrap();
    scheduler
        .admit(JobDescriptor::new(
            1,
            10,
            vec![
                compute(1, 2),
                Instruction::Print { cycles: 3 },
                compute(1, 1),
            ],
        ))
        .unwrap();

    // Dispatch at 1, compute to 3, PRINT issued at T=3
    let step = scheduler.step().unwrap().unwrap();
    assert_eq!(step.slice.outcome, SliceOutcome::IoWait { release_at: 6 });
    assert_eq!(scheduler.clock(), 3);
    assert!(scheduler.ready_pids().is_empty());
    assert_eq!(scheduler.io_waiting_pids(), vec![1]);
    assert_eq!(
        scheduler.process(1).unwrap().state(),
        ProcessState::IoWaiting
    );

    // Idle until the release at 6, then dispatch at 7
    scheduler.step().unwrap().unwrap();
    let dispatched_at = scheduler
        .events()
        .iter()
        .filter(|e| e.payload == Payload::Dispatched)
        .map(|e| e.clock)
        .collect::<Vec<_>>();
    assert_eq!(dispatched_at, vec![1, 7]);

    let completed_at = scheduler
        .events()
        .iter()
        .find(|e| e.payload == Payload::IoCompleted)
        .map(|e| e.clock);
    assert_eq!(completed_at, Some(6));
    assert!(scheduler.is_drained());
}

#[test]
fn test_round_robin_interleaving() {
    let mut scheduler = Scheduler::new(SystemConfig::new(200, 4, 1)).unwrap();
    scheduler.load_jobs(vec![
        JobDescriptor::new(1, 20, vec![compute(1, 4), compute(1, 4)]),
        JobDescriptor::new(2, 20, vec![compute(1, 4), compute(1, 4)]),
    ]);

    let mut order = Vec::new();
    while let Some(step) = scheduler.step().unwrap() {
        order.push((step.pid, step.slice.outcome));
    }

    assert_eq!(
        order,
        vec![
            (1, SliceOutcome::Timeout),
            (2, SliceOutcome::Timeout),
            (1, SliceOutcome::Terminated),
            (2, SliceOutcome::Terminated),
        ]
    );
    // 4 dispatches, 16 compute cycles, one trailing switch
    assert_eq!(scheduler.total_cpu_time(), 4 + 16 + 1);
    assert_eq!(scheduler.stats().timeouts, 2);
}

#[test]
fn test_io_completion_preserves_fifo_order() {
    let mut scheduler = Scheduler::new(SystemConfig::new(200, 10, 0)).unwrap();
    scheduler.load_jobs(vec![
        JobDescriptor::new(1, 10, vec![Instruction::Print { cycles: 5 }, compute(1, 1)]),
        JobDescriptor::new(2, 10, vec![Instruction::Print { cycles: 5 }, compute(1, 1)]),
        JobDescriptor::new(3, 10, vec![Instruction::Print { cycles: 5 }, compute(1, 1)]),
    ]);

    for _ in 0..3 {
        scheduler.step().unwrap();
    }
    assert_eq!(scheduler.io_waiting_pids(), vec![1, 2, 3]);

    scheduler.run().unwrap();
    let resumed = scheduler
        .events()
        .iter()
        .filter(|e| e.payload == Payload::IoCompleted)
        .filter_map(|e| e.pid)
        .collect::<Vec<_>>();
    assert_eq!(resumed, vec![1, 2, 3]);
}

#[test]
fn test_trailing_print_terminates_without_io() {
    let mut scheduler = Scheduler::new(SystemConfig::new(100, 5, 1)).unwrap();
    scheduler
        .admit(JobDescriptor::new(
            1,
            10,
            vec![Instruction::Print { cycles: 50 }],
        ))
        .unwrap();

    scheduler.run().unwrap();

    assert_eq!(scheduler.stats().io_interrupts, 0);
    assert_eq!(scheduler.total_cpu_time(), 2);
    let record = &scheduler.completions()[0];
    assert_eq!(record.header.cpu_cycles_used, 50);
}

#[test]
fn test_faulting_store_leaves_memory_untouched() {
    let mut scheduler = Scheduler::new(SystemConfig::new(100, 5, 1)).unwrap();
    scheduler
        .admit(JobDescriptor::new(
            1,
            10,
            vec![
                Instruction::Store {
                    value: 99,
                    address: 10,
                },
                Instruction::Load { address: 10 },
            ],
        ))
        .unwrap();
    let before = scheduler.memory().read_block(10, 100).unwrap().to_vec();

    scheduler.run().unwrap();

    let pcb = scheduler.process(1).unwrap();
    assert_eq!(pcb.program_counter(), 2);
    assert_eq!(pcb.header().register_value, -1);
    assert_eq!(scheduler.memory().read_block(10, 100).unwrap(), before.as_slice());
    assert_eq!(scheduler.stats().address_faults, 2);
}

#[test]
fn test_terminated_header_projected() {
    let mut scheduler = Scheduler::new(SystemConfig::new(100, 5, 2)).unwrap();
    scheduler
        .admit(JobDescriptor::new(
            9,
            10,
            vec![
                Instruction::Store {
                    value: 12,
                    address: 9,
                },
                compute(1, 3),
            ],
        ))
        .unwrap();
    scheduler.run().unwrap();

    let memory = scheduler.memory();
    assert_eq!(memory.read(0).unwrap(), 9);
    assert_eq!(memory.read(1).unwrap(), ProcessState::Terminated.code());
    assert_eq!(memory.read(2).unwrap(), 2);
    assert_eq!(memory.read(6).unwrap(), 4);
    assert_eq!(memory.read(7).unwrap(), 12);
    assert_eq!(memory.read(9).unwrap(), 12);
}
