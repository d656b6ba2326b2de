/*!
 * Simulation
 * Load, run and report in one call
 */

use crate::core::types::KernelResult;
use crate::input::SimulationInput;
use crate::monitoring::{generate_run_id, RunSpan};
use crate::report::SimulationReport;
use crate::scheduler::Scheduler;

/// Run `input` to completion and collect the report
pub fn simulate(input: SimulationInput) -> KernelResult<SimulationReport> {
    let run = RunSpan::new(generate_run_id(), input.jobs.len());
    let _entered = run.span().enter();

    let mut scheduler = Scheduler::new(input.config)?;
    scheduler.load_jobs(input.jobs);
    let memory_after_load = scheduler.memory().snapshot();

    let total_cpu_time = scheduler.run()?;
    let stats = scheduler.stats();
    run.record_finish(total_cpu_time, stats.dispatches);

    let config = *scheduler.config();
    let (memory, events, completions, rejections) = scheduler.into_parts();
    Ok(SimulationReport {
        run_id: run.run_id().to_string(),
        config,
        rejections,
        memory_after_load,
        events,
        completions,
        stats,
        total_cpu_time,
        final_memory: memory.snapshot(),
    })
}
