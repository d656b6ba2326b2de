/*!
 * Run Loop
 * One scheduling pass per step, repeated until both queues drain
 */

use super::types::{CompletionRecord, StepOutcome};
use super::Scheduler;
use crate::core::types::{KernelResult, Tick};
use crate::execution::{run_slice, ExecutionContext, SliceOutcome, SliceReport};
use crate::monitoring::Payload;
use crate::process::{ProcessResult, ProcessState};
use tracing::{error, info};

impl Scheduler {
    /// Run one scheduling pass.
    ///
    /// Admits loaded jobs, idles while every live process waits on I/O,
    /// dispatches the head of the ready queue for one time slice and files it
    /// by how the slice ended. Returns `None` once every queue is empty.
    pub fn step(&mut self) -> KernelResult<Option<StepOutcome>> {
        self.admit_loaded()?;

        while self.ready_queue.is_empty() && !self.io_wait_queue.is_empty() {
            self.scan_io();
            if self.ready_queue.is_empty() {
                self.idle();
            }
        }

        let Some(slot) = self.dispatch()? else {
            return Ok(None);
        };

        let slice = {
            let mut ctx = ExecutionContext {
                memory: &mut self.memory,
                clock: &mut self.clock,
                events: &mut self.events,
            };
            run_slice(&mut self.processes[slot], &mut ctx, self.config.cpu_allocated)?
        };
        self.stats.address_faults += slice.address_faults as u64;

        let pid = self.processes[slot].pid();
        self.reclassify(slot, &slice)?;
        self.running = None;
        self.scan_io();

        Ok(Some(StepOutcome { pid, slice }))
    }

    /// Step until both queues drain; returns the total CPU time
    pub fn run(&mut self) -> KernelResult<Tick> {
        while self.step()?.is_some() {}

        let total = self.total_cpu_time();
        info!(
            total_cpu_time = total,
            terminated = self.stats.terminated,
            dispatches = self.stats.dispatches,
            "all queues drained"
        );
        Ok(total)
    }

    fn reclassify(&mut self, slot: usize, slice: &SliceReport) -> ProcessResult<()> {
        let now = self.clock.now();
        let pcb = &mut self.processes[slot];
        let pid = pcb.pid();

        match slice.outcome {
            SliceOutcome::Terminated => {
                pcb.transition(ProcessState::Terminated, &mut self.memory)?;
                pcb.mark_terminated(now);
                let started_at = pcb.started_at().unwrap_or(now);
                let record = CompletionRecord {
                    header: *pcb.header(),
                    started_at,
                    terminated_at: now,
                    total_execution_time: now.saturating_sub(started_at),
                };
                info!(
                    pid,
                    started_at,
                    terminated_at = now,
                    cpu_cycles_used = record.header.cpu_cycles_used,
                    "process terminated"
                );
                self.stats.terminated += 1;
                self.events
                    .emit(now, Some(pid), Payload::Terminated(record.clone()));
                self.completions.push(record);
            }
            SliceOutcome::IoWait { .. } => {
                self.stats.io_interrupts += 1;
                self.io_wait_queue.push_back(slot);
            }
            SliceOutcome::Timeout => {
                pcb.transition(ProcessState::Ready, &mut self.memory)?;
                self.stats.timeouts += 1;
                self.events.emit(now, Some(pid), Payload::TimedOut);
                self.ready_queue.push_back(slot);
            }
            SliceOutcome::Stalled => {
                error!(pid, clock = now, "slice ended without progress; requeueing");
                pcb.transition(ProcessState::Ready, &mut self.memory)?;
                self.stats.invariant_violations += 1;
                self.events.emit(
                    now,
                    Some(pid),
                    Payload::InvariantViolation {
                        detail: format!(
                            "process {pid} ended a slice with neither I/O, timeout nor termination"
                        ),
                    },
                );
                self.ready_queue.push_back(slot);
            }
        }
        Ok(())
    }
}
