/*!
 * Scheduler Core Operations
 * Admission, dispatch, I/O completion scanning and idling
 */

use super::types::LoadRejection;
use super::Scheduler;
use crate::core::limits::{MIN_IDLE_STEP, PCB_HEADER_SIZE};
use crate::core::types::Pid;
use crate::monitoring::Payload;
use crate::process::{self, JobDescriptor, ProcessError, ProcessResult, ProcessState};
use std::collections::VecDeque;
use tracing::{debug, info, warn};

impl Scheduler {
    /// Load a job and move it straight to the ready queue.
    ///
    /// A rejected job is recorded and reported, never retried. Admission writes
    /// NEW and then READY into the state field of the header.
    pub fn admit(&mut self, job: JobDescriptor) -> ProcessResult<Pid> {
        let pid = self.load_job(job)?;
        self.admit_loaded()?;
        Ok(pid)
    }

    /// Load a job into memory in the NEW state.
    ///
    /// The process waits in the new queue until `admit_loaded` promotes it.
    pub fn load_job(&mut self, job: JobDescriptor) -> ProcessResult<Pid> {
        let pid = job.pid;

        let loaded = if self.index.contains_key(&pid) {
            Err(ProcessError::DuplicatePid(pid))
        } else {
            process::load(job, &mut self.memory)
        };

        let pcb = match loaded {
            Ok(pcb) => pcb,
            Err(error) => {
                self.reject(pid, error.clone());
                return Err(error);
            }
        };

        let base = pcb.header().main_memory_base;
        let footprint = PCB_HEADER_SIZE.saturating_add(pcb.header().max_memory_needed);
        let slot = self.processes.len();
        self.processes.push(pcb);
        self.index.insert(pid, slot);
        self.new_queue.push_back(slot);
        self.stats.loaded += 1;

        self.events
            .emit(self.clock.now(), Some(pid), Payload::ProcessLoaded { base, footprint });
        debug!(pid, base, footprint, "process loaded");
        Ok(pid)
    }

    /// Move every loaded process to the ready queue in load order.
    ///
    /// Returns the number of processes promoted.
    pub fn admit_loaded(&mut self) -> ProcessResult<usize> {
        let mut admitted = 0;
        while let Some(slot) = self.new_queue.pop_front() {
            let pcb = &mut self.processes[slot];
            pcb.transition(ProcessState::Ready, &mut self.memory)?;
            info!(pid = pcb.pid(), "process admitted to ready queue");
            self.ready_queue.push_back(slot);
            admitted += 1;
        }
        Ok(admitted)
    }

    /// Load jobs in order, skipping the ones that do not fit.
    ///
    /// Loaded processes stay NEW until the first scheduling pass admits them.
    /// Returns the number of jobs loaded.
    pub fn load_jobs<I>(&mut self, jobs: I) -> usize
    where
        I: IntoIterator<Item = JobDescriptor>,
    {
        jobs.into_iter()
            .map(|job| self.load_job(job))
            .filter(Result::is_ok)
            .count()
    }

    /// Move every process whose I/O has completed to the ready queue.
    ///
    /// Processes that complete in the same scan keep their relative order.
    /// Returns the number of processes moved.
    pub fn scan_io(&mut self) -> usize {
        let now = self.clock.now();
        let mut moved = 0;
        let mut still_waiting = VecDeque::with_capacity(self.io_wait_queue.len());

        while let Some(slot) = self.io_wait_queue.pop_front() {
            let pcb = &mut self.processes[slot];
            if !pcb.io_complete(now) {
                still_waiting.push_back(slot);
                continue;
            }

            if let Err(err) = pcb.transition(ProcessState::Ready, &mut self.memory) {
                // Keep the process schedulable rather than stranding it
                warn!(pid = pcb.pid(), error = %err, "failed to record I/O completion");
            }
            pcb.clear_io_release();
            let pid = pcb.pid();
            self.ready_queue.push_back(slot);
            self.stats.io_completions += 1;
            self.events.emit(now, Some(pid), Payload::IoCompleted);
            moved += 1;
        }

        self.io_wait_queue = still_waiting;
        moved
    }

    /// Busy-wait one step while every live process is blocked on I/O
    pub(super) fn idle(&mut self) {
        let step = self.config.context_switch_time.max(MIN_IDLE_STEP);
        let now = self.clock.advance(step);
        self.stats.idle_ticks += step;
        self.events.emit(now, None, Payload::Idle { advanced_by: step });
    }

    /// Pop the head of the ready queue and give it the CPU.
    ///
    /// Charges one context switch and records the first-dispatch time.
    pub(super) fn dispatch(&mut self) -> ProcessResult<Option<usize>> {
        let Some(slot) = self.ready_queue.pop_front() else {
            return Ok(None);
        };

        let now = self.clock.advance(self.config.context_switch_time);
        let pcb = &mut self.processes[slot];
        pcb.transition(ProcessState::Running, &mut self.memory)?;
        pcb.mark_started(now);
        let pid = pcb.pid();

        self.running = Some(slot);
        self.stats.dispatches += 1;
        self.events.emit(now, Some(pid), Payload::Dispatched);
        debug!(pid, clock = now, "process dispatched");
        Ok(Some(slot))
    }

    fn reject(&mut self, pid: Pid, error: ProcessError) {
        warn!(pid, error = %error, "job rejected at admission");
        self.events.emit(
            self.clock.now(),
            Some(pid),
            Payload::LoadRejected {
                reason: error.to_string(),
                insufficient_memory: matches!(error, ProcessError::InsufficientMemory { .. }),
            },
        );
        self.stats.rejected += 1;
        self.rejections.push(LoadRejection { pid, error });
    }
}
