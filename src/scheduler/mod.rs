/*!
 * CPU Scheduler
 * Round-robin scheduling of loaded jobs over a single simulated CPU
 *
 * The scheduler owns every piece of mutable machine state: the memory image,
 * the clock, the process table and both queues. Queues hold slots into the
 * process table, so a PCB is never copied while it moves between them.
 */

use crate::core::clock::SimClock;
use crate::core::config::SystemConfig;
use crate::core::errors::ConfigError;
use crate::core::types::{Pid, Tick};
use crate::memory::MemoryImage;
use crate::monitoring::EventLog;
use crate::process::Pcb;
use ahash::AHashMap;
use std::collections::VecDeque;
use tracing::info;

mod operations;
mod run;
mod stats;
pub mod types;

pub use types::{CompletionRecord, LoadRejection, SchedulerStats, StepOutcome};

/// Single-CPU round-robin scheduler
pub struct Scheduler {
    config: SystemConfig,
    memory: MemoryImage,
    clock: SimClock,

    // Process table, indexed by admission order
    processes: Vec<Pcb>,
    // Pid -> slot lookup
    index: AHashMap<Pid, usize>,

    // Loaded but not yet admitted; header state still NEW
    new_queue: VecDeque<usize>,
    ready_queue: VecDeque<usize>,
    io_wait_queue: VecDeque<usize>,
    running: Option<usize>,

    events: EventLog,
    completions: Vec<CompletionRecord>,
    rejections: Vec<LoadRejection>,
    stats: SchedulerStats,
}

impl Scheduler {
    /// Create a scheduler with a fresh, sentinel-filled memory image
    pub fn new(config: SystemConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        info!(
            max_memory = config.max_memory,
            cpu_allocated = config.cpu_allocated,
            context_switch_time = config.context_switch_time,
            "scheduler initialized"
        );

        Ok(Self {
            config,
            memory: MemoryImage::new(config.max_memory),
            clock: SimClock::new(),
            processes: Vec::new(),
            index: AHashMap::new(),
            new_queue: VecDeque::new(),
            ready_queue: VecDeque::new(),
            io_wait_queue: VecDeque::new(),
            running: None,
            events: EventLog::new(),
            completions: Vec::new(),
            rejections: Vec::new(),
            stats: SchedulerStats::default(),
        })
    }

    #[inline]
    #[must_use]
    pub fn config(&self) -> &SystemConfig {
        &self.config
    }

    /// Current simulated time
    #[inline]
    #[must_use]
    pub fn clock(&self) -> Tick {
        self.clock.now()
    }

    #[inline]
    #[must_use]
    pub fn memory(&self) -> &MemoryImage {
        &self.memory
    }

    /// Loaded processes awaiting admission, in load order
    pub fn new_pids(&self) -> Vec<Pid> {
        self.pids_of(&self.new_queue)
    }

    /// Ready queue contents, front first
    pub fn ready_pids(&self) -> Vec<Pid> {
        self.pids_of(&self.ready_queue)
    }

    /// I/O wait queue contents, front first
    pub fn io_waiting_pids(&self) -> Vec<Pid> {
        self.pids_of(&self.io_wait_queue)
    }

    /// Process currently holding the CPU, if any
    #[must_use]
    pub fn running(&self) -> Option<Pid> {
        self.running.map(|slot| self.processes[slot].pid())
    }

    pub fn process(&self, pid: Pid) -> Option<&Pcb> {
        self.index.get(&pid).map(|&slot| &self.processes[slot])
    }

    /// Every admitted process in admission order
    pub fn processes(&self) -> &[Pcb] {
        &self.processes
    }

    #[inline]
    pub fn events(&self) -> &EventLog {
        &self.events
    }

    #[inline]
    pub fn completions(&self) -> &[CompletionRecord] {
        &self.completions
    }

    #[inline]
    pub fn rejections(&self) -> &[LoadRejection] {
        &self.rejections
    }

    /// Every queue is empty and nothing is running
    #[inline]
    #[must_use]
    pub fn is_drained(&self) -> bool {
        self.new_queue.is_empty()
            && self.ready_queue.is_empty()
            && self.io_wait_queue.is_empty()
            && self.running.is_none()
    }

    /// Clock plus one trailing context switch
    #[inline]
    #[must_use]
    pub fn total_cpu_time(&self) -> Tick {
        self.clock
            .now()
            .saturating_add(self.config.context_switch_time)
    }

    /// Consume the scheduler, keeping the parts a report needs
    pub fn into_parts(self) -> (MemoryImage, EventLog, Vec<CompletionRecord>, Vec<LoadRejection>) {
        (self.memory, self.events, self.completions, self.rejections)
    }

    fn pids_of(&self, queue: &VecDeque<usize>) -> Vec<Pid> {
        queue.iter().map(|&slot| self.processes[slot].pid()).collect()
    }
}
