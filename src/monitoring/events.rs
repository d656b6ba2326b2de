/*!
 * Event System
 * Strongly-typed, chronologically ordered simulation events
 *
 * The event log is the data the reporter renders. Every entry is stamped with
 * the simulated clock at the moment it was emitted.
 */

use crate::core::types::{Address, Cycles, Pid, Size, Tick, Word};
use crate::scheduler::CompletionRecord;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

/// One simulation event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    /// Simulated clock at emission
    pub clock: Tick,
    /// Process ID if applicable
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pid: Option<Pid>,
    /// Event payload
    pub payload: Payload,
}

/// Event payload - strongly typed variants for each event type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Payload {
    // Loading
    ProcessLoaded {
        base: Address,
        footprint: Size,
    },
    LoadRejected {
        reason: String,
        insufficient_memory: bool,
    },

    // Scheduling
    Dispatched,
    TimedOut,
    IoRequested {
        release_at: Tick,
    },
    IoCompleted,
    Idle {
        advanced_by: Cycles,
    },
    InvariantViolation {
        detail: String,
    },
    Terminated(CompletionRecord),

    // Instructions
    Computed {
        cycles: Cycles,
    },
    Stored {
        address: Word,
        value: Word,
    },
    StoreFault {
        address: Word,
        limit: Size,
    },
    Loaded {
        address: Word,
        value: Word,
    },
    LoadFault {
        address: Word,
        limit: Size,
    },
}

impl Payload {
    /// Events produced while loading jobs, before the first dispatch
    #[inline]
    pub fn is_load_phase(&self) -> bool {
        matches!(
            self,
            Payload::ProcessLoaded { .. } | Payload::LoadRejected { .. }
        )
    }
}

/// Append-only event log
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventLog {
    events: Vec<Event>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an event and mirror it to the tracing subscriber
    pub fn emit(&mut self, clock: Tick, pid: Option<Pid>, payload: Payload) {
        match &payload {
            Payload::InvariantViolation { detail } => {
                warn!(clock, pid, detail = %detail, "scheduler invariant violated")
            }
            Payload::StoreFault { address, limit } | Payload::LoadFault { address, limit } => {
                debug!(clock, pid, address, limit, "address fault")
            }
            other => trace!(clock, pid, event = ?other, "event"),
        }
        self.events.push(Event {
            clock,
            pid,
            payload,
        });
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Event> {
        self.events.iter()
    }

    pub fn as_slice(&self) -> &[Event] {
        &self.events
    }

    pub fn into_vec(self) -> Vec<Event> {
        self.events
    }
}
