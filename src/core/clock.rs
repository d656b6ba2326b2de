/*!
 * Simulated Clock
 * Monotonic global time driving every scheduling decision
 */

use super::types::{Cycles, Tick};
use serde::{Deserialize, Serialize};

/// Global clock. Only moves forward.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SimClock(Tick);

impl SimClock {
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self(0)
    }

    #[inline(always)]
    pub const fn now(&self) -> Tick {
        self.0
    }

    /// Advance by `cycles` and return the new time
    #[inline]
    pub fn advance(&mut self, cycles: Cycles) -> Tick {
        self.0 = self.0.saturating_add(cycles);
        self.0
    }
}
