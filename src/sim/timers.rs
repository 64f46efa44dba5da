//! Cancellable countdowns on the simulation clock
//!
//! Each slot holds at most one pending deadline. Scheduling an occupied slot
//! replaces its deadline, which is how power-up refresh works.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::powerup::PowerUpKind;

/// Everything that can be waiting on a deadline
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum TimerSlot {
    /// Expiry of a power-up effect
    Effect(PowerUpKind),
    /// Slide stance self-revert
    SlideRevert,
}

/// Deadline table keyed by slot (BTreeMap so firing order is stable)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TickTimers {
    deadlines: BTreeMap<TimerSlot, u64>,
}

impl TickTimers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fire `slot` once `delay_ticks` have passed from `now`, replacing any
    /// pending deadline. Returns true if a pending deadline was cancelled.
    pub fn schedule(&mut self, slot: TimerSlot, now: u64, delay_ticks: u64) -> bool {
        self.deadlines
            .insert(slot, now.saturating_add(delay_ticks))
            .is_some()
    }

    /// Cancel a pending deadline. Returns true if one was pending.
    pub fn cancel(&mut self, slot: TimerSlot) -> bool {
        self.deadlines.remove(&slot).is_some()
    }

    pub fn is_pending(&self, slot: TimerSlot) -> bool {
        self.deadlines.contains_key(&slot)
    }

    /// Ticks left before `slot` fires
    pub fn remaining(&self, slot: TimerSlot, now: u64) -> Option<u64> {
        self.deadlines
            .get(&slot)
            .map(|deadline| deadline.saturating_sub(now))
    }

    /// Remove and return every slot whose deadline has been reached
    pub fn fire_due(&mut self, now: u64) -> Vec<TimerSlot> {
        let due: Vec<TimerSlot> = self
            .deadlines
            .iter()
            .filter(|&(_, &deadline)| deadline <= now)
            .map(|(&slot, _)| slot)
            .collect();
        for slot in &due {
            self.deadlines.remove(slot);
        }
        due
    }

    /// Drop every pending deadline
    pub fn clear(&mut self) {
        self.deadlines.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.deadlines.is_empty()
    }
}
