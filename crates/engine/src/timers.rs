// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Timer engine for claim countdowns and offer expiry
//!
//! Timers are addressed by [`TimerKey`] rather than by closure, so cancelling
//! is explicit and a stale heap entry can never fire: every arm bumps a
//! generation counter and only the live generation is delivered.

use rc_core::{HolderId, ResourceCode};
use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap};
use std::time::{Duration, Instant};

/// What a timer is for
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TimerKey {
    /// Recurring per-minute countdown of a claim
    ClaimTick {
        holder: HolderId,
        resource: ResourceCode,
    },
    /// One-shot lapse of an offer
    OfferExpiry {
        holder: HolderId,
        resource: ResourceCode,
    },
}

impl TimerKey {
    pub fn claim_tick(holder: &HolderId, resource: &ResourceCode) -> Self {
        TimerKey::ClaimTick {
            holder: holder.clone(),
            resource: resource.clone(),
        }
    }

    pub fn offer_expiry(holder: &HolderId, resource: &ResourceCode) -> Self {
        TimerKey::OfferExpiry {
            holder: holder.clone(),
            resource: resource.clone(),
        }
    }
}

#[derive(Debug)]
struct Armed {
    fire_at: Instant,
    repeat: Option<Duration>,
    generation: u64,
}

#[derive(Debug, PartialEq, Eq)]
struct Scheduled {
    fire_at: Instant,
    seq: u64,
    generation: u64,
    key: TimerKey,
}

impl Ord for Scheduled {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse for min-heap
        other
            .fire_at
            .cmp(&self.fire_at)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for Scheduled {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Keyed timer wheel driven by explicit polling
#[derive(Debug, Default)]
pub struct TimerEngine {
    heap: BinaryHeap<Scheduled>,
    armed: HashMap<TimerKey, Armed>,
    next_seq: u64,
    next_generation: u64,
}

impl TimerEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm a recurring timer. Re-arming an existing key replaces it.
    pub fn schedule_repeating(&mut self, key: TimerKey, period: Duration, first_at: Instant) {
        self.arm(key, first_at, Some(period));
    }

    /// Arm a one-shot timer. Re-arming an existing key replaces it.
    pub fn schedule_once(&mut self, key: TimerKey, at: Instant) {
        self.arm(key, at, None);
    }

    fn arm(&mut self, key: TimerKey, fire_at: Instant, repeat: Option<Duration>) {
        self.next_generation += 1;
        let generation = self.next_generation;
        self.armed.insert(
            key.clone(),
            Armed {
                fire_at,
                repeat,
                generation,
            },
        );
        self.push(key, fire_at, generation);
    }

    fn push(&mut self, key: TimerKey, fire_at: Instant, generation: u64) {
        self.next_seq += 1;
        self.heap.push(Scheduled {
            fire_at,
            seq: self.next_seq,
            generation,
            key,
        });
    }

    /// Disarm a timer. Returns whether it was armed.
    pub fn cancel(&mut self, key: &TimerKey) -> bool {
        self.armed.remove(key).is_some()
    }

    #[cfg(test)]
    pub(crate) fn is_armed(&self, key: &TimerKey) -> bool {
        self.armed.contains_key(key)
    }

    /// Pop the next timer due at `now`, if any.
    ///
    /// Repeating timers are re-armed one period after their previous
    /// deadline, so a late poll delivers every missed period in turn.
    pub fn pop_due(&mut self, now: Instant) -> Option<TimerKey> {
        loop {
            if self.heap.peek()?.fire_at > now {
                return None;
            }
            let scheduled = self.heap.pop()?;

            let repeat = match self.armed.get_mut(&scheduled.key) {
                Some(armed) if armed.generation == scheduled.generation => armed.repeat,
                // Cancelled or re-armed since this entry was pushed
                _ => continue,
            };

            match repeat {
                Some(period) => {
                    let next = scheduled.fire_at + period;
                    if let Some(armed) = self.armed.get_mut(&scheduled.key) {
                        armed.fire_at = next;
                    }
                    self.push(scheduled.key.clone(), next, scheduled.generation);
                }
                None => {
                    self.armed.remove(&scheduled.key);
                }
            }
            return Some(scheduled.key);
        }
    }

    /// Earliest pending deadline
    pub fn next_deadline(&self) -> Option<Instant> {
        self.armed.values().map(|a| a.fire_at).min()
    }

    pub fn len(&self) -> usize {
        self.armed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.armed.is_empty()
    }

    /// Disarm everything
    pub fn clear(&mut self) {
        self.heap.clear();
        self.armed.clear();
    }
}

#[cfg(test)]
#[path = "timers_tests.rs"]
mod tests;
