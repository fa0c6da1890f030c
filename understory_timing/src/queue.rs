// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Single-deadline-per-target timer queue with generation-stamped tokens.

use core::hash::Hash;

use hashbrown::HashMap;

/// Handle to one scheduled deadline.
///
/// Tokens are cheap to copy and may be handed to a host callback. They carry the
/// generation recorded at schedule time; see [`TimerQueue::is_current`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct TimerToken<T> {
    target: T,
    generation: u64,
    deadline: u64,
}

impl<T: Copy> TimerToken<T> {
    /// The target this timer was scheduled for.
    pub fn target(&self) -> T {
        self.target
    }

    /// The absolute deadline, in milliseconds.
    pub fn deadline(&self) -> u64 {
        self.deadline
    }

    /// The generation stamp assigned when this timer was scheduled.
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
struct Slot {
    deadline: u64,
    generation: u64,
}

/// A set of pending deadlines, at most one per target.
///
/// ## Semantics
///
/// - Generations start at `1` and increase on every call to [`schedule`](Self::schedule).
///   They are never reused, so a token can not alias a later timer.
/// - [`cancel`](Self::cancel) removes the slot; every token for that target becomes stale.
/// - [`pop_expired`](Self::pop_expired) returns the earliest expired timer. Equal
///   deadlines are ordered by generation, i.e. scheduling order.
#[derive(Clone, Debug)]
pub struct TimerQueue<T> {
    slots: HashMap<T, Slot>,
    last_generation: u64,
}

impl<T> Default for TimerQueue<T> {
    fn default() -> Self {
        Self {
            slots: HashMap::new(),
            last_generation: 0,
        }
    }
}

impl<T: Copy + Eq + Hash> TimerQueue<T> {
    /// Create an empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `target` to expire at `deadline`, replacing any pending deadline for it.
    pub fn schedule(&mut self, target: T, deadline: u64) -> TimerToken<T> {
        self.last_generation += 1;
        let generation = self.last_generation;
        self.slots.insert(
            target,
            Slot {
                deadline,
                generation,
            },
        );
        TimerToken {
            target,
            generation,
            deadline,
        }
    }

    /// Schedule `target` to expire `delay` milliseconds after `now`.
    pub fn schedule_after(&mut self, target: T, now: u64, delay: u64) -> TimerToken<T> {
        self.schedule(target, now.saturating_add(delay))
    }

    /// Cancel the pending deadline for `target`.
    ///
    /// Returns `true` if something was pending.
    pub fn cancel(&mut self, target: T) -> bool {
        self.slots.remove(&target).is_some()
    }

    /// Returns `true` if `target` has a pending deadline.
    pub fn is_pending(&self, target: T) -> bool {
        self.slots.contains_key(&target)
    }

    /// Returns `true` if `token` is still the live timer for its target.
    pub fn is_current(&self, token: &TimerToken<T>) -> bool {
        self.slots
            .get(&token.target)
            .is_some_and(|slot| slot.generation == token.generation)
    }

    /// The pending deadline for `target`, if any.
    pub fn deadline(&self, target: T) -> Option<u64> {
        self.slots.get(&target).map(|slot| slot.deadline)
    }

    /// The earliest pending deadline across all targets.
    ///
    /// Hosts use this to decide when to wake up next.
    pub fn next_deadline(&self) -> Option<u64> {
        self.slots.values().map(|slot| slot.deadline).min()
    }

    /// Consume a delivered timer.
    ///
    /// Returns `true` and removes the slot if `token` is current. Stale tokens
    /// return `false` and leave the queue untouched. The deadline itself is not
    /// checked; hosts that deliver their own callbacks are trusted on timing.
    pub fn fire(&mut self, token: &TimerToken<T>) -> bool {
        if self.is_current(token) {
            self.slots.remove(&token.target);
            true
        } else {
            false
        }
    }

    /// Remove and return the earliest timer whose deadline is `<= now`.
    pub fn pop_expired(&mut self, now: u64) -> Option<TimerToken<T>> {
        let (&target, &slot) = self
            .slots
            .iter()
            .filter(|(_, slot)| slot.deadline <= now)
            .min_by_key(|(_, slot)| (slot.deadline, slot.generation))?;
        self.slots.remove(&target);
        Some(TimerToken {
            target,
            generation: slot.generation,
            deadline: slot.deadline,
        })
    }

    /// Number of pending timers.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Returns `true` if nothing is pending.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Cancel everything.
    pub fn clear(&mut self) {
        self.slots.clear();
    }
}
