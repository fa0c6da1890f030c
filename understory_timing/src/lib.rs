// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_timing --heading-base-level=0

//! Understory Timing: host-agnostic timer queue primitives for UI runtimes.
//!
//! UI state machines often need "call me back in N milliseconds" without owning
//! an event loop. This crate keeps the bookkeeping for such deadlines and leaves
//! actual waking to the host: a browser can translate deadlines to `setTimeout`,
//! a winit loop to `ControlFlow::WaitUntil`, and a test to a simulated clock.
//!
//! The core type is [`TimerQueue`]. It is keyed by a caller-chosen *target*
//! type, and it keeps **at most one** outstanding deadline per target:
//!
//! - Scheduling a target that already has a deadline replaces it.
//! - Every scheduled deadline gets a fresh, never-reused generation stamp.
//! - A [`TimerToken`] captured at schedule time is only *current* while its
//!   generation is the one recorded for its target. Rescheduling or cancelling
//!   the target makes older tokens stale, and [`TimerQueue::fire`] rejects them.
//!
//! This means a superseded callback can never apply its effect, even if the
//! host delivers it late or out of order.
//!
//! ## Minimal example
//!
//! ```rust
//! use understory_timing::TimerQueue;
//!
//! #[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
//! enum Target { Fade, Close }
//!
//! let mut timers = TimerQueue::new();
//! let stale = timers.schedule_after(Target::Close, 0, 300);
//!
//! // The close is re-requested before it fires; the first token goes stale.
//! let fresh = timers.schedule_after(Target::Close, 100, 300);
//! assert!(!timers.is_current(&stale));
//! assert_eq!(timers.deadline(Target::Close), Some(400));
//!
//! // Late delivery of the old callback is rejected.
//! assert!(!timers.fire(&stale));
//!
//! // Polling hands out expired timers in deadline order.
//! timers.schedule_after(Target::Fade, 100, 50);
//! assert_eq!(timers.pop_expired(399).map(|t| t.target()), Some(Target::Fade));
//! assert_eq!(timers.pop_expired(399), None);
//! assert_eq!(timers.pop_expired(400), Some(fresh));
//! ```
//!
//! Times are plain `u64` milliseconds on a clock of the host's choosing.
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod queue;

pub use queue::{TimerQueue, TimerToken};
