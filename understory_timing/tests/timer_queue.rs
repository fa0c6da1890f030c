// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tests for the `understory_timing` crate.
//!
//! These drive a `TimerQueue` the way a host event loop would: schedule,
//! supersede, and deliver callbacks late or out of order.

use understory_timing::TimerQueue;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
enum Anim {
    Enter,
    Exit,
    Backdrop,
}

#[test]
fn superseded_callback_does_not_fire_after_reschedule() {
    let mut timers = TimerQueue::new();
    let first = timers.schedule_after(Anim::Exit, 0, 300);
    let second = timers.schedule_after(Anim::Exit, 100, 300);

    // Host delivers the first callback at its original deadline.
    assert!(!timers.fire(&first));
    assert!(timers.is_pending(Anim::Exit));

    assert!(timers.fire(&second));
    assert!(timers.is_empty());
}

#[test]
fn cancelled_target_rejects_every_outstanding_token() {
    let mut timers = TimerQueue::new();
    let token = timers.schedule_after(Anim::Enter, 0, 420);
    assert!(timers.cancel(Anim::Enter));
    assert!(!timers.cancel(Anim::Enter));
    assert!(!timers.fire(&token));
}

#[test]
fn polling_loop_drains_in_deadline_order() {
    let mut timers = TimerQueue::new();
    timers.schedule_after(Anim::Exit, 0, 300);
    timers.schedule_after(Anim::Backdrop, 0, 300);
    timers.schedule_after(Anim::Enter, 0, 120);

    let mut order = Vec::new();
    let mut now = 0;
    while let Some(deadline) = timers.next_deadline() {
        now = deadline;
        while let Some(token) = timers.pop_expired(now) {
            order.push(token.target());
        }
    }

    assert_eq!(now, 300);
    assert_eq!(order, vec![Anim::Enter, Anim::Exit, Anim::Backdrop]);
}

#[test]
fn independent_targets_do_not_interfere() {
    let mut timers = TimerQueue::new();
    let exit = timers.schedule_after(Anim::Exit, 0, 300);
    timers.schedule_after(Anim::Backdrop, 0, 300);
    timers.schedule_after(Anim::Backdrop, 50, 300);

    assert!(timers.is_current(&exit));
    assert_eq!(timers.deadline(Anim::Backdrop), Some(350));
    assert_eq!(timers.len(), 2);
}
