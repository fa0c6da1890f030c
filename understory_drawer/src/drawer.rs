// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The drawer controller: gesture tracking plus the presence state machine.
//!
//! ## Phases
//!
//! ```text
//!            open=true                 entrance timer
//!  Closed ───────────────▶ Opening ─────────────────▶ Open ◀──────────┐
//!    ▲                        │                       │  press        │ release (snap back)
//!    │                        │ open=false            ▼               │
//!    │ close timer            └──────────────▶    Dragging ───────────┘
//!    │                                            │      │ open=false
//!    ├──────────────── SwipeClosing ◀─────────────┘      ▼
//!    │                 (release commits)              Closing
//!    └────────────────────────────────────────────────────┘
//! ```
//!
//! `Open` and `Dragging` move to `Closing` when the logical value flips to
//! `false` without a preceding swipe. A flip back to `true` from either closing
//! phase cancels the pending close timers and starts a fresh entrance.
//!
//! ## Timers
//!
//! Each [`TimerTarget`] has at most one pending deadline in an
//! [`understory_timing::TimerQueue`]. Scheduling a target again supersedes the
//! old deadline, and superseded [`TimerToken`]s are rejected by
//! [`Drawer::on_timer`], so a stale callback can not touch a newer phase.
//!
//! Hosts either poll with [`Drawer::tick`] at [`Drawer::next_deadline`], or
//! collect tokens with [`Drawer::take_scheduled`] and deliver each through
//! [`Drawer::on_timer`] when its own timer fires.

use alloc::vec::Vec;
use core::fmt::Debug;

use kurbo::{Point, Vec2};
use log::{debug, trace, warn};
use understory_timing::{TimerQueue, TimerToken};

use crate::attributes::{Attributes, Markers, Transition, VisualState};
use crate::config::{ConfigError, DrawerConfig};
use crate::gesture::{DragSession, ReleaseDecision, drawer_extent, evaluate_release};
use crate::host::{DrawerHost, PointerId, PointerInput};
use crate::parts::Part;
use crate::presence::{Controllable, OpenMode, Phase};

/// Things the controller waits on.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum TimerTarget {
    /// Entrance animation; ends the drag blackout.
    PanelOpen,
    /// Exit animation or swipe-out; unmounts the panel.
    PanelClose,
    /// Overlay fade-out.
    OverlayClose,
}

/// Headless drawer controller over host node keys `K`.
#[derive(Clone, Debug)]
pub struct Drawer<K> {
    config: DrawerConfig,
    open: Controllable,
    present: bool,
    phase: Phase,
    panel: Option<K>,
    overlay: Option<K>,
    handle: Option<K>,
    panel_attrs: Attributes,
    overlay_attrs: Attributes,
    session: Option<DragSession<K>>,
    captured: Option<(K, PointerId)>,
    timers: TimerQueue<TimerTarget>,
    scheduled: Vec<TimerToken<TimerTarget>>,
    // The swipe-out transform finished; waiting only on the logical close.
    swipe_elapsed: bool,
    frame_pending: bool,
}

impl<K: Copy + Eq + Debug> Drawer<K> {
    /// Create a controller. `present` is seeded from the initial open value.
    ///
    /// A drawer that starts open is mounted in [`Phase::Opening`]; its entrance
    /// timer starts at the first [`tick`](Self::tick).
    pub fn new(config: DrawerConfig, mode: OpenMode) -> Result<Self, ConfigError> {
        config.validate()?;
        let open = Controllable::new(mode);
        let initially_open = open.get();
        let state = if initially_open {
            VisualState::Open
        } else {
            VisualState::Closed
        };
        Ok(Self {
            config,
            open,
            present: initially_open,
            phase: if initially_open {
                Phase::Opening
            } else {
                Phase::Closed
            },
            panel: None,
            overlay: None,
            handle: None,
            panel_attrs: Attributes::new(state),
            overlay_attrs: Attributes::new(state),
            session: None,
            captured: None,
            timers: TimerQueue::new(),
            scheduled: Vec::new(),
            swipe_elapsed: false,
            frame_pending: false,
        })
    }

    /// The configuration this drawer was created with.
    pub fn config(&self) -> &DrawerConfig {
        &self.config
    }

    /// Current phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Logical open value.
    pub fn is_open(&self) -> bool {
        self.open.get()
    }

    /// Returns `true` once the caller drives the open value.
    pub fn is_controlled(&self) -> bool {
        self.open.is_controlled()
    }

    /// Whether the panel subtree should be mounted.
    pub fn is_present(&self) -> bool {
        self.present
    }

    /// Returns `true` while a drag session exists.
    pub fn is_dragging(&self) -> bool {
        self.session.is_some()
    }

    /// Returns `true` during the entrance blackout, when presses are rejected.
    pub fn is_animating(&self) -> bool {
        self.phase == Phase::Opening
    }

    /// The active drag session.
    pub fn session(&self) -> Option<&DragSession<K>> {
        self.session.as_ref()
    }

    /// Attributes last computed for the panel.
    pub fn panel_attributes(&self) -> Attributes {
        self.panel_attrs
    }

    /// Attributes last computed for the overlay.
    pub fn overlay_attributes(&self) -> Attributes {
        self.overlay_attrs
    }

    /// Earliest pending timer deadline.
    pub fn next_deadline(&self) -> Option<u64> {
        self.timers.next_deadline()
    }

    /// Tokens scheduled since the last call, newest per target.
    pub fn take_scheduled(&mut self) -> Vec<TimerToken<TimerTarget>> {
        core::mem::take(&mut self.scheduled)
    }

    /// Register `node` as `part`.
    ///
    /// Bindings are dropped when the panel unmounts; bind again on the next mount.
    pub fn bind(&mut self, part: Part, node: K) {
        *self.slot(part) = Some(node);
    }

    /// Clear the registration for `part`.
    pub fn unbind(&mut self, part: Part) {
        *self.slot(part) = None;
    }

    /// The node registered as `part`.
    pub fn bound(&self, part: Part) -> Option<K> {
        match part {
            Part::Content => self.panel,
            Part::Overlay => self.overlay,
            Part::Handle => self.handle,
        }
    }

    fn slot(&mut self, part: Part) -> &mut Option<K> {
        match part {
            Part::Content => &mut self.panel,
            Part::Overlay => &mut self.overlay,
            Part::Handle => &mut self.handle,
        }
    }

    // --- logical open value ------------------------------------------------

    /// Ask for a new open value (trigger, escape, overlay click).
    ///
    /// The host is notified through [`DrawerHost::open_changed`]. Uncontrolled
    /// drawers apply the change immediately; controlled drawers wait for
    /// [`sync_open`](Self::sync_open).
    pub fn request_open(&mut self, open: bool, now: u64, host: &mut impl DrawerHost<K>) {
        let (notify, applied) = self.open.request(open);
        if notify {
            host.open_changed(open);
        }
        if applied {
            self.apply_open(open, now, host);
        }
    }

    /// Push an externally controlled open value.
    ///
    /// Re-sending the current value is a no-op; in particular `true → true`
    /// never restarts the entrance animation.
    pub fn sync_open(&mut self, open: bool, now: u64, host: &mut impl DrawerHost<K>) {
        if self.open.sync(open) {
            self.apply_open(open, now, host);
        }
    }

    fn apply_open(&mut self, open: bool, now: u64, host: &mut impl DrawerHost<K>) {
        if open {
            self.enter(now, host);
        } else {
            self.exit(now, host);
        }
        self.check_invariants();
    }

    fn enter(&mut self, now: u64, host: &mut impl DrawerHost<K>) {
        let was_present = self.present;
        if self.timers.cancel(TimerTarget::PanelClose) {
            debug!("re-open cancelled a pending close");
        }
        self.timers.cancel(TimerTarget::OverlayClose);
        self.swipe_elapsed = false;

        self.panel_attrs = Attributes::new(VisualState::Open);
        self.overlay_attrs = Attributes::new(VisualState::Open);
        self.phase = Phase::Opening;
        debug!("drawer opening (mounted: {was_present})");

        if was_present {
            // Still mounted from an interrupted close: start over from here.
            let t = timed(self.config.timings.open_ms);
            if let Some(panel) = self.panel {
                host.set_transform(panel, Vec2::ZERO, t);
            }
            if let Some(overlay) = self.overlay {
                host.set_overlay_opacity(overlay, 1.0, t);
            }
        } else {
            self.present = true;
            host.set_present(true);
        }
        self.begin_entrance(now, host);
    }

    /// The dialog's auto-focus hook: the mounted parts are bound.
    ///
    /// Applies the entrance attributes to the freshly bound nodes. The entrance
    /// timer itself already runs from the open flip, so a late or missing call
    /// only delays attributes, never the end of the blackout.
    pub fn on_open_auto_focus(&mut self, now: u64, host: &mut impl DrawerHost<K>) {
        if self.phase != Phase::Opening {
            return;
        }
        if self.timers.is_pending(TimerTarget::PanelOpen) {
            self.write_attributes(host);
        } else {
            self.begin_entrance(now, host);
        }
    }

    fn begin_entrance(&mut self, now: u64, host: &mut impl DrawerHost<K>) {
        if self.phase != Phase::Opening || self.timers.is_pending(TimerTarget::PanelOpen) {
            return;
        }
        self.panel_attrs.markers.insert(Markers::ANIMATING_OPEN);
        self.schedule(TimerTarget::PanelOpen, now, self.config.timings.open_ms);
        self.write_attributes(host);
    }

    fn exit(&mut self, now: u64, host: &mut impl DrawerHost<K>) {
        match self.phase {
            Phase::Closed | Phase::Closing => {}
            Phase::SwipeClosing => {
                if self.swipe_elapsed {
                    self.finish(host);
                }
            }
            Phase::Opening | Phase::Open | Phase::Dragging => self.start_close(now, host),
        }
    }

    fn start_close(&mut self, now: u64, host: &mut impl DrawerHost<K>) {
        self.timers.cancel(TimerTarget::PanelOpen);
        if self.session.take().is_some() {
            debug!("close interrupted an active drag");
        }
        self.release_capture(host);

        self.panel_attrs.state = VisualState::Closed;
        self.panel_attrs.markers.remove(Markers::DRAGGING | Markers::ANIMATING_OPEN);
        self.panel_attrs.markers.insert(Markers::ANIMATING_CLOSED);
        self.overlay_attrs = Attributes {
            state: VisualState::Closed,
            markers: Markers::ANIMATING_CLOSED,
        };
        self.phase = Phase::Closing;
        debug!("drawer closing");

        let close_ms = self.config.timings.close_ms;
        self.schedule(TimerTarget::PanelClose, now, close_ms);
        self.schedule(TimerTarget::OverlayClose, now, close_ms);
        self.write_attributes(host);
    }

    fn finish(&mut self, host: &mut impl DrawerHost<K>) {
        self.timers.clear();
        self.scheduled.clear();
        self.session = None;
        self.release_capture(host);
        self.swipe_elapsed = false;
        self.frame_pending = false;

        self.panel_attrs = Attributes::new(VisualState::Closed);
        self.overlay_attrs = Attributes::new(VisualState::Closed);
        if let Some(panel) = self.panel {
            host.apply_panel(panel, &self.panel_attrs);
            host.set_transform(panel, Vec2::ZERO, Transition::None);
        }
        if let Some(overlay) = self.overlay {
            host.apply_overlay(overlay, &self.overlay_attrs);
        }

        self.phase = Phase::Closed;
        self.present = false;
        self.panel = None;
        self.overlay = None;
        self.handle = None;
        debug!("drawer closed");
        host.set_present(false);
        host.animation_ended(false);
    }

    // --- gestures ------------------------------------------------------------

    /// Pointer down. Returns `true` if a drag session started.
    ///
    /// Rejected when a session already exists, when the drawer is not at rest
    /// in [`Phase::Open`] (this includes the entrance blackout), when
    /// `handle_only` is set and the press is outside the handle, or when no
    /// panel can be resolved.
    pub fn on_press(
        &mut self,
        input: &PointerInput<'_, K>,
        now: u64,
        host: &mut impl DrawerHost<K>,
    ) -> bool {
        if self.session.is_some() {
            trace!("press ignored: drag already active");
            return false;
        }
        if self.phase != Phase::Open {
            debug!("press rejected during {:?}", self.phase);
            return false;
        }
        if self.config.handle_only
            && !self.handle.is_some_and(|handle| input.path.contains(&handle))
        {
            trace!("press ignored: outside handle");
            return false;
        }
        let Some(target) = input.target() else {
            return false;
        };
        let Some(panel) = self.panel.or_else(|| {
            input
                .path
                .iter()
                .rev()
                .copied()
                .find(|&node| host.is_panel(node))
        }) else {
            warn!("press on {target:?} did not resolve a drawer panel");
            return false;
        };
        self.panel = Some(panel);

        match host.capture_pointer(target, input.pointer) {
            Ok(()) => self.captured = Some((target, input.pointer)),
            Err(err) => debug!("continuing drag without capture: {err}"),
        }

        self.session = Some(DragSession::new(input.pointer, input.position, now, panel));
        self.panel_attrs.markers.insert(Markers::DRAGGING);
        self.phase = Phase::Dragging;
        host.apply_panel(panel, &self.panel_attrs);
        true
    }

    /// Pointer move. Applies the clamped offset immediately.
    pub fn on_drag(&mut self, input: &PointerInput<'_, K>, host: &mut impl DrawerHost<K>) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        if session.pointer != input.pointer {
            return;
        }
        let projection = self.config.direction.projection();
        let distance = session.update(&projection, input.position);
        let panel = session.panel;
        trace!("drag distance {distance}");
        host.set_transform(panel, projection.offset(distance), Transition::None);
        if let Some(overlay) = self.overlay {
            let extent = self.extent(panel, &*host);
            host.set_overlay_opacity(overlay, overlay_opacity(distance, extent), Transition::None);
        }
    }

    /// Pointer up. Returns the decision, or `None` if no drag was active.
    ///
    /// A second release without an intervening press is a no-op.
    pub fn on_release(
        &mut self,
        input: &PointerInput<'_, K>,
        now: u64,
        host: &mut impl DrawerHost<K>,
    ) -> Option<ReleaseDecision> {
        self.end_gesture(input.pointer, Some(input.position), now, host)
    }

    /// Pointer cancel. Treated as a release with zero distance, so it snaps back.
    pub fn on_cancel(
        &mut self,
        pointer: PointerId,
        now: u64,
        host: &mut impl DrawerHost<K>,
    ) -> Option<ReleaseDecision> {
        self.end_gesture(pointer, None, now, host)
    }

    fn end_gesture(
        &mut self,
        pointer: PointerId,
        position: Option<Point>,
        now: u64,
        host: &mut impl DrawerHost<K>,
    ) -> Option<ReleaseDecision> {
        let session = self.session.filter(|s| s.pointer == pointer)?;
        self.session = None;
        self.release_capture(host);

        let projection = self.config.direction.projection();
        let distance = position.map_or(0.0, |p| session.distance_to(&projection, p));
        let extent = self.extent(session.panel, &*host);
        let eval = evaluate_release(&self.config, distance, session.elapsed_ms(now), extent);
        debug!(
            "release: {:.1}px in {}ms ({:.3}px/ms) -> {:?}",
            eval.distance, eval.elapsed_ms, eval.velocity, eval.decision
        );

        self.panel_attrs.markers.remove(Markers::DRAGGING);
        match eval.decision {
            ReleaseDecision::Close => self.swipe_close(session.panel, extent, now, host),
            ReleaseDecision::SnapBack => self.snap_back(session.panel, host),
        }
        self.check_invariants();
        Some(eval.decision)
    }

    fn swipe_close(&mut self, panel: K, extent: f64, now: u64, host: &mut impl DrawerHost<K>) {
        let transform_ms = self.config.timings.transform_ms;
        let t = timed(transform_ms);
        let projection = self.config.direction.projection();

        self.phase = Phase::SwipeClosing;
        self.swipe_elapsed = false;
        self.overlay_attrs = Attributes {
            state: VisualState::Closed,
            markers: Markers::ANIMATING_CLOSED,
        };
        host.set_transform(panel, projection.offset(extent), t);
        if let Some(overlay) = self.overlay {
            host.set_overlay_opacity(overlay, 0.0, t);
        }
        self.write_attributes(host);
        self.schedule(TimerTarget::OverlayClose, now, transform_ms);
        self.schedule(TimerTarget::PanelClose, now, transform_ms);
    }

    fn snap_back(&mut self, panel: K, host: &mut impl DrawerHost<K>) {
        let t = timed(self.config.timings.transform_ms);
        self.phase = Phase::Open;
        host.set_transform(panel, Vec2::ZERO, t);
        if let Some(overlay) = self.overlay {
            host.set_overlay_opacity(overlay, 1.0, t);
        }
        host.apply_panel(panel, &self.panel_attrs);
    }

    fn release_capture(&mut self, host: &mut impl DrawerHost<K>) {
        if let Some((node, pointer)) = self.captured.take() {
            host.release_pointer(node, pointer);
        }
    }

    fn extent(&self, panel: K, host: &impl DrawerHost<K>) -> f64 {
        let axis = self.config.direction.projection().axis;
        drawer_extent(axis, host.panel_size(panel), host.viewport_size())
    }

    // --- timers and frames ---------------------------------------------------

    /// Deliver every timer due at `now`.
    ///
    /// A drawer created open has no clock until its first call here; the
    /// entrance timer starts at that `now`.
    pub fn tick(&mut self, now: u64, host: &mut impl DrawerHost<K>) {
        self.begin_entrance(now, host);
        while let Some(token) = self.timers.pop_expired(now) {
            self.on_expired(token.target(), host);
        }
    }

    /// Deliver one host-managed timer. Returns `false` for stale tokens.
    pub fn on_timer(
        &mut self,
        token: TimerToken<TimerTarget>,
        now: u64,
        host: &mut impl DrawerHost<K>,
    ) -> bool {
        if !self.timers.fire(&token) {
            trace!("stale {:?} timer ignored", token.target());
            return false;
        }
        self.on_expired(token.target(), host);
        true
    }

    fn on_expired(&mut self, target: TimerTarget, host: &mut impl DrawerHost<K>) {
        trace!("{target:?} timer expired in {:?}", self.phase);
        match target {
            TimerTarget::PanelOpen => {
                if self.phase == Phase::Opening {
                    self.panel_attrs.markers.remove(Markers::ANIMATING_OPEN);
                    self.panel_attrs.markers.insert(Markers::OPENED);
                    self.phase = Phase::Open;
                    debug!("drawer open");
                    self.write_attributes(host);
                    host.animation_ended(true);
                }
            }
            TimerTarget::OverlayClose => {
                self.overlay_attrs.markers.remove(Markers::ANIMATING_CLOSED);
                if let Some(overlay) = self.overlay {
                    host.apply_overlay(overlay, &self.overlay_attrs);
                }
            }
            TimerTarget::PanelClose => match self.phase {
                Phase::Closing => self.finish(host),
                Phase::SwipeClosing => {
                    self.swipe_elapsed = true;
                    let (notify, _) = self.open.request(false);
                    if notify {
                        host.open_changed(false);
                    }
                    if !self.open.get() {
                        self.finish(host);
                    }
                }
                _ => {}
            },
        }
        self.check_invariants();
    }

    /// Next-paint callback requested through [`DrawerHost::request_frame`].
    ///
    /// Applies attributes that were deferred because the panel was not bound.
    /// If it still is not, the pending close timer unmounts regardless.
    pub fn on_frame(&mut self, host: &mut impl DrawerHost<K>) {
        if !self.frame_pending {
            return;
        }
        self.frame_pending = false;
        match self.panel {
            Some(panel) => host.apply_panel(panel, &self.panel_attrs),
            None => debug!("panel still unbound at frame; skipping attributes"),
        }
    }

    fn schedule(&mut self, target: TimerTarget, now: u64, delay: u64) {
        let token = self.timers.schedule_after(target, now, delay);
        trace!("{target:?} timer due at {}", token.deadline());
        self.scheduled.retain(|t| t.target() != target);
        self.scheduled.push(token);
    }

    fn write_attributes(&mut self, host: &mut impl DrawerHost<K>) {
        match self.panel {
            Some(panel) => {
                self.frame_pending = false;
                host.apply_panel(panel, &self.panel_attrs);
            }
            None if !self.frame_pending => {
                self.frame_pending = true;
                host.request_frame();
            }
            None => {}
        }
        if let Some(overlay) = self.overlay {
            host.apply_overlay(overlay, &self.overlay_attrs);
        }
    }

    fn check_invariants(&self) {
        debug_assert!(
            self.present || self.phase == Phase::Closed,
            "unmounted drawer must be closed, found {:?}",
            self.phase
        );
        debug_assert!(
            !self.open.get() || self.present,
            "open drawer must be mounted"
        );
    }
}

fn timed(duration_ms: u64) -> Transition {
    Transition::Timed { duration_ms }
}

/// Overlay opacity for a drag of `distance` over a drawer of size `extent`.
fn overlay_opacity(distance: f64, extent: f64) -> f64 {
    if extent > 0.0 {
        (1.0 - distance / extent).clamp(0.0, 1.0)
    } else {
        1.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overlay_fades_with_distance() {
        assert_eq!(overlay_opacity(0.0, 400.0), 1.0);
        assert_eq!(overlay_opacity(100.0, 400.0), 0.75);
        assert_eq!(overlay_opacity(800.0, 400.0), 0.0);
        assert_eq!(overlay_opacity(10.0, 0.0), 1.0);
    }

    #[test]
    fn initial_open_seeds_present() {
        let d: Drawer<u32> = Drawer::new(
            DrawerConfig::default(),
            OpenMode::Uncontrolled { default_open: true },
        )
        .unwrap();
        assert!(d.is_present());
        assert!(d.is_open());
        assert_eq!(d.phase(), Phase::Opening);
        assert_eq!(d.panel_attributes().state, VisualState::Open);
    }

    #[test]
    fn invalid_config_is_rejected() {
        let config = DrawerConfig::default().with_velocity_threshold(-1.0);
        let d = Drawer::<u32>::new(config, OpenMode::default());
        assert!(matches!(d, Err(ConfigError::VelocityThreshold(_))));
    }
}
