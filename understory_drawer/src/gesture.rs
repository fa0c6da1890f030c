// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drag session bookkeeping and the release decision.
//!
//! ## Usage
//!
//! 1) Create a [`DragSession`] when an accepted press arrives.
//! 2) On each move, call [`DragSession::update`] to get the clamped closing distance.
//! 3) On release, measure the final distance and pass it with the elapsed time and
//!    [`drawer_extent`] to [`evaluate_release`].
//!
//! [`Drawer`](crate::Drawer) does all of this for you; the pieces are public so
//! that hosts can preview a decision or unit test their own thresholds.
//!
//! ## Minimal example
//!
//! ```
//! use understory_drawer::DrawerConfig;
//! use understory_drawer::gesture::{ReleaseDecision, evaluate_release};
//!
//! let config = DrawerConfig::default();
//! // A short, fast flick closes.
//! assert_eq!(evaluate_release(&config, 5.0, 1, 400.0).decision, ReleaseDecision::Close);
//! // A slow, short drag snaps back.
//! assert_eq!(evaluate_release(&config, 60.0, 400, 400.0).decision, ReleaseDecision::SnapBack);
//! ```

use kurbo::{Point, Size};

use crate::config::DrawerConfig;
use crate::direction::{Axis, AxisProjection};
use crate::host::PointerId;

/// The single active drag.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct DragSession<K> {
    /// Pointer that started the drag; events from other pointers are ignored.
    pub pointer: PointerId,
    /// Where the press landed.
    pub start: Point,
    /// When the press landed.
    pub start_ms: u64,
    /// The panel being dragged.
    pub panel: K,
    /// Most recent clamped closing distance.
    pub distance: f64,
}

impl<K> DragSession<K> {
    /// Start a session at `start`.
    pub fn new(pointer: PointerId, start: Point, start_ms: u64, panel: K) -> Self {
        Self {
            pointer,
            start,
            start_ms,
            panel,
            distance: 0.0,
        }
    }

    /// Closing distance for a pointer at `position`, clamped to `>= 0`.
    pub fn distance_to(&self, projection: &AxisProjection, position: Point) -> f64 {
        projection.closing_distance(position - self.start)
    }

    /// Record a move and return the new closing distance.
    pub fn update(&mut self, projection: &AxisProjection, position: Point) -> f64 {
        self.distance = self.distance_to(projection, position);
        self.distance
    }

    /// Milliseconds since the press, never less than `1`.
    pub fn elapsed_ms(&self, now: u64) -> u64 {
        now.saturating_sub(self.start_ms).max(1)
    }
}

/// What a release should do.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ReleaseDecision {
    /// Finish dismissing the drawer.
    Close,
    /// Spring back to the resting position.
    SnapBack,
}

/// Measurements behind a [`ReleaseDecision`].
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ReleaseEvaluation {
    /// Clamped closing distance in px.
    pub distance: f64,
    /// Elapsed time in ms, at least `1`.
    pub elapsed_ms: u64,
    /// `distance / elapsed_ms`, in px/ms.
    pub velocity: f64,
    /// Distance at which the release commits regardless of speed.
    pub threshold_distance: f64,
    /// The outcome.
    pub decision: ReleaseDecision,
}

/// Size of the drawer along `axis`, clamped to the viewport.
///
/// Falls back to the viewport dimension when the panel has not been laid out.
pub fn drawer_extent(axis: Axis, panel: Option<Size>, viewport: Size) -> f64 {
    let limit = axis.extent(viewport);
    panel.map_or(limit, |size| axis.extent(size).min(limit))
}

/// Decide whether a release commits to close.
///
/// Commits iff the drawer is dismissible and either the velocity exceeds the
/// configured threshold or the distance reaches `extent * close_threshold`.
/// `distance` is clamped to `>= 0` first, so motion in the opening direction can
/// not commit by either rule.
pub fn evaluate_release(
    config: &DrawerConfig,
    distance: f64,
    elapsed_ms: u64,
    extent: f64,
) -> ReleaseEvaluation {
    let distance = distance.max(0.0);
    let elapsed_ms = elapsed_ms.max(1);
    let velocity = distance / elapsed_ms as f64;
    let threshold_distance = extent * config.close_threshold;
    let commit = config.dismissible
        && (velocity > config.velocity_threshold || distance >= threshold_distance);
    ReleaseEvaluation {
        distance,
        elapsed_ms,
        velocity,
        threshold_distance,
        decision: if commit {
            ReleaseDecision::Close
        } else {
            ReleaseDecision::SnapBack
        },
    }
}
