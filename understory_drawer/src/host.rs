// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The boundary between the controller and whatever renders the drawer.
//!
//! The controller never owns nodes. It holds node keys `K` and asks a
//! [`DrawerHost`] to measure, capture pointers, and apply attributes and
//! transforms. A DOM host maps these calls onto `setPointerCapture`,
//! `data-*` attributes and inline `transform` styles; a retained-mode toolkit
//! maps them onto its own widget properties.
//!
//! All calls are synchronous and happen inside the controller method that
//! caused them, so drag transforms land in the same callback as the pointer
//! move that produced them.

use core::fmt;

use kurbo::{Point, Size, Vec2};

use crate::attributes::{Attributes, Transition};

/// Identifier of the pointer driving a gesture.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct PointerId(pub u64);

/// A pointer event as seen by the controller.
///
/// `path` is the root→target chain of nodes under the pointer. The last entry
/// is the event target.
#[derive(Copy, Clone, Debug)]
pub struct PointerInput<'a, K> {
    /// Pointer that produced the event.
    pub pointer: PointerId,
    /// Position in viewport coordinates.
    pub position: Point,
    /// Root→target node path.
    pub path: &'a [K],
}

impl<'a, K: Copy> PointerInput<'a, K> {
    /// Build an input event.
    pub fn new(pointer: PointerId, position: Point, path: &'a [K]) -> Self {
        Self {
            pointer,
            position,
            path,
        }
    }

    /// The event target, if the path is non-empty.
    pub fn target(&self) -> Option<K> {
        self.path.last().copied()
    }
}

/// Pointer capture could not be acquired.
///
/// The controller treats this as non-fatal and continues the drag from
/// bubbling events.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum CaptureError {
    /// The platform has no capture support.
    Unsupported,
    /// The platform refused capture for this pointer.
    Rejected,
}

impl fmt::Display for CaptureError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unsupported => f.write_str("pointer capture is not supported"),
            Self::Rejected => f.write_str("pointer capture was rejected"),
        }
    }
}

impl core::error::Error for CaptureError {}

/// Host services used by [`Drawer`](crate::Drawer).
pub trait DrawerHost<K> {
    /// Returns `true` if `node` carries the structural drawer-panel marker.
    ///
    /// Used to find the panel by walking up from an event target when no panel
    /// has been bound yet.
    fn is_panel(&self, node: K) -> bool;

    /// Current size of the panel, if it is laid out.
    fn panel_size(&self, panel: K) -> Option<Size>;

    /// Size of the viewport.
    fn viewport_size(&self) -> Size;

    /// Acquire exclusive pointer capture on `node`.
    fn capture_pointer(&mut self, node: K, pointer: PointerId) -> Result<(), CaptureError>;

    /// Release pointer capture previously acquired on `node`.
    fn release_pointer(&mut self, node: K, pointer: PointerId) {
        let _ = (node, pointer);
    }

    /// Write state and markers onto the panel.
    fn apply_panel(&mut self, panel: K, attributes: &Attributes);

    /// Write state and markers onto the overlay.
    fn apply_overlay(&mut self, overlay: K, attributes: &Attributes);

    /// Set the panel's positional offset from its resting position.
    fn set_transform(&mut self, panel: K, offset: Vec2, transition: Transition);

    /// Set the overlay opacity in `[0, 1]`.
    fn set_overlay_opacity(&mut self, overlay: K, opacity: f64, transition: Transition) {
        let _ = (overlay, opacity, transition);
    }

    /// Mount (`true`) or unmount (`false`) the panel subtree.
    fn set_present(&mut self, present: bool);

    /// Ask for [`Drawer::on_frame`](crate::Drawer::on_frame) at the next paint.
    fn request_frame(&mut self);

    /// The logical open value changed (`onOpenChange`).
    fn open_changed(&mut self, open: bool);

    /// An entrance (`true`) or exit (`false`) animation finished.
    fn animation_ended(&mut self, open: bool) {
        let _ = open;
    }
}
