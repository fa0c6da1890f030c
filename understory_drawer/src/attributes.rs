// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Observable state written to the panel and overlay nodes.
//!
//! The controller describes what a host should render as [`Attributes`]: a
//! coarse [`VisualState`] plus a set of transient [`Markers`]. A DOM host can
//! apply [`Attributes::data_attributes`] verbatim; other render targets map the
//! same information onto their own styling hooks.
//!
//! ```
//! use understory_drawer::attributes::{Attributes, Markers, VisualState};
//!
//! let attrs = Attributes {
//!     state: VisualState::Open,
//!     markers: Markers::ANIMATING_OPEN,
//! };
//! let pairs: Vec<_> = attrs.data_attributes().collect();
//! assert_eq!(pairs, vec![("data-state", "open"), ("data-animating", "open")]);
//! ```

use core::iter;

/// Coarse open/closed marker.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum VisualState {
    /// Shown, or animating in.
    Open,
    /// Hidden, or animating out.
    #[default]
    Closed,
}

impl VisualState {
    /// The `data-state` value.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Closed => "closed",
        }
    }
}

bitflags::bitflags! {
    /// Transient markers layered on top of [`VisualState`].
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct Markers: u8 {
        /// A drag is in progress; transition styling should be suppressed.
        const DRAGGING         = 0b0000_0001;
        /// The entrance animation is running.
        const ANIMATING_OPEN   = 0b0000_0010;
        /// An exit animation is running.
        const ANIMATING_CLOSED = 0b0000_0100;
        /// The entrance animation has completed at least once since the last real open.
        const OPENED           = 0b0000_1000;
    }
}

/// State marker plus transient markers for one node.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Attributes {
    /// Open/closed marker.
    pub state: VisualState,
    /// Transient markers.
    pub markers: Markers,
}

impl Attributes {
    /// Attributes for a node in the given state with no transient markers.
    pub const fn new(state: VisualState) -> Self {
        Self {
            state,
            markers: Markers::empty(),
        }
    }

    /// `(name, value)` pairs in the DOM `data-*` convention.
    ///
    /// Absent markers produce no pair; hosts should remove attributes that are
    /// not listed.
    pub fn data_attributes(&self) -> impl Iterator<Item = (&'static str, &'static str)> + '_ {
        let m = self.markers;
        let animating = if m.contains(Markers::ANIMATING_CLOSED) {
            Some("closed")
        } else if m.contains(Markers::ANIMATING_OPEN) {
            Some("open")
        } else {
            None
        };
        iter::once(("data-state", self.state.as_str()))
            .chain(m.contains(Markers::DRAGGING).then_some(("data-dragging", "true")))
            .chain(animating.map(|v| ("data-animating", v)))
            .chain(m.contains(Markers::OPENED).then_some(("data-opened", "true")))
    }
}

/// How a positional or opacity change should be applied.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Transition {
    /// Apply immediately with transitions suppressed.
    #[default]
    None,
    /// Animate over the given duration.
    Timed {
        /// Duration in milliseconds.
        duration_ms: u64,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    #[test]
    fn closed_without_markers_is_state_only() {
        let attrs = Attributes::new(VisualState::Closed);
        let pairs: Vec<_> = attrs.data_attributes().collect();
        assert_eq!(pairs, [("data-state", "closed")]);
    }

    #[test]
    fn all_markers_render_in_order() {
        let attrs = Attributes {
            state: VisualState::Open,
            markers: Markers::DRAGGING | Markers::OPENED,
        };
        let pairs: Vec<_> = attrs.data_attributes().collect();
        assert_eq!(
            pairs,
            [
                ("data-state", "open"),
                ("data-dragging", "true"),
                ("data-opened", "true"),
            ]
        );
    }

    #[test]
    fn closing_wins_over_opening() {
        let attrs = Attributes {
            state: VisualState::Closed,
            markers: Markers::ANIMATING_OPEN | Markers::ANIMATING_CLOSED,
        };
        assert!(
            attrs
                .data_attributes()
                .any(|pair| pair == ("data-animating", "closed"))
        );
    }
}
