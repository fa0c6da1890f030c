// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-mount drawer configuration.
//!
//! A [`DrawerConfig`] is supplied once when a [`Drawer`](crate::Drawer) is
//! created and is read-only afterwards. Use the `with_*` builders and let
//! [`Drawer::new`](crate::Drawer::new) validate the result.
//!
//! ```
//! use understory_drawer::{DrawerConfig, Direction};
//!
//! let config = DrawerConfig::default()
//!     .with_direction(Direction::Right)
//!     .with_close_threshold(0.4)
//!     .with_handle_only(true);
//! assert!(config.validate().is_ok());
//!
//! let bad = DrawerConfig::default().with_close_threshold(0.0);
//! assert!(bad.validate().is_err());
//! ```

use core::fmt;

use crate::direction::Direction;

/// Default fraction of the drawer extent that commits a drag to close.
pub const DEFAULT_CLOSE_THRESHOLD: f64 = 0.25;

/// Default release velocity, in pixels per millisecond, that commits a drag to close.
pub const DEFAULT_VELOCITY_THRESHOLD: f64 = 0.35;

/// Fixed animation durations, in milliseconds.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Timings {
    /// Entrance animation. New drags are rejected while it runs.
    pub open_ms: u64,
    /// Exit animation for a close that did not come from a drag.
    pub close_ms: u64,
    /// Timed transform after release: swipe-out or snap-back.
    pub transform_ms: u64,
}

impl Default for Timings {
    fn default() -> Self {
        Self {
            open_ms: 420,
            close_ms: 300,
            transform_ms: 300,
        }
    }
}

/// Immutable drawer configuration.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct DrawerConfig {
    /// Edge the drawer is attached to.
    pub direction: Direction,
    /// Fraction of the drawer extent, in `(0, 1]`, that commits a release to close.
    pub close_threshold: f64,
    /// Release velocity in px/ms above which a release commits to close.
    pub velocity_threshold: f64,
    /// When `false`, drags always snap back.
    pub dismissible: bool,
    /// When `true`, only presses inside the bound handle start a drag.
    pub handle_only: bool,
    /// Forwarded to the dialog collaborator; the controller does not interpret it.
    pub modal: bool,
    /// Animation durations.
    pub timings: Timings,
}

impl Default for DrawerConfig {
    fn default() -> Self {
        Self {
            direction: Direction::default(),
            close_threshold: DEFAULT_CLOSE_THRESHOLD,
            velocity_threshold: DEFAULT_VELOCITY_THRESHOLD,
            dismissible: true,
            handle_only: false,
            modal: true,
            timings: Timings::default(),
        }
    }
}

impl DrawerConfig {
    /// Set the edge.
    #[must_use]
    pub fn with_direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    /// Set the close threshold fraction.
    #[must_use]
    pub fn with_close_threshold(mut self, fraction: f64) -> Self {
        self.close_threshold = fraction;
        self
    }

    /// Set the velocity threshold (px/ms).
    #[must_use]
    pub fn with_velocity_threshold(mut self, px_per_ms: f64) -> Self {
        self.velocity_threshold = px_per_ms;
        self
    }

    /// Allow or forbid dismissal by dragging.
    #[must_use]
    pub fn with_dismissible(mut self, dismissible: bool) -> Self {
        self.dismissible = dismissible;
        self
    }

    /// Restrict drags to the bound handle.
    #[must_use]
    pub fn with_handle_only(mut self, handle_only: bool) -> Self {
        self.handle_only = handle_only;
        self
    }

    /// Set the modal flag passed through to the dialog.
    #[must_use]
    pub fn with_modal(mut self, modal: bool) -> Self {
        self.modal = modal;
        self
    }

    /// Override animation durations.
    #[must_use]
    pub fn with_timings(mut self, timings: Timings) -> Self {
        self.timings = timings;
        self
    }

    /// Check that every field is within range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.close_threshold > 0.0 && self.close_threshold <= 1.0) {
            return Err(ConfigError::CloseThreshold(self.close_threshold));
        }
        if !(self.velocity_threshold.is_finite() && self.velocity_threshold > 0.0) {
            return Err(ConfigError::VelocityThreshold(self.velocity_threshold));
        }
        let t = self.timings;
        if t.open_ms == 0 || t.close_ms == 0 || t.transform_ms == 0 {
            return Err(ConfigError::ZeroDuration);
        }
        Ok(())
    }
}

/// Error returned by [`DrawerConfig::validate`].
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum ConfigError {
    /// The close threshold is not in `(0, 1]`.
    CloseThreshold(f64),
    /// The velocity threshold is not a positive finite number.
    VelocityThreshold(f64),
    /// One of the animation durations is zero.
    ZeroDuration,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CloseThreshold(v) => write!(f, "close threshold {v} is outside (0, 1]"),
            Self::VelocityThreshold(v) => {
                write!(f, "velocity threshold {v} must be positive and finite")
            }
            Self::ZeroDuration => f.write_str("animation durations must be non-zero"),
        }
    }
}

impl core::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let c = DrawerConfig::default();
        assert_eq!(c.direction, Direction::Bottom);
        assert_eq!(c.close_threshold, 0.25);
        assert_eq!(c.velocity_threshold, 0.35);
        assert!(c.dismissible);
        assert!(!c.handle_only);
        assert_eq!(c.validate(), Ok(()));
    }

    #[test]
    fn threshold_bounds() {
        let ok = DrawerConfig::default().with_close_threshold(1.0);
        assert!(ok.validate().is_ok());
        for bad in [0.0, -0.1, 1.01, f64::NAN] {
            let c = DrawerConfig::default().with_close_threshold(bad);
            assert!(
                matches!(c.validate(), Err(ConfigError::CloseThreshold(_))),
                "{bad}"
            );
        }
    }

    #[test]
    fn velocity_must_be_positive_and_finite() {
        for bad in [0.0, -1.0, f64::INFINITY, f64::NAN] {
            let c = DrawerConfig::default().with_velocity_threshold(bad);
            assert!(
                matches!(c.validate(), Err(ConfigError::VelocityThreshold(_))),
                "{bad}"
            );
        }
    }

    #[test]
    fn zero_duration_is_rejected() {
        let c = DrawerConfig::default().with_timings(Timings {
            close_ms: 0,
            ..Timings::default()
        });
        assert_eq!(c.validate(), Err(ConfigError::ZeroDuration));
    }
}
