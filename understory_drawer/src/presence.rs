// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Logical open value, mounted-ness, and the derived animation phase.

/// Where the drawer is in its lifecycle.
///
/// Invariants kept by [`Drawer`](crate::Drawer):
/// - `present == false` implies [`Phase::Closed`].
/// - `open == true` implies `present == true`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Phase {
    /// Unmounted.
    #[default]
    Closed,
    /// Mounted, entrance animation pending or running. Drags are rejected.
    Opening,
    /// At rest and accepting drags.
    Open,
    /// Following the pointer.
    Dragging,
    /// Released past the commit threshold; sliding out before the logical close.
    SwipeClosing,
    /// Closed by the caller; exit animation running.
    Closing,
}

/// How the logical open value is owned.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum OpenMode {
    /// The controller owns the value, starting from `default_open`.
    Uncontrolled {
        /// Initial value.
        default_open: bool,
    },
    /// The caller owns the value and pushes changes with
    /// [`Drawer::sync_open`](crate::Drawer::sync_open).
    Controlled(bool),
}

impl Default for OpenMode {
    fn default() -> Self {
        Self::Uncontrolled {
            default_open: false,
        }
    }
}

/// A controllable boolean: externally driven if supplied, else tracked internally.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) struct Controllable {
    value: bool,
    controlled: bool,
}

impl Controllable {
    pub(crate) fn new(mode: OpenMode) -> Self {
        match mode {
            OpenMode::Uncontrolled { default_open } => Self {
                value: default_open,
                controlled: false,
            },
            OpenMode::Controlled(value) => Self {
                value,
                controlled: true,
            },
        }
    }

    pub(crate) fn get(&self) -> bool {
        self.value
    }

    pub(crate) fn is_controlled(&self) -> bool {
        self.controlled
    }

    /// A change request. Returns `(notify, applied)`.
    ///
    /// Changes are only notified when they differ from the current value, and
    /// only applied immediately when uncontrolled.
    pub(crate) fn request(&mut self, value: bool) -> (bool, bool) {
        if value == self.value {
            return (false, false);
        }
        if self.controlled {
            (true, false)
        } else {
            self.value = value;
            (true, true)
        }
    }

    /// Accept an externally driven value. Returns `true` if it changed.
    pub(crate) fn sync(&mut self, value: bool) -> bool {
        self.controlled = true;
        let changed = self.value != value;
        self.value = value;
        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uncontrolled_applies_requests() {
        let mut c = Controllable::new(OpenMode::default());
        assert!(!c.get());
        assert_eq!(c.request(true), (true, true));
        assert!(c.get());
        assert_eq!(c.request(true), (false, false));
    }

    #[test]
    fn controlled_only_notifies() {
        let mut c = Controllable::new(OpenMode::Controlled(true));
        assert_eq!(c.request(false), (true, false));
        assert!(c.get());
        assert!(c.sync(false));
        assert!(!c.get());
        assert!(!c.sync(false));
    }

    #[test]
    fn sync_takes_ownership() {
        let mut c = Controllable::new(OpenMode::Uncontrolled { default_open: true });
        assert!(!c.is_controlled());
        c.sync(true);
        assert!(c.is_controlled());
    }
}
