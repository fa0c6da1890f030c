// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Binding content, overlay, and handle nodes to a controller.
//!
//! Sub-components of a drawer only make sense with a controller behind them.
//! [`DrawerPart::bind`] takes the controller as an `Option` so that a toolkit can
//! forward whatever its context lookup produced; a missing controller is a
//! programmer error and is reported once, at construction, as
//! [`MissingController`].
//!
//! ```
//! use understory_drawer::{Drawer, DrawerConfig, OpenMode};
//! use understory_drawer::parts::{DrawerPart, MissingController, Part};
//!
//! let mut drawer: Drawer<u32> = Drawer::new(DrawerConfig::default(), OpenMode::default()).unwrap();
//!
//! let overlay = DrawerPart::bind(Part::Overlay, 7, Some(&mut drawer)).unwrap();
//! assert_eq!(drawer.bound(Part::Overlay), Some(7));
//!
//! let orphan = DrawerPart::<u32>::bind(Part::Handle, 9, None);
//! assert_eq!(orphan.unwrap_err(), MissingController { part: Part::Handle });
//!
//! overlay.unbind(&mut drawer);
//! assert_eq!(drawer.bound(Part::Overlay), None);
//! ```

use core::fmt;

use crate::drawer::Drawer;

/// A drawer sub-component.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Part {
    /// The sliding panel.
    Content,
    /// The backdrop behind the panel.
    Overlay,
    /// The grab handle; the only drag origin when `handle_only` is set.
    Handle,
}

impl Part {
    /// A stable name for diagnostics.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Content => "content",
            Self::Overlay => "overlay",
            Self::Handle => "handle",
        }
    }
}

/// A drawer part was constructed without a controller.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct MissingController {
    /// The part that was being constructed.
    pub part: Part,
}

impl fmt::Display for MissingController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "drawer {} must be used inside a drawer controller",
            self.part.name()
        )
    }
}

impl core::error::Error for MissingController {}

/// Proof that a node was registered with a controller as a given [`Part`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct DrawerPart<K> {
    part: Part,
    node: K,
}

impl<K: Copy + Eq + fmt::Debug> DrawerPart<K> {
    /// Register `node` as `part` on `controller`.
    pub fn bind(
        part: Part,
        node: K,
        controller: Option<&mut Drawer<K>>,
    ) -> Result<Self, MissingController> {
        let drawer = controller.ok_or(MissingController { part })?;
        drawer.bind(part, node);
        Ok(Self { part, node })
    }

    /// Remove the registration, unless another node has replaced it since.
    pub fn unbind(self, drawer: &mut Drawer<K>) {
        if drawer.bound(self.part) == Some(self.node) {
            drawer.unbind(self.part);
        }
    }

    /// Which part this is.
    pub fn part(&self) -> Part {
        self.part
    }

    /// The bound node.
    pub fn node(&self) -> K {
        self.node
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{DrawerConfig, OpenMode};

    #[test]
    fn stale_part_does_not_unbind_replacement() {
        let mut drawer: Drawer<u32> =
            Drawer::new(DrawerConfig::default(), OpenMode::default()).unwrap();
        let first = DrawerPart::bind(Part::Content, 1, Some(&mut drawer)).unwrap();
        let _second = DrawerPart::bind(Part::Content, 2, Some(&mut drawer)).unwrap();
        first.unbind(&mut drawer);
        assert_eq!(drawer.bound(Part::Content), Some(2));
    }

    #[test]
    fn missing_controller_names_the_part() {
        let err = DrawerPart::<u32>::bind(Part::Overlay, 1, None).unwrap_err();
        assert_eq!(
            alloc::format!("{err}"),
            "drawer overlay must be used inside a drawer controller"
        );
    }
}
