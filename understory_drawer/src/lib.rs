// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_drawer --heading-base-level=0

//! Understory Drawer: a headless controller for edge drawers.
//!
//! A drawer is a panel that slides in from one edge of the viewport, sits above
//! a dimming overlay, and can be dismissed by dragging it back toward its edge.
//! This crate owns the part that is easy to get wrong: reconciling
//!
//! - a logical open/closed value supplied by the caller,
//! - continuous pointer-drag input that preempts and resumes animation, and
//! - timed enter/exit transitions that must not race when the logical value
//!   changes faster than an animation can finish.
//!
//! It does not render, route events, trap focus, or run animations. Those are
//! the host's job, reached through the [`DrawerHost`] trait.
//!
//! ## Pieces
//!
//! - [`direction`]: edge → axis and closing sign.
//! - [`gesture`]: drag session bookkeeping and the commit/snap-back decision.
//! - [`Drawer`]: the presence state machine (see [`Phase`]) driving attributes,
//!   transforms, and timers.
//! - [`attributes`]: the state and markers a host writes onto panel and overlay.
//! - [`parts`]: binding content/overlay/handle nodes, with misuse detection.
//!
//! Timers live in an [`understory_timing::TimerQueue`] with one deadline per
//! [`TimerTarget`]. Rescheduling supersedes, and superseded tokens are ignored.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::{Point, Size, Vec2};
//! use understory_drawer::{
//!     Attributes, CaptureError, Drawer, DrawerConfig, DrawerHost, OpenMode, Part, Phase,
//!     PointerId, PointerInput, ReleaseDecision, Transition,
//! };
//!
//! #[derive(Default)]
//! struct Host { mounted: bool, offset: Vec2 }
//!
//! impl DrawerHost<u32> for Host {
//!     fn is_panel(&self, node: u32) -> bool { node == 1 }
//!     fn panel_size(&self, _: u32) -> Option<Size> { Some(Size::new(390.0, 400.0)) }
//!     fn viewport_size(&self) -> Size { Size::new(390.0, 844.0) }
//!     fn capture_pointer(&mut self, _: u32, _: PointerId) -> Result<(), CaptureError> { Ok(()) }
//!     fn apply_panel(&mut self, _: u32, _: &Attributes) {}
//!     fn apply_overlay(&mut self, _: u32, _: &Attributes) {}
//!     fn set_transform(&mut self, _: u32, offset: Vec2, _: Transition) { self.offset = offset; }
//!     fn set_present(&mut self, present: bool) { self.mounted = present; }
//!     fn request_frame(&mut self) {}
//!     fn open_changed(&mut self, _: bool) {}
//! }
//!
//! let mut host = Host::default();
//! let mut drawer: Drawer<u32> =
//!     Drawer::new(DrawerConfig::default(), OpenMode::default()).unwrap();
//!
//! // Open: mount, bind the panel, run the entrance.
//! drawer.request_open(true, 0, &mut host);
//! assert!(host.mounted);
//! drawer.bind(Part::Content, 1);
//! drawer.on_open_auto_focus(0, &mut host);
//! drawer.tick(420, &mut host);
//! assert_eq!(drawer.phase(), Phase::Open);
//!
//! // Drag down 150px in 50ms and let go: fast enough to dismiss.
//! let path: [u32; 2] = [0, 1];
//! let at = |y: f64| PointerInput::new(PointerId(1), Point::new(100.0, y), &path[..]);
//! assert!(drawer.on_press(&at(300.0), 1000, &mut host));
//! drawer.on_drag(&at(450.0), &mut host);
//! assert_eq!(host.offset, Vec2::new(0.0, 150.0));
//! assert_eq!(drawer.on_release(&at(450.0), 1050, &mut host), Some(ReleaseDecision::Close));
//! assert_eq!(host.offset, Vec2::new(0.0, 400.0));
//!
//! // The logical close lands after the swipe-out transform.
//! drawer.tick(1350, &mut host);
//! assert!(!drawer.is_open());
//! assert!(!host.mounted);
//! ```
//!
//! All times are `u64` milliseconds on a host clock. This crate is `no_std`
//! and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod attributes;
pub mod config;
pub mod direction;
mod drawer;
pub mod gesture;
pub mod host;
pub mod parts;
pub mod presence;

pub use attributes::{Attributes, Markers, Transition, VisualState};
pub use config::{ConfigError, DrawerConfig, Timings};
pub use direction::{Axis, AxisProjection, Direction};
pub use drawer::{Drawer, TimerTarget};
pub use gesture::{DragSession, ReleaseDecision};
pub use host::{CaptureError, DrawerHost, PointerId, PointerInput};
pub use parts::{DrawerPart, MissingController, Part};
pub use presence::{OpenMode, Phase};
