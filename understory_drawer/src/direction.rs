// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Edge → axis resolution.
//!
//! A drawer enters from one edge of the viewport and is dismissed by dragging
//! back toward that edge. [`Direction::projection`] turns the configured edge
//! into an [`AxisProjection`]: the axis the panel moves along and the sign that
//! converts a raw pointer delta into a positive *closing* distance.
//!
//! | direction | axis       | closing sign |
//! |-----------|------------|--------------|
//! | bottom    | vertical   | +1           |
//! | top       | vertical   | -1           |
//! | right     | horizontal | +1           |
//! | left      | horizontal | -1           |
//!
//! ```
//! use kurbo::Vec2;
//! use understory_drawer::direction::Direction;
//!
//! let bottom = Direction::Bottom.projection();
//! // Dragging down 40px closes a bottom drawer by 40px.
//! assert_eq!(bottom.closing_distance(Vec2::new(3.0, 40.0)), 40.0);
//! // Dragging up never moves it past its resting position.
//! assert_eq!(bottom.closing_distance(Vec2::new(0.0, -25.0)), 0.0);
//!
//! let left = Direction::Left.projection();
//! assert_eq!(left.closing_distance(Vec2::new(-30.0, 5.0)), 30.0);
//! assert_eq!(left.offset(30.0), Vec2::new(-30.0, 0.0));
//! ```

use kurbo::{Size, Vec2};

/// The viewport edge a drawer is attached to.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Slides down from the top edge.
    Top,
    /// Slides up from the bottom edge.
    #[default]
    Bottom,
    /// Slides in from the left edge.
    Left,
    /// Slides in from the right edge.
    Right,
}

/// The geometric axis a drawer moves along.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Axis {
    /// Movement along `y`.
    Vertical,
    /// Movement along `x`.
    Horizontal,
}

impl Axis {
    /// The component of `v` along this axis.
    pub fn component(self, v: Vec2) -> f64 {
        match self {
            Self::Vertical => v.y,
            Self::Horizontal => v.x,
        }
    }

    /// The dimension of `size` along this axis.
    pub fn extent(self, size: Size) -> f64 {
        match self {
            Self::Vertical => size.height,
            Self::Horizontal => size.width,
        }
    }

    /// A vector of length `amount` along this axis.
    pub fn vector(self, amount: f64) -> Vec2 {
        match self {
            Self::Vertical => Vec2::new(0.0, amount),
            Self::Horizontal => Vec2::new(amount, 0.0),
        }
    }
}

/// Axis plus closing sign, derived from a [`Direction`].
///
/// This is recomputed on every use and never stored.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct AxisProjection {
    /// The axis of travel.
    pub axis: Axis,
    /// `+1.0` or `-1.0`: multiplies a raw delta to get a closing distance.
    pub closing_sign: f64,
}

impl AxisProjection {
    /// Project a raw pointer delta onto the closing axis.
    ///
    /// Movement in the opening direction clamps to `0.0`, so the panel never
    /// overshoots its resting position.
    pub fn closing_distance(&self, delta: Vec2) -> f64 {
        (self.axis.component(delta) * self.closing_sign).max(0.0)
    }

    /// The positional offset that displaces the panel `distance` toward its edge.
    pub fn offset(&self, distance: f64) -> Vec2 {
        self.axis.vector(distance * self.closing_sign)
    }
}

impl Direction {
    /// Resolve the axis and closing sign for this edge.
    pub const fn projection(self) -> AxisProjection {
        match self {
            Self::Bottom => AxisProjection {
                axis: Axis::Vertical,
                closing_sign: 1.0,
            },
            Self::Top => AxisProjection {
                axis: Axis::Vertical,
                closing_sign: -1.0,
            },
            Self::Right => AxisProjection {
                axis: Axis::Horizontal,
                closing_sign: 1.0,
            },
            Self::Left => AxisProjection {
                axis: Axis::Horizontal,
                closing_sign: -1.0,
            },
        }
    }
}
