//! Main/cross axis abstraction shared by the flex containers.

use crate::constraints::Constraints;
use common::geometry::{EdgeSizes, Point, Size};
use style::{Dimension, FlexDirection, Style};

/// A layout axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Axis {
    Horizontal,
    Vertical,
}

impl Axis {
    pub fn from_direction(direction: FlexDirection) -> Self {
        match direction {
            FlexDirection::Row => Axis::Horizontal,
            FlexDirection::Column => Axis::Vertical,
        }
    }

    /// The perpendicular axis.
    #[inline]
    pub fn cross(self) -> Axis {
        match self {
            Axis::Horizontal => Axis::Vertical,
            Axis::Vertical => Axis::Horizontal,
        }
    }

    /// Component of `size` along this axis.
    #[inline]
    pub fn size(self, size: Size) -> f32 {
        match self {
            Axis::Horizontal => size.width,
            Axis::Vertical => size.height,
        }
    }

    /// Component of `point` along this axis.
    #[inline]
    pub fn coord(self, point: Point) -> f32 {
        match self {
            Axis::Horizontal => point.x,
            Axis::Vertical => point.y,
        }
    }

    /// Build a size from main and cross components.
    #[inline]
    pub fn pack_size(self, main: f32, cross: f32) -> Size {
        match self {
            Axis::Horizontal => Size::new(main, cross),
            Axis::Vertical => Size::new(cross, main),
        }
    }

    /// Build an offset from main and cross components.
    #[inline]
    pub fn pack_point(self, main: f32, cross: f32) -> Point {
        match self {
            Axis::Horizontal => Point::new(main, cross),
            Axis::Vertical => Point::new(cross, main),
        }
    }

    /// Edge size at the start of this axis (left or top).
    #[inline]
    pub fn leading(self, edges: &EdgeSizes) -> f32 {
        match self {
            Axis::Horizontal => edges.left,
            Axis::Vertical => edges.top,
        }
    }

    /// Sum of both edges along this axis.
    #[inline]
    pub fn edges(self, edges: &EdgeSizes) -> f32 {
        match self {
            Axis::Horizontal => edges.horizontal(),
            Axis::Vertical => edges.vertical(),
        }
    }

    /// Style dimension along this axis.
    #[inline]
    pub fn dimension(self, style: &Style) -> Dimension {
        match self {
            Axis::Horizontal => style.width,
            Axis::Vertical => style.height,
        }
    }

    #[inline]
    pub fn max_constraint(self, constraints: &Constraints) -> f32 {
        match self {
            Axis::Horizontal => constraints.max_width,
            Axis::Vertical => constraints.max_height,
        }
    }

    #[inline]
    pub fn min_constraint(self, constraints: &Constraints) -> f32 {
        match self {
            Axis::Horizontal => constraints.min_width,
            Axis::Vertical => constraints.min_height,
        }
    }

    /// Whether the constraints fix the size along this axis.
    #[inline]
    pub fn is_tight(self, constraints: &Constraints) -> bool {
        self.min_constraint(constraints) == self.max_constraint(constraints)
    }

    /// Copy of `constraints` with both bounds along this axis set to `size`.
    pub fn tighten(self, mut constraints: Constraints, size: f32) -> Constraints {
        match self {
            Axis::Horizontal => {
                constraints.min_width = size;
                constraints.max_width = size;
            }
            Axis::Vertical => {
                constraints.min_height = size;
                constraints.max_height = size;
            }
        }
        constraints
    }
}
