//! Resolution of a component's own width and height.

use crate::axis::Axis;
use crate::constraints::Constraints;
use style::Style;

/// Explicit width and height of a component, `None` where the style says `Auto`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ExplicitSize {
    pub width: Option<f32>,
    pub height: Option<f32>,
}

impl ExplicitSize {
    pub fn new(width: Option<f32>, height: Option<f32>) -> Self {
        Self { width, height }
    }

    pub fn get(&self, axis: Axis) -> Option<f32> {
        match axis {
            Axis::Horizontal => self.width,
            Axis::Vertical => self.height,
        }
    }
}

/// Resolve a style's width and height against the incoming constraints.
///
/// Percentages use the constraints' percent basis, which is the parent's
/// resolved content size.
pub fn resolve_explicit_size(style: &Style, constraints: &Constraints) -> ExplicitSize {
    ExplicitSize {
        width: style.width.resolve_explicit(constraints.percent_basis.width),
        height: style.height.resolve_explicit(constraints.percent_basis.height),
    }
}
