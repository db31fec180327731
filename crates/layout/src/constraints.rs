//! Layout constraints passed from parent to child.

use common::geometry::{non_negative, Size};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Size bounds handed down to a component.
///
/// A child never widens the box it receives. `percent_basis` is the size that
/// percentage dimensions resolve against; it equals the maximum unless the
/// parent sized itself from its content.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Constraints {
    pub min_width: f32,
    pub max_width: f32,
    pub min_height: f32,
    pub max_height: f32,
    /// Reference size for `Percent` dimensions.
    pub percent_basis: Size,
}

impl Constraints {
    /// Zero minimum, `max` maximum.
    pub fn loose(max: Size) -> Self {
        Self {
            min_width: 0.0,
            max_width: max.width,
            min_height: 0.0,
            max_height: max.height,
            percent_basis: max,
        }
    }

    /// Minimum and maximum both equal to `size`.
    pub fn tight(size: Size) -> Self {
        Self {
            min_width: size.width,
            max_width: size.width,
            min_height: size.height,
            max_height: size.height,
            percent_basis: size,
        }
    }

    pub fn with_percent_basis(mut self, basis: Size) -> Self {
        self.percent_basis = basis;
        self
    }

    pub fn max_size(&self) -> Size {
        Size::new(self.max_width, self.max_height)
    }

    pub fn min_size(&self) -> Size {
        Size::new(self.min_width, self.min_height)
    }

    /// Raise a size to the minimum constraints.
    pub fn apply_min(&self, size: Size) -> Size {
        Size::new(size.width.max(self.min_width), size.height.max(self.min_height))
    }

    /// Clamp negative or NaN bounds to zero and keep `min <= max`.
    pub fn sanitized(self) -> Self {
        let fixed = Self {
            min_width: non_negative(self.min_width),
            max_width: non_negative(self.max_width),
            min_height: non_negative(self.min_height),
            max_height: non_negative(self.max_height),
            percent_basis: self.percent_basis.non_negative(),
        };
        let fixed = Self {
            min_width: fixed.min_width.min(fixed.max_width),
            min_height: fixed.min_height.min(fixed.max_height),
            ..fixed
        };
        if fixed != self {
            warn!(constraints = ?self, "clamped malformed layout constraints");
        }
        fixed
    }
}
