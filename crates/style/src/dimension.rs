//! Style dimensions and their resolution to pixels.

use common::geometry::non_negative;
use serde::{Deserialize, Serialize};

/// A width or height as written in a component's style.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dimension {
    /// Sized by content (leaves) or by children (containers).
    #[default]
    Auto,
    /// Absolute pixels.
    Pixel(f32),
    /// Percentage of the parent's content size.
    Percent(f32),
    /// Flex weight. Treated as literal pixels; no grow/shrink distribution.
    Flex(f32),
}

impl Dimension {
    /// Resolve against a reference size in pixels.
    ///
    /// `Auto` resolves to zero so that callers can apply their own intrinsic
    /// fallback. The result is never negative.
    pub fn resolve(&self, reference: f32) -> f32 {
        let value = match *self {
            Dimension::Auto => 0.0,
            Dimension::Pixel(v) | Dimension::Flex(v) => v,
            Dimension::Percent(p) => p / 100.0 * reference,
        };
        non_negative(value)
    }

    /// Resolve, returning `None` for `Auto`.
    pub fn resolve_explicit(&self, reference: f32) -> Option<f32> {
        if self.is_auto() {
            None
        } else {
            Some(self.resolve(reference))
        }
    }

    pub fn is_auto(&self) -> bool {
        matches!(self, Dimension::Auto)
    }

    pub fn is_explicit(&self) -> bool {
        !self.is_auto()
    }

    pub fn is_percent(&self) -> bool {
        matches!(self, Dimension::Percent(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_units() {
        assert_eq!(Dimension::Pixel(120.0).resolve(500.0), 120.0);
        assert_eq!(Dimension::Percent(50.0).resolve(300.0), 150.0);
        assert_eq!(Dimension::Flex(2.0).resolve(300.0), 2.0);
        assert_eq!(Dimension::Auto.resolve(300.0), 0.0);
    }

    #[test]
    fn test_resolve_never_negative() {
        assert_eq!(Dimension::Pixel(-10.0).resolve(0.0), 0.0);
        assert_eq!(Dimension::Percent(50.0).resolve(-200.0), 0.0);
        assert_eq!(Dimension::Pixel(f32::NAN).resolve(0.0), 0.0);
    }

    #[test]
    fn test_resolve_explicit() {
        assert_eq!(Dimension::Auto.resolve_explicit(100.0), None);
        assert_eq!(Dimension::Percent(10.0).resolve_explicit(100.0), Some(10.0));
    }

    #[test]
    fn test_deserialize() {
        let dims: Vec<Dimension> =
            serde_json::from_str(r#"["auto", {"pixel": 40}, {"percent": 25.5}]"#).unwrap();
        assert_eq!(
            dims,
            vec![Dimension::Auto, Dimension::Pixel(40.0), Dimension::Percent(25.5)]
        );
    }
}
