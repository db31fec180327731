//! Style attached to a component.

use crate::dimension::Dimension;
use common::geometry::{EdgeSizes, Point};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

/// Style shared by every component that carries none of its own.
pub static DEFAULT_STYLE: Lazy<Style> = Lazy::new(Style::default);

/// Style of a single component.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Style {
    /// Width.
    pub width: Dimension,
    /// Height.
    pub height: Dimension,
    /// Padding.
    pub padding: EdgeSizes,
    /// Margin.
    pub margin: EdgeSizes,
    /// Position mode.
    pub position: Position,
    /// Font size in pixels. Zero selects the kind's default.
    pub font_size: f32,
    /// Invisible components take no space and are never hit.
    pub visible: bool,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            width: Dimension::Auto,
            height: Dimension::Auto,
            padding: EdgeSizes::ZERO,
            margin: EdgeSizes::ZERO,
            position: Position::Relative,
            font_size: 0.0,
            visible: true,
        }
    }
}

impl Style {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_size(mut self, width: Dimension, height: Dimension) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn with_width(mut self, width: Dimension) -> Self {
        self.width = width;
        self
    }

    pub fn with_height(mut self, height: Dimension) -> Self {
        self.height = height;
        self
    }

    pub fn with_padding(mut self, padding: EdgeSizes) -> Self {
        self.padding = padding;
        self
    }

    pub fn with_margin(mut self, margin: EdgeSizes) -> Self {
        self.margin = margin;
        self
    }

    pub fn with_position(mut self, position: Position) -> Self {
        self.position = position;
        self
    }

    pub fn with_font_size(mut self, font_size: f32) -> Self {
        self.font_size = font_size;
        self
    }

    pub fn with_visible(mut self, visible: bool) -> Self {
        self.visible = visible;
        self
    }

    /// Font size, falling back to `default` when unset.
    pub fn font_size_or(&self, default: f32) -> f32 {
        if self.font_size > 0.0 {
            self.font_size
        } else {
            default
        }
    }

    /// Check if the component is taken out of normal flow.
    pub fn is_absolute(&self) -> bool {
        matches!(self.position, Position::Absolute { .. })
    }
}

/// Position mode.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Position {
    /// Placed by the parent's layout.
    #[default]
    Relative,
    /// Placed at fixed absolute coordinates, outside normal flow.
    Absolute { x: f32, y: f32 },
}

impl Position {
    pub fn absolute_point(&self) -> Option<Point> {
        match *self {
            Position::Absolute { x, y } => Some(Point::new(x, y)),
            Position::Relative => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_style() {
        let style = Style::default();
        assert!(style.visible);
        assert!(style.width.is_auto());
        assert_eq!(style.position, Position::Relative);
        assert_eq!(*DEFAULT_STYLE, style);
    }

    #[test]
    fn test_font_size_fallback() {
        assert_eq!(Style::new().font_size_or(16.0), 16.0);
        assert_eq!(Style::new().with_font_size(12.0).font_size_or(16.0), 12.0);
    }

    #[test]
    fn test_deserialize_style() {
        let style: Style = serde_json::from_str(
            r#"{
                "width": {"percent": 50},
                "padding": {"top": 4, "left": 8},
                "position": {"absolute": {"x": 10, "y": 20}}
            }"#,
        )
        .unwrap();
        assert_eq!(style.width, Dimension::Percent(50.0));
        assert!(style.height.is_auto());
        assert_eq!(style.padding.left, 8.0);
        assert_eq!(style.padding.right, 0.0);
        assert_eq!(style.position.absolute_point(), Some(Point::new(10.0, 20.0)));
        assert!(style.visible);
    }
}
