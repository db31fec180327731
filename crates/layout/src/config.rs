//! Layout configuration.

use common::error::{LayoutError, LayoutResult};
use serde::{Deserialize, Serialize};

/// Tunable constants of the layout engine.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Maximum dispatch depth before a subtree is abandoned.
    pub max_depth: usize,
    /// Default modal width.
    pub modal_width: f32,
    /// Default modal height.
    pub modal_height: f32,
    /// Font size for Text without one.
    pub text_font_size: f32,
    /// Font size for controls (buttons, checkboxes, dropdowns, tabs) without one.
    pub control_font_size: f32,
    /// Average glyph advance as a fraction of the font size.
    pub char_width_factor: f32,
    /// Line height as a fraction of the font size.
    pub line_height_factor: f32,
    /// Horizontal button chrome added to the label.
    pub button_chrome_width: f32,
    /// Vertical button chrome added to the label.
    pub button_chrome_height: f32,
    /// Minimum button width.
    pub button_min_width: f32,
    /// Checkbox glyph box size.
    pub checkbox_size: f32,
    /// Gap between checkbox glyph and label.
    pub checkbox_label_gap: f32,
    /// Default input width.
    pub input_width: f32,
    /// Default input height.
    pub input_height: f32,
    /// Width of the dropdown indicator.
    pub dropdown_indicator_width: f32,
    /// Minimum dropdown width.
    pub dropdown_min_width: f32,
    /// Glyph advance factor for tab labels.
    pub tab_char_factor: f32,
    /// Extra horizontal space around a tab label.
    pub tab_chrome_width: f32,
    /// Width of a tab without a label.
    pub tab_min_width: f32,
    /// Default tab height.
    pub tab_height: f32,
    /// Default tab bar height.
    pub tab_bar_height: f32,
}

impl LayoutConfig {
    /// Create a new configuration with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set maximum dispatch depth.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Set default modal size.
    pub fn with_modal_size(mut self, width: f32, height: f32) -> Self {
        self.modal_width = width;
        self.modal_height = height;
        self
    }

    /// Set text metrics heuristics.
    pub fn with_text_metrics(mut self, char_width_factor: f32, line_height_factor: f32) -> Self {
        self.char_width_factor = char_width_factor;
        self.line_height_factor = line_height_factor;
        self
    }

    /// Parse a configuration from JSON. Missing fields keep their defaults.
    pub fn from_json(json: &str) -> LayoutResult<Self> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| LayoutError::config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Check that every value is usable.
    pub fn validate(&self) -> LayoutResult<()> {
        if self.max_depth == 0 {
            return Err(LayoutError::config("max_depth must be at least 1"));
        }
        let values = [
            ("modal_width", self.modal_width),
            ("modal_height", self.modal_height),
            ("text_font_size", self.text_font_size),
            ("control_font_size", self.control_font_size),
            ("char_width_factor", self.char_width_factor),
            ("line_height_factor", self.line_height_factor),
            ("button_chrome_width", self.button_chrome_width),
            ("button_chrome_height", self.button_chrome_height),
            ("button_min_width", self.button_min_width),
            ("checkbox_size", self.checkbox_size),
            ("checkbox_label_gap", self.checkbox_label_gap),
            ("input_width", self.input_width),
            ("input_height", self.input_height),
            ("dropdown_indicator_width", self.dropdown_indicator_width),
            ("dropdown_min_width", self.dropdown_min_width),
            ("tab_char_factor", self.tab_char_factor),
            ("tab_chrome_width", self.tab_chrome_width),
            ("tab_min_width", self.tab_min_width),
            ("tab_height", self.tab_height),
            ("tab_bar_height", self.tab_bar_height),
        ];
        for (name, value) in values {
            if !value.is_finite() || value < 0.0 {
                return Err(LayoutError::config(format!(
                    "{name} must be a non-negative number, got {value}"
                )));
            }
        }
        Ok(())
    }
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            max_depth: 256,
            modal_width: 400.0,
            modal_height: 300.0,
            text_font_size: 16.0,
            control_font_size: 14.0,
            char_width_factor: 0.6,
            line_height_factor: 1.2,
            button_chrome_width: 20.0,
            button_chrome_height: 12.0,
            button_min_width: 50.0,
            checkbox_size: 18.0,
            checkbox_label_gap: 8.0,
            input_width: 200.0,
            input_height: 30.0,
            dropdown_indicator_width: 32.0,
            dropdown_min_width: 120.0,
            tab_char_factor: 0.55,
            tab_chrome_width: 24.0,
            tab_min_width: 80.0,
            tab_height: 36.0,
            tab_bar_height: 44.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = LayoutConfig::new();
        assert!(config.validate().is_ok());
        assert_eq!(config.modal_width, 400.0);
        assert_eq!(config.modal_height, 300.0);
    }

    #[test]
    fn test_from_json_partial() {
        let config = LayoutConfig::from_json(r#"{"max_depth": 32, "modal_width": 640}"#).unwrap();
        assert_eq!(config.max_depth, 32);
        assert_eq!(config.modal_width, 640.0);
        assert_eq!(config.modal_height, 300.0);
    }

    #[test]
    fn test_invalid_config() {
        let err = LayoutConfig::from_json(r#"{"max_depth": 0}"#).unwrap_err();
        assert!(matches!(err, LayoutError::Config(_)));

        let config = LayoutConfig::new().with_text_metrics(-1.0, 1.2);
        assert!(config.validate().is_err());

        assert!(LayoutConfig::from_json("not json").is_err());
    }
}
