//! Intrinsic sizes of leaf components.
//!
//! The engine has no font metrics of its own. When a [`TextMeasurer`] is
//! installed it is asked for label sizes; otherwise glyph advances are
//! estimated from the font size.

use crate::component::{Component, ComponentKind};
use crate::config::LayoutConfig;
use common::geometry::Size;
use unicode_segmentation::UnicodeSegmentation;

/// Text metrics provider.
pub trait TextMeasurer {
    /// Measure `text` at `font_size`, optionally limited to `max_width`.
    fn measure(&self, text: &str, font_size: f32, max_width: Option<f32>) -> Size;
}

impl<F> TextMeasurer for F
where
    F: Fn(&str, f32, Option<f32>) -> Size,
{
    fn measure(&self, text: &str, font_size: f32, max_width: Option<f32>) -> Size {
        self(text, font_size, max_width)
    }
}

/// Inputs shared by every intrinsic measurement.
#[derive(Clone, Copy)]
pub struct Metrics<'a> {
    pub measurer: Option<&'a dyn TextMeasurer>,
    pub config: &'a LayoutConfig,
}

impl<'a> Metrics<'a> {
    pub fn new(measurer: Option<&'a dyn TextMeasurer>, config: &'a LayoutConfig) -> Self {
        Self { measurer, config }
    }

    /// Size of a single line of text.
    pub fn text_size(&self, text: &str, font_size: f32, max_width: Option<f32>) -> Size {
        let size = match self.measurer {
            Some(measurer) => measurer.measure(text, font_size, max_width),
            None => Size::new(
                self.estimate_width(text, font_size, self.config.char_width_factor),
                font_size * self.config.line_height_factor,
            ),
        };
        let size = size.non_negative();
        match max_width {
            Some(max) => Size::new(size.width.min(max), size.height),
            None => size,
        }
    }

    /// Heuristic width of `text` from its grapheme count.
    pub fn estimate_width(&self, text: &str, font_size: f32, factor: f32) -> f32 {
        text.graphemes(true).count() as f32 * font_size * factor
    }
}

/// Natural size of a leaf component before explicit style dimensions apply.
///
/// Returns `None` for kinds that are sized from their children.
pub fn intrinsic_size(component: &Component, max_width: Option<f32>, metrics: Metrics<'_>) -> Option<Size> {
    let config = metrics.config;
    let style = component.style();
    let text = component.text();

    let size = match component.kind {
        ComponentKind::Text => {
            let font_size = style.font_size_or(config.text_font_size);
            metrics.text_size(text, font_size, max_width)
        }
        ComponentKind::Button => {
            let font_size = style.font_size_or(config.control_font_size);
            let label = metrics.text_size(text, font_size, None);
            Size::new(
                (label.width + style.padding.horizontal() + config.button_chrome_width)
                    .max(config.button_min_width),
                button_height(label.height, style.padding.vertical(), config),
            )
        }
        ComponentKind::Checkbox => {
            let font_size = style.font_size_or(config.control_font_size);
            let label = metrics.text_size(text, font_size, None);
            Size::new(
                config.checkbox_size + config.checkbox_label_gap + label.width,
                label.height.max(config.checkbox_size),
            )
        }
        ComponentKind::Input => Size::new(config.input_width, config.input_height),
        ComponentKind::Dropdown => {
            let font_size = style.font_size_or(config.control_font_size);
            let label = metrics.text_size(text, font_size, None);
            Size::new(
                (label.width + config.dropdown_indicator_width).max(config.dropdown_min_width),
                button_height(label.height, style.padding.vertical(), config),
            )
        }
        ComponentKind::Tab => {
            let width = if text.is_empty() {
                config.tab_min_width
            } else {
                let font_size = style.font_size_or(config.control_font_size);
                let label_width = match metrics.measurer {
                    Some(measurer) => measurer.measure(text, font_size, None).width,
                    None => metrics.estimate_width(text, font_size, config.tab_char_factor),
                };
                label_width + style.padding.horizontal() + config.tab_chrome_width
            };
            let width = match max_width {
                Some(max) => width.min(max),
                None => width,
            };
            Size::new(width, config.tab_height)
        }
        _ => return None,
    };
    Some(size.non_negative())
}

fn button_height(label_height: f32, vertical_padding: f32, config: &LayoutConfig) -> f32 {
    label_height + vertical_padding + config.button_chrome_height
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::ComponentTree;
    use common::geometry::EdgeSizes;
    use style::Style;

    fn measure(tree: &ComponentTree, id: crate::ComponentId, max_width: Option<f32>) -> Size {
        let config = LayoutConfig::default();
        intrinsic_size(tree.get(id).unwrap(), max_width, Metrics::new(None, &config)).unwrap()
    }

    #[test]
    fn test_text_heuristic() {
        let mut tree = ComponentTree::new();
        let id = tree.create_text(ComponentKind::Text, "Hello");
        let size = measure(&tree, id, None);
        assert!((size.width - 48.0).abs() < 1e-4);
        assert!((size.height - 19.2).abs() < 1e-4);
    }

    #[test]
    fn test_text_counts_graphemes() {
        let mut tree = ComponentTree::new();
        let id = tree.create_text(ComponentKind::Text, "e\u{301}a");
        tree.set_style(id, Style::new().with_font_size(10.0));
        assert!((measure(&tree, id, None).width - 12.0).abs() < 1e-4);
    }

    #[test]
    fn test_text_clamped_to_max_width() {
        let mut tree = ComponentTree::new();
        let id = tree.create_text(ComponentKind::Text, "a long sentence of text");
        assert_eq!(measure(&tree, id, Some(40.0)).width, 40.0);
    }

    #[test]
    fn test_button() {
        let mut tree = ComponentTree::new();
        let id = tree.create_text(ComponentKind::Button, "OK");
        tree.set_style(id, Style::new().with_padding(EdgeSizes::symmetric(4.0, 10.0)));
        let size = measure(&tree, id, None);
        // label 2 * 14 * 0.6 = 16.8, plus 20 padding and 20 chrome
        assert!((size.width - 56.8).abs() < 1e-4);
        // 14 * 1.2 + 8 + 12
        assert!((size.height - 36.8).abs() < 1e-4);

        let empty = tree.create(ComponentKind::Button);
        assert_eq!(measure(&tree, empty, None).width, 50.0);
    }

    #[test]
    fn test_checkbox_and_input() {
        let mut tree = ComponentTree::new();
        let checkbox = tree.create(ComponentKind::Checkbox);
        assert_eq!(measure(&tree, checkbox, None), Size::new(26.0, 18.0));

        let input = tree.create(ComponentKind::Input);
        assert_eq!(measure(&tree, input, None), Size::new(200.0, 30.0));
    }

    #[test]
    fn test_dropdown_min_width() {
        let mut tree = ComponentTree::new();
        let id = tree.create_text(ComponentKind::Dropdown, "A");
        assert_eq!(measure(&tree, id, None).width, 120.0);
    }

    #[test]
    fn test_tab() {
        let mut tree = ComponentTree::new();
        let unlabeled = tree.create(ComponentKind::Tab);
        assert_eq!(measure(&tree, unlabeled, None), Size::new(80.0, 36.0));

        let labeled = tree.create_text(ComponentKind::Tab, "Home");
        // 4 * 14 * 0.55 + 24
        assert!((measure(&tree, labeled, None).width - 54.8).abs() < 1e-4);
        assert_eq!(measure(&tree, labeled, Some(30.0)).width, 30.0);
    }

    #[test]
    fn test_measurer_overrides_heuristic() {
        let mut tree = ComponentTree::new();
        let id = tree.create_text(ComponentKind::Text, "anything");
        let config = LayoutConfig::default();
        let fixed = |_: &str, _: f32, _: Option<f32>| Size::new(33.0, 11.0);
        let size = intrinsic_size(
            tree.get(id).unwrap(),
            None,
            Metrics::new(Some(&fixed as &dyn TextMeasurer), &config),
        )
        .unwrap();
        assert_eq!(size, Size::new(33.0, 11.0));
    }

    #[test]
    fn test_containers_have_no_intrinsic_size() {
        let mut tree = ComponentTree::new();
        let id = tree.create(ComponentKind::Row);
        let config = LayoutConfig::default();
        assert!(intrinsic_size(tree.get(id).unwrap(), None, Metrics::new(None, &config)).is_none());
    }
}
