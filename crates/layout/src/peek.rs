//! Non-recursive natural size estimate.
//!
//! A container needs an idea of its content size before its children are laid
//! out, to resolve percentages on an auto-sized axis. The estimate looks at
//! the component and its direct children only; grandchildren are never read.

use crate::axis::Axis;
use crate::component::{Component, ComponentId, ComponentKind};
use crate::config::LayoutConfig;
use crate::constraints::Constraints;
use crate::flex::{container_axis, outer_size};
use crate::intrinsic::{intrinsic_size, Metrics, TextMeasurer};
use crate::leaf::leaf_size;
use crate::tree::ComponentTree;
use common::geometry::{non_negative, Size};
use style::Dimension;

/// Estimate the natural border-box size of `id` within `available`.
///
/// Explicit style dimensions win; leaves use their intrinsic size; line
/// containers combine the shallow sizes of their direct children.
pub fn peek_natural_size(
    tree: &ComponentTree,
    id: ComponentId,
    available: Size,
    measurer: Option<&dyn TextMeasurer>,
    config: &LayoutConfig,
) -> Size {
    peek_with(tree, id, available, Metrics::new(measurer, config))
}

pub(crate) fn peek_with(
    tree: &ComponentTree,
    id: ComponentId,
    available: Size,
    metrics: Metrics<'_>,
) -> Size {
    let component = match tree.get(id) {
        Some(c) => c,
        None => return Size::ZERO,
    };
    let constraints = Constraints::loose(available);
    if component.kind.is_leaf() {
        return leaf_size(component, &constraints, metrics);
    }

    let style = component.style();
    let width = style.width.resolve_explicit(available.width);
    let height = style.height.resolve_explicit(available.height);
    if let (Some(width), Some(height)) = (width, height) {
        return Size::new(width, height);
    }

    let own = Size::new(width.unwrap_or(available.width), height.unwrap_or(available.height));
    let natural = match component.kind {
        ComponentKind::Modal => Size::new(metrics.config.modal_width, metrics.config.modal_height),
        ComponentKind::Center
        | ComponentKind::TabGroup
        | ComponentKind::TabContent
        | ComponentKind::TabPanel => available,
        ComponentKind::TabBar => Size::new(available.width, metrics.config.tab_bar_height),
        _ => match container_axis(component) {
            Some(axis) => line_size(tree, component, axis, own, metrics),
            None => Size::ZERO,
        },
    };
    Size::new(width.unwrap_or(natural.width), height.unwrap_or(natural.height))
}

/// Children laid end to end along `axis`, plus padding.
fn line_size(
    tree: &ComponentTree,
    component: &Component,
    axis: Axis,
    available: Size,
    metrics: Metrics<'_>,
) -> Size {
    let flex = component.flex_config();
    let padding = component.style().padding;
    let content = Size::new(
        non_negative(available.width - padding.horizontal()),
        non_negative(available.height - padding.vertical()),
    );

    let mut main = 0.0f32;
    let mut cross = 0.0f32;
    let mut count = 0usize;
    for child in component.children.iter().filter_map(|id| tree.get(*id)) {
        if !child.is_visible() || child.is_out_of_flow() {
            continue;
        }
        let size = outer_size(shallow_size(child, content, metrics), &child.style().margin);
        main += axis.size(size);
        cross = cross.max(axis.cross().size(size));
        count += 1;
    }
    if count > 1 {
        main += flex.gap * (count - 1) as f32;
    }
    if flex.justify_content.fills_main_axis() {
        main = axis.size(content);
    }

    let size = axis.pack_size(main, cross);
    Size::new(
        size.width + padding.horizontal(),
        size.height + padding.vertical(),
    )
}

/// Size of a child judged from the child alone.
///
/// Percentages count as zero; an auto-sized container contributes only its
/// padding.
pub fn shallow_size(child: &Component, available: Size, metrics: Metrics<'_>) -> Size {
    let style = child.style();
    let fallback = if child.kind.is_leaf() {
        intrinsic_size(child, Some(available.width), metrics).unwrap_or_default()
    } else {
        style.padding.total_size()
    };
    let axis_size = |dim: Dimension, natural: f32| {
        if dim.is_percent() {
            0.0
        } else if dim.is_auto() {
            natural
        } else {
            dim.resolve(0.0)
        }
    };
    Size::new(
        axis_size(style.width, fallback.width),
        axis_size(style.height, fallback.height),
    )
}
