//! Tab containers.
//!
//! A TabGroup stacks a TabBar above a TabContent. The bar lines its Tabs up
//! horizontally at a fixed height. The content area takes the rest of the
//! group and places its panels on top of each other, each filling the content
//! box; hidden panels carry `visible: false`.

use crate::component::ComponentId;
use crate::constraints::Constraints;
use crate::context::LayoutContext;
use crate::dimension::{resolve_explicit_size, ExplicitSize};
use crate::flex::FlexFormattingContext;
use common::error::LayoutResult;
use common::geometry::{non_negative, Point, Rect, Size};

/// Explicit size, or the whole constraint box on auto axes.
fn filling_size(
    ctx: &LayoutContext<'_>,
    id: ComponentId,
    constraints: &Constraints,
) -> Option<ExplicitSize> {
    let explicit = resolve_explicit_size(ctx.tree.get(id)?.style(), constraints);
    Some(ExplicitSize::new(
        Some(explicit.width.unwrap_or(constraints.max_width)),
        Some(explicit.height.unwrap_or(constraints.max_height)),
    ))
}

fn fill_along(
    ctx: &mut LayoutContext<'_>,
    id: ComponentId,
    constraints: Constraints,
    origin: Point,
    explicit: ExplicitSize,
) -> LayoutResult<()> {
    match ctx.tree.get(id).and_then(FlexFormattingContext::for_component) {
        Some(flex) => flex.layout_with_size(ctx, id, constraints, origin, explicit),
        None => Ok(()),
    }
}

/// Layout a TabGroup: children stacked vertically, each offered the height
/// left below its predecessors.
pub fn layout_tab_group(
    ctx: &mut LayoutContext<'_>,
    id: ComponentId,
    constraints: Constraints,
    origin: Point,
) -> LayoutResult<()> {
    let explicit = match filling_size(ctx, id, &constraints) {
        Some(explicit) => explicit,
        None => return Ok(()),
    };
    let (padding, gap, children) = match ctx.tree.get(id) {
        Some(c) => (c.style().padding, c.flex_config().gap, c.children.clone()),
        None => return Ok(()),
    };
    let size = constraints.apply_min(Size::new(
        explicit.width.unwrap_or_default(),
        explicit.height.unwrap_or_default(),
    ));
    let content = Rect::from_origin_size(origin, size).inset(&padding);

    let mut cursor = 0.0f32;
    let mut placed = 0usize;
    for child_id in children {
        let (visible, out_of_flow, margin) = match ctx.tree.get(child_id) {
            Some(c) => (c.is_visible(), c.is_out_of_flow(), c.style().margin),
            None => continue,
        };
        if !visible {
            ctx.tree.zero_subtree(child_id, content.origin());
            continue;
        }
        if out_of_flow {
            ctx.dispatch(child_id, Constraints::loose(content.size()), content.origin())?;
            continue;
        }

        if placed > 0 {
            cursor += gap;
        }
        let remaining = Size::new(
            non_negative(content.width - margin.horizontal()),
            non_negative(content.height - cursor - margin.vertical()),
        );
        let child_origin = content.origin().offset(margin.left, cursor + margin.top);
        ctx.dispatch(child_id, Constraints::loose(remaining), child_origin)?;

        let height = ctx.tree.get(child_id).map(|c| c.rect().height).unwrap_or_default();
        cursor += height + margin.vertical();
        placed += 1;
    }

    ctx.set_rect(id, Rect::from_origin_size(origin, size));
    Ok(())
}

/// Layout a TabBar: full width, fixed height, tabs in a row.
pub fn layout_tab_bar(
    ctx: &mut LayoutContext<'_>,
    id: ComponentId,
    constraints: Constraints,
    origin: Point,
) -> LayoutResult<()> {
    let bar_height = ctx.config().tab_bar_height;
    let explicit = match ctx.tree.get(id) {
        Some(c) => resolve_explicit_size(c.style(), &constraints),
        None => return Ok(()),
    };
    let explicit = ExplicitSize::new(
        Some(explicit.width.unwrap_or(constraints.max_width)),
        Some(explicit.height.unwrap_or(bar_height)),
    );
    fill_along(ctx, id, constraints, origin, explicit)
}

/// Layout a TabPanel: a column filling the content area.
pub fn layout_tab_panel(
    ctx: &mut LayoutContext<'_>,
    id: ComponentId,
    constraints: Constraints,
    origin: Point,
) -> LayoutResult<()> {
    match filling_size(ctx, id, &constraints) {
        Some(explicit) => fill_along(ctx, id, constraints, origin, explicit),
        None => Ok(()),
    }
}

/// Layout a TabContent: every visible panel is placed at the content origin
/// and offered the whole content box.
pub fn layout_tab_content(
    ctx: &mut LayoutContext<'_>,
    id: ComponentId,
    constraints: Constraints,
    origin: Point,
) -> LayoutResult<()> {
    let explicit = match filling_size(ctx, id, &constraints) {
        Some(explicit) => explicit,
        None => return Ok(()),
    };
    let (padding, children) = match ctx.tree.get(id) {
        Some(c) => (c.style().padding, c.children.clone()),
        None => return Ok(()),
    };
    let size = constraints.apply_min(Size::new(
        explicit.width.unwrap_or_default(),
        explicit.height.unwrap_or_default(),
    ));
    let content = Rect::from_origin_size(origin, size).inset(&padding);
    let panel_constraints = Constraints::tight(content.size());

    for child_id in children {
        let (visible, margin) = match ctx.tree.get(child_id) {
            Some(c) => (c.is_visible(), c.style().margin),
            None => continue,
        };
        if !visible {
            ctx.tree.zero_subtree(child_id, content.origin());
            continue;
        }
        let panel_origin = content.origin().offset(margin.left, margin.top);
        let mut offered = panel_constraints;
        offered.max_width = (offered.max_width - margin.horizontal()).max(0.0);
        offered.max_height = (offered.max_height - margin.vertical()).max(0.0);
        offered.min_width = offered.max_width;
        offered.min_height = offered.max_height;
        ctx.dispatch(child_id, offered, panel_origin)?;
    }

    ctx.set_rect(id, Rect::from_origin_size(origin, size));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component::ComponentKind;
    use crate::engine::LayoutEngine;
    use crate::tree::ComponentTree;
    use common::geometry::EdgeSizes;
    use style::{Dimension, Style};

    struct Tabs {
        tree: ComponentTree,
        group: ComponentId,
        bar: ComponentId,
        tabs: Vec<ComponentId>,
        content: ComponentId,
        panels: Vec<ComponentId>,
    }

    fn build() -> Tabs {
        let mut tree = ComponentTree::new();
        let group = tree.create(ComponentKind::TabGroup);
        tree.set_root(group);
        let bar = tree.create(ComponentKind::TabBar);
        let content = tree.create(ComponentKind::TabContent);
        tree.append_child(group, bar).unwrap();
        tree.append_child(group, content).unwrap();

        let tabs: Vec<_> = ["General", "Advanced"]
            .iter()
            .map(|label| {
                let tab = tree.create_text(ComponentKind::Tab, *label);
                tree.append_child(bar, tab).unwrap();
                tab
            })
            .collect();
        let panels: Vec<_> = (0..2)
            .map(|_| {
                let panel = tree.create(ComponentKind::TabPanel);
                tree.append_child(content, panel).unwrap();
                panel
            })
            .collect();
        let mut hidden = Style::new();
        hidden.visible = false;
        tree.set_style(panels[1], hidden);

        Tabs { tree, group, bar, tabs, content, panels }
    }

    #[test]
    fn test_tab_group_layout() {
        let Tabs { mut tree, group, bar, tabs, content, panels } = build();

        LayoutEngine::new(600.0, 400.0).layout(&mut tree).unwrap();

        assert_eq!(tree.bounds(group).unwrap(), Rect::new(0.0, 0.0, 600.0, 400.0));
        assert_eq!(tree.bounds(bar).unwrap(), Rect::new(0.0, 0.0, 600.0, 44.0));
        let first = tree.bounds(tabs[0]).unwrap();
        let second = tree.bounds(tabs[1]).unwrap();
        assert_eq!(first.height, 36.0);
        assert_eq!(second.x, first.right());
        assert_eq!(tree.bounds(content).unwrap(), Rect::new(0.0, 44.0, 600.0, 356.0));
        assert_eq!(tree.bounds(panels[0]).unwrap(), Rect::new(0.0, 44.0, 600.0, 356.0));
        assert_eq!(tree.bounds(panels[1]), None);
    }

    #[test]
    fn test_tab_content_panels_share_the_content_box() {
        let mut tree = ComponentTree::new();
        let content = tree.create(ComponentKind::TabContent);
        tree.set_root(content);
        tree.set_style(
            content,
            Style::new()
                .with_size(Dimension::Pixel(300.0), Dimension::Pixel(200.0))
                .with_padding(EdgeSizes::all(10.0)),
        );
        let a = tree.create(ComponentKind::TabPanel);
        let b = tree.create(ComponentKind::TabPanel);
        tree.append_child(content, a).unwrap();
        tree.append_child(content, b).unwrap();

        LayoutEngine::new(800.0, 600.0).layout(&mut tree).unwrap();

        let expected = Rect::new(10.0, 10.0, 280.0, 180.0);
        assert_eq!(tree.bounds(a).unwrap(), expected);
        assert_eq!(tree.bounds(b).unwrap(), expected);
    }

    #[test]
    fn test_tab_bar_explicit_height() {
        let mut tree = ComponentTree::new();
        let bar = tree.create(ComponentKind::TabBar);
        tree.set_root(bar);
        tree.set_style(bar, Style::new().with_height(Dimension::Pixel(30.0)));
        let tab = tree.create(ComponentKind::Tab);
        tree.append_child(bar, tab).unwrap();

        LayoutEngine::new(500.0, 300.0).layout(&mut tree).unwrap();

        assert_eq!(tree.bounds(bar).unwrap().size(), Size::new(500.0, 30.0));
        assert_eq!(tree.bounds(tab).unwrap().size(), Size::new(80.0, 36.0));
    }
}
