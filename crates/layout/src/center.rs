//! Center layout: every in-flow child is centered on both axes.

use crate::component::ComponentId;
use crate::constraints::Constraints;
use crate::context::LayoutContext;
use crate::dimension::resolve_explicit_size;
use crate::flex::outer_size;
use common::error::LayoutResult;
use common::geometry::{Point, Rect, Size};

/// Layout a Center. Without an explicit size it fills the constraint box.
pub fn layout_center(
    ctx: &mut LayoutContext<'_>,
    id: ComponentId,
    constraints: Constraints,
    origin: Point,
) -> LayoutResult<()> {
    let (explicit, padding, children) = match ctx.tree.get(id) {
        Some(c) => (
            resolve_explicit_size(c.style(), &constraints),
            c.style().padding,
            c.children.clone(),
        ),
        None => return Ok(()),
    };

    let size = constraints.apply_min(Size::new(
        explicit.width.unwrap_or(constraints.max_width),
        explicit.height.unwrap_or(constraints.max_height),
    ));
    let content = Rect::from_origin_size(origin, size).inset(&padding);
    let child_constraints = Constraints::loose(content.size());

    for child_id in children {
        let (visible, out_of_flow, margin) = match ctx.tree.get(child_id) {
            Some(c) => (c.is_visible(), c.is_out_of_flow(), c.style().margin),
            None => continue,
        };
        if !visible {
            ctx.tree.zero_subtree(child_id, content.origin());
            continue;
        }

        let child_origin = content.origin().offset(margin.left, margin.top);
        ctx.dispatch(child_id, child_constraints, child_origin)?;
        if out_of_flow {
            continue;
        }

        let outer = match ctx.tree.get(child_id) {
            Some(c) => outer_size(c.rect().size(), &margin),
            None => continue,
        };
        let dx = (content.width - outer.width) / 2.0;
        let dy = (content.height - outer.height) / 2.0;
        ctx.tree.translate_subtree(child_id, dx, dy);
    }

    ctx.set_rect(id, Rect::from_origin_size(origin, size));
    Ok(())
}
