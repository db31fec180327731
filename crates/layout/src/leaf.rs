//! Layout of leaf components.

use crate::component::{Component, ComponentId};
use crate::constraints::Constraints;
use crate::context::LayoutContext;
use crate::dimension::resolve_explicit_size;
use crate::intrinsic::{intrinsic_size, Metrics};
use common::error::LayoutResult;
use common::geometry::{Point, Rect, Size};

/// Final size of a leaf: explicit style dimensions over intrinsic ones,
/// raised to the minimum constraints.
pub fn leaf_size(component: &Component, constraints: &Constraints, metrics: Metrics<'_>) -> Size {
    let explicit = resolve_explicit_size(component.style(), constraints);
    let intrinsic =
        intrinsic_size(component, Some(constraints.max_width), metrics).unwrap_or_default();
    constraints.apply_min(Size::new(
        explicit.width.unwrap_or(intrinsic.width),
        explicit.height.unwrap_or(intrinsic.height),
    ))
}

/// Layout a Text, Button, Checkbox, Input, Dropdown or Tab.
pub fn layout_leaf(
    ctx: &mut LayoutContext<'_>,
    id: ComponentId,
    constraints: Constraints,
    origin: Point,
) -> LayoutResult<()> {
    let metrics = ctx.metrics();
    let size = match ctx.tree.get(id) {
        Some(component) => leaf_size(component, &constraints, metrics),
        None => return Ok(()),
    };
    ctx.set_rect(id, Rect::from_origin_size(origin, size));
    Ok(())
}
