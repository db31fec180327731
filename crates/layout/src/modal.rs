//! Modal layout.
//!
//! A modal ignores the space its parent offers. It is sized from its own style
//! (percentages resolve against the viewport) or the configured default, is
//! centered in the viewport, and arranges its content as a column.

use crate::axis::Axis;
use crate::component::ComponentId;
use crate::constraints::Constraints;
use crate::context::LayoutContext;
use crate::dimension::ExplicitSize;
use crate::flex::FlexFormattingContext;
use common::error::LayoutResult;
use common::geometry::{Point, Size};
use tracing::debug;

/// Layout a Modal. The `origin` offered by the parent is not used.
pub fn layout_modal(
    ctx: &mut LayoutContext<'_>,
    id: ComponentId,
    _constraints: Constraints,
    _origin: Point,
) -> LayoutResult<()> {
    let viewport = ctx.viewport();
    let config = ctx.config();
    let (style_width, style_height, flex) = match ctx.tree.get(id) {
        Some(c) => (c.style().width, c.style().height, c.flex_config()),
        None => return Ok(()),
    };

    let size = Size::new(
        style_width
            .resolve_explicit(viewport.width)
            .unwrap_or(config.modal_width),
        style_height
            .resolve_explicit(viewport.height)
            .unwrap_or(config.modal_height),
    );
    let origin = Point::new(
        viewport.x + (viewport.width - size.width) / 2.0,
        viewport.y + (viewport.height - size.height) / 2.0,
    );
    debug!(component = ?id, ?size, ?origin, "modal placed");

    FlexFormattingContext::new(Axis::Vertical, flex).layout_with_size(
        ctx,
        id,
        Constraints::tight(size),
        origin,
        ExplicitSize::new(Some(size.width), Some(size.height)),
    )
}
