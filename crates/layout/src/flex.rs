//! Flex layout for Row, Column, Container and ForEach.
//!
//! One algorithm serves both directions: every computation is written in
//! terms of a main and a cross [`Axis`].

use crate::axis::Axis;
use crate::component::{Component, ComponentId, ComponentKind};
use crate::constraints::Constraints;
use crate::context::LayoutContext;
use crate::dimension::{resolve_explicit_size, ExplicitSize};
use crate::peek;
use common::error::LayoutResult;
use common::geometry::{non_negative, EdgeSizes, Point, Rect, Size};
use smallvec::SmallVec;
use style::{CrossAlign, FlexConfig, JustifyContent};
use tracing::trace;

/// Flex formatting context.
#[derive(Clone, Copy, Debug)]
pub struct FlexFormattingContext {
    /// Main axis.
    axis: Axis,
    /// Gap, justification and alignment.
    config: FlexConfig,
}

/// In-flow child during layout.
#[derive(Clone, Copy, Debug)]
struct FlexItem {
    id: ComponentId,
    /// Size plus margins along the main axis.
    outer_main: f32,
    /// Size plus margins along the cross axis.
    outer_cross: f32,
    /// Cross axis margins.
    cross_margin: f32,
    /// Whether the cross dimension is `Auto`.
    stretchable: bool,
}

impl FlexFormattingContext {
    pub fn new(axis: Axis, config: FlexConfig) -> Self {
        Self { axis, config }
    }

    /// Context for a component laid out as a flex container.
    pub fn for_component(component: &Component) -> Option<Self> {
        container_axis(component).map(|axis| Self::new(axis, component.flex_config()))
    }

    /// Lay out a container sized by its own style.
    pub fn layout(
        &self,
        ctx: &mut LayoutContext<'_>,
        id: ComponentId,
        constraints: Constraints,
        origin: Point,
    ) -> LayoutResult<()> {
        let explicit = match ctx.tree.get(id) {
            Some(c) => resolve_explicit_size(c.style(), &constraints),
            None => return Ok(()),
        };
        self.layout_with_size(ctx, id, constraints, origin, explicit)
    }

    /// Lay out a container whose explicit size has already been decided.
    pub fn layout_with_size(
        &self,
        ctx: &mut LayoutContext<'_>,
        id: ComponentId,
        constraints: Constraints,
        origin: Point,
        explicit: ExplicitSize,
    ) -> LayoutResult<()> {
        let (padding, children) = match ctx.tree.get(id) {
            Some(c) => (c.style().padding, c.children.clone()),
            None => return Ok(()),
        };
        let main = self.axis;
        let cross = main.cross();

        // Space for children inside the padding
        let available = Size::new(
            non_negative(explicit.width.unwrap_or(constraints.max_width) - padding.horizontal()),
            non_negative(explicit.height.unwrap_or(constraints.max_height) - padding.vertical()),
        );

        // Percentages on an auto axis resolve against the natural content estimate
        let basis = if explicit.width.is_some() && explicit.height.is_some() {
            available
        } else {
            let metrics = ctx.metrics();
            let measured = Size::new(
                explicit.width.unwrap_or(constraints.max_width),
                explicit.height.unwrap_or(constraints.max_height),
            );
            let natural = peek::peek_with(&*ctx.tree, id, measured, metrics);
            let estimate = Size::new(
                natural.width - padding.horizontal(),
                natural.height - padding.vertical(),
            )
            .non_negative();
            Size::new(
                if explicit.width.is_some() { available.width } else { estimate.width },
                if explicit.height.is_some() { available.height } else { estimate.height },
            )
        };
        let child_constraints = Constraints::loose(available).with_percent_basis(basis);
        let content_origin = origin.offset(padding.left, padding.top);

        // Cross size known up front: stretched children get it in their only dispatch
        let stretch_to = if self.config.cross_axis == CrossAlign::Stretch {
            fixed_cross(cross, &constraints, explicit, &padding)
        } else {
            None
        };

        let mut items: SmallVec<[FlexItem; 8]> = SmallVec::new();
        let mut cursor = 0.0f32;
        let mut max_cross = 0.0f32;

        for child_id in children {
            let (visible, out_of_flow, margin, stretchable) = match ctx.tree.get(child_id) {
                Some(c) => (
                    c.is_visible(),
                    c.is_out_of_flow(),
                    c.style().margin,
                    cross.dimension(c.style()).is_auto(),
                ),
                None => continue,
            };
            if !visible {
                ctx.tree.zero_subtree(child_id, content_origin);
                continue;
            }
            if out_of_flow {
                ctx.dispatch(child_id, child_constraints, content_origin)?;
                continue;
            }

            if !items.is_empty() {
                cursor += self.config.gap;
            }
            let offset = main.pack_point(cursor + main.leading(&margin), cross.leading(&margin));
            let child_origin = content_origin + offset;
            let offered = match stretch_to {
                Some(target) if stretchable => {
                    cross.tighten(child_constraints, non_negative(target - cross.edges(&margin)))
                }
                _ => child_constraints,
            };
            ctx.dispatch(child_id, offered, child_origin)?;

            let size = child_size(ctx, child_id);
            let item = FlexItem {
                id: child_id,
                outer_main: main.size(size) + main.edges(&margin),
                outer_cross: cross.size(size) + cross.edges(&margin),
                cross_margin: cross.edges(&margin),
                stretchable,
            };
            cursor += item.outer_main;
            max_cross = max_cross.max(item.outer_cross);
            items.push(item);
        }
        let total_main = cursor;

        // Own content size
        let content_main = match explicit.get(main) {
            Some(size) => non_negative(size - main.edges(&padding)),
            None if self.config.justify_content.fills_main_axis() => main.size(available),
            None => total_main,
        }
        .max(main.min_constraint(&constraints) - main.edges(&padding));
        let content_cross = match explicit.get(cross) {
            Some(size) => non_negative(size - cross.edges(&padding)),
            None => max_cross,
        }
        .max(cross.min_constraint(&constraints) - cross.edges(&padding));

        if self.config.cross_axis == CrossAlign::Stretch {
            for item in items.iter_mut().filter(|item| item.stretchable) {
                let target = non_negative(content_cross - item.cross_margin);
                self.stretch(ctx, item, target);
            }
        }

        let remaining = non_negative(content_main - total_main);
        let (lead, between) = distribute(self.config.justify_content, remaining, items.len());

        for (i, item) in items.iter().enumerate() {
            let main_shift = lead + i as f32 * between;
            let cross_shift = match self.config.cross_axis {
                CrossAlign::Start | CrossAlign::Stretch => 0.0,
                CrossAlign::Center => non_negative((content_cross - item.outer_cross) / 2.0),
                CrossAlign::End => non_negative(content_cross - item.outer_cross),
            };
            let delta = main.pack_point(main_shift, cross_shift);
            ctx.tree.translate_subtree(item.id, delta.x, delta.y);
        }

        let size = main.pack_size(
            content_main + main.edges(&padding),
            content_cross + cross.edges(&padding),
        );
        let size = constraints.apply_min(size);
        trace!(component = ?id, ?size, children = items.len(), "flex container laid out");
        ctx.set_rect(id, Rect::from_origin_size(origin, size));
        Ok(())
    }

    /// Set a laid-out child's cross size to `target`. The child is not laid
    /// out again.
    fn stretch(&self, ctx: &mut LayoutContext<'_>, item: &mut FlexItem, target: f32) {
        if let Some(child) = ctx.tree.get_mut(item.id) {
            match self.axis.cross() {
                Axis::Horizontal => child.layout.rect.width = target,
                Axis::Vertical => child.layout.rect.height = target,
            }
        }
        item.outer_cross = target + item.cross_margin;
    }
}

/// Content size along `cross` when it does not depend on the children.
fn fixed_cross(
    cross: Axis,
    constraints: &Constraints,
    explicit: ExplicitSize,
    padding: &EdgeSizes,
) -> Option<f32> {
    let outer = match explicit.get(cross) {
        Some(size) => size,
        None if cross.is_tight(constraints) => cross.max_constraint(constraints),
        None => return None,
    };
    let content = non_negative(outer - cross.edges(padding));
    Some(content.max(cross.min_constraint(constraints) - cross.edges(padding)))
}

fn child_size(ctx: &LayoutContext<'_>, id: ComponentId) -> Size {
    ctx.tree.get(id).map(|c| c.rect().size()).unwrap_or_default()
}

/// Leading offset and extra space between items for a justification mode.
pub fn distribute(justify: JustifyContent, remaining: f32, count: usize) -> (f32, f32) {
    let n = count as f32;
    match justify {
        JustifyContent::Start => (0.0, 0.0),
        JustifyContent::Center => (remaining / 2.0, 0.0),
        JustifyContent::End => (remaining, 0.0),
        JustifyContent::SpaceBetween if count > 1 => (0.0, remaining / (n - 1.0)),
        JustifyContent::SpaceBetween => (0.0, 0.0),
        JustifyContent::SpaceAround if count > 0 => {
            let gap = remaining / n;
            (gap / 2.0, gap)
        }
        JustifyContent::SpaceAround => (0.0, 0.0),
        JustifyContent::SpaceEvenly => {
            let gap = remaining / (n + 1.0);
            (gap, gap)
        }
    }
}

/// Main axis of a component that arranges its children in a line.
pub fn container_axis(component: &Component) -> Option<Axis> {
    match component.kind {
        ComponentKind::Row | ComponentKind::TabBar => Some(Axis::Horizontal),
        ComponentKind::Column
        | ComponentKind::Modal
        | ComponentKind::TabGroup
        | ComponentKind::TabPanel => Some(Axis::Vertical),
        ComponentKind::Container | ComponentKind::ForEach => {
            Some(Axis::from_direction(component.flex_config().direction))
        }
        _ => None,
    }
}

/// Outer size of a child including margins.
pub(crate) fn outer_size(size: Size, margin: &EdgeSizes) -> Size {
    Size::new(size.width + margin.horizontal(), size.height + margin.vertical())
}

fn layout_along(
    ctx: &mut LayoutContext<'_>,
    id: ComponentId,
    constraints: Constraints,
    origin: Point,
    axis: Option<Axis>,
) -> LayoutResult<()> {
    let flex = match ctx.tree.get(id) {
        Some(c) => c.flex_config(),
        None => return Ok(()),
    };
    let axis = axis.unwrap_or_else(|| Axis::from_direction(flex.direction));
    FlexFormattingContext::new(axis, flex).layout(ctx, id, constraints, origin)
}

/// Layout a Row.
pub fn layout_row(
    ctx: &mut LayoutContext<'_>,
    id: ComponentId,
    constraints: Constraints,
    origin: Point,
) -> LayoutResult<()> {
    layout_along(ctx, id, constraints, origin, Some(Axis::Horizontal))
}

/// Layout a Column.
pub fn layout_column(
    ctx: &mut LayoutContext<'_>,
    id: ComponentId,
    constraints: Constraints,
    origin: Point,
) -> LayoutResult<()> {
    layout_along(ctx, id, constraints, origin, Some(Axis::Vertical))
}

/// Layout a Container or ForEach along its configured direction.
pub fn layout_container(
    ctx: &mut LayoutContext<'_>,
    id: ComponentId,
    constraints: Constraints,
    origin: Point,
) -> LayoutResult<()> {
    layout_along(ctx, id, constraints, origin, None)
}
