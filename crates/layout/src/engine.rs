//! Main layout engine.

use crate::component::{ComponentId, ComponentKind};
use crate::config::LayoutConfig;
use crate::constraints::Constraints;
use crate::context::{LayoutContext, LayoutFailure};
use crate::intrinsic::TextMeasurer;
use crate::peek::peek_natural_size;
use crate::registry::{LayoutRegistry, LayoutTrait};
use crate::slot::TreeSlot;
use crate::tree::ComponentTree;
use common::error::{LayoutError, LayoutResult};
use common::geometry::{Point, Rect, Size};
use std::sync::Arc;
use tracing::{debug, info_span};

/// Outcome of a layout pass.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LayoutPass {
    /// Components whose layout trait ran to completion.
    pub laid_out: usize,
    /// Subtrees that were collapsed.
    pub failures: Vec<LayoutFailure>,
}

impl LayoutPass {
    /// Check if every subtree was laid out.
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

/// The layout engine.
pub struct LayoutEngine {
    /// Region the root is laid out in.
    viewport: Rect,
    config: LayoutConfig,
    registry: LayoutRegistry,
    /// Text measurer for leaf labels.
    measurer: Option<Box<dyn TextMeasurer + Send + Sync>>,
}

impl LayoutEngine {
    pub fn new(viewport_width: f32, viewport_height: f32) -> Self {
        Self {
            viewport: Rect::new(0.0, 0.0, viewport_width, viewport_height),
            config: LayoutConfig::default(),
            registry: LayoutRegistry::with_builtins(),
            measurer: None,
        }
    }

    pub fn with_config(mut self, config: LayoutConfig) -> Self {
        self.config = config;
        self
    }

    /// Measure labels with `measurer` instead of the built-in estimate.
    pub fn with_measurer(mut self, measurer: impl TextMeasurer + Send + Sync + 'static) -> Self {
        self.measurer = Some(Box::new(measurer));
        self
    }

    /// Set viewport dimensions.
    pub fn set_viewport(&mut self, width: f32, height: f32) {
        self.viewport = Rect::new(self.viewport.x, self.viewport.y, width, height);
    }

    pub fn viewport(&self) -> Rect {
        self.viewport
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    pub fn registry(&self) -> &LayoutRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut LayoutRegistry {
        &mut self.registry
    }

    /// Install a layout trait for a kind, replacing any previous one.
    pub fn register_layout_trait(
        &mut self,
        kind: ComponentKind,
        layout_trait: Arc<dyn LayoutTrait>,
    ) -> Option<Arc<dyn LayoutTrait>> {
        self.registry.register_layout_trait(kind, layout_trait)
    }

    fn measurer(&self) -> Option<&dyn TextMeasurer> {
        self.measurer.as_deref().map(|m| m as &dyn TextMeasurer)
    }

    /// Lay out the whole tree inside the viewport.
    ///
    /// Fails only when the tree contains a cycle. Subtrees whose layout
    /// failed are reported in the returned pass.
    pub fn layout(&self, tree: &mut ComponentTree) -> LayoutResult<LayoutPass> {
        let root = match tree.root() {
            Some(root) => root,
            None => return Ok(LayoutPass::default()),
        };
        let _span = info_span!("layout", components = tree.len()).entered();
        tree.check_acyclic(root)?;

        if tree.viewport() != Some(self.viewport) {
            debug!(viewport = ?self.viewport, "viewport changed, invalidating tree");
            tree.invalidate_all();
        }

        let pass = self.run(
            tree,
            root,
            Constraints::loose(self.viewport.size()),
            self.viewport.origin(),
            0,
        )?;
        tree.set_viewport(self.viewport);
        Ok(pass)
    }

    /// Lay out the tree only when something in it changed since the last pass.
    pub fn layout_if_needed(&self, tree: &mut ComponentTree) -> LayoutResult<Option<LayoutPass>> {
        let stale = match tree.root() {
            Some(root) => tree.needs_layout(root) || tree.viewport() != Some(self.viewport),
            None => false,
        };
        if !stale {
            return Ok(None);
        }
        self.layout(tree).map(Some)
    }

    /// Lay out one subtree again in place, with the constraints and origin
    /// it received last time.
    pub fn relayout_subtree(
        &self,
        tree: &mut ComponentTree,
        id: ComponentId,
    ) -> LayoutResult<LayoutPass> {
        let (constraints, origin) = match tree.get(id) {
            Some(c) => (
                c.layout
                    .constraints
                    .unwrap_or_else(|| Constraints::loose(self.viewport.size())),
                c.layout.origin,
            ),
            None => return Err(LayoutError::unknown(id)),
        };
        let _span = info_span!("relayout", component = %tree.describe(id)).entered();
        tree.check_acyclic(id)?;
        let depth = tree.depth_of(id);
        self.run(tree, id, constraints, origin, depth)
    }

    fn run(
        &self,
        tree: &mut ComponentTree,
        id: ComponentId,
        constraints: Constraints,
        origin: Point,
        depth: usize,
    ) -> LayoutResult<LayoutPass> {
        let mut ctx = LayoutContext::new(tree, &self.registry, &self.config, self.viewport)
            .with_measurer(self.measurer())
            .with_depth(depth);
        ctx.dispatch(id, constraints, origin)?;
        let (laid_out, failures) = ctx.finish();
        debug!(laid_out, failures = failures.len(), "layout pass finished");
        Ok(LayoutPass { laid_out, failures })
    }

    /// Estimate the natural size of a component without laying it out.
    pub fn peek(&self, tree: &ComponentTree, id: ComponentId, available: Size) -> Size {
        peek_natural_size(tree, id, available, self.measurer(), &self.config)
    }

    /// Swap in a tree published to `slot`, if any, and lay it out from scratch.
    pub fn apply_published(
        &self,
        slot: &TreeSlot,
        tree: &mut ComponentTree,
    ) -> LayoutResult<Option<LayoutPass>> {
        let mut published = match slot.take() {
            Some(published) => published,
            None => return Ok(None),
        };
        published.reset_layout();
        *tree = published;
        self.layout(tree).map(Some)
    }
}

impl Default for LayoutEngine {
    fn default() -> Self {
        Self::new(1920.0, 1080.0)
    }
}

impl std::fmt::Debug for LayoutEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LayoutEngine")
            .field("viewport", &self.viewport)
            .field("config", &self.config)
            .field("registry", &self.registry)
            .field("measurer", &self.measurer.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component::DirtyFlags;
    use common::geometry::EdgeSizes;
    use style::{CrossAlign, Dimension, FlexConfig, JustifyContent, Position, Style};

    fn sized(tree: &mut ComponentTree, kind: ComponentKind, w: f32, h: f32) -> ComponentId {
        let id = tree.create(kind);
        tree.set_style(id, Style::new().with_size(Dimension::Pixel(w), Dimension::Pixel(h)));
        id
    }

    /// Row of fixed boxes centered on both axes.
    fn centered_row() -> (ComponentTree, ComponentId, Vec<ComponentId>) {
        let mut tree = ComponentTree::new();
        let row = sized(&mut tree, ComponentKind::Row, 300.0, 100.0);
        tree.set_root(row);
        tree.set_flex(
            row,
            FlexConfig::new()
                .with_gap(10.0)
                .with_justify(JustifyContent::Center)
                .with_cross_axis(CrossAlign::Center),
        );
        let children = vec![
            sized(&mut tree, ComponentKind::Container, 50.0, 20.0),
            sized(&mut tree, ComponentKind::Container, 70.0, 40.0),
        ];
        for child in &children {
            tree.append_child(row, *child).unwrap();
        }
        (tree, row, children)
    }

    #[test]
    fn test_row_center_center() {
        let (mut tree, _, children) = centered_row();
        let pass = LayoutEngine::new(800.0, 600.0).layout(&mut tree).unwrap();

        assert!(pass.is_clean());
        assert_eq!(pass.laid_out, 3);
        // remaining 300 - 130 = 170, lead 85
        assert_eq!(tree.bounds(children[0]).unwrap(), Rect::new(85.0, 40.0, 50.0, 20.0));
        assert_eq!(tree.bounds(children[1]).unwrap(), Rect::new(145.0, 30.0, 70.0, 40.0));
    }

    #[test]
    fn test_layout_is_idempotent() {
        let (mut tree, _, _) = centered_row();
        let engine = LayoutEngine::new(800.0, 600.0);
        engine.layout(&mut tree).unwrap();
        let first: Vec<_> = tree.iter().map(|(id, c)| (id, c.rect())).collect();

        engine.layout(&mut tree).unwrap();
        let second: Vec<_> = tree.iter().map(|(id, c)| (id, c.rect())).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_empty_tree() {
        let mut tree = ComponentTree::new();
        let pass = LayoutEngine::default().layout(&mut tree).unwrap();
        assert_eq!(pass, LayoutPass::default());
    }

    #[test]
    fn test_layout_if_needed() {
        let (mut tree, row, children) = centered_row();
        let engine = LayoutEngine::new(800.0, 600.0);

        assert!(engine.layout_if_needed(&mut tree).unwrap().is_some());
        assert!(engine.layout_if_needed(&mut tree).unwrap().is_none());

        tree.set_style(
            children[0],
            Style::new().with_size(Dimension::Pixel(10.0), Dimension::Pixel(20.0)),
        );
        assert!(tree.needs_layout(row));
        assert!(engine.layout_if_needed(&mut tree).unwrap().is_some());
        assert_eq!(tree.bounds(children[0]).unwrap().width, 10.0);
    }

    #[test]
    fn test_viewport_change_relayouts() {
        let mut tree = ComponentTree::new();
        let column = tree.create(ComponentKind::Column);
        tree.set_root(column);
        tree.set_flex(column, FlexConfig::new().with_justify(JustifyContent::End));
        let child = sized(&mut tree, ComponentKind::Container, 10.0, 10.0);
        tree.append_child(column, child).unwrap();

        let mut engine = LayoutEngine::new(400.0, 300.0);
        engine.layout(&mut tree).unwrap();
        assert_eq!(tree.bounds(child).unwrap().y, 290.0);

        engine.set_viewport(400.0, 500.0);
        assert!(engine.layout_if_needed(&mut tree).unwrap().is_some());
        assert_eq!(tree.bounds(child).unwrap().y, 490.0);
    }

    #[test]
    fn test_relayout_subtree_in_place() {
        let mut tree = ComponentTree::new();
        let column = tree.create(ComponentKind::Column);
        tree.set_root(column);
        tree.set_style(column, Style::new().with_padding(EdgeSizes::all(8.0)));
        let first = sized(&mut tree, ComponentKind::Container, 40.0, 40.0);
        let row = tree.create(ComponentKind::Row);
        tree.append_child(column, first).unwrap();
        tree.append_child(column, row).unwrap();
        let leaf = sized(&mut tree, ComponentKind::Container, 20.0, 20.0);
        tree.append_child(row, leaf).unwrap();

        let engine = LayoutEngine::new(800.0, 600.0);
        engine.layout(&mut tree).unwrap();
        assert_eq!(tree.bounds(leaf).unwrap().origin(), Point::new(8.0, 48.0));

        tree.set_style(
            leaf,
            Style::new().with_size(Dimension::Pixel(30.0), Dimension::Pixel(20.0)),
        );
        let pass = engine.relayout_subtree(&mut tree, row).unwrap();

        assert_eq!(pass.laid_out, 2);
        assert_eq!(tree.bounds(row).unwrap(), Rect::new(8.0, 48.0, 30.0, 20.0));
        assert!(!tree.get(row).unwrap().layout.dirty.contains(DirtyFlags::LAYOUT));
    }

    #[test]
    fn test_relayout_unknown_component() {
        let mut tree = ComponentTree::new();
        let id = tree.create(ComponentKind::Column);
        tree.remove(id);
        let result = LayoutEngine::default().relayout_subtree(&mut tree, id);
        assert!(matches!(result, Err(LayoutError::UnknownComponent(_))));
    }

    #[test]
    fn test_cycle_aborts_pass() {
        let mut tree = ComponentTree::new();
        let a = tree.create(ComponentKind::Column);
        let b = tree.create(ComponentKind::Column);
        tree.set_root(a);
        tree.append_child(a, b).unwrap();
        // Bypass append_child to corrupt the tree
        tree.get_mut(b).unwrap().children.push(a);

        let result = LayoutEngine::default().layout(&mut tree);
        assert!(matches!(result, Err(LayoutError::CyclicTree { .. })));
    }

    #[test]
    fn test_absolute_position_survives_parent_shift() {
        let mut tree = ComponentTree::new();
        let row = sized(&mut tree, ComponentKind::Row, 400.0, 100.0);
        tree.set_root(row);
        tree.set_flex(row, FlexConfig::new().with_justify(JustifyContent::End));
        let holder = sized(&mut tree, ComponentKind::Column, 50.0, 50.0);
        tree.append_child(row, holder).unwrap();
        let pinned = sized(&mut tree, ComponentKind::Container, 5.0, 5.0);
        let style = tree.get(pinned).unwrap().style().clone();
        tree.set_style(pinned, style.with_position(Position::Absolute { x: 3.0, y: 4.0 }));
        tree.append_child(holder, pinned).unwrap();

        LayoutEngine::new(800.0, 600.0).layout(&mut tree).unwrap();

        assert_eq!(tree.bounds(holder).unwrap().x, 350.0);
        assert_eq!(tree.bounds(pinned).unwrap().origin(), Point::new(3.0, 4.0));
    }

    #[test]
    fn test_hit_test_after_layout() {
        let (mut tree, row, children) = centered_row();
        LayoutEngine::new(800.0, 600.0).layout(&mut tree).unwrap();

        assert_eq!(tree.hit_test(Point::new(90.0, 50.0)), Some(children[0]));
        assert_eq!(tree.hit_test(Point::new(5.0, 5.0)), Some(row));
        assert_eq!(tree.hit_test(Point::new(500.0, 500.0)), None);
    }

    #[test]
    fn test_measurer_is_used() {
        let mut tree = ComponentTree::new();
        let text = tree.create_text(ComponentKind::Text, "hello");
        tree.set_root(text);
        let engine = LayoutEngine::new(800.0, 600.0)
            .with_measurer(|text: &str, _: f32, _: Option<f32>| Size::new(text.len() as f32, 9.0));

        engine.layout(&mut tree).unwrap();

        assert_eq!(tree.bounds(text).unwrap().size(), Size::new(5.0, 9.0));
        assert_eq!(engine.peek(&tree, text, Size::new(800.0, 600.0)), Size::new(5.0, 9.0));
    }

    #[test]
    fn test_apply_published_tree() {
        let engine = LayoutEngine::new(800.0, 600.0);
        let slot = TreeSlot::new();
        let mut current = ComponentTree::new();
        assert!(engine.apply_published(&slot, &mut current).unwrap().is_none());

        let (published, _, children) = centered_row();
        slot.publish(published);
        let pass = engine.apply_published(&slot, &mut current).unwrap().unwrap();

        assert_eq!(pass.laid_out, 3);
        assert!(current.bounds(children[1]).is_some());
        assert!(!slot.has_pending());
    }
}
