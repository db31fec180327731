//! Component tree structure.

use crate::component::{Component, ComponentId, ComponentKind, DirtyFlags};
use common::error::{LayoutError, LayoutResult};
use common::geometry::{Point, Rect};
use slotmap::{SecondaryMap, SlotMap};
use std::sync::Arc;
use style::{FlexConfig, Style};
use tracing::trace;

/// Arena of components. A parent owns its children; removing a component
/// removes its whole subtree.
#[derive(Clone, Debug, Default)]
pub struct ComponentTree {
    /// All components.
    components: SlotMap<ComponentId, Component>,
    /// Root component.
    root: Option<ComponentId>,
    /// Viewport of the last completed pass.
    viewport: Option<Rect>,
}

impl ComponentTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get root component.
    pub fn root(&self) -> Option<ComponentId> {
        self.root
    }

    /// Set root component.
    pub fn set_root(&mut self, id: ComponentId) {
        self.root = Some(id);
        self.mark_dirty(id);
    }

    /// Create a detached component.
    pub fn create(&mut self, kind: ComponentKind) -> ComponentId {
        self.components.insert_with_key(|id| Component::new(id, kind))
    }

    /// Create a detached component with a text label.
    pub fn create_text(&mut self, kind: ComponentKind, text: impl Into<String>) -> ComponentId {
        let id = self.create(kind);
        self.components[id].text = Some(text.into());
        id
    }

    /// Get a component by ID.
    pub fn get(&self, id: ComponentId) -> Option<&Component> {
        self.components.get(id)
    }

    /// Get a mutable component by ID.
    pub fn get_mut(&mut self, id: ComponentId) -> Option<&mut Component> {
        self.components.get_mut(id)
    }

    pub fn contains(&self, id: ComponentId) -> bool {
        self.components.contains_key(id)
    }

    /// Replace a component's style.
    pub fn set_style(&mut self, id: ComponentId, style: Style) {
        if let Some(component) = self.components.get_mut(id) {
            component.style = Some(Arc::new(style));
            self.mark_style_dirty(id);
        }
    }

    /// Replace a component's flex configuration.
    pub fn set_flex(&mut self, id: ComponentId, flex: FlexConfig) {
        if let Some(component) = self.components.get_mut(id) {
            component.flex = Some(flex);
            self.mark_style_dirty(id);
        }
    }

    /// Replace a component's text.
    pub fn set_text(&mut self, id: ComponentId, text: impl Into<String>) {
        if let Some(component) = self.components.get_mut(id) {
            component.text = Some(text.into());
            self.mark_dirty(id);
        }
    }

    /// Append child to parent, detaching it from any previous parent.
    ///
    /// Fails if either component is missing or if `child` is `parent` or one
    /// of its ancestors.
    pub fn append_child(&mut self, parent: ComponentId, child: ComponentId) -> LayoutResult<()> {
        if !self.contains(parent) {
            return Err(LayoutError::unknown(parent));
        }
        if !self.contains(child) {
            return Err(LayoutError::unknown(child));
        }
        if child == parent || self.is_ancestor(child, parent) {
            return Err(LayoutError::would_cycle(parent, child));
        }

        self.detach(child);
        self.components[child].parent = Some(parent);
        self.components[parent].children.push(child);
        self.mark_dirty(parent);
        Ok(())
    }

    fn detach(&mut self, id: ComponentId) {
        if let Some(old_parent) = self.components.get(id).and_then(|c| c.parent) {
            if let Some(parent) = self.components.get_mut(old_parent) {
                parent.children.retain(|c| *c != id);
            }
            self.mark_dirty(old_parent);
        }
        if let Some(component) = self.components.get_mut(id) {
            component.parent = None;
        }
    }

    /// Remove component and its subtree.
    pub fn remove(&mut self, id: ComponentId) {
        self.detach(id);

        let mut to_remove = vec![id];
        let mut i = 0;
        while i < to_remove.len() {
            if let Some(c) = self.components.remove(to_remove[i]) {
                to_remove.extend(c.children.iter().copied());
            }
            i += 1;
        }

        if self.root == Some(id) {
            self.root = None;
        }
    }

    /// Get parent component.
    pub fn parent(&self, id: ComponentId) -> Option<ComponentId> {
        self.components.get(id).and_then(|c| c.parent)
    }

    /// Get children.
    pub fn children(&self, id: ComponentId) -> impl Iterator<Item = ComponentId> + '_ {
        self.components
            .get(id)
            .into_iter()
            .flat_map(|c| c.children.iter().copied())
    }

    /// Check if `ancestor` is on the parent chain of `id`.
    pub fn is_ancestor(&self, ancestor: ComponentId, id: ComponentId) -> bool {
        let mut current = self.parent(id);
        let mut steps = 0;
        while let Some(node) = current {
            if node == ancestor {
                return true;
            }
            steps += 1;
            if steps > self.components.len() {
                return false;
            }
            current = self.parent(node);
        }
        false
    }

    /// Number of ancestors of a component.
    pub fn depth_of(&self, id: ComponentId) -> usize {
        let mut depth = 0;
        let mut current = self.parent(id);
        while let Some(node) = current {
            depth += 1;
            if depth > self.components.len() {
                break;
            }
            current = self.parent(node);
        }
        depth
    }

    /// Get all components.
    pub fn iter(&self) -> impl Iterator<Item = (ComponentId, &Component)> {
        self.components.iter()
    }

    /// Get number of components.
    pub fn len(&self) -> usize {
        self.components.len()
    }

    /// Check if tree is empty.
    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// Walk the subtree under `start`, failing if any component is reached twice.
    pub fn check_acyclic(&self, start: ComponentId) -> LayoutResult<()> {
        let mut visited: SecondaryMap<ComponentId, ()> = SecondaryMap::new();
        let mut stack = vec![start];
        while let Some(id) = stack.pop() {
            if visited.insert(id, ()).is_some() {
                return Err(LayoutError::cyclic(self.describe(id)));
            }
            stack.extend(self.children(id));
        }
        Ok(())
    }

    /// Short human-readable label for diagnostics.
    pub fn describe(&self, id: ComponentId) -> String {
        match self.components.get(id) {
            Some(c) => format!("{}{:?}", c.kind.name(), id),
            None => format!("{:?}", id),
        }
    }

    /// Shift a component and its descendants by the same delta.
    ///
    /// Descendants placed outside normal flow (absolute position, modals) own
    /// their coordinates and are left where they are, together with their
    /// subtrees. The tree must be acyclic.
    pub fn translate_subtree(&mut self, id: ComponentId, dx: f32, dy: f32) {
        if dx == 0.0 && dy == 0.0 {
            return;
        }
        let mut stack = vec![id];
        while let Some(node) = stack.pop() {
            let component = match self.components.get_mut(node) {
                Some(c) => c,
                None => continue,
            };
            if node != id && component.is_out_of_flow() {
                continue;
            }
            component.layout.rect = component.layout.rect.translate(dx, dy);
            component.layout.origin = component.layout.origin.offset(dx, dy);
            stack.extend(component.children.iter().copied());
        }
        trace!(component = ?id, dx, dy, "translated subtree");
    }

    /// Collapse a subtree to zero size at `origin` and mark it invalid.
    pub fn zero_subtree(&mut self, id: ComponentId, origin: Point) {
        let mut stack = vec![id];
        let mut visited: SecondaryMap<ComponentId, ()> = SecondaryMap::new();
        while let Some(node) = stack.pop() {
            if visited.insert(node, ()).is_some() {
                continue;
            }
            if let Some(component) = self.components.get_mut(node) {
                component.layout.rect = Rect::new(origin.x, origin.y, 0.0, 0.0);
                component.layout.valid = false;
                stack.extend(component.children.iter().copied());
            }
        }
    }

    /// Mark a component for layout, together with its subtree, and flag its
    /// ancestors.
    pub fn mark_dirty(&mut self, id: ComponentId) {
        self.mark_subtree(id, DirtyFlags::LAYOUT);

        let mut current = self.parent(id);
        let mut steps = 0;
        while let Some(node) = current {
            steps += 1;
            if steps > self.components.len() {
                break;
            }
            match self.components.get_mut(node) {
                Some(c) => {
                    c.layout.dirty |= DirtyFlags::SUBTREE;
                    current = c.parent;
                }
                None => break,
            }
        }
    }

    /// Mark a component whose style changed.
    pub fn mark_style_dirty(&mut self, id: ComponentId) {
        if let Some(c) = self.components.get_mut(id) {
            c.layout.dirty |= DirtyFlags::STYLE;
        }
        self.mark_dirty(id);
    }

    /// Mark a component for repaint only.
    pub fn mark_render_dirty(&mut self, id: ComponentId) {
        if let Some(c) = self.components.get_mut(id) {
            c.layout.dirty |= DirtyFlags::RENDER;
        }
    }

    fn mark_subtree(&mut self, id: ComponentId, flags: DirtyFlags) {
        let mut visited: SecondaryMap<ComponentId, ()> = SecondaryMap::new();
        let mut stack = vec![id];
        while let Some(node) = stack.pop() {
            if visited.insert(node, ()).is_some() {
                continue;
            }
            if let Some(c) = self.components.get_mut(node) {
                c.layout.dirty |= flags;
                c.layout.valid = false;
                stack.extend(c.children.iter().copied());
            }
        }
    }

    /// Check if a component needs a layout pass.
    pub fn needs_layout(&self, id: ComponentId) -> bool {
        self.components
            .get(id)
            .map_or(false, |c| c.layout.dirty.intersects(DirtyFlags::NEEDS_LAYOUT))
    }

    /// Mark every component for layout.
    pub fn invalidate_all(&mut self) {
        for (_, c) in self.components.iter_mut() {
            c.layout.dirty |= DirtyFlags::LAYOUT;
            c.layout.valid = false;
        }
    }

    /// Discard every cached layout result.
    pub fn reset_layout(&mut self) {
        for (_, c) in self.components.iter_mut() {
            c.layout.reset();
        }
        self.viewport = None;
    }

    /// Collect and clear components whose geometry changed since last asked.
    pub fn take_render_dirty(&mut self) -> Vec<ComponentId> {
        let mut ids = Vec::new();
        for (id, c) in self.components.iter_mut() {
            if c.layout.dirty.contains(DirtyFlags::RENDER) {
                c.layout.dirty.remove(DirtyFlags::RENDER);
                ids.push(id);
            }
        }
        ids
    }

    /// Computed border box, if the last layout of the component completed.
    pub fn bounds(&self, id: ComponentId) -> Option<Rect> {
        self.components
            .get(id)
            .filter(|c| c.layout.valid)
            .map(|c| c.layout.rect)
    }

    pub(crate) fn viewport(&self) -> Option<Rect> {
        self.viewport
    }

    pub(crate) fn set_viewport(&mut self, viewport: Rect) {
        self.viewport = Some(viewport);
    }

    /// Get the topmost visible component at a point.
    pub fn hit_test(&self, point: Point) -> Option<ComponentId> {
        let root = self.root?;
        self.hit_test_component(root, point, 0)
    }

    fn hit_test_component(&self, id: ComponentId, point: Point, depth: usize) -> Option<ComponentId> {
        if depth > self.components.len() {
            return None;
        }
        let component = self.components.get(id)?;
        if !component.is_visible() || !component.layout.valid {
            return None;
        }
        let inside = component.layout.rect.contains_point(point);

        // Later children paint on top
        for &child_id in component.children.iter().rev() {
            let out_of_flow = self
                .components
                .get(child_id)
                .map_or(false, |c| c.is_out_of_flow());
            if !inside && !out_of_flow {
                continue;
            }
            if let Some(hit) = self.hit_test_component(child_id, point, depth + 1) {
                return Some(hit);
            }
        }

        if inside {
            Some(id)
        } else {
            None
        }
    }
}

/// Pre-order traversal of a subtree.
pub struct PreOrderIterator<'a> {
    tree: &'a ComponentTree,
    stack: Vec<(ComponentId, usize)>,
}

impl<'a> PreOrderIterator<'a> {
    /// Traverse from the root.
    pub fn new(tree: &'a ComponentTree) -> Self {
        let stack = tree.root().map(|id| (id, 0)).into_iter().collect();
        Self { tree, stack }
    }

    /// Traverse from `start`.
    pub fn from(tree: &'a ComponentTree, start: ComponentId) -> Self {
        Self {
            tree,
            stack: vec![(start, 0)],
        }
    }
}

impl<'a> Iterator for PreOrderIterator<'a> {
    /// Component and its depth below the starting point.
    type Item = (ComponentId, usize);

    fn next(&mut self) -> Option<Self::Item> {
        let (id, depth) = self.stack.pop()?;
        if let Some(component) = self.tree.get(id) {
            for &child in component.children.iter().rev() {
                self.stack.push((child, depth + 1));
            }
        }
        Some((id, depth))
    }
}
