//! Layout trait registry.
//!
//! Every component kind is laid out by the [`LayoutTrait`] registered for it.
//! The registry is an explicit value owned by the engine; kinds without an
//! entry are skipped by dispatch.

use crate::component::{ComponentId, ComponentKind};
use crate::constraints::Constraints;
use crate::context::LayoutContext;
use crate::{center, flex, leaf, modal, tabs};
use common::error::LayoutResult;
use common::geometry::Point;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, warn};

/// Layout behavior of one component kind.
pub trait LayoutTrait: Send + Sync {
    /// Display name for diagnostics.
    fn name(&self) -> &'static str;

    /// Size and position `id` and its descendants.
    ///
    /// `origin` is the absolute top-left corner assigned by the parent.
    fn layout(
        &self,
        ctx: &mut LayoutContext<'_>,
        id: ComponentId,
        constraints: Constraints,
        origin: Point,
    ) -> LayoutResult<()>;
}

/// Signature of a plain layout function.
pub type LayoutFn =
    fn(&mut LayoutContext<'_>, ComponentId, Constraints, Point) -> LayoutResult<()>;

/// A layout trait backed by a plain function.
#[derive(Clone, Copy)]
pub struct FnLayout {
    name: &'static str,
    func: LayoutFn,
}

impl FnLayout {
    pub fn new(name: &'static str, func: LayoutFn) -> Self {
        Self { name, func }
    }
}

impl LayoutTrait for FnLayout {
    fn name(&self) -> &'static str {
        self.name
    }

    fn layout(
        &self,
        ctx: &mut LayoutContext<'_>,
        id: ComponentId,
        constraints: Constraints,
        origin: Point,
    ) -> LayoutResult<()> {
        (self.func)(ctx, id, constraints, origin)
    }
}

/// Table from component kind to layout trait.
pub struct LayoutRegistry {
    traits: [Option<Arc<dyn LayoutTrait>>; ComponentKind::COUNT],
    builtins_installed: bool,
}

impl LayoutRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            traits: std::array::from_fn(|_| None),
            builtins_installed: false,
        }
    }

    /// Create a registry with every built-in layout installed.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.init_builtin_traits();
        registry
    }

    /// Register the layout for a kind, replacing and returning any previous one.
    pub fn register_layout_trait(
        &mut self,
        kind: ComponentKind,
        layout_trait: Arc<dyn LayoutTrait>,
    ) -> Option<Arc<dyn LayoutTrait>> {
        let slot = &mut self.traits[kind.ordinal()];
        if let Some(existing) = slot.as_ref() {
            warn!(
                kind = kind.name(),
                old = existing.name(),
                new = layout_trait.name(),
                "replacing registered layout trait"
            );
        }
        slot.replace(layout_trait)
    }

    /// Register a plain function as the layout for a kind.
    pub fn register_fn(
        &mut self,
        kind: ComponentKind,
        name: &'static str,
        func: LayoutFn,
    ) -> Option<Arc<dyn LayoutTrait>> {
        self.register_layout_trait(kind, Arc::new(FnLayout::new(name, func)))
    }

    /// Remove the layout for a kind.
    pub fn unregister(&mut self, kind: ComponentKind) -> Option<Arc<dyn LayoutTrait>> {
        self.traits[kind.ordinal()].take()
    }

    /// Get the layout for a kind.
    pub fn get(&self, kind: ComponentKind) -> Option<&dyn LayoutTrait> {
        self.traits[kind.ordinal()].as_deref()
    }

    pub fn is_registered(&self, kind: ComponentKind) -> bool {
        self.traits[kind.ordinal()].is_some()
    }

    /// Kinds that currently have a layout.
    pub fn registered_kinds(&self) -> impl Iterator<Item = ComponentKind> + '_ {
        ComponentKind::ALL
            .into_iter()
            .filter(|kind| self.is_registered(*kind))
    }

    /// Install the built-in layouts into every empty slot.
    ///
    /// Only the first call has an effect. `Table` has no built-in layout.
    pub fn init_builtin_traits(&mut self) {
        if self.builtins_installed {
            return;
        }
        self.builtins_installed = true;

        for kind in ComponentKind::ALL {
            let func: LayoutFn = match kind {
                ComponentKind::Text
                | ComponentKind::Button
                | ComponentKind::Checkbox
                | ComponentKind::Dropdown
                | ComponentKind::Input
                | ComponentKind::Tab => leaf::layout_leaf,
                ComponentKind::Row => flex::layout_row,
                ComponentKind::Column => flex::layout_column,
                ComponentKind::Container | ComponentKind::ForEach => flex::layout_container,
                ComponentKind::Center => center::layout_center,
                ComponentKind::Modal => modal::layout_modal,
                ComponentKind::TabGroup => tabs::layout_tab_group,
                ComponentKind::TabBar => tabs::layout_tab_bar,
                ComponentKind::TabContent => tabs::layout_tab_content,
                ComponentKind::TabPanel => tabs::layout_tab_panel,
                ComponentKind::Table => continue,
            };
            if !self.is_registered(kind) {
                self.traits[kind.ordinal()] = Some(Arc::new(FnLayout::new(kind.name(), func)));
            }
        }
        debug!(count = self.registered_kinds().count(), "built-in layout traits installed");
    }
}

impl Default for LayoutRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for LayoutRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(
                ComponentKind::ALL
                    .iter()
                    .filter_map(|kind| self.get(*kind).map(|t| (kind.name(), t.name()))),
            )
            .finish()
    }
}
