//! Component representation.

use crate::constraints::Constraints;
use bitflags::bitflags;
use common::geometry::{Point, Rect};
use serde::{Deserialize, Serialize};
use slotmap::new_key_type;
use smallvec::SmallVec;
use std::sync::Arc;
use style::{FlexConfig, Style, DEFAULT_STYLE};

new_key_type! {
    /// Unique identifier for a component.
    pub struct ComponentId;
}

/// Kind of a component. The set is closed; layout behavior is selected by kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComponentKind {
    Text,
    Button,
    Row,
    Column,
    Container,
    Center,
    Modal,
    Checkbox,
    Dropdown,
    Table,
    ForEach,
    Input,
    TabGroup,
    TabBar,
    Tab,
    TabContent,
    TabPanel,
}

impl ComponentKind {
    /// Number of kinds.
    pub const COUNT: usize = 17;

    /// Every kind, in ordinal order.
    pub const ALL: [ComponentKind; Self::COUNT] = [
        ComponentKind::Text,
        ComponentKind::Button,
        ComponentKind::Row,
        ComponentKind::Column,
        ComponentKind::Container,
        ComponentKind::Center,
        ComponentKind::Modal,
        ComponentKind::Checkbox,
        ComponentKind::Dropdown,
        ComponentKind::Table,
        ComponentKind::ForEach,
        ComponentKind::Input,
        ComponentKind::TabGroup,
        ComponentKind::TabBar,
        ComponentKind::Tab,
        ComponentKind::TabContent,
        ComponentKind::TabPanel,
    ];

    /// Table index of the kind.
    #[inline]
    pub fn ordinal(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        match self {
            ComponentKind::Text => "Text",
            ComponentKind::Button => "Button",
            ComponentKind::Row => "Row",
            ComponentKind::Column => "Column",
            ComponentKind::Container => "Container",
            ComponentKind::Center => "Center",
            ComponentKind::Modal => "Modal",
            ComponentKind::Checkbox => "Checkbox",
            ComponentKind::Dropdown => "Dropdown",
            ComponentKind::Table => "Table",
            ComponentKind::ForEach => "ForEach",
            ComponentKind::Input => "Input",
            ComponentKind::TabGroup => "TabGroup",
            ComponentKind::TabBar => "TabBar",
            ComponentKind::Tab => "Tab",
            ComponentKind::TabContent => "TabContent",
            ComponentKind::TabPanel => "TabPanel",
        }
    }

    /// Check if the kind is sized from its own content rather than children.
    pub fn is_leaf(self) -> bool {
        matches!(
            self,
            ComponentKind::Text
                | ComponentKind::Button
                | ComponentKind::Checkbox
                | ComponentKind::Dropdown
                | ComponentKind::Input
                | ComponentKind::Tab
        )
    }
}

bitflags! {
    /// Invalidation state of a component.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    pub struct DirtyFlags: u8 {
        /// Own geometry must be recomputed.
        const LAYOUT = 0b0001;
        /// Style changed since the last pass.
        const STYLE = 0b0010;
        /// Geometry changed since the last paint.
        const RENDER = 0b0100;
        /// Some descendant needs layout.
        const SUBTREE = 0b1000;
    }
}

impl DirtyFlags {
    /// Flags that require a layout pass.
    pub const NEEDS_LAYOUT: DirtyFlags = DirtyFlags::LAYOUT.union(DirtyFlags::SUBTREE);
}

/// Cached result of the last layout of a component.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ComputedLayout {
    /// Absolute border box.
    pub rect: Rect,
    /// Whether `rect` belongs to a completed layout.
    pub valid: bool,
    /// Constraints the component was last laid out with.
    pub constraints: Option<Constraints>,
    /// Origin the component was last laid out at.
    pub origin: Point,
    /// Invalidation state.
    pub dirty: DirtyFlags,
}

impl ComputedLayout {
    /// Fresh state for a component that has never been laid out.
    pub fn new() -> Self {
        Self {
            dirty: DirtyFlags::LAYOUT,
            ..Self::default()
        }
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

/// A component in the component tree.
#[derive(Clone, Debug)]
pub struct Component {
    /// Unique ID.
    pub id: ComponentId,
    /// Component kind.
    pub kind: ComponentKind,
    /// Style. Components without one share the default style.
    pub style: Option<Arc<Style>>,
    /// Flex configuration for containers.
    pub flex: Option<FlexConfig>,
    /// Text content or label.
    pub text: Option<String>,
    /// Parent component.
    pub parent: Option<ComponentId>,
    /// Child components, in paint order.
    pub children: SmallVec<[ComponentId; 8]>,
    /// Computed layout.
    pub layout: ComputedLayout,
}

impl Component {
    pub fn new(id: ComponentId, kind: ComponentKind) -> Self {
        Self {
            id,
            kind,
            style: None,
            flex: None,
            text: None,
            parent: None,
            children: SmallVec::new(),
            layout: ComputedLayout::new(),
        }
    }

    /// Effective style.
    pub fn style(&self) -> &Style {
        self.style.as_deref().unwrap_or(&DEFAULT_STYLE)
    }

    /// Effective flex configuration.
    pub fn flex_config(&self) -> FlexConfig {
        self.flex.unwrap_or_default()
    }

    pub fn text(&self) -> &str {
        self.text.as_deref().unwrap_or("")
    }

    pub fn is_visible(&self) -> bool {
        self.style().visible
    }

    /// Check if the component is placed independently of its parent's flow.
    pub fn is_out_of_flow(&self) -> bool {
        self.kind == ComponentKind::Modal || self.style().is_absolute()
    }

    /// Get the computed border box.
    pub fn rect(&self) -> Rect {
        self.layout.rect
    }

    /// Get the computed margin box.
    pub fn margin_rect(&self) -> Rect {
        let margin = &self.style().margin;
        let rect = self.layout.rect;
        Rect::new(
            rect.x - margin.left,
            rect.y - margin.top,
            rect.width + margin.horizontal(),
            rect.height + margin.vertical(),
        )
    }

    /// Check if component has children.
    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }
}
