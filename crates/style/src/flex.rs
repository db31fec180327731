//! Flex container configuration.

use serde::{Deserialize, Serialize};

/// Main axis direction of a flex container.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlexDirection {
    Row,
    #[default]
    Column,
}

/// Distribution of free space along the main axis.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum JustifyContent {
    #[default]
    Start,
    Center,
    End,
    SpaceBetween,
    SpaceAround,
    SpaceEvenly,
}

impl JustifyContent {
    /// Whether the container fills the available main size instead of
    /// shrink-wrapping its children.
    pub fn fills_main_axis(&self) -> bool {
        !matches!(self, JustifyContent::Start)
    }
}

/// Placement of children along the cross axis.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CrossAlign {
    #[default]
    Start,
    Center,
    End,
    Stretch,
}

/// Flex layout parameters for a container.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlexConfig {
    /// Main axis for `Container` and `ForEach`.
    pub direction: FlexDirection,
    /// Space between adjacent in-flow children.
    pub gap: f32,
    /// Main axis distribution.
    pub justify_content: JustifyContent,
    /// Cross axis alignment.
    pub cross_axis: CrossAlign,
    /// Wrap flag. Parsed and carried; lines are never broken.
    pub wrap: bool,
}

impl FlexConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_direction(mut self, direction: FlexDirection) -> Self {
        self.direction = direction;
        self
    }

    pub fn with_gap(mut self, gap: f32) -> Self {
        self.gap = gap;
        self
    }

    pub fn with_justify(mut self, justify: JustifyContent) -> Self {
        self.justify_content = justify;
        self
    }

    pub fn with_cross_axis(mut self, align: CrossAlign) -> Self {
        self.cross_axis = align;
        self
    }
}
