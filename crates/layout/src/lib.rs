//! Layout engine for declarative component trees.
//!
//! This crate sizes and places components with a flexbox-like model. Each
//! component kind is laid out by a trait looked up in a [`LayoutRegistry`];
//! the built-in traits cover flex lines, centering, modals, tabs and leaf
//! controls.

pub mod axis;
pub mod center;
pub mod component;
pub mod config;
pub mod constraints;
pub mod context;
pub mod dimension;
pub mod engine;
pub mod flex;
pub mod intrinsic;
pub mod leaf;
pub mod modal;
pub mod peek;
pub mod registry;
pub mod slot;
pub mod tabs;
pub mod tree;

pub use axis::Axis;
pub use component::{Component, ComponentId, ComponentKind, ComputedLayout, DirtyFlags};
pub use config::LayoutConfig;
pub use constraints::Constraints;
pub use context::{LayoutContext, LayoutFailure};
pub use engine::{LayoutEngine, LayoutPass};
pub use intrinsic::TextMeasurer;
pub use peek::peek_natural_size;
pub use registry::{FnLayout, LayoutRegistry, LayoutTrait};
pub use slot::TreeSlot;
pub use tree::ComponentTree;
