//! Common types shared by the style and layout crates.

pub mod geometry;
pub mod error;

pub use geometry::{Point, Size, Rect, EdgeSizes};
pub use error::{LayoutError, LayoutResult};
