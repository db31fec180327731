//! Component style values.
//!
//! This crate holds the declarative style data attached to components:
//! dimensions, box edges, positioning and flex container configuration.

pub mod computed;
pub mod dimension;
pub mod flex;

pub use computed::{Position, Style, DEFAULT_STYLE};
pub use dimension::Dimension;
pub use flex::{CrossAlign, FlexConfig, FlexDirection, JustifyContent};
