//! Layout error types.

use thiserror::Error;

/// Errors raised while building or laying out a component tree.
///
/// Node identifiers are carried in their debug form so that this crate does not
/// depend on the arena key type of the layout crate.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LayoutError {
    #[error("cyclic component tree: {node} was reached twice")]
    CyclicTree { node: String },

    #[error("layout depth {depth} exceeds the limit of {limit}")]
    DepthLimitExceeded { depth: usize, limit: usize },

    #[error("attaching {child} under {parent} would create a cycle")]
    WouldCycle { parent: String, child: String },

    #[error("unknown component: {0}")]
    UnknownComponent(String),

    #[error("configuration error: {0}")]
    Config(String),
}

pub type LayoutResult<T> = Result<T, LayoutError>;

impl LayoutError {
    pub fn cyclic(node: impl std::fmt::Debug) -> Self {
        Self::CyclicTree {
            node: format!("{:?}", node),
        }
    }

    pub fn would_cycle(parent: impl std::fmt::Debug, child: impl std::fmt::Debug) -> Self {
        Self::WouldCycle {
            parent: format!("{:?}", parent),
            child: format!("{:?}", child),
        }
    }

    pub fn unknown(node: impl std::fmt::Debug) -> Self {
        Self::UnknownComponent(format!("{:?}", node))
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Whether the error invalidates the whole pass rather than one subtree.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::CyclicTree { .. } | Self::Config(_))
    }
}
