//! Per-pass layout state and dispatch.

use crate::component::{ComponentId, DirtyFlags};
use crate::config::LayoutConfig;
use crate::constraints::Constraints;
use crate::intrinsic::{Metrics, TextMeasurer};
use crate::registry::LayoutRegistry;
use crate::tree::ComponentTree;
use common::error::{LayoutError, LayoutResult};
use common::geometry::{Point, Rect};
use tracing::{trace, warn};

/// A subtree that could not be laid out.
#[derive(Clone, Debug, PartialEq)]
pub struct LayoutFailure {
    /// Root of the collapsed subtree.
    pub component: ComponentId,
    /// What went wrong.
    pub error: LayoutError,
}

/// State shared by every layout trait during one pass.
pub struct LayoutContext<'a> {
    /// Tree being laid out.
    pub tree: &'a mut ComponentTree,
    registry: &'a LayoutRegistry,
    measurer: Option<&'a dyn TextMeasurer>,
    config: &'a LayoutConfig,
    viewport: Rect,
    depth: usize,
    laid_out: usize,
    failures: Vec<LayoutFailure>,
}

impl<'a> LayoutContext<'a> {
    pub fn new(
        tree: &'a mut ComponentTree,
        registry: &'a LayoutRegistry,
        config: &'a LayoutConfig,
        viewport: Rect,
    ) -> Self {
        Self {
            tree,
            registry,
            measurer: None,
            config,
            viewport,
            depth: 0,
            laid_out: 0,
            failures: Vec::new(),
        }
    }

    /// Use a text measurer for leaf sizes.
    pub fn with_measurer(mut self, measurer: Option<&'a dyn TextMeasurer>) -> Self {
        self.measurer = measurer;
        self
    }

    /// Start dispatching at a given depth, for passes rooted below the tree root.
    pub fn with_depth(mut self, depth: usize) -> Self {
        self.depth = depth;
        self
    }

    pub fn config(&self) -> &'a LayoutConfig {
        self.config
    }

    /// Region modals are centered in.
    pub fn viewport(&self) -> Rect {
        self.viewport
    }

    pub fn metrics(&self) -> Metrics<'a> {
        Metrics::new(self.measurer, self.config)
    }

    /// Current dispatch depth.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Lay out one component with the trait registered for its kind.
    ///
    /// A failing subtree is collapsed at its origin and recorded; only fatal
    /// errors are returned.
    pub fn dispatch(
        &mut self,
        id: ComponentId,
        constraints: Constraints,
        origin: Point,
    ) -> LayoutResult<()> {
        let (kind, origin) = match self.tree.get(id) {
            Some(c) => (c.kind, c.style().position.absolute_point().unwrap_or(origin)),
            None => return Ok(()),
        };
        let constraints = constraints.sanitized();

        if self.depth >= self.config.max_depth {
            let error = LayoutError::DepthLimitExceeded {
                depth: self.depth + 1,
                limit: self.config.max_depth,
            };
            self.fail(id, origin, error);
            return Ok(());
        }

        let registry = self.registry;
        let layout_trait = match registry.get(kind) {
            Some(t) => t,
            None => {
                warn!(kind = kind.name(), component = ?id, "no layout trait registered");
                return Ok(());
            }
        };

        trace!(component = ?id, kind = layout_trait.name(), depth = self.depth, "dispatch");
        self.depth += 1;
        let result = layout_trait.layout(self, id, constraints, origin);
        self.depth -= 1;

        match result {
            Ok(()) => {
                if let Some(c) = self.tree.get_mut(id) {
                    c.layout.constraints = Some(constraints);
                    c.layout.origin = origin;
                    c.layout.dirty.remove(DirtyFlags::NEEDS_LAYOUT | DirtyFlags::STYLE);
                    c.layout.dirty.insert(DirtyFlags::RENDER);
                }
                self.laid_out += 1;
                Ok(())
            }
            Err(error) if error.is_fatal() => Err(error),
            Err(error) => {
                self.fail(id, origin, error);
                Ok(())
            }
        }
    }

    fn fail(&mut self, id: ComponentId, origin: Point, error: LayoutError) {
        warn!(component = %self.tree.describe(id), %error, "layout failed, subtree collapsed");
        self.tree.zero_subtree(id, origin);
        self.failures.push(LayoutFailure {
            component: id,
            error,
        });
    }

    /// Store the final border box of a component.
    pub fn set_rect(&mut self, id: ComponentId, rect: Rect) {
        if let Some(c) = self.tree.get_mut(id) {
            c.layout.rect = rect;
            c.layout.valid = true;
        }
    }

    /// Number of components laid out and the failures recorded so far.
    pub fn finish(self) -> (usize, Vec<LayoutFailure>) {
        (self.laid_out, self.failures)
    }
}
