//! Hand-off of rebuilt component trees between threads.

use crate::tree::ComponentTree;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::debug;

/// Holds the latest tree published by a producer until the layout side takes it.
///
/// Publishing replaces any tree that was not taken yet; only the newest one
/// is ever laid out.
#[derive(Debug, Default)]
pub struct TreeSlot {
    pending: Mutex<Option<ComponentTree>>,
    generation: AtomicU64,
}

impl TreeSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Publish a replacement tree and return its generation number.
    pub fn publish(&self, tree: ComponentTree) -> u64 {
        let mut pending = self.pending.lock();
        let replaced = pending.replace(tree).is_some();
        let generation = self.generation.fetch_add(1, Ordering::AcqRel) + 1;
        debug!(generation, replaced, "component tree published");
        generation
    }

    /// Take the pending tree, if any.
    pub fn take(&self) -> Option<ComponentTree> {
        self.pending.lock().take()
    }

    pub fn has_pending(&self) -> bool {
        self.pending.lock().is_some()
    }

    /// Number of trees published so far.
    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::Acquire)
    }
}
