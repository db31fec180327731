//! Rendering of computed layouts.

use crate::document::Document;
use common::geometry::Rect;
use layout::tree::PreOrderIterator;
use layout::{ComponentId, LayoutPass};
use serde::Serialize;
use std::fmt::Write;

/// Computed layout of one component.
#[derive(Debug, Serialize)]
pub struct NodeReport {
    pub depth: usize,
    pub kind: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// Border box, absent when the component could not be laid out.
    pub rect: Option<Rect>,
}

/// Result of laying out a document.
#[derive(Debug, Serialize)]
pub struct LayoutReport {
    pub viewport: Rect,
    pub laid_out: usize,
    pub failures: Vec<String>,
    pub nodes: Vec<NodeReport>,
}

impl LayoutReport {
    /// Report the subtree under `start`, or the whole tree.
    pub fn new(
        document: &Document,
        start: Option<ComponentId>,
        viewport: Rect,
        pass: &LayoutPass,
    ) -> Self {
        let tree = &document.tree;
        let nodes = match start {
            Some(start) => PreOrderIterator::from(tree, start),
            None => PreOrderIterator::new(tree),
        };
        let nodes = nodes
            .filter_map(|(id, depth)| {
                let component = tree.get(id)?;
                Some(NodeReport {
                    depth,
                    kind: component.kind.name(),
                    name: document.names.get(&id).cloned(),
                    text: component.text.clone(),
                    rect: tree.bounds(id),
                })
            })
            .collect();
        let failures = pass
            .failures
            .iter()
            .map(|failure| format!("{}: {}", tree.describe(failure.component), failure.error))
            .collect();

        Self {
            viewport,
            laid_out: pass.laid_out,
            failures,
            nodes,
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// One indented line per component.
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        for node in &self.nodes {
            let _ = write!(out, "{:indent$}{}", "", node.kind, indent = node.depth * 2);
            if let Some(name) = &node.name {
                let _ = write!(out, " #{}", name);
            }
            if let Some(text) = &node.text {
                let _ = write!(out, " {:?}", text);
            }
            match node.rect {
                Some(r) => {
                    let _ = writeln!(out, " @ ({}, {}) {}x{}", r.x, r.y, r.width, r.height);
                }
                None => out.push_str(" (not laid out)\n"),
            }
        }
        for failure in &self.failures {
            let _ = writeln!(out, "failed: {}", failure);
        }
        out
    }
}
