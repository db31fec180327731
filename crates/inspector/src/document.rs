//! JSON component documents.
//!
//! A document is one node object:
//!
//! ```json
//! {
//!   "kind": "column",
//!   "name": "form",
//!   "style": { "padding": { "top": 8, "right": 8, "bottom": 8, "left": 8 } },
//!   "flex": { "gap": 4, "justify_content": "center" },
//!   "children": [{ "kind": "text", "text": "Hello" }]
//! }
//! ```

use anyhow::{Context, Result};
use layout::{ComponentId, ComponentKind, ComponentTree};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use style::{FlexConfig, Style};

/// One node of a document.
#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NodeSpec {
    pub kind: ComponentKind,
    /// Label shown in reports.
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub style: Option<Style>,
    #[serde(default)]
    pub flex: Option<FlexConfig>,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub children: Vec<NodeSpec>,
}

/// A component tree built from a document.
#[derive(Debug)]
pub struct Document {
    pub tree: ComponentTree,
    /// Names given to components in the document.
    pub names: HashMap<ComponentId, String>,
}

impl Document {
    /// Read and build a document from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        Self::parse(&json).with_context(|| format!("invalid document {}", path.display()))
    }

    /// Build a document from JSON text.
    pub fn parse(json: &str) -> Result<Self> {
        let root: NodeSpec = serde_json::from_str(json)?;
        Self::build(&root)
    }

    /// Build a component tree mirroring `root`.
    pub fn build(root: &NodeSpec) -> Result<Self> {
        let mut document = Self {
            tree: ComponentTree::new(),
            names: HashMap::new(),
        };
        let root_id = document.insert(root);
        document.tree.set_root(root_id);

        let mut pending = vec![(root_id, root)];
        while let Some((parent, node)) = pending.pop() {
            for child in &node.children {
                let id = document.insert(child);
                document.tree.append_child(parent, id)?;
                pending.push((id, child));
            }
        }
        Ok(document)
    }

    fn insert(&mut self, node: &NodeSpec) -> ComponentId {
        let id = match &node.text {
            Some(text) => self.tree.create_text(node.kind, text.clone()),
            None => self.tree.create(node.kind),
        };
        if let Some(style) = &node.style {
            self.tree.set_style(id, style.clone());
        }
        if let Some(flex) = node.flex {
            self.tree.set_flex(id, flex);
        }
        if let Some(name) = &node.name {
            self.names.insert(id, name.clone());
        }
        id
    }

    /// Look a component up by its document name.
    pub fn find(&self, name: &str) -> Option<ComponentId> {
        self.names
            .iter()
            .find(|(_, n)| n.as_str() == name)
            .map(|(id, _)| *id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use style::{Dimension, JustifyContent};

    const FORM: &str = r#"{
        "kind": "column",
        "name": "form",
        "flex": { "gap": 6, "justify_content": "space-between" },
        "style": { "height": { "pixel": 200 } },
        "children": [
            { "kind": "text", "name": "title", "text": "Sign in" },
            { "kind": "input", "style": { "width": { "percent": 50 } } },
            {
                "kind": "row",
                "children": [
                    { "kind": "button", "name": "ok", "text": "OK" },
                    { "kind": "button", "text": "Cancel" }
                ]
            }
        ]
    }"#;

    #[test]
    fn test_parse_document() {
        let document = Document::parse(FORM).unwrap();
        let tree = &document.tree;
        assert_eq!(tree.len(), 6);

        let form = document.find("form").unwrap();
        assert_eq!(tree.root(), Some(form));
        let component = tree.get(form).unwrap();
        assert_eq!(component.kind, ComponentKind::Column);
        assert_eq!(component.flex_config().gap, 6.0);
        assert_eq!(
            component.flex_config().justify_content,
            JustifyContent::SpaceBetween
        );
        assert_eq!(component.style().height, Dimension::Pixel(200.0));

        let children: Vec<_> = tree.children(form).collect();
        assert_eq!(children.len(), 3);
        assert_eq!(children[0], document.find("title").unwrap());
        assert_eq!(tree.get(children[0]).unwrap().text(), "Sign in");
        assert_eq!(tree.get(children[1]).unwrap().style().width, Dimension::Percent(50.0));
    }

    #[test]
    fn test_children_keep_document_order() {
        let document = Document::parse(FORM).unwrap();
        let form = document.find("form").unwrap();
        let row = document.tree.children(form).nth(2).unwrap();
        let first = document.tree.children(row).next().unwrap();
        assert_eq!(Some(first), document.find("ok"));
    }

    #[test]
    fn test_unknown_kind_is_rejected() {
        assert!(Document::parse(r#"{ "kind": "marquee" }"#).is_err());
        assert!(Document::parse(r#"{ "kind": "row", "colour": "red" }"#).is_err());
    }
}
