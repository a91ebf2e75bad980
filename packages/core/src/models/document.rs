//! Editor State
//!
//! The document tree owned by an editor session. The root is always a
//! [`NodeKind::Root`] element; its children are block nodes.
//!
//! # Examples
//!
//! ```rust
//! use docnode_core::models::{EditorState, Node};
//!
//! let mut state = EditorState::empty();
//! state.append_block(Node::paragraph_with_text("Hello")).unwrap();
//! state.append_block(Node::paragraph_with_text("World")).unwrap();
//!
//! assert_eq!(state.text_content(), "Hello\n\nWorld");
//! assert_eq!(state.to_json()["root"]["type"], "root");
//! ```

use crate::behaviors::{CodecError, NodeRegistry};
use crate::html::{render_fragment, HtmlNode};
use crate::models::{ElementNode, Node, NodeKind, StructureError};
use serde_json::{json, Value};
use std::fmt;

/// Position of a node below the root, one child index per level
///
/// `NodePath(vec![2, 0])` is the first child of the third block.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct NodePath(pub Vec<usize>);

impl NodePath {
    pub fn new(indices: Vec<usize>) -> Self {
        Self(indices)
    }

    /// Path of a top-level block
    pub fn block(index: usize) -> Self {
        Self(vec![index])
    }

    pub fn indices(&self) -> &[usize] {
        &self.0
    }

    pub fn child(&self, index: usize) -> Self {
        let mut indices = self.0.clone();
        indices.push(index);
        Self(indices)
    }
}

impl fmt::Display for NodePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.0.iter().map(|index| index.to_string()).collect();
        write!(f, "/{}", parts.join("/"))
    }
}

impl From<Vec<usize>> for NodePath {
    fn from(indices: Vec<usize>) -> Self {
        Self(indices)
    }
}

/// Whole-document tree
#[derive(Debug, Clone, PartialEq)]
pub struct EditorState {
    pub root: ElementNode,
}

impl Default for EditorState {
    fn default() -> Self {
        Self::new()
    }
}

impl EditorState {
    /// A fresh document: the root holding one empty paragraph
    pub fn new() -> Self {
        Self {
            root: ElementNode::with_children(vec![Node::paragraph(Vec::new())]),
        }
    }

    /// A root with no children at all
    pub fn empty() -> Self {
        Self {
            root: ElementNode::new(),
        }
    }

    pub fn blocks(&self) -> &[Node] {
        &self.root.children
    }

    pub fn is_empty(&self) -> bool {
        self.root.children.is_empty()
    }

    /// Append a top-level block
    ///
    /// # Errors
    ///
    /// Returns `StructureError::InvalidChild` for inline nodes, list items
    /// and nested roots.
    pub fn append_block(&mut self, block: Node) -> Result<(), StructureError> {
        let child = block.kind();
        if !NodeKind::Root.accepts_child(child) {
            return Err(StructureError::InvalidChild {
                parent: NodeKind::Root,
                child,
            });
        }
        self.root.children.push(block);
        Ok(())
    }

    /// Remove every block
    pub fn clear(&mut self) {
        self.root.children.clear();
    }

    pub fn text_content(&self) -> String {
        self.root.text_content()
    }

    pub fn node_at(&self, path: &NodePath) -> Option<&Node> {
        let (first, rest) = path.indices().split_first()?;
        let mut node = self.root.children.get(*first)?;
        for index in rest {
            node = node.children()?.get(*index)?;
        }
        Some(node)
    }

    pub fn node_at_mut(&mut self, path: &NodePath) -> Option<&mut Node> {
        let (first, rest) = path.indices().split_first()?;
        let mut node = self.root.children.get_mut(*first)?;
        for index in rest {
            node = node.children_mut()?.get_mut(*index)?;
        }
        Some(node)
    }

    /// Paths of every node of `kind`, in document order
    pub fn paths_of(&self, kind: NodeKind) -> Vec<NodePath> {
        fn walk(nodes: &[Node], prefix: &NodePath, kind: NodeKind, out: &mut Vec<NodePath>) {
            for (index, node) in nodes.iter().enumerate() {
                let path = prefix.child(index);
                if node.kind() == kind {
                    out.push(path.clone());
                }
                if let Some(children) = node.children() {
                    walk(children, &path, kind, out);
                }
            }
        }

        let mut out = Vec::new();
        walk(&self.root.children, &NodePath::default(), kind, &mut out);
        out
    }

    /// `{"root": {...}}` in the hosting editor's serialized format
    pub fn to_json(&self) -> Value {
        json!({ "root": Node::Root(self.root.clone()) })
    }

    /// Rebuild a state from its serialized form
    ///
    /// # Errors
    ///
    /// - `CodecError::MissingRoot` when `value` has no `root` key
    /// - `CodecError::InvalidRoot` when `root` decodes to another node kind
    /// - any decode error raised for the root or its descendants
    pub fn from_json(value: &Value, registry: &NodeRegistry) -> Result<Self, CodecError> {
        let root = value.get("root").ok_or(CodecError::MissingRoot)?;
        match registry.decode(root)? {
            Node::Root(root) => Ok(Self { root }),
            other => Err(CodecError::InvalidRoot {
                found: other.type_name().to_string(),
            }),
        }
    }

    /// Exported DOM of the top-level blocks
    pub fn export_dom(&self) -> Vec<HtmlNode> {
        self.root
            .children
            .iter()
            .map(|block| block.export_dom())
            .collect()
    }

    pub fn export_html(&self) -> String {
        render_fragment(&self.export_dom())
    }
}
