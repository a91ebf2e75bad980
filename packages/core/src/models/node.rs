//! Content Node Data Structures
//!
//! This module defines the closed [`Node`] union that every document is built
//! from, together with [`NodeKind`], the stable type tag used as the
//! discriminant of serialized records.
//!
//! # Architecture
//!
//! - **Tagged union, no inheritance**: every variant is a plain payload struct
//! - **Stable type tags**: `type` in the JSON record never changes across versions
//! - **Forward compatible**: unknown payload fields survive decode/encode untouched
//!
//! # Examples
//!
//! ```rust
//! use docnode_core::models::{Node, NodeKind, PollNode};
//!
//! let poll = Node::Poll(PollNode::builder("Lunch?").option("Pizza").option("Sushi").build());
//! assert_eq!(poll.kind(), NodeKind::Poll);
//! assert_eq!(poll.type_name(), "poll");
//!
//! let record = serde_json::to_value(&poll).unwrap();
//! assert_eq!(record["type"], "poll");
//! assert_eq!(record["options"][1]["label"], "Sushi");
//! ```

use crate::html::{HtmlElement, HtmlNode};
use crate::models::{
    DrawingNode, ElementNode, EmojiNode, EquationNode, HeadingNode, HeadingTag, ImageNode,
    LineBreakNode, ListItemNode, ListNode, MentionNode, PollNode, TextNode,
};
use serde::{Serialize, Serializer};
use std::fmt;
use thiserror::Error;

/// Schema version written by this crate for every built-in variant
pub const CURRENT_VERSION: u32 = 1;

/// Default version value for serde deserialization (version 1)
pub(crate) fn default_version() -> u32 {
    CURRENT_VERSION
}

/// Validation errors for node construction
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Invalid emoji glyph: {0}")]
    InvalidGlyph(String),

    #[error("Invalid heading tag: {0}")]
    InvalidHeadingTag(String),

    #[error("Invalid node type: {0}")]
    InvalidNodeType(String),
}

/// Errors raised when a node is placed where the tree shape forbids it
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StructureError {
    #[error("'{child}' nodes cannot be appended to '{parent}'")]
    InvalidChild { parent: NodeKind, child: NodeKind },

    #[error("'{kind}' nodes cannot hold children")]
    NotAnElement { kind: NodeKind },
}

/// Stable type tag of every node variant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum NodeKind {
    Root,
    Paragraph,
    Heading,
    Quote,
    List,
    ListItem,
    Text,
    LineBreak,
    Mention,
    Emoji,
    Equation,
    /// Freehand drawing exported as an image (`excalidraw` tag)
    Drawing,
    Poll,
    Image,
}

impl NodeKind {
    /// Every kind, structural variants first
    pub const ALL: [NodeKind; 14] = [
        NodeKind::Root,
        NodeKind::Paragraph,
        NodeKind::Heading,
        NodeKind::Quote,
        NodeKind::List,
        NodeKind::ListItem,
        NodeKind::Text,
        NodeKind::LineBreak,
        NodeKind::Mention,
        NodeKind::Emoji,
        NodeKind::Equation,
        NodeKind::Drawing,
        NodeKind::Poll,
        NodeKind::Image,
    ];

    /// The custom content variants layered on top of the structural set
    pub const CUSTOM: [NodeKind; 6] = [
        NodeKind::Mention,
        NodeKind::Emoji,
        NodeKind::Equation,
        NodeKind::Drawing,
        NodeKind::Poll,
        NodeKind::Image,
    ];

    /// The `type` tag written into serialized records
    pub const fn type_name(self) -> &'static str {
        match self {
            NodeKind::Root => "root",
            NodeKind::Paragraph => "paragraph",
            NodeKind::Heading => "heading",
            NodeKind::Quote => "quote",
            NodeKind::List => "list",
            NodeKind::ListItem => "listitem",
            NodeKind::Text => "text",
            NodeKind::LineBreak => "linebreak",
            NodeKind::Mention => "mention",
            NodeKind::Emoji => "emoji",
            NodeKind::Equation => "equation",
            NodeKind::Drawing => "excalidraw",
            NodeKind::Poll => "poll",
            NodeKind::Image => "image",
        }
    }

    pub fn from_type_name(type_name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.type_name() == type_name)
    }

    pub fn is_custom(self) -> bool {
        Self::CUSTOM.contains(&self)
    }

    /// Inline nodes live inside paragraphs, headings, quotes and list items
    pub fn is_inline(self) -> bool {
        matches!(
            self,
            NodeKind::Text
                | NodeKind::LineBreak
                | NodeKind::Mention
                | NodeKind::Emoji
                | NodeKind::Equation
                | NodeKind::Image
        )
    }

    /// Decorators that stand alone at the top level but may also sit inside
    /// a paragraph, where the hosting editor inserts them at the cursor
    pub fn is_block_decorator(self) -> bool {
        matches!(self, NodeKind::Drawing | NodeKind::Poll)
    }

    /// Element kinds own an ordered list of children
    pub fn is_element(self) -> bool {
        matches!(
            self,
            NodeKind::Root
                | NodeKind::Paragraph
                | NodeKind::Heading
                | NodeKind::Quote
                | NodeKind::List
                | NodeKind::ListItem
        )
    }

    /// Whether a node of kind `child` may be appended to a node of this kind
    pub fn accepts_child(self, child: NodeKind) -> bool {
        match self {
            NodeKind::Root => {
                !child.is_inline() && !matches!(child, NodeKind::Root | NodeKind::ListItem)
            }
            NodeKind::Paragraph | NodeKind::Heading | NodeKind::Quote => {
                child.is_inline() || child.is_block_decorator()
            }
            NodeKind::List => child == NodeKind::ListItem,
            NodeKind::ListItem => {
                child.is_inline() || child.is_block_decorator() || child == NodeKind::List
            }
            _ => false,
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.type_name())
    }
}

/// A single unit of document content
///
/// Structural variants (root, paragraph, heading, quote, list, list item,
/// text, line break) mirror the hosting editor's own node set; the remaining
/// variants are the custom content nodes.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Root(ElementNode),
    Paragraph(ElementNode),
    Heading(HeadingNode),
    Quote(ElementNode),
    List(ListNode),
    ListItem(ListItemNode),
    Text(TextNode),
    LineBreak(LineBreakNode),
    Mention(MentionNode),
    Emoji(EmojiNode),
    Equation(EquationNode),
    Drawing(DrawingNode),
    Poll(PollNode),
    Image(ImageNode),
}

impl Node {
    /// Paragraph holding the given inline children
    pub fn paragraph(children: Vec<Node>) -> Self {
        Node::Paragraph(ElementNode::with_children(children))
    }

    /// Paragraph holding a single unformatted text run
    pub fn paragraph_with_text(text: impl Into<String>) -> Self {
        Node::paragraph(vec![Node::text(text)])
    }

    /// Unformatted text run
    pub fn text(text: impl Into<String>) -> Self {
        Node::Text(TextNode::new(text))
    }

    pub fn heading(tag: HeadingTag, children: Vec<Node>) -> Self {
        Node::Heading(HeadingNode::new(tag, children))
    }

    pub fn quote(children: Vec<Node>) -> Self {
        Node::Quote(ElementNode::with_children(children))
    }

    pub fn kind(&self) -> NodeKind {
        match self {
            Node::Root(_) => NodeKind::Root,
            Node::Paragraph(_) => NodeKind::Paragraph,
            Node::Heading(_) => NodeKind::Heading,
            Node::Quote(_) => NodeKind::Quote,
            Node::List(_) => NodeKind::List,
            Node::ListItem(_) => NodeKind::ListItem,
            Node::Text(_) => NodeKind::Text,
            Node::LineBreak(_) => NodeKind::LineBreak,
            Node::Mention(_) => NodeKind::Mention,
            Node::Emoji(_) => NodeKind::Emoji,
            Node::Equation(_) => NodeKind::Equation,
            Node::Drawing(_) => NodeKind::Drawing,
            Node::Poll(_) => NodeKind::Poll,
            Node::Image(_) => NodeKind::Image,
        }
    }

    pub fn type_name(&self) -> &'static str {
        self.kind().type_name()
    }

    /// Schema version carried by this node's record
    pub fn version(&self) -> u32 {
        match self {
            Node::Root(n) | Node::Paragraph(n) | Node::Quote(n) => n.version,
            Node::Heading(n) => n.element.version,
            Node::List(n) => n.element.version,
            Node::ListItem(n) => n.element.version,
            Node::Text(n) => n.version,
            Node::LineBreak(n) => n.version,
            Node::Mention(n) => n.version,
            Node::Emoji(n) => n.version,
            Node::Equation(n) => n.version,
            Node::Drawing(n) => n.version,
            Node::Poll(n) => n.version,
            Node::Image(n) => n.version,
        }
    }

    pub fn is_inline(&self) -> bool {
        self.kind().is_inline()
    }

    pub fn is_element(&self) -> bool {
        self.kind().is_element()
    }

    /// Element payload shared by every element variant
    pub fn element(&self) -> Option<&ElementNode> {
        match self {
            Node::Root(n) | Node::Paragraph(n) | Node::Quote(n) => Some(n),
            Node::Heading(n) => Some(&n.element),
            Node::List(n) => Some(&n.element),
            Node::ListItem(n) => Some(&n.element),
            _ => None,
        }
    }

    pub fn element_mut(&mut self) -> Option<&mut ElementNode> {
        match self {
            Node::Root(n) | Node::Paragraph(n) | Node::Quote(n) => Some(n),
            Node::Heading(n) => Some(&mut n.element),
            Node::List(n) => Some(&mut n.element),
            Node::ListItem(n) => Some(&mut n.element),
            _ => None,
        }
    }

    pub fn children(&self) -> Option<&[Node]> {
        self.element().map(|element| element.children.as_slice())
    }

    pub fn children_mut(&mut self) -> Option<&mut Vec<Node>> {
        self.element_mut().map(|element| &mut element.children)
    }

    /// Append a child, enforcing the tree shape
    ///
    /// # Errors
    ///
    /// - `StructureError::NotAnElement` when this node cannot hold children
    /// - `StructureError::InvalidChild` when the child kind is not allowed here
    pub fn append_child(&mut self, child: Node) -> Result<(), StructureError> {
        let parent = self.kind();
        if !parent.is_element() {
            return Err(StructureError::NotAnElement { kind: parent });
        }
        if !parent.accepts_child(child.kind()) {
            return Err(StructureError::InvalidChild {
                parent,
                child: child.kind(),
            });
        }
        if let Some(children) = self.children_mut() {
            children.push(child);
        }
        Ok(())
    }

    /// Flattened plain-text content
    ///
    /// Elements concatenate their children and separate block element
    /// children with a blank line. Mentions contribute their label; every
    /// decorator (emoji, equation, drawing, poll, image) contributes nothing.
    pub fn text_content(&self) -> String {
        match self {
            Node::Text(n) => n.text.clone(),
            Node::LineBreak(_) => "\n".to_string(),
            Node::Mention(n) => n.text.clone(),
            Node::Emoji(_)
            | Node::Equation(_)
            | Node::Drawing(_)
            | Node::Poll(_)
            | Node::Image(_) => String::new(),
            Node::Root(n) | Node::Paragraph(n) | Node::Quote(n) => n.text_content(),
            Node::Heading(n) => n.element.text_content(),
            Node::List(n) => n.element.text_content(),
            Node::ListItem(n) => n.element.text_content(),
        }
    }

    /// HTML fragment for this node; every variant owns its own mapping
    pub fn export_dom(&self) -> HtmlNode {
        match self {
            Node::Root(n) => n.export_dom("div").into(),
            Node::Paragraph(n) => n.export_paragraph_dom().into(),
            Node::Heading(n) => n.export_dom().into(),
            Node::Quote(n) => n.export_dom("blockquote").into(),
            Node::List(n) => n.export_dom().into(),
            Node::ListItem(n) => n.export_dom().into(),
            Node::Text(n) => n.export_dom(),
            Node::LineBreak(_) => HtmlElement::new("br").into(),
            Node::Mention(n) => n.export_dom().into(),
            Node::Emoji(n) => n.export_dom().into(),
            Node::Equation(n) => n.export_dom().into(),
            Node::Drawing(n) => n.export_dom().into(),
            Node::Poll(n) => n.export_dom().into(),
            Node::Image(n) => n.export_dom().into(),
        }
    }

    pub fn as_text(&self) -> Option<&TextNode> {
        match self {
            Node::Text(n) => Some(n),
            _ => None,
        }
    }

    pub fn as_mention(&self) -> Option<&MentionNode> {
        match self {
            Node::Mention(n) => Some(n),
            _ => None,
        }
    }

    pub fn as_emoji(&self) -> Option<&EmojiNode> {
        match self {
            Node::Emoji(n) => Some(n),
            _ => None,
        }
    }

    pub fn as_equation(&self) -> Option<&EquationNode> {
        match self {
            Node::Equation(n) => Some(n),
            _ => None,
        }
    }

    pub fn as_drawing(&self) -> Option<&DrawingNode> {
        match self {
            Node::Drawing(n) => Some(n),
            _ => None,
        }
    }

    pub fn as_image(&self) -> Option<&ImageNode> {
        match self {
            Node::Image(n) => Some(n),
            _ => None,
        }
    }

    pub fn as_poll(&self) -> Option<&PollNode> {
        match self {
            Node::Poll(n) => Some(n),
            _ => None,
        }
    }

    pub fn as_poll_mut(&mut self) -> Option<&mut PollNode> {
        match self {
            Node::Poll(n) => Some(n),
            _ => None,
        }
    }
}

/// `{type, ...payload}` record wrapper used for serialization
#[derive(Serialize)]
struct TaggedRecord<'a, T: Serialize> {
    #[serde(rename = "type")]
    type_name: &'static str,
    #[serde(flatten)]
    payload: &'a T,
}

fn tagged<S: Serializer, T: Serialize>(
    serializer: S,
    kind: NodeKind,
    payload: &T,
) -> Result<S::Ok, S::Error> {
    TaggedRecord {
        type_name: kind.type_name(),
        payload,
    }
    .serialize(serializer)
}

impl Serialize for Node {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let kind = self.kind();
        match self {
            Node::Root(n) | Node::Paragraph(n) | Node::Quote(n) => tagged(serializer, kind, n),
            Node::Heading(n) => tagged(serializer, kind, n),
            Node::List(n) => tagged(serializer, kind, n),
            Node::ListItem(n) => tagged(serializer, kind, n),
            Node::Text(n) => tagged(serializer, kind, n),
            Node::LineBreak(n) => tagged(serializer, kind, n),
            Node::Mention(n) => tagged(serializer, kind, n),
            Node::Emoji(n) => tagged(serializer, kind, n),
            Node::Equation(n) => tagged(serializer, kind, n),
            Node::Drawing(n) => tagged(serializer, kind, n),
            Node::Poll(n) => tagged(serializer, kind, n),
            Node::Image(n) => tagged(serializer, kind, n),
        }
    }
}
