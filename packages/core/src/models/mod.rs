//! Data Models
//!
//! This module contains the document data structures:
//!
//! - `Node` - Closed union of every node variant
//! - Structural payloads (element, heading, list, text, line break)
//! - Custom payloads (mention, emoji, equation, drawing, poll, image)
//! - `EditorState` - The document tree owned by an editor session
//!
//! Every payload serializes to the `{type, version, ...}` record shape of the
//! hosting editor and keeps unknown fields for forward compatibility.

mod document;
mod drawing_node;
mod element_node;
mod emoji_node;
mod equation_node;
mod image_node;
mod mention_node;
pub(crate) mod node;
mod poll_node;
mod text_node;

#[cfg(test)]
mod element_node_test;
#[cfg(test)]
mod image_node_test;

pub use document::{EditorState, NodePath};
pub use drawing_node::{DrawingNode, DRAWING_CLASS};
pub use element_node::{
    Direction, ElementNode, HeadingNode, HeadingTag, ListItemNode, ListNode, ListType,
};
pub use emoji_node::{EmojiNode, DEFAULT_EMOJI};
pub(crate) use emoji_node::validate_glyph;
pub use equation_node::{EquationNode, EquationRenderError, EQUATION_ATTRIBUTE};
pub use image_node::{ImageNode, DEFAULT_MAX_WIDTH};
pub use mention_node::{MentionNode, MENTION_ATTRIBUTE};
pub use node::{Node, NodeKind, StructureError, ValidationError, CURRENT_VERSION};
pub use poll_node::{
    PollError, PollNode, PollNodeBuilder, PollOption, DEFAULT_POLL_OPTIONS,
    DEFAULT_POLL_QUESTION, POLL_ATTRIBUTE,
};
pub use text_node::{LineBreakNode, TextFormat, TextMode, TextNode};
