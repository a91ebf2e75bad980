//! Node Variant Registry
//!
//! Maps the `type` tag of a serialized record to the functions that decode
//! it and create a fresh instance of it. Decoding is recursive: element
//! decoders hand each child record back to the registry, so a tree can only
//! contain types the registry knows.
//!
//! ## Example Usage
//!
//! ```rust
//! use docnode_core::behaviors::default_registry;
//! use docnode_core::models::NodeKind;
//! use serde_json::json;
//!
//! let registry = default_registry();
//! let node = registry
//!     .decode(&json!({"type": "emoji", "emoji": "🎉", "version": 1}))
//!     .unwrap();
//! assert_eq!(node.kind(), NodeKind::Emoji);
//!
//! let record = registry.encode(&node).unwrap();
//! assert_eq!(record["emoji"], "🎉");
//! ```

use crate::behaviors::{CodecError, RegistryError};
use crate::models::{
    validate_glyph, DrawingNode, ElementNode, EmojiNode, EquationNode, HeadingNode, HeadingTag,
    ImageNode, LineBreakNode, ListItemNode, ListNode, ListType, MentionNode, Node, NodeKind,
    PollNode, TextNode, CURRENT_VERSION,
};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::sync::LazyLock;

/// Decode a record whose `type` key has already been removed
///
/// The registry is passed back in so element decoders can decode children.
pub type DecodeFn = fn(&NodeRegistry, Map<String, Value>) -> Result<Node, CodecError>;

/// Create a fresh node of one variant
pub type DefaultFactory = fn() -> Node;

#[derive(Clone, Copy)]
struct VariantEntry {
    decode: DecodeFn,
    create_default: DefaultFactory,
}

static DEFAULT_REGISTRY: LazyLock<NodeRegistry> = LazyLock::new(NodeRegistry::with_builtin_variants);

/// The process-wide registry holding every built-in variant
pub fn default_registry() -> &'static NodeRegistry {
    &DEFAULT_REGISTRY
}

/// Registry of decodable node variants, keyed by type tag
#[derive(Clone, Default)]
pub struct NodeRegistry {
    variants: HashMap<String, VariantEntry>,
}

impl std::fmt::Debug for NodeRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NodeRegistry")
            .field("variants", &self.type_names())
            .finish()
    }
}

impl NodeRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding the structural and custom variants
    pub fn with_builtin_variants() -> Self {
        let mut registry = Self::new();
        for (kind, decode, create_default) in BUILTIN_VARIANTS {
            registry.variants.insert(
                kind.type_name().to_string(),
                VariantEntry {
                    decode,
                    create_default,
                },
            );
        }
        registry
    }

    /// Register a decoder for one of the node model's type tags
    ///
    /// Decoded nodes always re-encode under their own kind's tag, so only
    /// tags known to [`NodeKind::from_type_name`] are accepted. This lets a
    /// registry carry a subset of the built-in kinds or swap in a stricter
    /// decoder for one of them.
    ///
    /// # Errors
    ///
    /// - `RegistryError::UnsupportedVariant` for a tag outside the node model
    /// - `RegistryError::DuplicateVariant` if the tag is taken; the existing
    ///   registration is kept
    pub fn register(
        &mut self,
        type_name: impl Into<String>,
        decode: DecodeFn,
        create_default: DefaultFactory,
    ) -> Result<(), RegistryError> {
        let type_name = type_name.into();
        if NodeKind::from_type_name(&type_name).is_none() {
            return Err(RegistryError::UnsupportedVariant { type_name });
        }
        if self.variants.contains_key(&type_name) {
            return Err(RegistryError::DuplicateVariant { type_name });
        }
        tracing::debug!("Registered node variant '{}'", type_name);
        self.variants.insert(
            type_name,
            VariantEntry {
                decode,
                create_default,
            },
        );
        Ok(())
    }

    pub fn contains(&self, type_name: &str) -> bool {
        self.variants.contains_key(type_name)
    }

    /// Registered tags, sorted
    pub fn type_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.variants.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Decode one record (and its descendants)
    ///
    /// # Errors
    ///
    /// - `CodecError::NotAnObject` / `CodecError::MissingType` for malformed records
    /// - `CodecError::UnknownVariant` when the tag is not registered
    /// - `CodecError::InvalidRecord` when the payload does not match its variant
    pub fn decode(&self, record: &Value) -> Result<Node, CodecError> {
        let object = record.as_object().ok_or(CodecError::NotAnObject)?;
        let type_name = object
            .get("type")
            .and_then(Value::as_str)
            .ok_or(CodecError::MissingType)?;
        let entry = self
            .variants
            .get(type_name)
            .ok_or_else(|| CodecError::unknown_variant(type_name))?;

        let mut payload = object.clone();
        payload.remove("type");
        let node = (entry.decode)(self, payload)?;

        if node.version() > CURRENT_VERSION {
            tracing::debug!(
                "Decoded '{}' record with newer version {} (current {})",
                type_name,
                node.version(),
                CURRENT_VERSION
            );
        }
        Ok(node)
    }

    /// Decode each record independently; one failure does not affect the others
    pub fn decode_all(&self, records: &[Value]) -> Vec<Result<Node, CodecError>> {
        records
            .iter()
            .enumerate()
            .map(|(index, record)| {
                self.decode(record).inspect_err(|err| {
                    tracing::warn!("Skipping node record {}: {}", index, err);
                })
            })
            .collect()
    }

    /// Encode a node (and its descendants) into its record
    ///
    /// # Errors
    ///
    /// Returns `CodecError::UnknownVariant` if the node or any descendant is
    /// of a type this registry does not know.
    pub fn encode(&self, node: &Node) -> Result<Value, CodecError> {
        self.ensure_registered(node)?;
        Ok(serde_json::to_value(node)?)
    }

    /// Fresh instance of the variant registered under `type_name`
    pub fn create_default(&self, type_name: &str) -> Result<Node, CodecError> {
        self.variants
            .get(type_name)
            .map(|entry| (entry.create_default)())
            .ok_or_else(|| CodecError::unknown_variant(type_name))
    }

    fn ensure_registered(&self, node: &Node) -> Result<(), CodecError> {
        if !self.contains(node.type_name()) {
            return Err(CodecError::unknown_variant(node.type_name()));
        }
        for child in node.children().unwrap_or_default() {
            self.ensure_registered(child)?;
        }
        Ok(())
    }
}

const BUILTIN_VARIANTS: [(NodeKind, DecodeFn, DefaultFactory); 14] = [
    (NodeKind::Root, decode_root, || Node::Root(ElementNode::new())),
    (NodeKind::Paragraph, decode_paragraph, || {
        Node::paragraph(Vec::new())
    }),
    (NodeKind::Heading, decode_heading, || {
        Node::heading(HeadingTag::H1, Vec::new())
    }),
    (NodeKind::Quote, decode_quote, || Node::quote(Vec::new())),
    (NodeKind::List, decode_list, || {
        Node::List(ListNode::new(ListType::Bullet))
    }),
    (NodeKind::ListItem, decode_list_item, || {
        Node::ListItem(ListItemNode::new(1, Vec::new()))
    }),
    (NodeKind::Text, decode_text, || Node::text("")),
    (NodeKind::LineBreak, decode_line_break, || {
        Node::LineBreak(LineBreakNode::default())
    }),
    (NodeKind::Mention, decode_mention, || {
        Node::Mention(MentionNode::new(""))
    }),
    (NodeKind::Emoji, decode_emoji, || {
        Node::Emoji(EmojiNode::default())
    }),
    (NodeKind::Equation, decode_equation, || {
        Node::Equation(EquationNode::default())
    }),
    (NodeKind::Drawing, decode_drawing, || {
        Node::Drawing(DrawingNode::default())
    }),
    (NodeKind::Poll, decode_poll, || Node::Poll(PollNode::default())),
    (NodeKind::Image, decode_image, || {
        Node::Image(ImageNode::default())
    }),
];

fn decode_payload<T: DeserializeOwned>(
    kind: NodeKind,
    payload: Map<String, Value>,
) -> Result<T, CodecError> {
    serde_json::from_value(Value::Object(payload))
        .map_err(|err| CodecError::invalid_record(kind.type_name(), err))
}

/// Decode the `children` array; a missing or null array means no children
fn decode_children(
    registry: &NodeRegistry,
    kind: NodeKind,
    payload: &mut Map<String, Value>,
) -> Result<Vec<Node>, CodecError> {
    match payload.remove("children") {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(Value::Array(records)) => records
            .iter()
            .map(|record| registry.decode(record))
            .collect(),
        Some(_) => Err(CodecError::invalid_record(
            kind.type_name(),
            "'children' must be an array",
        )),
    }
}

fn decode_element<T: DeserializeOwned>(
    registry: &NodeRegistry,
    kind: NodeKind,
    mut payload: Map<String, Value>,
    wrap: fn(T) -> Node,
) -> Result<Node, CodecError> {
    let children = decode_children(registry, kind, &mut payload)?;
    let mut node = wrap(decode_payload(kind, payload)?);
    for child in children {
        node.append_child(child)
            .map_err(|err| CodecError::invalid_record(kind.type_name(), err))?;
    }
    Ok(node)
}

fn decode_root(registry: &NodeRegistry, payload: Map<String, Value>) -> Result<Node, CodecError> {
    decode_element(registry, NodeKind::Root, payload, Node::Root)
}

fn decode_paragraph(
    registry: &NodeRegistry,
    payload: Map<String, Value>,
) -> Result<Node, CodecError> {
    decode_element(registry, NodeKind::Paragraph, payload, Node::Paragraph)
}

fn decode_heading(
    registry: &NodeRegistry,
    payload: Map<String, Value>,
) -> Result<Node, CodecError> {
    decode_element(registry, NodeKind::Heading, payload, |heading: HeadingNode| {
        Node::Heading(heading)
    })
}

fn decode_quote(registry: &NodeRegistry, payload: Map<String, Value>) -> Result<Node, CodecError> {
    decode_element(registry, NodeKind::Quote, payload, Node::Quote)
}

fn decode_list(registry: &NodeRegistry, payload: Map<String, Value>) -> Result<Node, CodecError> {
    decode_element(registry, NodeKind::List, payload, Node::List)
}

fn decode_list_item(
    registry: &NodeRegistry,
    payload: Map<String, Value>,
) -> Result<Node, CodecError> {
    decode_element(registry, NodeKind::ListItem, payload, Node::ListItem)
}

fn decode_text(_: &NodeRegistry, payload: Map<String, Value>) -> Result<Node, CodecError> {
    decode_payload(NodeKind::Text, payload).map(|text: TextNode| Node::Text(text))
}

fn decode_line_break(_: &NodeRegistry, payload: Map<String, Value>) -> Result<Node, CodecError> {
    decode_payload(NodeKind::LineBreak, payload).map(Node::LineBreak)
}

fn decode_mention(_: &NodeRegistry, payload: Map<String, Value>) -> Result<Node, CodecError> {
    decode_payload(NodeKind::Mention, payload)
        .map(|mention: MentionNode| Node::Mention(mention.normalized()))
}

fn decode_emoji(_: &NodeRegistry, payload: Map<String, Value>) -> Result<Node, CodecError> {
    let emoji: EmojiNode = decode_payload(NodeKind::Emoji, payload)?;
    validate_glyph(&emoji.emoji)
        .map_err(|err| CodecError::invalid_record(NodeKind::Emoji.type_name(), err))?;
    Ok(Node::Emoji(emoji))
}

fn decode_equation(_: &NodeRegistry, payload: Map<String, Value>) -> Result<Node, CodecError> {
    decode_payload(NodeKind::Equation, payload).map(Node::Equation)
}

fn decode_drawing(_: &NodeRegistry, payload: Map<String, Value>) -> Result<Node, CodecError> {
    decode_payload(NodeKind::Drawing, payload).map(Node::Drawing)
}

fn decode_poll(_: &NodeRegistry, payload: Map<String, Value>) -> Result<Node, CodecError> {
    decode_payload(NodeKind::Poll, payload).map(Node::Poll)
}

fn decode_image(_: &NodeRegistry, payload: Map<String, Value>) -> Result<Node, CodecError> {
    decode_payload(NodeKind::Image, payload).map(Node::Image)
}

#[cfg(test)]
#[path = "registry_test.rs"]
mod registry_test;
