//! Mention Node
//!
//! An `@mention` rendered as an atomic text entity: the caret can select it
//! but never split it, and text typed next to it lands in a sibling run.
//!
//! # Examples
//!
//! ```rust
//! use docnode_core::models::MentionNode;
//!
//! let mention = MentionNode::new("Ada Lovelace");
//! assert_eq!(mention.text, "Ada Lovelace");
//! assert!(mention.is_atomic());
//! ```

use crate::html::HtmlElement;
use crate::models::node::default_version;
use crate::models::{TextFormat, TextMode};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Attribute that marks a mention span in exported HTML
pub const MENTION_ATTRIBUTE: &str = "data-lexical-mention";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MentionNode {
    /// Display label of the mentioned entity
    pub mention: String,

    /// Rendered text; mirrors `mention` unless the record says otherwise
    #[serde(default)]
    pub text: String,

    #[serde(default)]
    pub format: TextFormat,

    #[serde(default)]
    pub detail: u32,

    #[serde(default = "segmented")]
    pub mode: TextMode,

    #[serde(default)]
    pub style: String,

    #[serde(default = "default_version")]
    pub version: u32,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

fn segmented() -> TextMode {
    TextMode::Segmented
}

impl MentionNode {
    pub fn new(mention: impl Into<String>) -> Self {
        let mention = mention.into();
        Self {
            text: mention.clone(),
            mention,
            format: TextFormat::NONE,
            detail: 0,
            mode: TextMode::Segmented,
            style: String::new(),
            version: default_version(),
            extra: Map::new(),
        }
    }

    /// Restore the text/label mirror after decoding a record without `text`
    pub(crate) fn normalized(mut self) -> Self {
        if self.text.is_empty() {
            self.text = self.mention.clone();
        }
        self
    }

    /// Rename the mentioned entity; the rendered text follows the label
    pub fn set_mention(&mut self, mention: impl Into<String>) {
        self.mention = mention.into();
        self.text = self.mention.clone();
    }

    /// Mentions are single entities: selection covers the whole label
    pub fn is_atomic(&self) -> bool {
        true
    }

    pub fn can_insert_text_before(&self) -> bool {
        false
    }

    pub fn can_insert_text_after(&self) -> bool {
        false
    }

    pub fn export_dom(&self) -> HtmlElement {
        HtmlElement::new("span")
            .with_attribute(MENTION_ATTRIBUTE, "true")
            .with_attribute("class", "editor-mention")
            .with_text(self.text.clone())
    }
}
