//! Emoji Node
//!
//! A single glyph kept as one atomic token so caret movement and deletion
//! never leave half of a multi-codepoint sequence behind.

use crate::html::HtmlElement;
use crate::models::node::default_version;
use crate::models::ValidationError;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Glyph used when an emoji node is created without one
pub const DEFAULT_EMOJI: &str = "😊";

/// Longest accepted glyph, in chars; long ZWJ family sequences fit
const MAX_GLYPH_CHARS: usize = 16;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmojiNode {
    pub emoji: String,

    #[serde(default = "default_version")]
    pub version: u32,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Default for EmojiNode {
    fn default() -> Self {
        Self {
            emoji: DEFAULT_EMOJI.to_string(),
            version: default_version(),
            extra: Map::new(),
        }
    }
}

impl EmojiNode {
    /// Create an emoji node from a single glyph
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::InvalidGlyph` if the glyph is empty, contains
    /// whitespace or control characters, or is too long to be one grapheme.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use docnode_core::models::EmojiNode;
    ///
    /// assert!(EmojiNode::new("🎉").is_ok());
    /// assert!(EmojiNode::new("").is_err());
    /// assert!(EmojiNode::new("🎉 🎉").is_err());
    /// ```
    pub fn new(glyph: impl Into<String>) -> Result<Self, ValidationError> {
        let emoji = glyph.into();
        validate_glyph(&emoji)?;
        Ok(Self {
            emoji,
            ..Self::default()
        })
    }

    pub fn export_dom(&self) -> HtmlElement {
        HtmlElement::new("span")
            .with_attribute("class", "emoji-inline")
            .with_attribute("aria-hidden", "true")
            .with_text(self.emoji.clone())
    }
}

pub(crate) fn validate_glyph(glyph: &str) -> Result<(), ValidationError> {
    if glyph.is_empty() {
        return Err(ValidationError::InvalidGlyph(
            "glyph cannot be empty".to_string(),
        ));
    }
    if glyph.chars().any(|c| c.is_whitespace() || c.is_control()) {
        return Err(ValidationError::InvalidGlyph(format!(
            "glyph '{}' contains whitespace or control characters",
            glyph
        )));
    }
    if glyph.chars().count() > MAX_GLYPH_CHARS {
        return Err(ValidationError::InvalidGlyph(format!(
            "glyph '{}' is longer than a single grapheme",
            glyph
        )));
    }
    Ok(())
}
