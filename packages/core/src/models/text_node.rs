//! Text Runs and Line Breaks
//!
//! A text run carries its inline formatting as a bitmask, exactly as the
//! hosting editor stores it, so `format: 3` means bold + italic.

use crate::html::{HtmlElement, HtmlNode};
use crate::models::node::default_version;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::ops::BitOr;

/// Inline formatting bitmask
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TextFormat(u32);

impl TextFormat {
    pub const NONE: TextFormat = TextFormat(0);
    pub const BOLD: TextFormat = TextFormat(1);
    pub const ITALIC: TextFormat = TextFormat(1 << 1);
    pub const STRIKETHROUGH: TextFormat = TextFormat(1 << 2);
    pub const UNDERLINE: TextFormat = TextFormat(1 << 3);
    pub const CODE: TextFormat = TextFormat(1 << 4);
    pub const SUBSCRIPT: TextFormat = TextFormat(1 << 5);
    pub const SUPERSCRIPT: TextFormat = TextFormat(1 << 6);
    pub const HIGHLIGHT: TextFormat = TextFormat(1 << 7);

    /// Formats paired with the HTML tag each one exports to, outermost first
    pub const TAGS: [(TextFormat, &'static str); 8] = [
        (TextFormat::BOLD, "strong"),
        (TextFormat::ITALIC, "em"),
        (TextFormat::UNDERLINE, "u"),
        (TextFormat::STRIKETHROUGH, "s"),
        (TextFormat::SUBSCRIPT, "sub"),
        (TextFormat::SUPERSCRIPT, "sup"),
        (TextFormat::HIGHLIGHT, "mark"),
        (TextFormat::CODE, "code"),
    ];

    pub const fn from_bits(bits: u32) -> Self {
        Self(bits)
    }

    pub const fn bits(self) -> u32 {
        self.0
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub const fn contains(self, other: TextFormat) -> bool {
        other.0 != 0 && self.0 & other.0 == other.0
    }

    pub const fn with(self, other: TextFormat) -> Self {
        Self(self.0 | other.0)
    }

    pub const fn without(self, other: TextFormat) -> Self {
        Self(self.0 & !other.0)
    }

    /// Format implied by an inline HTML tag, if any
    pub fn from_html_tag(tag: &str) -> Option<Self> {
        match tag {
            "b" | "strong" => Some(TextFormat::BOLD),
            "i" | "em" => Some(TextFormat::ITALIC),
            "u" | "ins" => Some(TextFormat::UNDERLINE),
            "s" | "strike" | "del" => Some(TextFormat::STRIKETHROUGH),
            "code" | "kbd" | "samp" => Some(TextFormat::CODE),
            "sub" => Some(TextFormat::SUBSCRIPT),
            "sup" => Some(TextFormat::SUPERSCRIPT),
            "mark" => Some(TextFormat::HIGHLIGHT),
            _ => None,
        }
    }
}

impl BitOr for TextFormat {
    type Output = TextFormat;

    fn bitor(self, rhs: TextFormat) -> TextFormat {
        self.with(rhs)
    }
}

/// Editing mode of a text run; segmented and token runs behave as one unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextMode {
    #[default]
    Normal,
    Token,
    Segmented,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextNode {
    #[serde(default)]
    pub text: String,

    #[serde(default)]
    pub format: TextFormat,

    #[serde(default)]
    pub detail: u32,

    #[serde(default)]
    pub mode: TextMode,

    #[serde(default)]
    pub style: String,

    #[serde(default = "default_version")]
    pub version: u32,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl TextNode {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            format: TextFormat::NONE,
            detail: 0,
            mode: TextMode::Normal,
            style: String::new(),
            version: default_version(),
            extra: Map::new(),
        }
    }

    pub fn with_format(mut self, format: TextFormat) -> Self {
        self.format = format;
        self
    }

    pub fn has_format(&self, format: TextFormat) -> bool {
        self.format.contains(format)
    }

    /// Text wrapped in one tag per active format
    pub fn export_dom(&self) -> HtmlNode {
        let mut node = HtmlNode::text(self.text.clone());
        for (format, tag) in TextFormat::TAGS.iter().rev() {
            if self.format.contains(*format) {
                node = HtmlElement::new(*tag).with_child(node).into();
            }
        }
        if !self.style.is_empty() {
            node = HtmlElement::new("span")
                .with_attribute("style", self.style.clone())
                .with_child(node)
                .into();
        }
        node
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineBreakNode {
    #[serde(default = "default_version")]
    pub version: u32,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Default for LineBreakNode {
    fn default() -> Self {
        Self {
            version: default_version(),
            extra: Map::new(),
        }
    }
}
