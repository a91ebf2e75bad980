//! Drawing Node
//!
//! A freehand drawing saved as an image reference (usually a `data:` URI).
//! The serialized tag is `excalidraw`, matching the drawing tool that
//! produces these nodes.

use crate::html::HtmlElement;
use crate::models::node::default_version;
use crate::utils::sanitize_url;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Class marking a drawing container in exported HTML
pub const DRAWING_CLASS: &str = "excalidraw-node";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrawingNode {
    /// Image data URI or URL; empty only until the first save
    #[serde(default)]
    pub src: String,

    #[serde(default = "default_version")]
    pub version: u32,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Default for DrawingNode {
    fn default() -> Self {
        Self::new("")
    }
}

impl DrawingNode {
    pub fn new(src: impl Into<String>) -> Self {
        Self {
            src: src.into(),
            version: default_version(),
            extra: Map::new(),
        }
    }

    /// False while the drawing has never been saved
    pub fn is_saved(&self) -> bool {
        !self.src.trim().is_empty()
    }

    pub fn set_src(&mut self, src: impl Into<String>) {
        self.src = src.into();
    }

    pub fn export_dom(&self) -> HtmlElement {
        let container = HtmlElement::new("div").with_attribute("class", DRAWING_CLASS);
        if !self.is_saved() {
            return container;
        }
        container.with_child(
            HtmlElement::new("img")
                .with_attribute("src", sanitize_url(&self.src))
                .with_attribute("alt", "drawing"),
        )
    }
}
