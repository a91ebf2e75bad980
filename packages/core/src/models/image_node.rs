//! Image Node
//!
//! Inline image inserted from a URL or an uploaded file. Zero width or
//! height means the dimension is inherited from the image itself.

use crate::html::HtmlElement;
use crate::models::node::default_version;
use crate::utils::sanitize_url;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Maximum rendered width used when none is given
pub const DEFAULT_MAX_WIDTH: u32 = 500;

fn default_max_width() -> u32 {
    DEFAULT_MAX_WIDTH
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageNode {
    #[serde(default)]
    pub src: String,

    #[serde(default)]
    pub alt_text: String,

    #[serde(default)]
    pub width: u32,

    #[serde(default)]
    pub height: u32,

    #[serde(default = "default_max_width")]
    pub max_width: u32,

    #[serde(default)]
    pub show_caption: bool,

    #[serde(default = "default_version")]
    pub version: u32,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Default for ImageNode {
    fn default() -> Self {
        Self {
            src: String::new(),
            alt_text: String::new(),
            width: 0,
            height: 0,
            max_width: DEFAULT_MAX_WIDTH,
            show_caption: false,
            version: default_version(),
            extra: Map::new(),
        }
    }
}

impl ImageNode {
    pub fn new(src: impl Into<String>, alt_text: impl Into<String>) -> Self {
        Self {
            src: src.into(),
            alt_text: alt_text.into(),
            ..Self::default()
        }
    }

    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn export_dom(&self) -> HtmlElement {
        let mut img = HtmlElement::new("img")
            .with_attribute("src", sanitize_url(&self.src))
            .with_attribute("alt", self.alt_text.clone());
        if self.width > 0 {
            img.set_attribute("width", self.width.to_string());
        }
        if self.height > 0 {
            img.set_attribute("height", self.height.to_string());
        }
        img
    }
}
