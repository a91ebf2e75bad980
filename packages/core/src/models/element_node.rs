//! Structural Element Nodes
//!
//! Root, paragraph, quote, heading, list and list-item payloads. Their JSON
//! shape follows the hosting editor's own element records so exported state
//! can be re-imported there unchanged.

use crate::html::{HtmlElement, HtmlNode};
use crate::models::node::default_version;
use crate::models::{Node, ValidationError};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

/// Text direction of an element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Ltr,
    Rtl,
}

impl Direction {
    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Ltr => "ltr",
            Direction::Rtl => "rtl",
        }
    }
}

/// Shared element payload: ordered children plus block formatting
///
/// `children` is never read by serde; the registry decodes children one by
/// one so unknown child types fail closed instead of being dropped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementNode {
    #[serde(default, skip_deserializing)]
    pub children: Vec<Node>,

    #[serde(default)]
    pub direction: Option<Direction>,

    /// Block alignment ("", "left", "center", "right", "justify", ...)
    #[serde(default)]
    pub format: String,

    #[serde(default)]
    pub indent: u32,

    #[serde(default = "default_version")]
    pub version: u32,

    /// Fields this version does not know about, preserved verbatim
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Default for ElementNode {
    fn default() -> Self {
        Self {
            children: Vec::new(),
            direction: None,
            format: String::new(),
            indent: 0,
            version: default_version(),
            extra: Map::new(),
        }
    }
}

impl ElementNode {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_children(children: Vec<Node>) -> Self {
        Self {
            children,
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Concatenated child text, block element children separated by a blank line
    pub fn text_content(&self) -> String {
        let mut text = String::new();
        let last = self.children.len().saturating_sub(1);
        for (index, child) in self.children.iter().enumerate() {
            text.push_str(&child.text_content());
            if child.is_element() && !child.is_inline() && index != last {
                text.push_str("\n\n");
            }
        }
        text
    }

    /// Export as `<tag>` with block attributes and exported children
    pub fn export_dom(&self, tag: &str) -> HtmlElement {
        let mut element = HtmlElement::new(tag);
        if let Some(direction) = self.direction {
            element.set_attribute("dir", direction.as_str());
        }
        let mut styles = Vec::new();
        if !self.format.is_empty() {
            styles.push(format!("text-align: {};", self.format));
        }
        if self.indent > 0 {
            styles.push(format!("padding-inline-start: {}px;", self.indent * 40));
        }
        if !styles.is_empty() {
            element.set_attribute("style", styles.join(" "));
        }
        for child in &self.children {
            element.push_child(child.export_dom());
        }
        element
    }

    /// Paragraph export; an empty paragraph keeps its height with a `<br>`
    pub fn export_paragraph_dom(&self) -> HtmlElement {
        let element = self.export_dom("p");
        if self.children.is_empty() {
            element.with_child(HtmlNode::from(HtmlElement::new("br")))
        } else {
            element
        }
    }
}

/// Heading level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HeadingTag {
    H1,
    H2,
    H3,
    H4,
    H5,
    H6,
}

impl HeadingTag {
    pub fn as_str(self) -> &'static str {
        match self {
            HeadingTag::H1 => "h1",
            HeadingTag::H2 => "h2",
            HeadingTag::H3 => "h3",
            HeadingTag::H4 => "h4",
            HeadingTag::H5 => "h5",
            HeadingTag::H6 => "h6",
        }
    }
}

impl FromStr for HeadingTag {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "h1" => Ok(HeadingTag::H1),
            "h2" => Ok(HeadingTag::H2),
            "h3" => Ok(HeadingTag::H3),
            "h4" => Ok(HeadingTag::H4),
            "h5" => Ok(HeadingTag::H5),
            "h6" => Ok(HeadingTag::H6),
            _ => Err(ValidationError::InvalidHeadingTag(s.to_string())),
        }
    }
}

impl fmt::Display for HeadingTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeadingNode {
    pub tag: HeadingTag,

    #[serde(flatten)]
    pub element: ElementNode,
}

impl HeadingNode {
    pub fn new(tag: HeadingTag, children: Vec<Node>) -> Self {
        Self {
            tag,
            element: ElementNode::with_children(children),
        }
    }

    pub fn export_dom(&self) -> HtmlElement {
        self.element.export_dom(self.tag.as_str())
    }
}

/// List flavour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListType {
    #[default]
    Bullet,
    Number,
    Check,
}

impl ListType {
    /// HTML container tag for this list type
    pub fn tag(self) -> &'static str {
        match self {
            ListType::Number => "ol",
            ListType::Bullet | ListType::Check => "ul",
        }
    }
}

fn default_start() -> u32 {
    1
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListNode {
    #[serde(default)]
    pub list_type: ListType,

    #[serde(default = "default_start")]
    pub start: u32,

    #[serde(default)]
    pub tag: String,

    #[serde(flatten)]
    pub element: ElementNode,
}

impl ListNode {
    pub fn new(list_type: ListType) -> Self {
        Self {
            list_type,
            start: default_start(),
            tag: list_type.tag().to_string(),
            element: ElementNode::new(),
        }
    }

    /// List whose items each hold the given inline children
    pub fn with_items(list_type: ListType, items: Vec<Vec<Node>>) -> Self {
        let mut list = Self::new(list_type);
        let start = list.start;
        list.element.children = items
            .into_iter()
            .zip(start..)
            .map(|(children, value)| Node::ListItem(ListItemNode::new(value, children)))
            .collect();
        list
    }

    pub fn export_dom(&self) -> HtmlElement {
        let mut element = self.element.export_dom(self.list_type.tag());
        if self.list_type == ListType::Number && self.start != 1 {
            element.set_attribute("start", self.start.to_string());
        }
        element
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListItemNode {
    #[serde(default = "default_start")]
    pub value: u32,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub checked: Option<bool>,

    #[serde(flatten)]
    pub element: ElementNode,
}

impl ListItemNode {
    pub fn new(value: u32, children: Vec<Node>) -> Self {
        Self {
            value,
            checked: None,
            element: ElementNode::with_children(children),
        }
    }

    pub fn export_dom(&self) -> HtmlElement {
        let mut element = self
            .element
            .export_dom("li")
            .with_attribute("value", self.value.to_string());
        if let Some(checked) = self.checked {
            element.set_attribute("aria-checked", checked.to_string());
        }
        element
    }
}
