//! HTML Import Parser
//!
//! Pasted markup is parsed as a full HTML5 document by `scraper` (html5ever)
//! and the `<body>` content is copied into the [`HtmlNode`] model the import
//! pipeline walks. The tree builder applies the browser recovery rules:
//! implied end tags, misnested formatting, stray end tags and every named
//! and numeric character reference.

use crate::html::dom::{HtmlElement, HtmlNode};
use scraper::{ElementRef, Html, Node};

/// Parse an HTML fragment or document into the nodes of its body
///
/// Parsing never fails; malformed input is repaired the way a browser
/// would repair it, and a truncated tag at the end of input is dropped.
///
/// # Examples
///
/// ```rust
/// use docnode_core::html::parse_html;
///
/// let nodes = parse_html("<p>Caf&eacute; <b>au lait</b></p>");
/// assert_eq!(nodes.len(), 1);
/// assert_eq!(nodes[0].text_content(), "Café au lait");
/// ```
pub fn parse_html(input: &str) -> Vec<HtmlNode> {
    let document = Html::parse_document(input);
    if !document.errors.is_empty() {
        tracing::debug!("Recovered from {} HTML parse errors", document.errors.len());
    }

    let body = document
        .root_element()
        .children()
        .filter_map(ElementRef::wrap)
        .find(|element| element.value().name() == "body");

    match body {
        Some(body) => convert_element(body).children,
        None => {
            tracing::debug!("Parsed HTML has no body (frameset document)");
            Vec::new()
        }
    }
}

fn convert_element(element: ElementRef<'_>) -> HtmlElement {
    let mut converted = HtmlElement::new(element.value().name());
    for (name, value) in element.value().attrs() {
        converted.set_attribute(name, value);
    }

    for child in element.children() {
        match child.value() {
            Node::Text(text) => converted.push_child(HtmlNode::Text(text.to_string())),
            Node::Comment(comment) => {
                converted.push_child(HtmlNode::Comment(comment.to_string()))
            }
            Node::Element(_) => {
                if let Some(child) = ElementRef::wrap(child) {
                    converted.push_child(convert_element(child));
                }
            }
            _ => {}
        }
    }
    converted
}
