//! Import Pipeline
//!
//! Replaces the session document with external content. Input is
//! classified in order:
//!
//! 1. A JSON object with a `root` key is a serialized editor state and
//!    replaces the document wholesale; a decode failure is an error.
//! 2. Text containing both `<` and `>` is HTML. Markup that yields no
//!    content falls back to a single paragraph holding the raw input.
//! 3. Anything else is plain text, one paragraph per line.
//!
//! Every branch runs inside a single [`Editor::update`] transaction.

use crate::behaviors::NodeRegistry;
use crate::html::{parse_html, HtmlElement, HtmlNode};
use crate::models::{
    DrawingNode, EditorState, EmojiNode, EquationNode, ImageNode, LineBreakNode, ListItemNode,
    ListNode, ListType, MentionNode, Node, PollNode, PollOption, TextFormat, TextNode,
    DRAWING_CLASS, EQUATION_ATTRIBUTE, MENTION_ATTRIBUTE, POLL_ATTRIBUTE,
};
use crate::services::{Editor, ImportError};
use crate::utils::{is_image_url, normalize_url};
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;

/// Elements whose content never becomes document content
const SKIPPED_ELEMENTS: &[&str] = &[
    "head", "script", "style", "title", "meta", "link", "template", "noscript",
];

/// Transparent containers that still separate their inline content from
/// the surrounding blocks
const BLOCK_CONTAINERS: &[&str] = &[
    "html", "body", "div", "section", "article", "main", "header", "footer", "nav", "aside",
    "figure", "figcaption", "address", "table", "thead", "tbody", "tfoot", "tr", "td", "th",
    "dl", "dt", "dd", "form", "fieldset", "details", "summary", "hr",
];

/// Which classification branch produced the document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportKind {
    EditorState,
    Html,
    PlainText,
    /// HTML without any importable content, kept as one raw-text paragraph
    RawTextFallback,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportOutcome {
    pub kind: ImportKind,

    /// Number of top-level blocks after the import
    pub blocks: usize,
}

/// Classify `input` and replace the editor's document with it
///
/// # Errors
///
/// - `ImportError::TooLarge` when `input` exceeds `max_import_bytes`
/// - `ImportError::InvalidEditorState` when a serialized state fails to decode;
///   the document is left untouched
pub fn import_content(editor: &mut Editor, input: &str) -> Result<ImportOutcome, ImportError> {
    let limit = editor.config().max_import_bytes;
    if input.len() > limit {
        tracing::warn!("Rejected import of {} bytes (limit {})", input.len(), limit);
        return Err(ImportError::TooLarge {
            size: input.len(),
            limit,
        });
    }

    let registry = Arc::clone(editor.registry());
    let outcome = editor.update(|state| apply_import(state, &registry, input))?;
    tracing::info!(
        "Imported {:?} content into {} blocks",
        outcome.kind,
        outcome.blocks
    );
    Ok(outcome)
}

/// Replace `state` with the content of `input`
pub fn apply_import(
    state: &mut EditorState,
    registry: &NodeRegistry,
    input: &str,
) -> Result<ImportOutcome, ImportError> {
    if let Some(serialized) = editor_state_json(input) {
        *state = EditorState::from_json(&serialized, registry)?;
        return Ok(summarize(ImportKind::EditorState, state));
    }

    if input.contains('<') && input.contains('>') {
        let kind = import_html(state, input);
        return Ok(summarize(kind, state));
    }

    import_plain_text(state, input);
    Ok(summarize(ImportKind::PlainText, state))
}

fn summarize(kind: ImportKind, state: &EditorState) -> ImportOutcome {
    ImportOutcome {
        kind,
        blocks: state.blocks().len(),
    }
}

/// The parsed value when `input` is a JSON object carrying a `root` key
fn editor_state_json(input: &str) -> Option<Value> {
    let trimmed = input.trim_start();
    if !trimmed.starts_with('{') {
        return None;
    }
    match serde_json::from_str::<Value>(trimmed) {
        Ok(value) if value.get("root").is_some() => Some(value),
        Ok(_) => None,
        Err(err) => {
            tracing::debug!("Import input is not JSON: {}", err);
            None
        }
    }
}

fn import_html(state: &mut EditorState, input: &str) -> ImportKind {
    state.clear();

    for node in dom_to_nodes(&parse_html(input)) {
        let text = node.text_content();
        if let Err(err) = state.append_block(node) {
            tracing::debug!("Falling back to plain text for imported node: {}", err);
            if !text.trim().is_empty() {
                push_raw_paragraph(state, &text);
            }
        }
    }

    if state.is_empty() {
        tracing::warn!("HTML import produced no nodes, keeping raw text");
        push_raw_paragraph(state, input);
        return ImportKind::RawTextFallback;
    }
    ImportKind::Html
}

fn import_plain_text(state: &mut EditorState, input: &str) {
    state.clear();

    if input.trim().is_empty() {
        state.root.children.push(Node::paragraph(Vec::new()));
        return;
    }

    for line in input.split('\n') {
        let line = line.strip_suffix('\r').unwrap_or(line);
        state.root.children.push(text_paragraph(line));
    }
}

fn push_raw_paragraph(state: &mut EditorState, text: &str) {
    state.root.children.push(text_paragraph(text));
}

fn text_paragraph(text: &str) -> Node {
    if text.trim().is_empty() {
        Node::paragraph(Vec::new())
    } else {
        Node::paragraph_with_text(text)
    }
}

/// Convert a parsed fragment into top-level nodes
///
/// Runs of inline content at block level are wrapped in paragraphs. Nodes
/// the root cannot hold (a stray `<li>`, say) are returned as-is and left
/// to the caller's fallback.
pub fn dom_to_nodes(dom: &[HtmlNode]) -> Vec<Node> {
    let mut converted = Vec::new();
    convert_all(dom, &Context::default(), &mut converted);
    wrap_inline_runs(converted)
}

#[derive(Debug, Clone, Copy, Default)]
struct Context {
    format: TextFormat,
    preformatted: bool,
}

fn convert_all(nodes: &[HtmlNode], context: &Context, out: &mut Vec<Node>) {
    for node in nodes {
        convert_node(node, context, out);
    }
}

fn convert_node(node: &HtmlNode, context: &Context, out: &mut Vec<Node>) {
    match node {
        HtmlNode::Text(text) => convert_text(text, context, out),
        HtmlNode::Comment(_) => {}
        HtmlNode::Element(element) => convert_element(element, context, out),
    }
}

fn convert_text(text: &str, context: &Context, out: &mut Vec<Node>) {
    if context.preformatted {
        for (index, line) in text.split('\n').enumerate() {
            if index > 0 {
                out.push(Node::LineBreak(LineBreakNode::default()));
            }
            if !line.is_empty() {
                out.push(Node::Text(TextNode::new(line).with_format(context.format)));
            }
        }
        return;
    }

    let collapsed = collapse_whitespace(text);
    if !collapsed.is_empty() {
        out.push(Node::Text(
            TextNode::new(collapsed).with_format(context.format),
        ));
    }
}

fn convert_element(element: &HtmlElement, context: &Context, out: &mut Vec<Node>) {
    let tag = element.tag.as_str();
    if SKIPPED_ELEMENTS.contains(&tag) {
        return;
    }
    if let Some(node) = convert_custom_fragment(element) {
        out.push(node);
        return;
    }

    match tag {
        "p" => out.push(Node::paragraph(inline_children(element, context))),
        "h1" | "h2" | "h3" | "h4" | "h5" | "h6" => match tag.parse() {
            Ok(heading) => out.push(Node::heading(heading, inline_children(element, context))),
            Err(_) => convert_all(&element.children, context, out),
        },
        "blockquote" => out.push(Node::quote(inline_children(element, context))),
        "pre" => {
            let context = Context {
                preformatted: true,
                format: context.format.with(TextFormat::CODE),
            };
            let mut children = Vec::new();
            convert_all(&element.children, &context, &mut children);
            out.push(Node::paragraph(children));
        }
        "ul" | "ol" => out.push(convert_list(element, context)),
        "li" => out.push(convert_list_item(element, context, 1)),
        "br" => out.push(Node::LineBreak(LineBreakNode::default())),
        "img" => out.push(convert_image(element)),
        "a" => match element.attribute("href") {
            Some(href) if is_image_url(href) && element.text_content().trim().is_empty() => {
                out.push(Node::Image(ImageNode::new(normalize_url(href), "")));
            }
            _ => convert_all(&element.children, context, out),
        },
        _ => {
            if let Some(format) = TextFormat::from_html_tag(tag) {
                let context = Context {
                    format: context.format.with(format),
                    ..*context
                };
                convert_all(&element.children, &context, out);
            } else if BLOCK_CONTAINERS.contains(&tag) {
                let mut inner = Vec::new();
                convert_all(&element.children, context, &mut inner);
                out.extend(wrap_inline_runs(inner));
            } else {
                convert_all(&element.children, context, out);
            }
        }
    }
}

/// Recognise the fragments the HTML exporter writes for custom nodes
fn convert_custom_fragment(element: &HtmlElement) -> Option<Node> {
    if element.has_attribute(MENTION_ATTRIBUTE) {
        let label = element.text_content();
        return Some(Node::Mention(MentionNode::new(label.trim())));
    }

    if element.has_class("emoji-inline") {
        let glyph = element.text_content();
        return match EmojiNode::new(glyph.trim()) {
            Ok(emoji) => Some(Node::Emoji(emoji)),
            Err(err) => {
                tracing::debug!("Importing emoji span as text: {}", err);
                Some(Node::text(glyph))
            }
        };
    }

    if let Some(latex) = element.attribute(EQUATION_ATTRIBUTE) {
        return Some(Node::Equation(EquationNode::new(latex)));
    }

    if element.has_class(DRAWING_CLASS) {
        let src = find_descendant(element, "img")
            .and_then(|img| img.attribute("src"))
            .filter(|src| *src != "#")
            .unwrap_or_default();
        return Some(Node::Drawing(DrawingNode::new(src)));
    }

    if let Some(payload) = element.attribute(POLL_ATTRIBUTE) {
        match parse_poll_payload(payload) {
            Ok(poll) => return Some(Node::Poll(poll)),
            Err(err) => tracing::warn!("Ignoring malformed poll payload: {}", err),
        }
    }

    None
}

#[derive(Deserialize)]
struct PollPayload {
    #[serde(default)]
    question: String,
    #[serde(default)]
    options: Vec<PollOption>,
}

fn parse_poll_payload(payload: &str) -> Result<PollNode, serde_json::Error> {
    let payload: PollPayload = serde_json::from_str(payload)?;
    let mut poll = PollNode::builder(payload.question).build();
    poll.set_options(payload.options);
    Ok(poll)
}

fn find_descendant<'a>(element: &'a HtmlElement, tag: &str) -> Option<&'a HtmlElement> {
    element.children.iter().find_map(|child| {
        let child = child.as_element()?;
        if child.tag == tag {
            Some(child)
        } else {
            find_descendant(child, tag)
        }
    })
}

fn convert_image(element: &HtmlElement) -> Node {
    let dimension = |name: &str| {
        element
            .attribute(name)
            .and_then(|value| value.trim().trim_end_matches("px").parse().ok())
            .unwrap_or(0)
    };
    let src = element
        .attribute("src")
        .filter(|src| *src != "#")
        .unwrap_or_default();
    let alt = element.attribute("alt").unwrap_or_default();
    Node::Image(ImageNode::new(normalize_url(src), alt).with_size(dimension("width"), dimension("height")))
}

fn convert_list(element: &HtmlElement, context: &Context) -> Node {
    let list_type = if element.tag == "ol" {
        ListType::Number
    } else if element.children.iter().any(|child| {
        child
            .as_element()
            .is_some_and(|li| li.has_attribute("aria-checked"))
    }) {
        ListType::Check
    } else {
        ListType::Bullet
    };

    let mut list = ListNode::new(list_type);
    if let Some(start) = element.attribute("start").and_then(|s| s.trim().parse().ok()) {
        list.start = start;
    }

    let mut value = list.start;
    let mut loose = Vec::new();
    for child in &element.children {
        match child.as_element() {
            Some(li) if li.tag == "li" => {
                flush_loose_item(&mut list, &mut loose, &mut value);
                list.element
                    .children
                    .push(convert_list_item(li, context, value));
                value += 1;
            }
            _ => convert_node(child, context, &mut loose),
        }
    }
    flush_loose_item(&mut list, &mut loose, &mut value);
    Node::List(list)
}

/// Content sitting directly inside a list becomes its own item
fn flush_loose_item(list: &mut ListNode, loose: &mut Vec<Node>, value: &mut u32) {
    let children = trim_inline_run(std::mem::take(loose));
    if children.is_empty() {
        return;
    }
    let item = fill_container(Node::ListItem(ListItemNode::new(*value, Vec::new())), children);
    list.element.children.push(item);
    *value += 1;
}

fn convert_list_item(element: &HtmlElement, context: &Context, value: u32) -> Node {
    let value = element
        .attribute("value")
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(value);
    let mut item = ListItemNode::new(value, Vec::new());
    item.checked = element
        .attribute("aria-checked")
        .map(|checked| checked == "true");
    fill_container(Node::ListItem(item), inline_children(element, context))
}

/// Converted children of an inline container, whitespace trimmed at the edges
fn inline_children(element: &HtmlElement, context: &Context) -> Vec<Node> {
    let mut children = Vec::new();
    convert_all(&element.children, context, &mut children);
    let children = trim_inline_run(children);

    // A lone <br> is how empty blocks are exported
    if matches!(children.as_slice(), [Node::LineBreak(_)]) {
        return Vec::new();
    }
    children
}

/// Append `children` to `container`; a child it cannot hold is replaced by
/// its plain text
fn fill_container(mut container: Node, children: Vec<Node>) -> Node {
    for child in children {
        let text = child.text_content();
        if let Err(err) = container.append_child(child) {
            tracing::debug!("Flattening imported node to text: {}", err);
            if !text.trim().is_empty() {
                if let Err(err) = container.append_child(Node::text(text)) {
                    tracing::warn!("Dropping imported text: {}", err);
                }
            }
        }
    }
    container
}

/// Group consecutive inline nodes into paragraphs; whitespace-only runs vanish
fn wrap_inline_runs(nodes: Vec<Node>) -> Vec<Node> {
    let mut out = Vec::new();
    let mut run = Vec::new();
    for node in nodes {
        if node.is_inline() {
            run.push(node);
        } else {
            flush_run(&mut out, &mut run);
            out.push(fix_inline_container(node));
        }
    }
    flush_run(&mut out, &mut run);
    out
}

fn flush_run(out: &mut Vec<Node>, run: &mut Vec<Node>) {
    let children = trim_inline_run(std::mem::take(run));
    if !children.is_empty() {
        out.push(Node::paragraph(children));
    }
}

/// Paragraph-like nodes were built from raw children; enforce their shape
fn fix_inline_container(node: Node) -> Node {
    match node {
        Node::Paragraph(mut element) => {
            let children = std::mem::take(&mut element.children);
            fill_container(Node::Paragraph(element), children)
        }
        Node::Quote(mut element) => {
            let children = std::mem::take(&mut element.children);
            fill_container(Node::Quote(element), children)
        }
        Node::Heading(mut heading) => {
            let children = std::mem::take(&mut heading.element.children);
            fill_container(Node::Heading(heading), children)
        }
        other => other,
    }
}

/// Trim leading whitespace of the first text run and trailing whitespace of
/// the last, dropping runs that become empty
fn trim_inline_run(mut nodes: Vec<Node>) -> Vec<Node> {
    if let Some(Node::Text(first)) = nodes.first_mut() {
        first.text = first.text.trim_start().to_string();
    }
    if let Some(Node::Text(last)) = nodes.last_mut() {
        last.text = last.text.trim_end().to_string();
    }
    nodes.retain(|node| !matches!(node, Node::Text(text) if text.text.is_empty()));
    nodes
}

fn collapse_whitespace(text: &str) -> String {
    let mut collapsed = String::with_capacity(text.len());
    let mut in_whitespace = false;
    for c in text.chars() {
        if c.is_ascii_whitespace() {
            if !in_whitespace {
                collapsed.push(' ');
            }
            in_whitespace = true;
        } else {
            collapsed.push(c);
            in_whitespace = false;
        }
    }
    collapsed
}

#[cfg(test)]
#[path = "import_test.rs"]
mod import_test;
