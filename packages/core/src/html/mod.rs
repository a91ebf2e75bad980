//! HTML Fragment Support
//!
//! - [`HtmlNode`] / [`HtmlElement`] - the DOM fragment every node exports into
//! - [`parse_html`] - html5ever-backed parser used by the import pipeline

mod dom;
mod parser;

pub use dom::{escape_attribute, escape_text, render_fragment, HtmlElement, HtmlNode, VOID_ELEMENTS};
pub use parser::parse_html;
