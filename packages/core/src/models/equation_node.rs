//! Equation Node
//!
//! Stores TeX source. Rendering is error tolerant: source that fails the
//! structural checks below exports as a visible error placeholder, so one
//! malformed equation never breaks the rest of the document.

use crate::html::HtmlElement;
use crate::models::node::default_version;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::sync::LazyLock;
use thiserror::Error;

/// Attribute carrying the TeX source in exported HTML
pub const EQUATION_ATTRIBUTE: &str = "data-lexical-equation";

static LEFT_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\\left\b").unwrap());
static RIGHT_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\\right\b").unwrap());
static ENVIRONMENT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\\(begin|end)\{([^}]*)\}").unwrap());

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EquationRenderError {
    #[error("Malformed equation source: {reason}")]
    MalformedEquationSource { reason: String },
}

impl EquationRenderError {
    fn malformed(reason: impl Into<String>) -> Self {
        Self::MalformedEquationSource {
            reason: reason.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EquationNode {
    /// TeX source; may be empty
    #[serde(default)]
    pub latex: String,

    #[serde(default = "default_version")]
    pub version: u32,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Default for EquationNode {
    fn default() -> Self {
        Self::new("")
    }
}

impl EquationNode {
    pub fn new(latex: impl Into<String>) -> Self {
        Self {
            latex: latex.into(),
            version: default_version(),
            extra: Map::new(),
        }
    }

    /// Check the source and produce the rendered fragment
    ///
    /// # Errors
    ///
    /// Returns `EquationRenderError::MalformedEquationSource` for unbalanced
    /// braces, unmatched `\left`/`\right` or `\begin`/`\end`, or a dangling
    /// trailing backslash.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use docnode_core::models::EquationNode;
    ///
    /// assert!(EquationNode::new(r"\frac{a}{b}").render().is_ok());
    /// assert!(EquationNode::new(r"\frac{a}{b").render().is_err());
    /// ```
    pub fn render(&self) -> Result<HtmlElement, EquationRenderError> {
        validate_latex(&self.latex)?;
        Ok(HtmlElement::new("span")
            .with_attribute("class", "equation-node")
            .with_attribute(EQUATION_ATTRIBUTE, self.latex.clone())
            .with_text(self.latex.clone()))
    }

    /// Rendered fragment, or an error placeholder when the source is malformed
    pub fn export_dom(&self) -> HtmlElement {
        self.render().unwrap_or_else(|error| {
            tracing::debug!("Rendering equation placeholder: {}", error);
            HtmlElement::new("span")
                .with_attribute("class", "equation-node equation-error")
                .with_attribute(EQUATION_ATTRIBUTE, self.latex.clone())
                .with_attribute("title", error.to_string())
                .with_text(self.latex.clone())
        })
    }
}

fn validate_latex(source: &str) -> Result<(), EquationRenderError> {
    let mut depth: i64 = 0;
    let mut chars = source.chars();
    while let Some(c) = chars.next() {
        match c {
            '\\' => {
                if chars.next().is_none() {
                    return Err(EquationRenderError::malformed("dangling backslash"));
                }
            }
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth < 0 {
                    return Err(EquationRenderError::malformed("unexpected '}'"));
                }
            }
            _ => {}
        }
    }
    if depth > 0 {
        return Err(EquationRenderError::malformed(format!(
            "{} unclosed '{{'",
            depth
        )));
    }

    let lefts = LEFT_RE.find_iter(source).count();
    let rights = RIGHT_RE.find_iter(source).count();
    if lefts != rights {
        return Err(EquationRenderError::malformed(format!(
            "{} \\left but {} \\right",
            lefts, rights
        )));
    }

    let mut environments: Vec<&str> = Vec::new();
    for captures in ENVIRONMENT_RE.captures_iter(source) {
        let name = captures.get(2).map(|m| m.as_str()).unwrap_or_default();
        match captures.get(1).map(|m| m.as_str()) {
            Some("begin") => environments.push(name),
            _ => match environments.pop() {
                Some(open) if open == name => {}
                Some(open) => {
                    return Err(EquationRenderError::malformed(format!(
                        "\\end{{{}}} closes \\begin{{{}}}",
                        name, open
                    )))
                }
                None => {
                    return Err(EquationRenderError::malformed(format!(
                        "\\end{{{}}} without \\begin",
                        name
                    )))
                }
            },
        }
    }
    if let Some(open) = environments.pop() {
        return Err(EquationRenderError::malformed(format!(
            "\\begin{{{}}} is never closed",
            open
        )));
    }

    Ok(())
}
