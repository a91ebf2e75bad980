//! Export Pipeline
//!
//! Turns a document into a downloadable artifact. Artifacts are snapshots:
//! they own their content and keep no link to the live document.
//!
//! - **JSON**: exact structural record of the tree, re-importable
//! - **HTML**: every node supplies its own DOM fragment
//! - **Markdown**: plain-text flattening, one non-blank line per paragraph

use crate::behaviors::{CodecError, NodeRegistry};
use crate::config::EditorConfig;
use crate::models::{EditorState, Node};
use crate::services::EditorError;
use chrono::{DateTime, Utc};
use serde_json::json;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Base name shared by every exported file
const EXPORT_FILE_STEM: &str = "lexical-editor-content";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExportFormat {
    Json,
    Html,
    Markdown,
}

impl ExportFormat {
    pub const ALL: [ExportFormat; 3] = [ExportFormat::Json, ExportFormat::Html, ExportFormat::Markdown];

    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Json => "json",
            ExportFormat::Html => "html",
            ExportFormat::Markdown => "md",
        }
    }

    pub fn file_name(self) -> String {
        format!("{}.{}", EXPORT_FILE_STEM, self.extension())
    }

    pub fn content_type(self) -> &'static str {
        match self {
            ExportFormat::Json => "application/json",
            ExportFormat::Html => "text/html",
            ExportFormat::Markdown => "text/markdown",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportFormat::Json => write!(f, "json"),
            ExportFormat::Html => write!(f, "html"),
            ExportFormat::Markdown => write!(f, "markdown"),
        }
    }
}

impl FromStr for ExportFormat {
    type Err = EditorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(ExportFormat::Json),
            "html" | "htm" => Ok(ExportFormat::Html),
            "markdown" | "md" => Ok(ExportFormat::Markdown),
            _ => Err(EditorError::unknown_export_format(s)),
        }
    }
}

/// An exported document snapshot
#[derive(Debug, Clone, PartialEq)]
pub struct ExportedArtifact {
    pub format: ExportFormat,
    pub content: String,
    pub exported_at: DateTime<Utc>,
}

impl ExportedArtifact {
    pub fn new(format: ExportFormat, content: String) -> Self {
        Self {
            format,
            content,
            exported_at: Utc::now(),
        }
    }

    pub fn file_name(&self) -> String {
        self.format.file_name()
    }

    pub fn content_type(&self) -> &'static str {
        self.format.content_type()
    }

    /// Write the content as UTF-8 to `dir/<file_name>` and return the path
    pub fn write_to_dir(&self, dir: impl AsRef<Path>) -> std::io::Result<PathBuf> {
        let path = dir.as_ref().join(self.file_name());
        std::fs::write(&path, self.content.as_bytes())?;
        tracing::info!(
            "Wrote {} export ({} bytes) to {}",
            self.format,
            self.content.len(),
            path.display()
        );
        Ok(path)
    }
}

/// Snapshot `state` in `format`
pub fn export(
    state: &EditorState,
    registry: &NodeRegistry,
    config: &EditorConfig,
    format: ExportFormat,
) -> Result<ExportedArtifact, CodecError> {
    let content = match format {
        ExportFormat::Json => export_json(state, registry, config)?,
        ExportFormat::Html => export_html(state),
        ExportFormat::Markdown => export_markdown(state, config),
    };
    tracing::debug!("Exported {} ({} bytes)", format, content.len());
    Ok(ExportedArtifact::new(format, content))
}

/// Serialized editor state, `{"root": ...}`
///
/// # Errors
///
/// Returns `CodecError::UnknownVariant` if the tree holds a variant the
/// registry does not know.
pub fn export_json(
    state: &EditorState,
    registry: &NodeRegistry,
    config: &EditorConfig,
) -> Result<String, CodecError> {
    let root = registry.encode(&Node::Root(state.root.clone()))?;
    let document = json!({ "root": root });
    let content = if config.pretty_json {
        serde_json::to_string_pretty(&document)?
    } else {
        serde_json::to_string(&document)?
    };
    Ok(content)
}

/// HTML fragment of the top-level blocks
pub fn export_html(state: &EditorState) -> String {
    state.export_html()
}

/// Flattened text: each non-blank line followed by a blank line
///
/// ```rust
/// use docnode_core::config::EditorConfig;
/// use docnode_core::models::{EditorState, HeadingTag, Node};
/// use docnode_core::services::export_markdown;
///
/// let mut state = EditorState::empty();
/// state.append_block(Node::heading(HeadingTag::H1, vec![Node::text("Title")])).unwrap();
/// state.append_block(Node::paragraph_with_text("Body text")).unwrap();
///
/// assert_eq!(export_markdown(&state, &EditorConfig::default()), "Title\n\nBody text\n\n");
/// ```
pub fn export_markdown(state: &EditorState, config: &EditorConfig) -> String {
    let markdown: String = state
        .text_content()
        .split('\n')
        .filter(|line| !line.trim().is_empty())
        .map(|line| format!("{}\n\n", line))
        .collect();

    if markdown.is_empty() {
        config.empty_markdown_placeholder.clone()
    } else {
        markdown
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::behaviors::default_registry;
    use crate::models::{EquationNode, HeadingTag, PollNode};

    fn sample_state() -> EditorState {
        let mut state = EditorState::empty();
        state
            .append_block(Node::heading(HeadingTag::H1, vec![Node::text("Title")]))
            .unwrap();
        state
            .append_block(Node::paragraph_with_text("Body text"))
            .unwrap();
        state
    }

    #[test]
    fn test_format_metadata() {
        assert_eq!(ExportFormat::Json.file_name(), "lexical-editor-content.json");
        assert_eq!(ExportFormat::Html.file_name(), "lexical-editor-content.html");
        assert_eq!(ExportFormat::Markdown.file_name(), "lexical-editor-content.md");
        assert_eq!(ExportFormat::Markdown.content_type(), "text/markdown");
        assert_eq!("MD".parse::<ExportFormat>(), Ok(ExportFormat::Markdown));
        assert!("pdf".parse::<ExportFormat>().is_err());
    }

    #[test]
    fn test_markdown_flattening() {
        let markdown = export_markdown(&sample_state(), &EditorConfig::default());
        assert_eq!(markdown, "Title\n\nBody text\n\n");
    }

    #[test]
    fn test_markdown_drops_blank_lines() {
        let mut state = EditorState::empty();
        state.append_block(Node::paragraph_with_text("a")).unwrap();
        state.append_block(Node::paragraph(Vec::new())).unwrap();
        state.append_block(Node::paragraph_with_text("   ")).unwrap();
        state.append_block(Node::paragraph_with_text("b")).unwrap();

        assert_eq!(export_markdown(&state, &EditorConfig::default()), "a\n\nb\n\n");
    }

    #[test]
    fn test_markdown_placeholder_for_empty_document() {
        let mut state = EditorState::new();
        state.append_block(Node::Poll(PollNode::default())).unwrap();
        let config = EditorConfig {
            empty_markdown_placeholder: "(nothing)".to_string(),
            ..EditorConfig::default()
        };

        assert_eq!(export_markdown(&state, &config), "(nothing)");
    }

    #[test]
    fn test_json_export_pretty_and_compact() {
        let state = sample_state();
        let pretty = export_json(&state, default_registry(), &EditorConfig::default()).unwrap();
        assert!(pretty.starts_with("{\n  \"root\""));

        let config = EditorConfig {
            pretty_json: false,
            ..EditorConfig::default()
        };
        let compact = export_json(&state, default_registry(), &config).unwrap();
        assert!(!compact.contains('\n'));

        let a: serde_json::Value = serde_json::from_str(&pretty).unwrap();
        let b: serde_json::Value = serde_json::from_str(&compact).unwrap();
        assert_eq!(a, b);
        assert_eq!(a, state.to_json());
    }

    #[test]
    fn test_json_export_refuses_unregistered_variants() {
        let registry = NodeRegistry::new();
        let result = export_json(&sample_state(), &registry, &EditorConfig::default());
        assert!(matches!(result, Err(CodecError::UnknownVariant { .. })));
    }

    #[test]
    fn test_html_export() {
        let mut state = sample_state();
        state
            .append_block(Node::paragraph(vec![Node::Equation(EquationNode::new("x^2"))]))
            .unwrap();

        let html = export_html(&state);
        assert!(html.starts_with("<h1>Title</h1><p>Body text</p>"));
        assert!(html.contains("data-lexical-equation=\"x^2\""));
    }

    #[test]
    fn test_artifact_is_a_snapshot() {
        let mut state = sample_state();
        let artifact = export(
            &state,
            default_registry(),
            &EditorConfig::default(),
            ExportFormat::Markdown,
        )
        .unwrap();
        state.clear();

        assert_eq!(artifact.content, "Title\n\nBody text\n\n");
        assert_eq!(artifact.file_name(), "lexical-editor-content.md");
    }
}
