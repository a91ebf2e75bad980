/// Configuration for editor sessions and the export/import pipelines
use serde::{Deserialize, Serialize};

/// Largest accepted import payload, in bytes
const DEFAULT_MAX_IMPORT_BYTES: usize = 1_000_000;

/// Markdown export body used when the document has no text
pub const DEFAULT_EMPTY_MARKDOWN_PLACEHOLDER: &str = "No content to export.";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Imports larger than this are rejected before parsing
    pub max_import_bytes: usize,

    /// Indent JSON exports with two spaces
    pub pretty_json: bool,

    /// Markdown export content for documents without text
    pub empty_markdown_placeholder: String,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            max_import_bytes: DEFAULT_MAX_IMPORT_BYTES,
            pretty_json: true,
            empty_markdown_placeholder: DEFAULT_EMPTY_MARKDOWN_PLACEHOLDER.to_string(),
        }
    }
}

impl EditorConfig {
    /// Defaults overridden by `DOCNODE_*` environment variables
    ///
    /// - `DOCNODE_MAX_IMPORT_BYTES`
    /// - `DOCNODE_PRETTY_JSON` (`true`/`false`/`1`/`0`)
    /// - `DOCNODE_EMPTY_MARKDOWN_PLACEHOLDER`
    ///
    /// Unparsable values are ignored with a warning.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(raw) = lookup("DOCNODE_MAX_IMPORT_BYTES") {
            match raw.trim().parse() {
                Ok(bytes) => config.max_import_bytes = bytes,
                Err(_) => tracing::warn!("Ignoring invalid DOCNODE_MAX_IMPORT_BYTES '{}'", raw),
            }
        }

        if let Some(raw) = lookup("DOCNODE_PRETTY_JSON") {
            match raw.trim().to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" => config.pretty_json = true,
                "0" | "false" | "no" => config.pretty_json = false,
                _ => tracing::warn!("Ignoring invalid DOCNODE_PRETTY_JSON '{}'", raw),
            }
        }

        if let Some(placeholder) = lookup("DOCNODE_EMPTY_MARKDOWN_PLACEHOLDER") {
            config.empty_markdown_placeholder = placeholder;
        }

        config
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.max_import_bytes == 0 {
            return Err("max_import_bytes must be greater than 0".to_string());
        }

        if self.empty_markdown_placeholder.trim().is_empty() {
            return Err("empty_markdown_placeholder cannot be empty".to_string());
        }

        Ok(())
    }
}
