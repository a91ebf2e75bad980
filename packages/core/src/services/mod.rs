//! Business Services
//!
//! This module contains the editor session and the pipelines around it:
//!
//! - `Editor` - Transactional session owning one document
//! - `EditorCommand` - Insertion and mutation commands
//! - `export` - JSON, HTML and Markdown artifacts
//! - `import` - JSON, HTML and plain-text classification and conversion

pub mod commands;
pub mod editor;
pub mod error;
pub mod export;
pub mod import;

pub use commands::{CommandOutcome, EditorCommand};
pub use editor::Editor;
pub use error::{EditorError, ImportError};
pub use export::{
    export_html, export_json, export_markdown, ExportFormat, ExportedArtifact,
};
pub use import::{apply_import, dom_to_nodes, import_content, ImportKind, ImportOutcome};
