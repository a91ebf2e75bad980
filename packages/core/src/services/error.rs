//! Service Layer Error Types
//!
//! This module defines error types for editor-session operations and the
//! import pipeline, chaining the lower-level model and codec errors.

use crate::behaviors::CodecError;
use crate::models::{NodeKind, NodePath, PollError, StructureError, ValidationError};
use thiserror::Error;

/// Editor session errors
///
/// Every failure is surfaced to the caller; a failing transaction leaves the
/// document untouched.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EditorError {
    /// No node at the given path
    #[error("Node not found at {path}")]
    NodeNotFound { path: NodePath },

    /// The node at the given path has a different variant
    #[error("Expected '{expected}' node at {path}, found '{actual}'")]
    UnexpectedNodeType {
        path: NodePath,
        expected: NodeKind,
        actual: NodeKind,
    },

    /// Poll mutation rejected
    #[error("Poll update failed: {0}")]
    Poll(#[from] PollError),

    /// Node construction input rejected
    #[error("Node validation failed: {0}")]
    Validation(#[from] ValidationError),

    /// Tree shape violated
    #[error("Invalid document structure: {0}")]
    Structure(#[from] StructureError),

    /// Record encode/decode failed
    #[error("Codec error: {0}")]
    Codec(#[from] CodecError),

    /// Import rejected
    #[error("Import failed: {0}")]
    Import(#[from] ImportError),

    /// Export format name not recognised
    #[error("Unknown export format: {0}")]
    UnknownExportFormat(String),
}

impl EditorError {
    /// Create a node not found error
    pub fn node_not_found(path: impl Into<NodePath>) -> Self {
        Self::NodeNotFound { path: path.into() }
    }

    /// Create an unexpected node type error
    pub fn unexpected_node_type(
        path: impl Into<NodePath>,
        expected: NodeKind,
        actual: NodeKind,
    ) -> Self {
        Self::UnexpectedNodeType {
            path: path.into(),
            expected,
            actual,
        }
    }

    /// Create an unknown export format error
    pub fn unknown_export_format(name: impl Into<String>) -> Self {
        Self::UnknownExportFormat(name.into())
    }
}

/// Import pipeline errors
///
/// HTML parse failures are not errors: they fall back to a raw-text
/// paragraph.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ImportError {
    /// Input exceeds the configured size limit
    #[error("Import of {size} bytes exceeds the {limit} byte limit")]
    TooLarge { size: usize, limit: usize },

    /// Input looked like a serialized editor state but did not decode
    #[error("Invalid editor state: {0}")]
    InvalidEditorState(#[from] CodecError),
}
