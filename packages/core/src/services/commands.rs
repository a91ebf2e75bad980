//! Editor Commands
//!
//! The insertion and mutation commands a toolbar or picker dispatches into an
//! [`Editor`](crate::services::Editor) session.

use crate::models::{ImageNode, NodePath};

#[derive(Debug, Clone, PartialEq)]
pub enum EditorCommand {
    /// Insert a mention followed by a space
    InsertMention { mention: String },

    InsertEmoji { glyph: String },

    InsertEquation { latex: String },

    /// Insert a drawing block; `src` is empty until the drawing is saved
    InsertDrawing { src: String },

    InsertPoll {
        question: String,
        options: Vec<String>,
    },

    InsertImage(ImageNode),

    CastVote { path: NodePath, option_index: usize },

    /// Reset the document to a single empty paragraph
    Clear,
}

impl EditorCommand {
    pub fn name(&self) -> &'static str {
        match self {
            EditorCommand::InsertMention { .. } => "insert-mention",
            EditorCommand::InsertEmoji { .. } => "insert-emoji",
            EditorCommand::InsertEquation { .. } => "insert-equation",
            EditorCommand::InsertDrawing { .. } => "insert-drawing",
            EditorCommand::InsertPoll { .. } => "insert-poll",
            EditorCommand::InsertImage(_) => "insert-image",
            EditorCommand::CastVote { .. } => "cast-vote",
            EditorCommand::Clear => "clear",
        }
    }
}

/// Result of a dispatched command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutcome {
    /// Path of the inserted node
    Inserted(NodePath),

    /// New tally of the voted option
    VoteCast { path: NodePath, votes: u64 },

    Cleared,
}

impl CommandOutcome {
    pub fn inserted_path(&self) -> Option<&NodePath> {
        match self {
            CommandOutcome::Inserted(path) => Some(path),
            _ => None,
        }
    }
}
