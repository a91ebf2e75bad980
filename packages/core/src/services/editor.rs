//! Editor Session
//!
//! Owns one document and is the only way to change it. Every mutation runs
//! inside [`Editor::update`]: the closure edits a working copy, and the copy
//! replaces the live state only if the closure returns `Ok`. Each committed
//! update advances [`Editor::revision`] by exactly one.
//!
//! # Examples
//!
//! ```rust
//! use docnode_core::services::{CommandOutcome, Editor, EditorCommand};
//!
//! let mut editor = Editor::default();
//! let outcome = editor
//!     .dispatch(EditorCommand::InsertPoll {
//!         question: "Lunch?".to_string(),
//!         options: vec!["Pizza".to_string(), "Sushi".to_string()],
//!     })
//!     .unwrap();
//!
//! let path = outcome.inserted_path().unwrap().clone();
//! assert_eq!(editor.cast_vote(&path, 1).unwrap(), 1);
//! assert!(editor.cast_vote(&path, 7).is_err());
//! assert_eq!(editor.revision(), 2);
//! ```

use crate::behaviors::{default_registry, NodeRegistry};
use crate::config::EditorConfig;
use crate::models::{
    DrawingNode, EditorState, EmojiNode, EquationNode, MentionNode, Node, NodeKind, NodePath,
    PollNode,
};
use crate::services::export::{self, ExportFormat, ExportedArtifact};
use crate::services::import::{self, ImportOutcome};
use crate::services::{CommandOutcome, EditorCommand, EditorError};
use std::sync::Arc;

#[derive(Debug)]
pub struct Editor {
    state: EditorState,
    registry: Arc<NodeRegistry>,
    config: EditorConfig,
    revision: u64,
}

impl Default for Editor {
    fn default() -> Self {
        Self::new(EditorConfig::default())
    }
}

impl Editor {
    /// Session over a fresh document using the built-in variants
    pub fn new(config: EditorConfig) -> Self {
        Self::with_registry(config, Arc::new(default_registry().clone()))
    }

    /// Session decoding records through a caller-supplied registry
    pub fn with_registry(config: EditorConfig, registry: Arc<NodeRegistry>) -> Self {
        Self {
            state: EditorState::new(),
            registry,
            config,
            revision: 0,
        }
    }

    pub fn state(&self) -> &EditorState {
        &self.state
    }

    pub fn registry(&self) -> &Arc<NodeRegistry> {
        &self.registry
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    /// Number of committed updates
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Read-only access to the current document
    pub fn read<R>(&self, f: impl FnOnce(&EditorState) -> R) -> R {
        f(&self.state)
    }

    /// Run `f` as one transaction
    ///
    /// Nested edits inside `f` commit together. On `Err` the live state and
    /// the revision are left exactly as they were.
    pub fn update<T, E>(
        &mut self,
        f: impl FnOnce(&mut EditorState) -> Result<T, E>,
    ) -> Result<T, E>
    where
        E: std::fmt::Display,
    {
        let mut working = self.state.clone();
        match f(&mut working) {
            Ok(value) => {
                self.state = working;
                self.revision += 1;
                tracing::debug!("Committed editor revision {}", self.revision);
                Ok(value)
            }
            Err(err) => {
                tracing::debug!("Rejected editor update: {}", err);
                Err(err)
            }
        }
    }

    pub fn dispatch(&mut self, command: EditorCommand) -> Result<CommandOutcome, EditorError> {
        tracing::debug!("Dispatching '{}'", command.name());
        match command {
            EditorCommand::InsertMention { mention } => {
                let nodes = vec![Node::Mention(MentionNode::new(mention)), Node::text(" ")];
                self.insert_inline(nodes).map(CommandOutcome::Inserted)
            }
            EditorCommand::InsertEmoji { glyph } => {
                let emoji = EmojiNode::new(glyph)?;
                self.insert_inline(vec![Node::Emoji(emoji)])
                    .map(CommandOutcome::Inserted)
            }
            EditorCommand::InsertEquation { latex } => self
                .insert_inline(vec![Node::Equation(EquationNode::new(latex))])
                .map(CommandOutcome::Inserted),
            EditorCommand::InsertImage(image) => self
                .insert_inline(vec![Node::Image(image)])
                .map(CommandOutcome::Inserted),
            EditorCommand::InsertDrawing { src } => self
                .insert_block(Node::Drawing(DrawingNode::new(src)))
                .map(CommandOutcome::Inserted),
            EditorCommand::InsertPoll { question, options } => {
                let poll = PollNode::builder(question).options(options).build();
                self.insert_block(Node::Poll(poll))
                    .map(CommandOutcome::Inserted)
            }
            EditorCommand::CastVote { path, option_index } => {
                let votes = self.cast_vote(&path, option_index)?;
                Ok(CommandOutcome::VoteCast { path, votes })
            }
            EditorCommand::Clear => {
                self.clear()?;
                Ok(CommandOutcome::Cleared)
            }
        }
    }

    /// Record one vote on the poll at `path` and return the option's new tally
    ///
    /// # Errors
    ///
    /// - `EditorError::NodeNotFound` if nothing lives at `path`
    /// - `EditorError::UnexpectedNodeType` if the node is not a poll
    /// - `EditorError::Poll` if `option_index` is out of range
    pub fn cast_vote(&mut self, path: &NodePath, option_index: usize) -> Result<u64, EditorError> {
        let votes = self.update(|state| {
            let node = state
                .node_at_mut(path)
                .ok_or_else(|| EditorError::node_not_found(path.clone()))?;
            let actual = node.kind();
            let poll = node.as_poll_mut().ok_or_else(|| {
                EditorError::unexpected_node_type(path.clone(), NodeKind::Poll, actual)
            })?;
            poll.cast_vote(option_index)?;
            Ok::<_, EditorError>(
                poll.options
                    .get(option_index)
                    .map(|option| option.votes)
                    .unwrap_or_default(),
            )
        })?;
        tracing::info!(
            "Vote cast on poll at {} option {} ({} votes)",
            path,
            option_index,
            votes
        );
        Ok(votes)
    }

    /// Reset the document to a single empty paragraph
    pub fn clear(&mut self) -> Result<(), EditorError> {
        self.update(|state| {
            state.clear();
            state.append_block(Node::paragraph(Vec::new()))?;
            Ok::<_, EditorError>(())
        })
    }

    /// Plain text of the whole document, as copied to the clipboard
    pub fn text_content(&self) -> String {
        self.state.text_content()
    }

    /// Snapshot the document in `format`
    pub fn export(&self, format: ExportFormat) -> Result<ExportedArtifact, EditorError> {
        Ok(export::export(
            &self.state,
            &self.registry,
            &self.config,
            format,
        )?)
    }

    /// Replace the document with imported content
    pub fn import(&mut self, input: &str) -> Result<ImportOutcome, EditorError> {
        Ok(import::import_content(self, input)?)
    }

    /// Append inline nodes to the trailing paragraph, creating it if needed;
    /// returns the path of the first inserted node
    fn insert_inline(&mut self, nodes: Vec<Node>) -> Result<NodePath, EditorError> {
        self.update(|state| {
            if !matches!(state.blocks().last(), Some(Node::Paragraph(_))) {
                state.append_block(Node::paragraph(Vec::new()))?;
            }
            let block = NodePath::block(state.blocks().len() - 1);
            let paragraph = state
                .node_at_mut(&block)
                .ok_or_else(|| EditorError::node_not_found(block.clone()))?;

            let first = paragraph.children().map_or(0, |children| children.len());
            for node in nodes {
                paragraph.append_child(node)?;
            }
            Ok(block.child(first))
        })
    }

    fn insert_block(&mut self, node: Node) -> Result<NodePath, EditorError> {
        self.update(|state| {
            state.append_block(node)?;
            Ok(NodePath::block(state.blocks().len() - 1))
        })
    }
}
