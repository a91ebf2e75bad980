//! Type-Safe Poll Node
//!
//! The only custom node whose payload changes after insertion: every vote
//! increments one option's counter in place. Option order is preserved and
//! labels are not required to be unique.
//!
//! # Examples
//!
//! ```rust
//! use docnode_core::models::PollNode;
//!
//! let mut poll = PollNode::builder("Ship it?")
//!     .option("Yes")
//!     .option("No")
//!     .build();
//!
//! poll.cast_vote(0).unwrap();
//! assert_eq!(poll.options[0].votes, 1);
//! assert!(poll.cast_vote(2).is_err());
//! ```

use crate::html::HtmlElement;
use crate::models::node::default_version;
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use thiserror::Error;

/// Attribute carrying the poll payload in exported HTML
pub const POLL_ATTRIBUTE: &str = "data-lexical-poll";

/// Question used when a poll is created without one
pub const DEFAULT_POLL_QUESTION: &str = "Poll?";

/// Options used when a poll is created without any
pub const DEFAULT_POLL_OPTIONS: [&str; 2] = ["Yes", "No"];

/// Errors for poll mutations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PollError {
    #[error("Option index {index} is out of range for a poll with {len} options")]
    IndexOutOfRange { index: usize, len: usize },
}

/// One answer and its tally
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PollOption {
    pub label: String,

    #[serde(default)]
    pub votes: u64,
}

impl PollOption {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            votes: 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PollNode {
    #[serde(default)]
    pub question: String,

    #[serde(default)]
    pub options: Vec<PollOption>,

    #[serde(default = "default_version")]
    pub version: u32,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Default for PollNode {
    fn default() -> Self {
        DEFAULT_POLL_OPTIONS
            .iter()
            .fold(PollNode::builder(DEFAULT_POLL_QUESTION), |builder, label| {
                builder.option(*label)
            })
            .build()
    }
}

impl PollNode {
    /// Create a builder for a poll with the given question
    pub fn builder(question: impl Into<String>) -> PollNodeBuilder {
        PollNodeBuilder {
            question: question.into(),
            options: Vec::new(),
        }
    }

    /// Record one vote for the option at `index`
    ///
    /// # Errors
    ///
    /// Returns `PollError::IndexOutOfRange` and leaves every tally untouched
    /// when `index` does not name an option.
    pub fn cast_vote(&mut self, index: usize) -> Result<(), PollError> {
        let len = self.options.len();
        let option = self
            .options
            .get_mut(index)
            .ok_or(PollError::IndexOutOfRange { index, len })?;
        option.votes = option.votes.saturating_add(1);
        Ok(())
    }

    pub fn set_question(&mut self, question: impl Into<String>) {
        self.question = question.into();
    }

    /// Replace all options, tallies included
    pub fn set_options(&mut self, options: Vec<PollOption>) {
        self.options = options;
    }

    /// Append a new option with no votes
    pub fn add_option(&mut self, label: impl Into<String>) {
        self.options.push(PollOption::new(label));
    }

    pub fn total_votes(&self) -> u64 {
        self.options.iter().map(|option| option.votes).sum()
    }

    /// Payload embedded in the exported `data-lexical-poll` attribute
    pub fn dom_payload(&self) -> Value {
        json!({
            "question": self.question,
            "options": self.options,
        })
    }

    pub fn export_dom(&self) -> HtmlElement {
        let list = self
            .options
            .iter()
            .fold(HtmlElement::new("ul"), |list, option| {
                list.with_child(
                    HtmlElement::new("li").with_text(option.label.clone()).with_child(
                        HtmlElement::new("span")
                            .with_attribute("class", "poll-votes")
                            .with_text(option.votes.to_string()),
                    ),
                )
            });

        HtmlElement::new("div")
            .with_attribute("class", "poll-node")
            .with_attribute(POLL_ATTRIBUTE, self.dom_payload().to_string())
            .with_child(HtmlElement::new("strong").with_text(self.question.clone()))
            .with_child(list)
    }
}

/// Builder for creating new PollNode instances
pub struct PollNodeBuilder {
    question: String,
    options: Vec<PollOption>,
}

impl PollNodeBuilder {
    /// Add an option with zero votes
    pub fn option(mut self, label: impl Into<String>) -> Self {
        self.options.push(PollOption::new(label));
        self
    }

    /// Add several options with zero votes
    pub fn options<I, S>(mut self, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.options.extend(labels.into_iter().map(PollOption::new));
        self
    }

    pub fn build(self) -> PollNode {
        PollNode {
            question: self.question,
            options: self.options,
            version: default_version(),
            extra: Map::new(),
        }
    }
}
