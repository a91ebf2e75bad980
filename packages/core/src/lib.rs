//! DocNode Core Document Model
//!
//! This crate provides the content-node model, codec and export/import
//! pipelines for a block-based rich-text editor.
//!
//! # Architecture
//!
//! - **Closed node union**: every node variant is a plain payload in [`models::Node`]
//! - **Registry codec**: records decode through a [`behaviors::NodeRegistry`] keyed by type tag
//! - **Transactional session**: [`services::Editor`] commits each update atomically
//! - **Self-describing export**: every node supplies its own JSON record and HTML fragment
//!
//! # Modules
//!
//! - [`models`] - Node variants and the document tree
//! - [`behaviors`] - Variant registry and codec errors
//! - [`html`] - DOM fragment model and lenient HTML parser
//! - [`services`] - Editor session, commands, export and import pipelines
//! - [`utils`] - URL helpers
//! - [`config`] - Runtime configuration

pub mod behaviors;
pub mod config;
pub mod html;
pub mod models;
pub mod services;
pub mod utils;

// Re-export commonly used types
pub use behaviors::*;
pub use config::EditorConfig;
pub use models::*;
pub use services::*;
