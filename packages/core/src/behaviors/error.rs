//! Codec and registry error types

use thiserror::Error;

/// Errors raised while decoding or encoding node records
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    #[error("Node record must be a JSON object")]
    NotAnObject,

    #[error("Node record has no string 'type' field")]
    MissingType,

    #[error("Unknown node type: {type_name}")]
    UnknownVariant { type_name: String },

    #[error("Invalid '{type_name}' record: {reason}")]
    InvalidRecord { type_name: String, reason: String },

    #[error("Editor state root must be a 'root' node, found '{found}'")]
    InvalidRoot { found: String },

    #[error("Editor state has no 'root' key")]
    MissingRoot,

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl CodecError {
    pub fn unknown_variant(type_name: impl Into<String>) -> Self {
        Self::UnknownVariant {
            type_name: type_name.into(),
        }
    }

    pub fn invalid_record(type_name: impl Into<String>, reason: impl ToString) -> Self {
        Self::InvalidRecord {
            type_name: type_name.into(),
            reason: reason.to_string(),
        }
    }
}

impl From<serde_json::Error> for CodecError {
    fn from(err: serde_json::Error) -> Self {
        CodecError::Serialization(err.to_string())
    }
}

/// Errors raised while building a registry
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    #[error("Node type '{type_name}' is already registered")]
    DuplicateVariant { type_name: String },

    #[error("Node type '{type_name}' has no variant in the node model")]
    UnsupportedVariant { type_name: String },
}
