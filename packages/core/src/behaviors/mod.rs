//! Node Behavior System
//!
//! This module provides the registry that turns serialized records back into
//! typed nodes:
//!
//! - `NodeRegistry` - Dynamic variant lookup and registration
//! - `default_registry()` - Process-wide registry with every built-in variant
//! - `CodecError` / `RegistryError` - Decode, encode and registration failures
//!
//! Unknown record types fail closed: they are reported as errors rather than
//! silently dropped.

mod error;
mod registry;

pub use error::{CodecError, RegistryError};
pub use registry::{default_registry, DecodeFn, DefaultFactory, NodeRegistry};
