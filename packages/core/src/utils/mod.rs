//! Utility functions for DocNode Core
//!
//! This module provides common utility functions used across the codebase.

mod url;

pub use url::{is_image_url, normalize_url, sanitize_url};
