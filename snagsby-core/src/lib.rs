//! Core shared types for the snagsby configuration loader.

#![warn(missing_docs, clippy::pedantic)]

mod registry;
mod sanitize;
mod source_url;

/// Insertion-ordered name-to-handler table.
pub use registry::Registry;
/// Flat environment-safe mapping and the sanitizer producing it.
pub use sanitize::{ConfigMap, RESERVED_KEY, sanitize};
/// Parsed source locator and its parse error.
pub use source_url::{SourceUrl, UrlError};
