//! Snagsby loads configuration from remote sources into the environment.
//!
//! A source-list string such as `s3://bucket/config.json,sm://app/secrets`
//! is parsed into sources, each source is fetched and sanitized into a flat
//! string mapping, and the results merge with later-sources-win precedence.
//! The merged mapping can be returned, rendered through a
//! [formatter](formatters), or written into a [`ConfigSink`] such as the
//! process environment.

#![warn(missing_docs, clippy::pedantic)]

pub mod formatters;
mod sink;

use std::env;

use serde_json::Value;

/// Re-export of the source implementations crate.
pub use snagsby_sources as sources;

/// Shared primitives re-exported for convenience.
pub use snagsby_core::{ConfigMap, RESERVED_KEY, Registry, SourceUrl, UrlError, sanitize};
/// Scheme registry and source-list parsing entry points.
pub use snagsby_sources::{
    SourceFactory, SourceRegistry, default_registry, parse_sources, split_sources,
};
/// Source trait and error taxonomy.
pub use snagsby_sources::traits::{ConfigSource, SourceError, SourceResult};
/// Destinations resolved configuration can be written into.
pub use sink::{ConfigSink, ProcessEnv};

/// Environment variable consulted when no source string is supplied.
///
/// Shares its name with [`RESERVED_KEY`], which is why the sanitizer strips
/// it from every payload.
pub const SOURCE_ENV_VAR: &str = "SNAGSBY_SOURCE";

/// Resolves and merges all sources into one mapping.
///
/// With `source` absent the list is read from [`SOURCE_ENV_VAR`], falling
/// back to an empty string. Sources are fetched sequentially in list order
/// and later sources overwrite earlier keys on collision. Individual source
/// failures contribute empty maps, so this function never fails.
pub async fn get(source: Option<&str>) -> ConfigMap {
    let source = match source {
        Some(source) => source.to_owned(),
        None => env::var(SOURCE_ENV_VAR).unwrap_or_default(),
    };

    let registry = default_registry();
    let mut out = ConfigMap::new();
    for parsed in parse_sources(&source, &registry) {
        out.extend(parsed.data().await);
    }
    out
}

/// Resolves all sources and writes every resulting pair into `dest`.
pub async fn load(source: Option<&str>, dest: &mut dyn ConfigSink) {
    for (key, value) in get(source).await {
        dest.set(&key, &value);
    }
}

/// Sanitizes an in-memory object directly into `dest`.
///
/// Bypasses source resolution entirely; useful for injecting programmatic
/// configuration without a remote fetch.
pub fn load_object(payload: &Value, dest: &mut dyn ConfigSink) {
    for (key, value) in sanitize(payload) {
        dest.set(&key, &value);
    }
}
