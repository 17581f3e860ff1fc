//! Configuration source implementations and the source-list parser.
//!
//! Each module exposes one backend while sharing the trait-based interface
//! defined in [`traits`]. The [`default_registry`] maps URL schemes to
//! constructors and [`parse_sources`] turns a delimiter-separated source-list
//! string into ready-to-fetch sources.

#![warn(missing_docs, clippy::pedantic)]

pub mod file;
pub mod s3;
pub mod secrets_manager;
pub mod ssm;
pub mod traits;

mod aws;

use tracing::debug;

use snagsby_core::{Registry, SourceUrl};

use crate::file::FileSource;
use crate::s3::S3Source;
use crate::secrets_manager::SecretsManagerSource;
use crate::ssm::SsmSource;
use crate::traits::ConfigSource;

/// Constructor registered for a URL scheme.
pub type SourceFactory = fn(SourceUrl) -> Box<dyn ConfigSource>;

/// Registry mapping URL schemes to source constructors.
pub type SourceRegistry = Registry<SourceFactory>;

fn make_s3(url: SourceUrl) -> Box<dyn ConfigSource> {
    Box::new(S3Source::new(url))
}

fn make_secrets_manager(url: SourceUrl) -> Box<dyn ConfigSource> {
    Box::new(SecretsManagerSource::new(url))
}

fn make_ssm(url: SourceUrl) -> Box<dyn ConfigSource> {
    Box::new(SsmSource::new(url))
}

fn make_file(url: SourceUrl) -> Box<dyn ConfigSource> {
    Box::new(FileSource::new(url))
}

/// Builds the default scheme registry: `s3`, `sm`, `ssm`, `file`.
#[must_use]
pub fn default_registry() -> SourceRegistry {
    let mut registry = SourceRegistry::new();
    registry.register("s3", make_s3);
    registry.register("sm", make_secrets_manager);
    registry.register("ssm", make_ssm);
    registry.register("file", make_file);
    registry
}

/// Splits a source-list string on runs of whitespace, commas, and pipes,
/// preserving order and dropping empty tokens.
#[must_use]
pub fn split_sources(sources: &str) -> Vec<String> {
    sources
        .split(|c: char| c.is_whitespace() || c == ',' || c == '|')
        .filter(|token| !token.is_empty())
        .map(str::to_owned)
        .collect()
}

/// Parses a source-list string into constructed sources, in list order.
///
/// Tokens that fail URL parsing or name an unregistered scheme are skipped
/// with a debug log; unknown schemes stay non-fatal so source strings remain
/// forward compatible.
#[must_use]
pub fn parse_sources(sources: &str, registry: &SourceRegistry) -> Vec<Box<dyn ConfigSource>> {
    split_sources(sources)
        .into_iter()
        .filter_map(|token| {
            let url = match SourceUrl::parse(&token) {
                Ok(url) => url,
                Err(err) => {
                    debug!(token = %token, error = %err, "skipping unparseable source");
                    return None;
                }
            };
            let Some(factory) = registry.get(url.scheme()) else {
                debug!(token = %token, scheme = %url.scheme(), "skipping unregistered source scheme");
                return None;
            };
            Some(factory(url))
        })
        .collect()
}
