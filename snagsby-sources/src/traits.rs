//! Shared source trait and error taxonomy.

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;
use tracing::error;

use snagsby_core::{ConfigMap, SourceUrl, sanitize};

/// Result alias used by source implementations.
pub type SourceResult<T> = Result<T, SourceError>;

/// Error type shared by source implementations.
#[derive(Debug, Error)]
pub enum SourceError {
    /// The remote service failed or rejected the fetch.
    #[error("failed to fetch `{url}`: {reason}")]
    Fetch {
        /// Locator of the failing source.
        url: String,
        /// Additional context from the underlying client.
        reason: String,
    },

    /// The fetched payload was not valid UTF-8 JSON.
    #[error("invalid payload from `{url}`: {source}")]
    Decode {
        /// Locator of the failing source.
        url: String,
        /// Underlying decode error.
        #[source]
        source: serde_json::Error,
    },

    /// Reading a local file failed.
    #[error("failed to read `{path}`: {source}")]
    Io {
        /// Path of the file that could not be read.
        path: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

impl SourceError {
    /// Convenience constructor for fetch failures.
    #[must_use]
    pub fn fetch(url: &SourceUrl, reason: impl ToString) -> Self {
        Self::Fetch {
            url: url.to_string(),
            reason: reason.to_string(),
        }
    }

    /// Convenience constructor for payload decode failures.
    #[must_use]
    pub fn decode(url: &SourceUrl, source: serde_json::Error) -> Self {
        Self::Decode {
            url: url.to_string(),
            source,
        }
    }
}

/// Trait implemented by every configuration source.
///
/// A source is constructed fresh from a parsed URL per resolution, fetched
/// once, and discarded; it carries no state beyond the URL.
#[async_trait]
pub trait ConfigSource: Send + Sync {
    /// Returns the locator this source was built from.
    fn url(&self) -> &SourceUrl;

    /// Fetches and decodes the source payload.
    ///
    /// Expected-missing resources (absent object, unknown secret) yield
    /// `Ok(Value::Null)` after a debug log rather than an error.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError`] when the fetch fails or, depending on the
    /// variant, when the payload cannot be decoded.
    async fn raw_data(&self) -> SourceResult<Value>;

    /// Fetches the payload and sanitizes it into a [`ConfigMap`].
    ///
    /// Never fails: any [`raw_data`](ConfigSource::raw_data) error is logged
    /// and the source contributes an empty map.
    async fn data(&self) -> ConfigMap {
        match self.raw_data().await {
            Ok(payload) => sanitize(&payload),
            Err(err) => {
                error!(url = %self.url(), error = %err, "source resolution failed");
                ConfigMap::new()
            }
        }
    }
}
