//! Local file source, mostly useful for development and tests.

use async_trait::async_trait;
use serde_json::Value;

use snagsby_core::SourceUrl;

use crate::traits::{ConfigSource, SourceError, SourceResult};

/// Source reading one JSON document from the local filesystem.
///
/// Locator shape: `file:///etc/app/config.json`.
#[derive(Clone, Debug)]
pub struct FileSource {
    url: SourceUrl,
}

impl FileSource {
    /// Creates a source from a parsed `file://` locator.
    #[must_use]
    pub fn new(url: SourceUrl) -> Self {
        Self { url }
    }

    /// Filesystem path taken from the URL path.
    #[must_use]
    pub fn path(&self) -> &str {
        self.url.path()
    }
}

#[async_trait]
impl ConfigSource for FileSource {
    fn url(&self) -> &SourceUrl {
        &self.url
    }

    /// Reads the file and parses it as JSON; I/O and decode errors both
    /// propagate.
    async fn raw_data(&self) -> SourceResult<Value> {
        let text = tokio::fs::read_to_string(self.path())
            .await
            .map_err(|source| SourceError::Io {
                path: self.path().to_owned(),
                source,
            })?;

        serde_json::from_str(&text).map_err(|err| SourceError::decode(&self.url, err))
    }
}
