//! Parameter source backed by AWS SSM Parameter Store.

use async_trait::async_trait;
use serde_json::Value;

use snagsby_core::SourceUrl;

use crate::aws::sdk_config;
use crate::traits::{ConfigSource, SourceError, SourceResult};

/// Source listing every parameter under a hierarchical path prefix.
///
/// Locator shape: `ssm://app/prod?region=us-west-2`, addressing the prefix
/// `/app/prod`. Parameters are listed recursively with decryption and all
/// pages aggregate into one payload before sanitization.
#[derive(Clone, Debug)]
pub struct SsmSource {
    url: SourceUrl,
}

impl SsmSource {
    /// Creates a source from a parsed `ssm://` locator.
    #[must_use]
    pub fn new(url: SourceUrl) -> Self {
        Self { url }
    }

    /// Hierarchical path prefix formed from the URL authority and path.
    #[must_use]
    pub fn path_prefix(&self) -> String {
        format!("/{}{}", self.url.authority(), self.url.path())
    }
}

#[async_trait]
impl ConfigSource for SsmSource {
    fn url(&self) -> &SourceUrl {
        &self.url
    }

    /// Pages through `GetParametersByPath` until exhausted.
    ///
    /// Any service failure propagates as [`SourceError::Fetch`].
    async fn raw_data(&self) -> SourceResult<Value> {
        let config = sdk_config(&self.url).await;
        let client = aws_sdk_ssm::Client::new(&config);
        let prefix = self.path_prefix();

        let mut pages = client
            .get_parameters_by_path()
            .path(&prefix)
            .recursive(true)
            .with_decryption(true)
            .into_paginator()
            .send();

        let mut entries = serde_json::Map::new();
        while let Some(page) = pages.next().await {
            let page = page.map_err(|err| SourceError::fetch(&self.url, err))?;
            for parameter in page.parameters() {
                if let (Some(name), Some(value)) = (parameter.name(), parameter.value()) {
                    entries.insert(
                        normalize_key(&prefix, name),
                        Value::String(value.to_owned()),
                    );
                }
            }
        }

        Ok(Value::Object(entries))
    }
}

/// Derives the flat key for a parameter: prefix stripped, leading slashes
/// dropped, uppercased, path separators replaced with underscores.
fn normalize_key(prefix: &str, name: &str) -> String {
    name.strip_prefix(prefix)
        .unwrap_or(name)
        .trim_start_matches('/')
        .to_uppercase()
        .replace('/', "_")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn path_prefix_joins_authority_and_path() {
        let source = SsmSource::new(SourceUrl::parse("ssm://app/prod").unwrap());
        assert_eq!(source.path_prefix(), "/app/prod");
    }

    #[test]
    fn normalizes_direct_children() {
        assert_eq!(normalize_key("/app/prod", "/app/prod/db_password"), "DB_PASSWORD");
    }

    #[test]
    fn normalizes_nested_parameters_with_underscores() {
        assert_eq!(normalize_key("/app/prod", "/app/prod/db/pass"), "DB_PASS");
    }

    #[test]
    fn leaves_foreign_names_intact_apart_from_casing() {
        assert_eq!(normalize_key("/app/prod", "/other/key"), "OTHER_KEY");
    }
}
