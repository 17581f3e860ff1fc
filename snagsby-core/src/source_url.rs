//! Parsed source locators.

use std::collections::BTreeMap;
use std::fmt;

use thiserror::Error;
use url::Url;

/// Error raised when a source locator cannot be parsed.
#[derive(Debug, Error)]
#[error("invalid source url `{url}`: {source}")]
pub struct UrlError {
    /// The offending locator string.
    url: String,
    /// Underlying parser error.
    #[source]
    source: url::ParseError,
}

/// A parsed source locator: scheme, authority, path, and query options.
///
/// The authority carries the bucket or identifier prefix depending on the
/// scheme; `file://` locators have an empty authority.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SourceUrl {
    raw: String,
    scheme: String,
    authority: String,
    path: String,
    options: BTreeMap<String, String>,
}

impl SourceUrl {
    /// Parses a locator such as `s3://bucket/config.json?region=us-west-2`.
    ///
    /// # Errors
    ///
    /// Returns [`UrlError`] when the string is not an absolute URL.
    pub fn parse(raw: &str) -> Result<Self, UrlError> {
        let parsed = Url::parse(raw).map_err(|source| UrlError {
            url: raw.to_owned(),
            source,
        })?;

        let mut options = BTreeMap::new();
        for (name, value) in parsed.query_pairs() {
            // First occurrence wins when an option repeats.
            options
                .entry(name.into_owned())
                .or_insert_with(|| value.into_owned());
        }

        Ok(Self {
            raw: raw.to_owned(),
            scheme: parsed.scheme().to_owned(),
            authority: parsed.host_str().unwrap_or_default().to_owned(),
            path: parsed.path().to_owned(),
            options,
        })
    }

    /// Returns the URL scheme, e.g. `s3` or `file`.
    #[must_use]
    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    /// Returns the URL authority (host component).
    #[must_use]
    pub fn authority(&self) -> &str {
        &self.authority
    }

    /// Returns the URL path, including its leading slash.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Returns a query option by name.
    #[must_use]
    pub fn option(&self, name: &str) -> Option<&str> {
        self.options.get(name).map(String::as_str)
    }

    /// Returns the `region` option overriding the ambient service region.
    #[must_use]
    pub fn region(&self) -> Option<&str> {
        self.option("region")
    }
}

impl fmt::Display for SourceUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_object_storage_locator() {
        let url = SourceUrl::parse("s3://my-bucket/my/file.json?region=us-west-1").unwrap();
        assert_eq!(url.scheme(), "s3");
        assert_eq!(url.authority(), "my-bucket");
        assert_eq!(url.path(), "/my/file.json");
        assert_eq!(url.region(), Some("us-west-1"));
    }

    #[test]
    fn region_defaults_to_none() {
        let url = SourceUrl::parse("s3://bucket/file.json").unwrap();
        assert_eq!(url.region(), None);
    }

    #[test]
    fn parses_secret_locator_authority_and_path() {
        let url = SourceUrl::parse("sm://some/key/path").unwrap();
        assert_eq!(url.authority(), "some");
        assert_eq!(url.path(), "/key/path");
    }

    #[test]
    fn parses_file_locator_with_empty_authority() {
        let url = SourceUrl::parse("file:///etc/config.json").unwrap();
        assert_eq!(url.scheme(), "file");
        assert_eq!(url.authority(), "");
        assert_eq!(url.path(), "/etc/config.json");
    }

    #[test]
    fn first_option_occurrence_wins() {
        let url = SourceUrl::parse("s3://b/k?region=us-east-2&region=eu-west-1").unwrap();
        assert_eq!(url.region(), Some("us-east-2"));
    }

    #[test]
    fn display_round_trips_the_raw_locator() {
        let raw = "ssm://app/prod?region=us-west-2";
        let url = SourceUrl::parse(raw).unwrap();
        assert_eq!(url.to_string(), raw);
    }

    #[test]
    fn rejects_relative_strings() {
        assert!(SourceUrl::parse("not a url").is_err());
    }
}
