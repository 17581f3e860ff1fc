//! Object storage source backed by Amazon S3.

use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;

use snagsby_core::SourceUrl;

use crate::aws::sdk_config;
use crate::traits::{ConfigSource, SourceError, SourceResult};

/// Source reading one JSON object from an S3 bucket.
///
/// Locator shape: `s3://bucket/path/to/object.json?region=us-west-2`. The
/// bucket is the URL authority and the object key is the path without its
/// leading slash.
#[derive(Clone, Debug)]
pub struct S3Source {
    url: SourceUrl,
}

impl S3Source {
    /// Creates a source from a parsed `s3://` locator.
    #[must_use]
    pub fn new(url: SourceUrl) -> Self {
        Self { url }
    }

    /// Bucket name taken from the URL authority.
    #[must_use]
    pub fn bucket(&self) -> &str {
        self.url.authority()
    }

    /// Object key taken from the URL path, without the leading slash.
    #[must_use]
    pub fn key(&self) -> &str {
        self.url.path().trim_start_matches('/')
    }
}

#[async_trait]
impl ConfigSource for S3Source {
    fn url(&self) -> &SourceUrl {
        &self.url
    }

    /// Reads the object body fully and parses it as JSON.
    ///
    /// A missing key yields `Ok(Null)`; other service failures map to
    /// [`SourceError::Fetch`] and malformed content to
    /// [`SourceError::Decode`], both of which propagate.
    async fn raw_data(&self) -> SourceResult<Value> {
        let config = sdk_config(&self.url).await;
        let client = aws_sdk_s3::Client::new(&config);

        let object = match client
            .get_object()
            .bucket(self.bucket())
            .key(self.key())
            .send()
            .await
        {
            Ok(object) => object,
            Err(err) => {
                if err
                    .as_service_error()
                    .is_some_and(|service| service.is_no_such_key())
                {
                    debug!(url = %self.url, "object not found");
                    return Ok(Value::Null);
                }
                return Err(SourceError::fetch(&self.url, err));
            }
        };

        let body = object
            .body
            .collect()
            .await
            .map_err(|err| SourceError::fetch(&self.url, err))?
            .into_bytes();
        let text =
            std::str::from_utf8(&body).map_err(|err| SourceError::fetch(&self.url, err))?;

        serde_json::from_str(text).map_err(|err| SourceError::decode(&self.url, err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn source(raw: &str) -> S3Source {
        S3Source::new(SourceUrl::parse(raw).unwrap())
    }

    #[test]
    fn bucket_is_the_authority() {
        let source = source("s3://my-bucket/my/file.json?region=us-west-1");
        assert_eq!(source.bucket(), "my-bucket");
    }

    #[test]
    fn key_drops_the_leading_slash() {
        let source = source("s3://my-bucket/my/file.json?region=us-west-1");
        assert_eq!(source.key(), "my/file.json");
    }
}
