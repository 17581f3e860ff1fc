//! Secret source backed by AWS Secrets Manager.

use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, error};

use snagsby_core::SourceUrl;

use crate::aws::sdk_config;
use crate::traits::{ConfigSource, SourceError, SourceResult};

/// Source reading one JSON secret from Secrets Manager.
///
/// Locator shape: `sm://app/prod/secrets?region=us-west-2`; the authority and
/// path joined together form the secret identifier (`app/prod/secrets`).
#[derive(Clone, Debug)]
pub struct SecretsManagerSource {
    url: SourceUrl,
}

impl SecretsManagerSource {
    /// Creates a source from a parsed `sm://` locator.
    #[must_use]
    pub fn new(url: SourceUrl) -> Self {
        Self { url }
    }

    /// Secret identifier formed from the URL authority and path.
    #[must_use]
    pub fn secret_id(&self) -> String {
        format!("{}{}", self.url.authority(), self.url.path())
    }
}

#[async_trait]
impl ConfigSource for SecretsManagerSource {
    fn url(&self) -> &SourceUrl {
        &self.url
    }

    /// Requests the secret value and parses its string payload as JSON.
    ///
    /// Missing secrets, rejected requests, responses without a string
    /// payload, and malformed JSON all swallow to `Ok(Null)` after logging;
    /// only unexpected service failures propagate.
    async fn raw_data(&self) -> SourceResult<Value> {
        let config = sdk_config(&self.url).await;
        let client = aws_sdk_secretsmanager::Client::new(&config);
        let secret_id = self.secret_id();

        let response = match client
            .get_secret_value()
            .secret_id(&secret_id)
            .send()
            .await
        {
            Ok(response) => response,
            Err(err) => {
                let Some(service) = err.as_service_error() else {
                    return Err(SourceError::fetch(&self.url, &err));
                };
                if service.is_resource_not_found_exception() {
                    debug!(secret = %secret_id, "secret not found");
                } else if service.is_invalid_request_exception() {
                    error!(secret = %secret_id, error = %service, "secret request was invalid");
                } else if service.is_invalid_parameter_exception() {
                    error!(secret = %secret_id, error = %service, "secret request had invalid parameters");
                } else {
                    return Err(SourceError::fetch(&self.url, &err));
                }
                return Ok(Value::Null);
            }
        };

        let Some(text) = response.secret_string() else {
            debug!(secret = %secret_id, "response does not contain a secret string");
            return Ok(Value::Null);
        };

        Ok(parse_secret_payload(&secret_id, text))
    }
}

/// Decodes a secret string, swallowing malformed JSON to `Null`.
fn parse_secret_payload(secret_id: &str, text: &str) -> Value {
    match serde_json::from_str(text) {
        Ok(payload) => payload,
        Err(err) => {
            debug!(secret = %secret_id, error = %err, "secret payload is not valid JSON");
            Value::Null
        }
    }
}
