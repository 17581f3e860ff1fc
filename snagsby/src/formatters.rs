//! Renderers for the merged configuration mapping.

use thiserror::Error;

use snagsby_core::ConfigMap;

/// Default formatter name used by the CLI.
pub const DEFAULT_FORMATTER: &str = "env";

/// Errors raised by the formatter factory and renderers.
#[derive(Debug, Error)]
pub enum FormatterError {
    /// No formatter is registered under the requested name.
    #[error("unknown formatter `{0}`")]
    Unknown(String),

    /// Encoding the mapping failed.
    #[error("failed to encode output: {0}")]
    Encode(#[from] serde_json::Error),
}

/// A renderer turning a [`ConfigMap`] into text output.
pub trait Formatter {
    /// Renders the mapping.
    ///
    /// # Errors
    ///
    /// Returns [`FormatterError::Encode`] when the mapping cannot be encoded.
    fn render(&self) -> Result<String, FormatterError>;
}

/// Renders `export KEY="value"` lines with embedded quotes escaped.
pub struct EnvFormatter {
    data: ConfigMap,
}

impl EnvFormatter {
    /// Creates a formatter over the supplied mapping.
    #[must_use]
    pub fn new(data: ConfigMap) -> Self {
        Self { data }
    }
}

impl Formatter for EnvFormatter {
    fn render(&self) -> Result<String, FormatterError> {
        let mut lines: Vec<String> = self
            .data
            .iter()
            .map(|(key, value)| format!("export {key}=\"{}\"", value.replace('"', "\\\"")))
            .collect();
        // Sorted by the full rendered line, not just the key.
        lines.sort();
        Ok(lines.join("\n"))
    }
}

/// Renders the mapping as a JSON object; keys come out sorted because the
/// mapping is ordered.
pub struct JsonFormatter {
    data: ConfigMap,
}

impl JsonFormatter {
    /// Creates a formatter over the supplied mapping.
    #[must_use]
    pub fn new(data: ConfigMap) -> Self {
        Self { data }
    }
}

impl Formatter for JsonFormatter {
    fn render(&self) -> Result<String, FormatterError> {
        Ok(serde_json::to_string(&self.data)?)
    }
}

/// Names accepted by [`get_formatter`], in registration order.
#[must_use]
pub fn formatter_names() -> [&'static str; 2] {
    ["env", "json"]
}

/// Formatter factory.
///
/// # Errors
///
/// Returns [`FormatterError::Unknown`] when `name` is not registered.
pub fn get_formatter(name: &str, data: ConfigMap) -> Result<Box<dyn Formatter>, FormatterError> {
    match name {
        "env" => Ok(Box::new(EnvFormatter::new(data))),
        "json" => Ok(Box::new(JsonFormatter::new(data))),
        other => Err(FormatterError::Unknown(other.to_owned())),
    }
}
