//! Normalization of fetched payloads into environment-safe mappings.

use std::collections::BTreeMap;

use serde_json::Value;

/// Flat mapping of environment-safe keys to string values.
///
/// `BTreeMap` keeps iteration deterministic, which the JSON formatter relies
/// on for sorted keys.
pub type ConfigMap = BTreeMap<String, String>;

/// Key reserved for the source-list itself.
///
/// Never emitted in sanitized output so resolved configuration cannot
/// re-trigger source resolution.
pub const RESERVED_KEY: &str = "SNAGSBY_SOURCE";

/// Normalizes an arbitrary decoded payload into a [`ConfigMap`].
///
/// Non-object payloads produce an empty map rather than an error. Within an
/// object, every key is uppercased and the pair is dropped when the key fails
/// `^\w+$`, when the value is a nested object, or when the key equals
/// [`RESERVED_KEY`]. Booleans render as `"1"`/`"0"`, strings keep their
/// content verbatim, and everything else renders via its canonical JSON text.
#[must_use]
pub fn sanitize(payload: &Value) -> ConfigMap {
    let mut out = ConfigMap::new();

    let Value::Object(entries) = payload else {
        return out;
    };

    for (key, value) in entries {
        let key = key.to_uppercase();
        if !is_valid_key(&key) || value.is_object() || key == RESERVED_KEY {
            continue;
        }

        let rendered = match value {
            Value::Bool(true) => "1".to_owned(),
            Value::Bool(false) => "0".to_owned(),
            Value::String(text) => text.clone(),
            other => other.to_string(),
        };
        out.insert(key, rendered);
    }

    out
}

/// ASCII `\w+` check, applied after uppercasing.
fn is_valid_key(key: &str) -> bool {
    !key.is_empty() && key.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}
