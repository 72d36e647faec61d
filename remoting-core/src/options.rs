//! Invocation options forwarded to the manager.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::time::Duration;

/// Options appended to every outgoing argument list.
///
/// These are platform settings. They are forwarded verbatim and applied by
/// the manager, not by this crate.
///
/// # Example
///
/// ```rust
/// use remoting_core::InvokeOptions;
/// use std::time::Duration;
///
/// let options = InvokeOptions::new()
///     .buffer(false)
///     .escape(true)
///     .timeout(Duration::from_secs(30));
/// assert_eq!(options.to_value()["timeout"], 30_000);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InvokeOptions {
    /// Whether the platform may batch this call with others.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub buffer: Option<bool>,
    /// Whether the platform escapes the response.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub escape: Option<bool>,
    /// Platform-side timeout in milliseconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout: Option<u64>,
    /// Any other platform option.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl InvokeOptions {
    /// Empty options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `buffer`.
    pub fn buffer(mut self, buffer: bool) -> Self {
        self.buffer = Some(buffer);
        self
    }

    /// Set `escape`.
    pub fn escape(mut self, escape: bool) -> Self {
        self.escape = Some(escape);
        self
    }

    /// Set the platform timeout, truncated to whole milliseconds.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX));
        self
    }

    /// Set an arbitrary option.
    pub fn set(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }

    /// The options as a JSON object.
    pub fn to_value(&self) -> Value {
        let mut map = self.extra.clone();
        if let Some(buffer) = self.buffer {
            map.insert("buffer".into(), buffer.into());
        }
        if let Some(escape) = self.escape {
            map.insert("escape".into(), escape.into());
        }
        if let Some(timeout) = self.timeout {
            map.insert("timeout".into(), timeout.into());
        }
        Value::Object(map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_to_value_merges_extra() {
        let options = InvokeOptions::new().escape(false).set("auth", "x");
        assert_eq!(options.to_value(), json!({ "escape": false, "auth": "x" }));
    }

    #[test]
    fn test_deserialize_keeps_unknown_keys() {
        let options: InvokeOptions =
            serde_json::from_value(json!({ "buffer": true, "custom": 1 })).unwrap();
        assert_eq!(options.buffer, Some(true));
        assert_eq!(options.extra.get("custom"), Some(&json!(1)));
    }
}
