//! The platform event delivered alongside every response.

use serde::{Deserialize, Serialize};

/// Event type reported by the platform for server-side exceptions.
pub const EXCEPTION: &str = "exception";

/// Status information the manager passes to the callback with each response.
///
/// Field names follow the platform's JSON shape, so an event can be built
/// straight from the bridge payload with `serde_json::from_value`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteEvent {
    /// Whether the platform considers the call successful.
    #[serde(default)]
    pub status: bool,
    /// Human-readable message, usually set on failure.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Event type, e.g. `rpc` or `exception`.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    /// Stack trace text for exceptions.
    #[serde(rename = "where", default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    /// HTTP-like status code.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_code: Option<u16>,
    /// Controller name echoed back by the platform.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<String>,
    /// Method name echoed back by the platform.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,
    /// Transaction id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tid: Option<u64>,
}

impl RemoteEvent {
    /// A successful event.
    pub fn ok() -> Self {
        Self {
            status: true,
            ..Self::default()
        }
    }

    /// A failed event with a message.
    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            status: false,
            message: Some(message.into()),
            ..Self::default()
        }
    }

    /// A failed `exception` event carrying a stack trace.
    pub fn exception(message: impl Into<String>, location: impl Into<String>) -> Self {
        Self {
            status: false,
            message: Some(message.into()),
            kind: Some(EXCEPTION.to_owned()),
            location: Some(location.into()),
            ..Self::default()
        }
    }

    /// Set the event type.
    pub fn with_kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = Some(kind.into());
        self
    }

    /// Whether this is an `exception` event.
    pub fn is_exception(&self) -> bool {
        self.kind.as_deref() == Some(EXCEPTION)
    }
}
