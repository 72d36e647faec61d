//! Remote action names.

use crate::error::RemotingError;
use serde_json::Value;
use std::{fmt, str::FromStr};

/// A validated remote action name.
///
/// Accepts `Controller.Method` or `Namespace.Controller.Method`: exactly two
/// or three non-empty segments separated by `.`. The name is forwarded to the
/// manager verbatim.
///
/// # Example
///
/// ```rust
/// use remoting_core::ActionName;
///
/// let name: ActionName = "acme.AccountController.load".parse().unwrap();
/// assert_eq!(name.namespace(), Some("acme"));
/// assert_eq!(name.controller(), "AccountController");
/// assert_eq!(name.method(), "load");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ActionName {
    raw: String,
    // Byte offsets of the first and (optional) second separator.
    first_dot: usize,
    second_dot: Option<usize>,
}

impl ActionName {
    /// Parse and validate an action name.
    pub fn parse(raw: impl Into<String>) -> Result<Self, RemotingError> {
        let raw = raw.into();
        let segments: Vec<&str> = raw.split('.').collect();
        if !(2..=3).contains(&segments.len()) || segments.iter().any(|s| s.is_empty()) {
            return Err(RemotingError::InvalidActionNameFormat(raw));
        }

        let first_dot = segments[0].len();
        let second_dot = match segments[..] {
            [_, controller, _] => Some(first_dot + 1 + controller.len()),
            _ => None,
        };
        Ok(Self {
            raw,
            first_dot,
            second_dot,
        })
    }

    /// The full name as supplied.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// The namespace segment, present only for three-segment names.
    pub fn namespace(&self) -> Option<&str> {
        self.second_dot.map(|_| &self.raw[..self.first_dot])
    }

    /// The controller segment.
    pub fn controller(&self) -> &str {
        match self.second_dot {
            Some(second) => &self.raw[self.first_dot + 1..second],
            None => &self.raw[..self.first_dot],
        }
    }

    /// The method segment.
    pub fn method(&self) -> &str {
        let last = self.second_dot.unwrap_or(self.first_dot);
        &self.raw[last + 1..]
    }
}

impl fmt::Display for ActionName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl AsRef<str> for ActionName {
    fn as_ref(&self) -> &str {
        &self.raw
    }
}

impl FromStr for ActionName {
    type Err = RemotingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Conversion into a validated [`ActionName`].
///
/// Implemented for string types and for `serde_json::Value`, so names coming
/// from dynamic data are checked for their type as well as their shape.
#[diagnostic::on_unimplemented(
    message = "`{Self}` cannot be used as a remote action name",
    label = "expected a string or an `ActionName`",
    note = "Action names are `Controller.Method` or `Namespace.Controller.Method`."
)]
pub trait IntoActionName {
    /// Validate and convert.
    fn into_action_name(self) -> Result<ActionName, RemotingError>;
}

impl IntoActionName for ActionName {
    fn into_action_name(self) -> Result<ActionName, RemotingError> {
        Ok(self)
    }
}

impl IntoActionName for &ActionName {
    fn into_action_name(self) -> Result<ActionName, RemotingError> {
        Ok(self.clone())
    }
}

impl IntoActionName for &str {
    fn into_action_name(self) -> Result<ActionName, RemotingError> {
        ActionName::parse(self)
    }
}

impl IntoActionName for String {
    fn into_action_name(self) -> Result<ActionName, RemotingError> {
        ActionName::parse(self)
    }
}

impl IntoActionName for &String {
    fn into_action_name(self) -> Result<ActionName, RemotingError> {
        ActionName::parse(self.as_str())
    }
}

impl IntoActionName for &Value {
    fn into_action_name(self) -> Result<ActionName, RemotingError> {
        match self {
            Value::String(s) => ActionName::parse(s.as_str()),
            other => Err(RemotingError::InvalidActionNameType(json_kind(other))),
        }
    }
}

impl IntoActionName for Value {
    fn into_action_name(self) -> Result<ActionName, RemotingError> {
        match self {
            Value::String(s) => ActionName::parse(s),
            other => Err(RemotingError::InvalidActionNameType(json_kind(&other))),
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_two_segments() {
        let name = ActionName::parse("AccountController.load").unwrap();
        assert_eq!(name.namespace(), None);
        assert_eq!(name.controller(), "AccountController");
        assert_eq!(name.method(), "load");
        assert_eq!(name.as_str(), "AccountController.load");
    }

    #[test]
    fn test_three_segments() {
        let name = ActionName::parse("ns.Ctrl.run").unwrap();
        assert_eq!(name.namespace(), Some("ns"));
        assert_eq!(name.controller(), "Ctrl");
        assert_eq!(name.method(), "run");
        assert_eq!(name.to_string(), "ns.Ctrl.run");
    }

    #[test]
    fn test_rejects_wrong_segment_counts() {
        for bad in ["", "Ctrl", "a.b.c.d", "a.b.c.d.e"] {
            let err = ActionName::parse(bad).unwrap_err();
            assert!(
                matches!(err, RemotingError::InvalidActionNameFormat(ref s) if s == bad),
                "{bad:?} should be rejected, got {err:?}"
            );
        }
    }

    #[test]
    fn test_rejects_empty_segments() {
        for bad in [".method", "Ctrl.", "ns..method", "..", "ns.Ctrl."] {
            assert!(
                ActionName::parse(bad).is_err(),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_value_names_check_type() {
        assert!(json!("Ctrl.method").into_action_name().is_ok());

        let err = json!(42).into_action_name().unwrap_err();
        assert!(matches!(
            err,
            RemotingError::InvalidActionNameType("number")
        ));

        let err = (&Value::Null).into_action_name().unwrap_err();
        assert!(matches!(err, RemotingError::InvalidActionNameType("null")));
    }
}
