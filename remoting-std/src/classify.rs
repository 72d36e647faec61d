//! Response classification.
//!
//! The platform reports the outcome of a call twice: the event's `status` and,
//! for some controllers, an `isSuccess` flag on the response itself. A call
//! succeeds only when the status is set and the flag is either absent or
//! exactly `true`.

use remoting_core::{FailedReply, RemoteEvent, RemoteFailure, Reply};
use serde_json::Value;

/// The classified result of a remote call.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// The call succeeded.
    Success(Reply),
    /// The call failed.
    Failure(FailedReply),
}

impl Outcome {
    /// Whether the call succeeded.
    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success(_))
    }

    /// The response and event, without any error.
    pub fn into_reply(self) -> Reply {
        match self {
            Outcome::Success(reply) => reply,
            Outcome::Failure(FailedReply {
                response, event, ..
            }) => Reply { response, event },
        }
    }
}

/// Classify a response and its event.
pub fn classify(response: Value, event: RemoteEvent) -> Outcome {
    let flag_ok = match response.get("isSuccess") {
        None => true,
        Some(flag) => flag.as_bool() == Some(true),
    };

    if event.status && flag_ok {
        return Outcome::Success(Reply { response, event });
    }

    let error = RemoteFailure {
        message: event.message.clone().unwrap_or_default(),
        result: response.clone(),
        apex_stack_trace: event
            .is_exception()
            .then(|| event.location.clone())
            .flatten(),
    };
    Outcome::Failure(FailedReply {
        response,
        event,
        error,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn status(ok: bool) -> RemoteEvent {
        RemoteEvent {
            status: ok,
            ..RemoteEvent::default()
        }
    }

    fn succeeds(response: Value, ok: bool) -> bool {
        classify(response, status(ok)).is_success()
    }

    #[test]
    fn test_status_without_flag_succeeds() {
        assert!(succeeds(json!({}), true));
    }

    #[test]
    fn test_flag_false_overrides_status() {
        assert!(!succeeds(json!({ "isSuccess": false }), true));
    }

    #[test]
    fn test_status_false_fails() {
        assert!(!succeeds(json!({}), false));
        assert!(!succeeds(json!({ "isSuccess": true }), false));
    }

    #[test]
    fn test_flag_true_succeeds() {
        assert!(succeeds(json!({ "isSuccess": true }), true));
    }

    #[test]
    fn test_non_boolean_flag_fails() {
        assert!(!succeeds(json!({ "isSuccess": null }), true));
        assert!(!succeeds(json!({ "isSuccess": "true" }), true));
    }

    #[test]
    fn test_non_object_response_has_no_flag() {
        assert!(succeeds(json!([1, 2]), true));
        assert!(succeeds(Value::Null, true));
        assert!(succeeds(json!("ok"), true));
    }

    #[test]
    fn test_failure_carries_message_and_result() {
        let response = json!({ "isSuccess": false, "errors": ["dup"] });
        let Outcome::Failure(failed) =
            classify(response.clone(), RemoteEvent::failed("Duplicate value"))
        else {
            panic!("expected failure");
        };

        assert_eq!(failed.error.message, "Duplicate value");
        assert_eq!(failed.error.result, response);
        assert_eq!(failed.response, response);
        assert_eq!(failed.error.apex_stack_trace, None);
    }

    #[test]
    fn test_exception_carries_stack_trace() {
        let event = RemoteEvent::exception("boom", "Class.Foo.bar: line 1");
        let Outcome::Failure(failed) = classify(json!({}), event) else {
            panic!("expected failure");
        };
        assert_eq!(
            failed.error.apex_stack_trace.as_deref(),
            Some("Class.Foo.bar: line 1")
        );
    }

    #[test]
    fn test_other_kinds_omit_stack_trace() {
        let mut event = RemoteEvent::failed("boom").with_kind("rpc");
        event.location = Some("Class.Foo.bar: line 1".into());
        let Outcome::Failure(failed) = classify(json!({}), event) else {
            panic!("expected failure");
        };
        assert_eq!(failed.error.apex_stack_trace, None);
    }

    #[test]
    fn test_missing_message_is_empty() {
        let Outcome::Failure(failed) = classify(json!({}), status(false)) else {
            panic!("expected failure");
        };
        assert_eq!(failed.error.message, "");
    }
}
