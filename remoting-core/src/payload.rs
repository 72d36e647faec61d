//! Values handed to hooks.
//!
//! Each phase has its own payload type:
//!
//! | phase         | payload               |
//! |---------------|-----------------------|
//! | `BeforeSend`  | [`InvocationContext`] |
//! | `Success`     | [`Reply`]             |
//! | `Failure`     | [`FailedReply`]       |
//! | `Complete`    | [`Reply`]             |

use crate::{action::ActionName, error::RemoteFailure, event::RemoteEvent, options::InvokeOptions};
use serde_json::Value;

/// A marker trait for values passed to hooks.
///
/// Payloads must be `Send + Sync + 'static` so hook lists can be shared with
/// in-flight callbacks.
#[diagnostic::on_unimplemented(
    message = "`{Self}` is not a valid hook Payload",
    label = "must be `Send + Sync + 'static`",
    note = "Hooks receive `InvocationContext`, `Reply` or `FailedReply`."
)]
pub trait Payload: Send + Sync + 'static {}

/// What is about to be sent: fired to before-send hooks.
#[derive(Debug, Clone, PartialEq)]
pub struct InvocationContext {
    /// The remote action.
    pub action: ActionName,
    /// Caller-supplied parameters, in call order.
    pub params: Vec<Value>,
    /// Options appended after the callback, if configured.
    pub options: Option<InvokeOptions>,
}

/// One entry of the outgoing argument list.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Argument<'a> {
    /// A caller parameter.
    Param(&'a Value),
    /// The completion callback.
    Callback,
    /// The configured options.
    Options(&'a InvokeOptions),
}

impl InvocationContext {
    /// The resolved argument list in the order the manager receives it:
    /// parameters, then the callback, then options when present.
    pub fn arguments(&self) -> impl Iterator<Item = Argument<'_>> {
        self.params
            .iter()
            .map(Argument::Param)
            .chain(std::iter::once(Argument::Callback))
            .chain(self.options.iter().map(Argument::Options))
    }
}

/// A response and its event: fired to success and complete hooks.
#[derive(Debug, Clone, PartialEq)]
pub struct Reply {
    /// The raw response.
    pub response: Value,
    /// The platform event.
    pub event: RemoteEvent,
}

/// A failed response: fired to failure hooks and used as the promise
/// rejection value.
#[derive(Debug, Clone, PartialEq)]
pub struct FailedReply {
    /// The raw response.
    pub response: Value,
    /// The platform event.
    pub event: RemoteEvent,
    /// The normalized error.
    pub error: RemoteFailure,
}

impl FailedReply {
    /// The response and event without the error.
    pub fn to_reply(&self) -> Reply {
        Reply {
            response: self.response.clone(),
            event: self.event.clone(),
        }
    }
}

impl Payload for InvocationContext {}
impl Payload for Reply {}
impl Payload for FailedReply {}
