//! The remoting manager: the host bridge that performs remote calls.

use crate::{
    action::ActionName,
    error::{BoxError, HookError},
    event::RemoteEvent,
    options::InvokeOptions,
};
use serde_json::Value;
use std::fmt;

/// The host capability that performs a remote call.
///
/// Implementations do their own asynchronous work and call
/// [`Invocation::respond`] (or [`Callback::call`]) exactly once when the
/// response arrives. A manager that drops the callback without calling it
/// leaves the call without an outcome.
#[diagnostic::on_unimplemented(
    message = "`{Self}` is not a remoting Manager",
    label = "missing `Manager` implementation",
    note = "Managers must implement `invoke_action` and eventually call the callback."
)]
pub trait Manager: Send + Sync + 'static {
    /// Start the remote call. Returning an error means the call was never
    /// dispatched; the callback must then not be called.
    fn invoke_action(&self, invocation: Invocation) -> Result<(), BoxError>;
}

impl<M: Manager + ?Sized> Manager for std::sync::Arc<M> {
    fn invoke_action(&self, invocation: Invocation) -> Result<(), BoxError> {
        (**self).invoke_action(invocation)
    }
}

impl<M: Manager + ?Sized> Manager for Box<M> {
    fn invoke_action(&self, invocation: Invocation) -> Result<(), BoxError> {
        (**self).invoke_action(invocation)
    }
}

type CallbackFn = dyn FnOnce(Value, RemoteEvent) -> Result<(), HookError> + Send;

/// The completion callback handed to the manager.
///
/// Calling it classifies the response and fires the outcome hooks. The
/// returned error is the first hook failure, if any.
pub struct Callback(Box<CallbackFn>);

impl Callback {
    /// Wrap a closure.
    pub fn new<F>(f: F) -> Self
    where
        F: FnOnce(Value, RemoteEvent) -> Result<(), HookError> + Send + 'static,
    {
        Self(Box::new(f))
    }

    /// Deliver the response.
    pub fn call(self, response: Value, event: RemoteEvent) -> Result<(), HookError> {
        (self.0)(response, event)
    }
}

impl fmt::Debug for Callback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Callback")
    }
}

/// The outgoing argument list: parameters, then the callback, then options.
#[derive(Debug)]
pub struct Invocation {
    /// The remote action, forwarded verbatim.
    pub action: ActionName,
    /// Caller parameters in call order.
    pub params: Vec<Value>,
    /// Completion callback.
    pub callback: Callback,
    /// Options configured on the invoker, if any.
    pub options: Option<InvokeOptions>,
}

impl Invocation {
    /// Call the callback with the response.
    pub fn respond(self, response: Value, event: RemoteEvent) -> Result<(), HookError> {
        self.callback.call(response, event)
    }
}
