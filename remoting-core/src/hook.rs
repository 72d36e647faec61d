//! # Hooks
//!
//! A hook is a named callable attached to one phase of a remote call. Hooks
//! observe; they cannot block or rewrite the call. A hook that returns an
//! error stops the rest of its phase and the error surfaces to whoever fired
//! the phase.
//!
//! Implement [`Hook`] directly for stateful hooks, or wrap a closure with
//! [`hook_fn`] / [`named`].
//!
//! ```rust
//! use remoting_core::{named, Hook, Reply};
//!
//! let hook = named("audit", |reply: &Reply| {
//!     println!("{}", reply.response);
//!     Ok(())
//! });
//! assert_eq!(Hook::<Reply>::name(&hook), Some("audit"));
//! ```

use crate::{error::BoxError, payload::Payload};
use std::borrow::Cow;

/// A callable fired when its phase is reached.
#[diagnostic::on_unimplemented(
    message = "`{Self}` does not implement `Hook<{P}>`",
    label = "missing `Hook` implementation",
    note = "Hooks must implement `call` for the payload type `{P}`."
)]
pub trait Hook<P: Payload>: Send + Sync + 'static {
    /// Declared name, used to remove the hook. Anonymous hooks return `None`
    /// and can only be removed by clearing their phase.
    fn name(&self) -> Option<&str> {
        None
    }

    /// Called when the phase fires.
    fn call(&self, payload: &P) -> Result<(), BoxError>;
}

/// A closure wrapped as a [`Hook`].
pub struct FnHook<F> {
    name: Option<Cow<'static, str>>,
    f: F,
}

impl<F> FnHook<F> {
    /// Give the hook a name.
    pub fn with_name(mut self, name: impl Into<Cow<'static, str>>) -> Self {
        self.name = Some(name.into());
        self
    }
}

impl<F> std::fmt::Debug for FnHook<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FnHook").field("name", &self.name).finish()
    }
}

impl<P, F> Hook<P> for FnHook<F>
where
    P: Payload,
    F: Fn(&P) -> Result<(), BoxError> + Send + Sync + 'static,
{
    fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    fn call(&self, payload: &P) -> Result<(), BoxError> {
        (self.f)(payload)
    }
}

/// Wrap a closure as an anonymous hook.
pub fn hook_fn<P, F>(f: F) -> FnHook<F>
where
    P: Payload,
    F: Fn(&P) -> Result<(), BoxError> + Send + Sync + 'static,
{
    FnHook { name: None, f }
}

/// Wrap a closure as a named hook.
pub fn named<P, F>(name: impl Into<Cow<'static, str>>, f: F) -> FnHook<F>
where
    P: Payload,
    F: Fn(&P) -> Result<(), BoxError> + Send + Sync + 'static,
{
    FnHook {
        name: Some(name.into()),
        f,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{event::RemoteEvent, payload::Reply};
    use serde_json::json;

    fn reply() -> Reply {
        Reply {
            response: json!({ "id": 1 }),
            event: RemoteEvent::ok(),
        }
    }

    #[test]
    fn test_fn_hook_anonymous() {
        let hook = hook_fn(|_: &Reply| Ok(()));
        assert_eq!(Hook::<Reply>::name(&hook), None);
        assert!(hook.call(&reply()).is_ok());
    }

    #[test]
    fn test_fn_hook_named() {
        let hook = hook_fn(|_: &Reply| Err("nope".into())).with_name("fails");
        assert_eq!(Hook::<Reply>::name(&hook), Some("fails"));
        assert_eq!(hook.call(&reply()).unwrap_err().to_string(), "nope");
    }
}
