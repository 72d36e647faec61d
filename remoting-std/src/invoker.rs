//! Action invoker: validates, dispatches and routes remote calls.
//!
//! Every [`ActionInvoker::send`] walks the same path:
//!
//! 1. the action name is validated ([`IntoActionName`]),
//! 2. the validator checks the parameters,
//! 3. before-send hooks observe the [`InvocationContext`],
//! 4. the [`Manager`] receives the [`Invocation`],
//! 5. when the manager calls back, the response is [`classify`]-ed and the
//!    success or failure hooks fire, followed by the complete hooks.
//!
//! Steps 1–4 report errors synchronously. Step 5 never does: the remote
//! outcome is only visible to hooks.

use crate::{
    classify::{Outcome, classify},
    registry::HookRegistry,
};
use remoting_core::{
    ActionName, BoxError, Callback, FailedReply, Hook, HookError, IntoActionName, Invocation,
    InvocationContext, InvokeOptions, Manager, Phase, RemoteEvent, RemotingError, Reply,
};
use serde_json::Value;
use std::{
    fmt,
    sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard},
};

/// A parameter validator. Returning an error aborts the send.
pub type Validator = Arc<dyn Fn(&[Value]) -> Result<(), BoxError> + Send + Sync>;

/// Sends remote actions through a [`Manager`] and fires lifecycle hooks.
///
/// Hooks registered on the invoker are shared by every call it makes: a
/// success hook fires for each successful call, whichever call it was
/// registered alongside. Use [`send_scoped`](Self::send_scoped) for hooks that
/// belong to one call.
///
/// # Example
///
/// ```rust,ignore
/// let invoker = ActionInvoker::builder()
///     .manager(bridge)
///     .options(InvokeOptions::new().escape(false))
///     .build()?;
///
/// invoker.on_success(named("render", |reply: &Reply| {
///     render(&reply.response);
///     Ok(())
/// }));
/// invoker.send("AccountController.load", vec![json!("001xx")])?;
/// ```
pub struct ActionInvoker {
    manager: Arc<dyn Manager>,
    options: Option<InvokeOptions>,
    validator: Option<Validator>,
    hooks: Arc<RwLock<HookRegistry>>,
}

impl ActionInvoker {
    /// Create an invoker with no options and no validator.
    pub fn new<M: Manager>(manager: M) -> Self {
        Self {
            manager: Arc::new(manager),
            options: None,
            validator: None,
            hooks: Arc::default(),
        }
    }

    /// Start building an invoker.
    pub fn builder() -> InvokerBuilder {
        InvokerBuilder::new()
    }

    /// The options appended to every call.
    pub fn options(&self) -> Option<&InvokeOptions> {
        self.options.as_ref()
    }

    /// A copy of the current hook registry.
    ///
    /// The copy is detached: changing it does not affect the invoker.
    pub fn hooks(&self) -> HookRegistry {
        self.read().clone()
    }

    /// Register a before-send hook.
    pub fn on_prior<H: Hook<InvocationContext>>(&self, hook: H) -> &Self {
        self.write().prior_mut().add(hook);
        self
    }

    /// Register a success hook.
    pub fn on_success<H: Hook<Reply>>(&self, hook: H) -> &Self {
        self.write().success_mut().add(hook);
        self
    }

    /// Register a failure hook.
    pub fn on_failure<H: Hook<FailedReply>>(&self, hook: H) -> &Self {
        self.write().failure_mut().add(hook);
        self
    }

    /// Register a complete hook.
    pub fn on_complete<H: Hook<Reply>>(&self, hook: H) -> &Self {
        self.write().complete_mut().add(hook);
        self
    }

    /// Remove before-send hooks by name, or all of them with `None`.
    pub fn off_prior(&self, name: Option<&str>) -> usize {
        self.off(Phase::BeforeSend, name)
    }

    /// Remove success hooks by name, or all of them with `None`.
    pub fn off_success(&self, name: Option<&str>) -> usize {
        self.off(Phase::Success, name)
    }

    /// Remove failure hooks by name, or all of them with `None`.
    pub fn off_failure(&self, name: Option<&str>) -> usize {
        self.off(Phase::Failure, name)
    }

    /// Remove complete hooks by name, or all of them with `None`.
    pub fn off_complete(&self, name: Option<&str>) -> usize {
        self.off(Phase::Complete, name)
    }

    /// Remove hooks from any phase.
    pub fn off(&self, phase: Phase, name: Option<&str>) -> usize {
        self.write().remove(phase, name)
    }

    /// Remove every hook from every phase.
    pub fn off_all(&self) {
        self.write().remove_all();
    }

    /// Send a remote action.
    ///
    /// Returns once the manager has accepted the call. The outcome is
    /// delivered to the success/failure and complete hooks.
    pub fn send<N: IntoActionName>(
        &self,
        action: N,
        params: Vec<Value>,
    ) -> Result<(), RemotingError> {
        self.send_scoped(action, params, HookRegistry::new())
    }

    /// Send a remote action with extra hooks for this call only.
    ///
    /// Each phase fires the invoker's hooks first, then the scoped ones. The
    /// scoped registry is dropped with the callback.
    ///
    /// Scoped success and failure hooks run even when a shared hook of the
    /// same phase fails. The shared error is still returned to the manager and
    /// the complete phase is skipped.
    pub fn send_scoped<N: IntoActionName>(
        &self,
        action: N,
        params: Vec<Value>,
        scoped: HookRegistry,
    ) -> Result<(), RemotingError> {
        let action = action.into_action_name()?;
        if let Some(validator) = &self.validator {
            validator(params.as_slice())
                .map_err(RemotingError::Validation)?;
        }

        let context = InvocationContext {
            action,
            params,
            options: self.options.clone(),
        };
        let prior = self.read().prior().clone();
        prior.fire(&context)?;
        scoped.prior().fire(&context)?;

        #[cfg(feature = "tracing")]
        tracing::debug!(
            action = %context.action,
            params = context.params.len(),
            "dispatching remote action"
        );

        let InvocationContext {
            action,
            params,
            options,
        } = context;
        let hooks = Arc::clone(&self.hooks);
        let name = action.clone();
        let callback = Callback::new(move |response, event| {
            deliver(&name, &hooks, &scoped, response, event)
        });

        self.manager
            .invoke_action(Invocation {
                action,
                params,
                callback,
                options,
            })
            .map_err(RemotingError::Dispatch)
    }

    fn read(&self) -> RwLockReadGuard<'_, HookRegistry> {
        read(&self.hooks)
    }

    fn write(&self) -> RwLockWriteGuard<'_, HookRegistry> {
        self.hooks.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl fmt::Debug for ActionInvoker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActionInvoker")
            .field("options", &self.options)
            .field("validator", &self.validator.is_some())
            .field("hooks", &*self.read())
            .finish_non_exhaustive()
    }
}

fn read(hooks: &RwLock<HookRegistry>) -> RwLockReadGuard<'_, HookRegistry> {
    hooks.read().unwrap_or_else(PoisonError::into_inner)
}

// Runs on the manager's callback. Locks are released before any hook runs so
// hooks may register or remove hooks themselves.
fn deliver(
    action: &ActionName,
    hooks: &RwLock<HookRegistry>,
    scoped: &HookRegistry,
    response: Value,
    event: RemoteEvent,
) -> Result<(), HookError> {
    let outcome = classify(response, event);
    match &outcome {
        Outcome::Success(reply) => {
            #[cfg(feature = "tracing")]
            tracing::debug!(action = %action, "remote action succeeded");

            let shared = read(hooks).success().clone();
            let settled = shared.fire(reply);
            settled.and(scoped.success().fire(reply))?;
        }
        Outcome::Failure(failed) => {
            #[cfg(feature = "tracing")]
            tracing::warn!(
                action = %action,
                message = %failed.error.message,
                exception = failed.event.is_exception(),
                "remote action failed"
            );

            let shared = read(hooks).failure().clone();
            let settled = shared.fire(failed);
            settled.and(scoped.failure().fire(failed))?;
        }
    }

    #[cfg(not(feature = "tracing"))]
    let _ = action;

    let reply = outcome.into_reply();
    let shared = read(hooks).complete().clone();
    shared.fire(&reply)?;
    scoped.complete().fire(&reply)
}

/// Builder for [`ActionInvoker`].
///
/// A manager is mandatory; [`build`](Self::build) fails with
/// [`RemotingError::InvalidManager`] without one.
#[derive(Clone, Default)]
pub struct InvokerBuilder {
    manager: Option<Arc<dyn Manager>>,
    options: Option<InvokeOptions>,
    validator: Option<Validator>,
}

impl InvokerBuilder {
    /// Create an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the manager.
    pub fn manager<M: Manager>(mut self, manager: M) -> Self {
        self.set_manager(manager);
        self
    }

    /// Set the manager (mutable version).
    pub fn set_manager<M: Manager>(&mut self, manager: M) -> &mut Self {
        self.manager = Some(Arc::new(manager));
        self
    }

    /// Set the options appended to every call.
    pub fn options(mut self, options: InvokeOptions) -> Self {
        self.set_options(options);
        self
    }

    /// Set the options (mutable version).
    pub fn set_options(&mut self, options: InvokeOptions) -> &mut Self {
        self.options = Some(options);
        self
    }

    /// Set the parameter validator.
    pub fn validator<F>(mut self, validator: F) -> Self
    where
        F: Fn(&[Value]) -> Result<(), BoxError> + Send + Sync + 'static,
    {
        self.set_validator(validator);
        self
    }

    /// Set the parameter validator (mutable version).
    pub fn set_validator<F>(&mut self, validator: F) -> &mut Self
    where
        F: Fn(&[Value]) -> Result<(), BoxError> + Send + Sync + 'static,
    {
        self.validator = Some(Arc::new(validator));
        self
    }

    /// Build the invoker.
    pub fn build(self) -> Result<ActionInvoker, RemotingError> {
        let manager = self.manager.ok_or(RemotingError::InvalidManager)?;
        Ok(ActionInvoker {
            manager,
            options: self.options,
            validator: self.validator,
            hooks: Arc::default(),
        })
    }
}

impl fmt::Debug for InvokerBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InvokerBuilder")
            .field("manager", &self.manager.is_some())
            .field("options", &self.options)
            .field("validator", &self.validator.is_some())
            .finish()
    }
}
