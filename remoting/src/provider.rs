//! Provider and runtime façade.
//!
//! [`RemoteProvider`] is configured once, typically during application
//! setup, and hands out a [`Remote`]: the object the rest of the application
//! uses to register hooks and send calls. Every method here delegates to
//! [`ActionInvoker`] or [`PromiseAdapter`] without adding behavior.
//!
//! ```rust,ignore
//! let mut provider = RemoteProvider::new();
//! provider
//!     .set_manager(bridge)
//!     .set_options(InvokeOptions::new().escape(false))
//!     .set_validator(|params| require_record_id(params));
//!
//! let remote = provider.get()?;
//! remote.on_failure(LoggingHook::named("failures"));
//! let reply = remote.promise("AccountController.load", vec![json!(id)])?.await?;
//! ```

use remoting_core::{
    BoxError, FailedReply, Hook, IntoActionName, InvocationContext, InvokeOptions, Manager,
    RemotingError, Reply,
};
use remoting_std::{ActionInvoker, HookRegistry, InvokerBuilder, Pending, PromiseAdapter};
use serde_json::Value;

/// Configuration applied before the first [`Remote`] is created.
#[derive(Debug, Clone, Default)]
pub struct RemoteProvider {
    builder: InvokerBuilder,
}

impl RemoteProvider {
    /// Create an unconfigured provider.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the manager that performs remote calls.
    pub fn set_manager<M: Manager>(&mut self, manager: M) -> &mut Self {
        self.builder.set_manager(manager);
        self
    }

    /// Set the options appended to every call.
    pub fn set_options(&mut self, options: InvokeOptions) -> &mut Self {
        self.builder.set_options(options);
        self
    }

    /// Set the parameter validator. It should return an error for
    /// parameters that must not be sent.
    pub fn set_validator<F>(&mut self, validator: F) -> &mut Self
    where
        F: Fn(&[Value]) -> Result<(), BoxError> + Send + Sync + 'static,
    {
        self.builder.set_validator(validator);
        self
    }

    /// Create a [`Remote`] from the current configuration.
    ///
    /// Each call creates a new `Remote` with its own, empty hooks.
    pub fn get(&self) -> Result<Remote, RemotingError> {
        let invoker = self.builder.clone().build()?;

        #[cfg(feature = "tracing")]
        tracing::debug!(options = ?invoker.options(), "remote created");

        Ok(Remote::from(invoker))
    }
}

/// Runtime object for registering hooks and sending calls.
#[derive(Debug)]
pub struct Remote {
    adapter: PromiseAdapter,
}

impl Remote {
    /// The underlying invoker.
    pub fn invoker(&self) -> &ActionInvoker {
        self.adapter.invoker()
    }

    /// A copy of the registered hooks.
    pub fn hooks(&self) -> HookRegistry {
        self.invoker().hooks()
    }

    /// Register a before-send hook.
    pub fn on_prior<H: Hook<InvocationContext>>(&self, hook: H) -> &Self {
        self.invoker().on_prior(hook);
        self
    }

    /// Register a success hook.
    pub fn on_success<H: Hook<Reply>>(&self, hook: H) -> &Self {
        self.invoker().on_success(hook);
        self
    }

    /// Register a failure hook.
    pub fn on_failure<H: Hook<FailedReply>>(&self, hook: H) -> &Self {
        self.invoker().on_failure(hook);
        self
    }

    /// Register a complete hook.
    pub fn on_complete<H: Hook<Reply>>(&self, hook: H) -> &Self {
        self.invoker().on_complete(hook);
        self
    }

    /// Remove before-send hooks by name, or all of them with `None`.
    pub fn off_prior(&self, name: Option<&str>) -> &Self {
        self.invoker().off_prior(name);
        self
    }

    /// Remove success hooks by name, or all of them with `None`.
    pub fn off_success(&self, name: Option<&str>) -> &Self {
        self.invoker().off_success(name);
        self
    }

    /// Remove failure hooks by name, or all of them with `None`.
    pub fn off_failure(&self, name: Option<&str>) -> &Self {
        self.invoker().off_failure(name);
        self
    }

    /// Remove complete hooks by name, or all of them with `None`.
    pub fn off_complete(&self, name: Option<&str>) -> &Self {
        self.invoker().off_complete(name);
        self
    }

    /// Remove every hook.
    pub fn off_all(&self) -> &Self {
        self.invoker().off_all();
        self
    }

    /// Send a call; the outcome goes to the hooks.
    pub fn send<N: IntoActionName>(
        &self,
        action: N,
        params: Vec<Value>,
    ) -> Result<(), RemotingError> {
        self.invoker().send(action, params)
    }

    /// Send a call and get a future for its outcome.
    pub fn promise<N: IntoActionName>(
        &self,
        action: N,
        params: Vec<Value>,
    ) -> Result<Pending, RemotingError> {
        self.adapter.send(action, params)
    }
}

impl From<ActionInvoker> for Remote {
    fn from(invoker: ActionInvoker) -> Self {
        Self {
            adapter: PromiseAdapter::new(invoker),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use remoting_core::RemoteEvent;
    use remoting_std::testing::{MockManager, RecordingHook};
    use serde_json::json;

    #[test]
    fn test_get_without_manager_fails() {
        let err = RemoteProvider::new().get().unwrap_err();
        assert!(matches!(err, RemotingError::InvalidManager));
    }

    #[test]
    fn test_each_remote_has_its_own_hooks() {
        let mut provider = RemoteProvider::new();
        provider.set_manager(MockManager::new());

        let first = provider.get().unwrap();
        let second = provider.get().unwrap();
        first.on_success(RecordingHook::<Reply>::new());

        assert_eq!(first.hooks().success().len(), 1);
        assert!(second.hooks().is_empty());
    }

    #[test]
    fn test_configuration_reaches_invoker() {
        let manager = MockManager::replying(json!({}), RemoteEvent::ok());
        let mut provider = RemoteProvider::new();
        provider
            .set_manager(manager.clone())
            .set_options(InvokeOptions::new().buffer(false))
            .set_validator(|params| match params.first() {
                Some(Value::String(_)) => Ok(()),
                _ => Err("first parameter must be a record id".into()),
            });
        let remote = provider.get().unwrap();

        assert!(matches!(
            remote.send("Ctrl.run", vec![json!(1)]),
            Err(RemotingError::Validation(_))
        ));
        remote.send("Ctrl.run", vec![json!("001")]).unwrap();

        let calls = manager.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].options, Some(InvokeOptions::new().buffer(false)));
    }

    #[test]
    fn test_off_methods_chain() {
        let mut provider = RemoteProvider::new();
        provider.set_manager(MockManager::new());
        let remote = provider.get().unwrap();

        remote
            .on_prior(RecordingHook::<InvocationContext>::named("p"))
            .on_success(RecordingHook::<Reply>::named("s"))
            .on_failure(RecordingHook::<FailedReply>::named("f"))
            .on_complete(RecordingHook::<Reply>::named("c"))
            .off_success(Some("s"))
            .off_failure(None);

        let hooks = remote.hooks();
        assert_eq!(hooks.prior().names(), vec![Some("p")]);
        assert!(hooks.success().is_empty());
        assert!(hooks.failure().is_empty());
        assert_eq!(hooks.complete().names(), vec![Some("c")]);

        remote.off_prior(Some("p")).off_complete(Some("c"));
        assert!(remote.hooks().is_empty());
    }
}
