//! Hook registry: one ordered hook list per phase.

use remoting_core::{FailedReply, Hook, HookError, InvocationContext, Payload, Phase, Reply};
use std::{fmt, sync::Arc};

/// An ordered list of hooks for one phase.
///
/// Insertion order is firing order. The same hook may be added more than
/// once; each entry fires.
pub struct HookList<P: Payload> {
    phase: Phase,
    hooks: Vec<Arc<dyn Hook<P>>>,
}

impl<P: Payload> HookList<P> {
    /// Create an empty list for `phase`.
    pub fn new(phase: Phase) -> Self {
        Self {
            phase,
            hooks: Vec::new(),
        }
    }

    /// The phase this list belongs to.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Append a hook.
    pub fn add<H: Hook<P>>(&mut self, hook: H) -> &mut Self {
        self.hooks.push(Arc::new(hook));
        self
    }

    /// Append an already shared hook.
    pub fn add_shared(&mut self, hook: Arc<dyn Hook<P>>) -> &mut Self {
        self.hooks.push(hook);
        self
    }

    /// Append several hooks, in order.
    pub fn extend<I>(&mut self, hooks: I) -> &mut Self
    where
        I: IntoIterator<Item = Arc<dyn Hook<P>>>,
    {
        self.hooks.extend(hooks);
        self
    }

    /// Remove hooks.
    ///
    /// With `None`, every hook is removed. With a name, every hook declaring
    /// that name is removed, including adjacent duplicates; anonymous hooks
    /// never match. Returns the number of removed hooks.
    pub fn remove(&mut self, name: Option<&str>) -> usize {
        let before = self.hooks.len();
        match name {
            None => self.hooks.clear(),
            Some(name) => self.hooks.retain(|hook| hook.name() != Some(name)),
        }
        before - self.hooks.len()
    }

    /// Remove every hook.
    pub fn clear(&mut self) {
        self.hooks.clear();
    }

    /// Fire every hook in order with `payload`.
    ///
    /// Stops at the first hook error; the hooks after it do not run.
    pub fn fire(&self, payload: &P) -> Result<(), HookError> {
        for hook in &self.hooks {
            hook.call(payload)
                .map_err(|source| HookError::new(self.phase, hook.name(), source))?;
        }
        Ok(())
    }

    /// The registered hooks, in firing order.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<dyn Hook<P>>> {
        self.hooks.iter()
    }

    /// Declared names in firing order (`None` for anonymous hooks).
    pub fn names(&self) -> Vec<Option<&str>> {
        self.hooks.iter().map(|hook| hook.name()).collect()
    }

    /// Number of registered hooks.
    pub fn len(&self) -> usize {
        self.hooks.len()
    }

    /// Whether no hooks are registered.
    pub fn is_empty(&self) -> bool {
        self.hooks.is_empty()
    }
}

// Clones share the hooks, not the list.
impl<P: Payload> Clone for HookList<P> {
    fn clone(&self) -> Self {
        Self {
            phase: self.phase,
            hooks: self.hooks.clone(),
        }
    }
}

impl<P: Payload> fmt::Debug for HookList<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HookList")
            .field("phase", &self.phase)
            .field("hooks", &self.names())
            .finish()
    }
}

/// The four hook lists of an invoker.
///
/// The registry is plain in-memory state with no synchronization of its own.
/// [`ActionInvoker`](crate::ActionInvoker) keeps it behind a lock and hands
/// out copies from its read accessors.
#[derive(Clone, Debug)]
pub struct HookRegistry {
    prior: HookList<InvocationContext>,
    success: HookList<Reply>,
    failure: HookList<FailedReply>,
    complete: HookList<Reply>,
}

impl Default for HookRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl HookRegistry {
    /// Create a registry with all four phases empty.
    pub fn new() -> Self {
        Self {
            prior: HookList::new(Phase::BeforeSend),
            success: HookList::new(Phase::Success),
            failure: HookList::new(Phase::Failure),
            complete: HookList::new(Phase::Complete),
        }
    }

    /// Before-send hooks.
    pub fn prior(&self) -> &HookList<InvocationContext> {
        &self.prior
    }

    /// Success hooks.
    pub fn success(&self) -> &HookList<Reply> {
        &self.success
    }

    /// Failure hooks.
    pub fn failure(&self) -> &HookList<FailedReply> {
        &self.failure
    }

    /// Complete hooks.
    pub fn complete(&self) -> &HookList<Reply> {
        &self.complete
    }

    /// Mutable before-send hooks.
    pub fn prior_mut(&mut self) -> &mut HookList<InvocationContext> {
        &mut self.prior
    }

    /// Mutable success hooks.
    pub fn success_mut(&mut self) -> &mut HookList<Reply> {
        &mut self.success
    }

    /// Mutable failure hooks.
    pub fn failure_mut(&mut self) -> &mut HookList<FailedReply> {
        &mut self.failure
    }

    /// Mutable complete hooks.
    pub fn complete_mut(&mut self) -> &mut HookList<Reply> {
        &mut self.complete
    }

    /// Remove hooks from one phase. See [`HookList::remove`].
    pub fn remove(&mut self, phase: Phase, name: Option<&str>) -> usize {
        match phase {
            Phase::BeforeSend => self.prior.remove(name),
            Phase::Success => self.success.remove(name),
            Phase::Failure => self.failure.remove(name),
            Phase::Complete => self.complete.remove(name),
        }
    }

    /// Empty all four phases.
    pub fn remove_all(&mut self) {
        for phase in Phase::ALL {
            self.remove(phase, None);
        }
    }

    /// Number of hooks registered for `phase`.
    pub fn len(&self, phase: Phase) -> usize {
        match phase {
            Phase::BeforeSend => self.prior.len(),
            Phase::Success => self.success.len(),
            Phase::Failure => self.failure.len(),
            Phase::Complete => self.complete.len(),
        }
    }

    /// Whether every phase is empty.
    pub fn is_empty(&self) -> bool {
        Phase::ALL.into_iter().all(|phase| self.len(phase) == 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use remoting_core::{RemoteEvent, hook_fn, named};
    use serde_json::json;
    use std::sync::Mutex;

    fn reply() -> Reply {
        Reply {
            response: json!({ "id": 7 }),
            event: RemoteEvent::ok(),
        }
    }

    type Log = Arc<Mutex<Vec<(&'static str, Reply)>>>;

    fn recorder(label: &'static str, log: &Log) -> impl Hook<Reply> + use<> {
        let log = log.clone();
        named(label, move |reply: &Reply| {
            log.lock().unwrap().push((label, reply.clone()));
            Ok(())
        })
    }

    #[test]
    fn test_fire_in_insertion_order_with_same_payload() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut list = HookList::new(Phase::Success);
        list.add(recorder("a", &log))
            .add(recorder("b", &log))
            .add(recorder("c", &log));

        list.fire(&reply()).unwrap();

        let log = log.lock().unwrap();
        let order: Vec<_> = log.iter().map(|(label, _)| *label).collect();
        assert_eq!(order, vec!["a", "b", "c"]);
        assert!(log.iter().all(|(_, payload)| *payload == reply()));
    }

    #[test]
    fn test_fire_empty_is_noop() {
        let list: HookList<Reply> = HookList::new(Phase::Complete);
        assert!(list.fire(&reply()).is_ok());
    }

    #[test]
    fn test_fire_stops_at_first_error() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut list = HookList::new(Phase::Success);
        list.add(recorder("a", &log))
            .add(named("broken", |_: &Reply| Err("boom".into())))
            .add(recorder("c", &log));

        let err = list.fire(&reply()).unwrap_err();

        assert_eq!(err.phase, Phase::Success);
        assert_eq!(err.hook.as_deref(), Some("broken"));
        assert_eq!(log.lock().unwrap().len(), 1);
    }

    #[test]
    fn test_remove_without_name_empties_phase() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut list = HookList::new(Phase::Success);
        list.add(recorder("a", &log));
        list.add(hook_fn(|_: &Reply| Ok(())));

        assert_eq!(list.remove(None), 2);
        assert!(list.is_empty());
        list.fire(&reply()).unwrap();
        assert!(log.lock().unwrap().is_empty());
    }

    #[test]
    fn test_remove_by_name_removes_adjacent_duplicates() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut list = HookList::new(Phase::Success);
        list.add(recorder("dup", &log))
            .add(recorder("dup", &log))
            .add(recorder("keep", &log))
            .add(recorder("dup", &log))
            .add(hook_fn(|_: &Reply| Ok(())));

        assert_eq!(list.remove(Some("dup")), 3);
        assert_eq!(list.names(), vec![Some("keep"), None]);
    }

    #[test]
    fn test_remove_unknown_name_is_noop() {
        let mut list = HookList::new(Phase::Failure);
        list.add(named("x", |_: &FailedReply| Ok(())));
        assert_eq!(list.remove(Some("y")), 0);
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn test_registry_remove_all() {
        let mut registry = HookRegistry::new();
        registry
            .prior_mut()
            .add(hook_fn(|_: &InvocationContext| Ok(())));
        registry.success_mut().add(hook_fn(|_: &Reply| Ok(())));
        registry
            .failure_mut()
            .add(hook_fn(|_: &FailedReply| Ok(())));
        registry.complete_mut().add(hook_fn(|_: &Reply| Ok(())));
        assert_eq!(registry.len(Phase::Complete), 1);

        registry.remove_all();
        assert!(registry.is_empty());
    }

    #[test]
    fn test_registry_remove_targets_one_phase() {
        let mut registry = HookRegistry::new();
        registry
            .success_mut()
            .add(named("same", |_: &Reply| Ok(())));
        registry
            .complete_mut()
            .add(named("same", |_: &Reply| Ok(())));

        assert_eq!(registry.remove(Phase::Success, Some("same")), 1);
        assert_eq!(registry.len(Phase::Success), 0);
        assert_eq!(registry.len(Phase::Complete), 1);
    }

    #[test]
    fn test_clone_is_a_detached_copy() {
        let mut registry = HookRegistry::new();
        registry.success_mut().add(named("a", |_: &Reply| Ok(())));

        let snapshot = registry.clone();
        registry.success_mut().clear();

        assert_eq!(snapshot.success().names(), vec![Some("a")]);
        assert!(registry.success().is_empty());
    }
}
