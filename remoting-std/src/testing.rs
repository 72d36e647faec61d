//! Testing utilities for remoting.
//!
//! This module provides utilities to make testing invokers and hooks easier.
//!
//! # Features
//!
//! - [`MockManager`]: A manager that records calls and answers on demand
//! - [`RecordingHook`]: A hook that records every payload it receives
//! - [`FailingHook`]: A hook that always returns an error

use remoting_core::{
    ActionName, BoxError, Callback, Hook, HookError, Invocation, InvokeOptions, Manager, Payload,
    RemoteEvent,
};
use serde_json::Value;
use std::{
    collections::VecDeque,
    sync::{Arc, Mutex, MutexGuard, PoisonError},
};

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

// ============================================================================
// Mock Manager
// ============================================================================

/// One call received by a [`MockManager`].
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall {
    /// The action name.
    pub action: ActionName,
    /// The parameters.
    pub params: Vec<Value>,
    /// The options appended after the callback.
    pub options: Option<InvokeOptions>,
}

#[derive(Default)]
struct MockState {
    calls: Vec<RecordedCall>,
    pending: VecDeque<Callback>,
    auto_reply: Option<(Value, RemoteEvent)>,
    refusal: Option<String>,
    callback_errors: Vec<String>,
}

/// A manager that records every call.
///
/// By default callbacks are queued until [`respond`](Self::respond) is
/// called, which mimics the platform answering later. [`replying`] answers
/// every call immediately, from inside `invoke_action`.
///
/// Clones share state, so keep a clone to inspect the manager after handing
/// it to an invoker.
///
/// # Example
///
/// ```rust,ignore
/// let manager = MockManager::new();
/// let invoker = ActionInvoker::new(manager.clone());
///
/// invoker.send("Ctrl.run", vec![])?;
/// manager.respond(json!({ "id": 1 }), RemoteEvent::ok());
/// ```
///
/// [`replying`]: Self::replying
#[derive(Clone, Default)]
pub struct MockManager {
    state: Arc<Mutex<MockState>>,
}

impl MockManager {
    /// Create a manager that queues callbacks.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a manager that answers every call with `response` and `event`.
    pub fn replying(response: Value, event: RemoteEvent) -> Self {
        let manager = Self::new();
        lock(&manager.state).auto_reply = Some((response, event));
        manager
    }

    /// Create a manager that refuses every call.
    pub fn refusing(message: impl Into<String>) -> Self {
        let manager = Self::new();
        lock(&manager.state).refusal = Some(message.into());
        manager
    }

    /// Calls received so far.
    pub fn calls(&self) -> Vec<RecordedCall> {
        lock(&self.state).calls.clone()
    }

    /// Number of calls received.
    pub fn call_count(&self) -> usize {
        lock(&self.state).calls.len()
    }

    /// Number of callbacks waiting for a response.
    pub fn pending(&self) -> usize {
        lock(&self.state).pending.len()
    }

    /// Answer the oldest pending call.
    ///
    /// Returns `None` when nothing is pending, otherwise what the callback
    /// returned.
    pub fn respond(&self, response: Value, event: RemoteEvent) -> Option<Result<(), HookError>> {
        let callback = lock(&self.state).pending.pop_front()?;
        Some(callback.call(response, event))
    }

    /// Drop every pending callback without answering. Returns how many were
    /// dropped.
    pub fn abandon_pending(&self) -> usize {
        let dropped: Vec<Callback> = lock(&self.state).pending.drain(..).collect();
        dropped.len()
    }

    /// Errors returned by callbacks answered automatically.
    pub fn callback_errors(&self) -> Vec<String> {
        lock(&self.state).callback_errors.clone()
    }
}

impl Manager for MockManager {
    fn invoke_action(&self, invocation: Invocation) -> Result<(), BoxError> {
        let Invocation {
            action,
            params,
            callback,
            options,
        } = invocation;

        let auto_reply = {
            let mut state = lock(&self.state);
            if let Some(refusal) = &state.refusal {
                return Err(refusal.clone().into());
            }
            state.calls.push(RecordedCall {
                action,
                params,
                options,
            });
            state.auto_reply.clone()
        };

        // The lock is released before answering so hooks may send again.
        match auto_reply {
            Some((response, event)) => {
                if let Err(err) = callback.call(response, event) {
                    lock(&self.state).callback_errors.push(err.to_string());
                }
            }
            None => lock(&self.state).pending.push_back(callback),
        }
        Ok(())
    }
}

// ============================================================================
// Recording Hook
// ============================================================================

/// A hook that records all payloads it receives.
///
/// # Example
///
/// ```rust,ignore
/// let recorder = RecordingHook::<Reply>::new();
/// invoker.on_success(recorder.clone());
///
/// // ... send and respond ...
///
/// assert_eq!(recorder.count(), 1);
/// ```
pub struct RecordingHook<P> {
    name: Option<String>,
    calls: Arc<Mutex<Vec<P>>>,
}

impl<P: Clone> RecordingHook<P> {
    /// Create an anonymous recording hook.
    pub fn new() -> Self {
        Self {
            name: None,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Create a recording hook with a declared name.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Get a clone of the recorded payloads.
    pub fn calls(&self) -> Vec<P> {
        lock(&self.calls).clone()
    }

    /// Get the number of recorded payloads.
    pub fn count(&self) -> usize {
        lock(&self.calls).len()
    }

    /// Clear all recorded payloads.
    pub fn clear(&self) {
        lock(&self.calls).clear();
    }
}

impl<P: Clone> Default for RecordingHook<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P> Clone for RecordingHook<P> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            calls: self.calls.clone(),
        }
    }
}

impl<P: Payload + Clone> Hook<P> for RecordingHook<P> {
    fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    fn call(&self, payload: &P) -> Result<(), BoxError> {
        lock(&self.calls).push(payload.clone());
        Ok(())
    }
}

// ============================================================================
// Failing Hook
// ============================================================================

/// A hook that always fails with the same message.
#[derive(Debug, Clone)]
pub struct FailingHook {
    name: Option<String>,
    message: String,
}

impl FailingHook {
    /// Create an anonymous failing hook.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            name: None,
            message: message.into(),
        }
    }

    /// Give the hook a name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}

impl<P: Payload> Hook<P> for FailingHook {
    fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    fn call(&self, _payload: &P) -> Result<(), BoxError> {
        Err(self.message.clone().into())
    }
}
