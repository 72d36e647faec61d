//! Error types for remoting.
//!
//! This module provides a structured error hierarchy using `thiserror`:
//!
//! - [`RemotingError`] - Synchronous errors returned from `send`
//! - [`HookError`] - Errors from individual hooks
//! - [`RemoteFailure`] - The normalized error for a failed remote call
//!
//! `RemotingError` and `HookError` are returned at the call site. A
//! `RemoteFailure` is never returned from `send`; it only travels through the
//! failure phase and the promise rejection.

use crate::phase::Phase;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

/// A boxed error type for dynamic error handling.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors raised before the remote call is handed to the manager.
#[derive(Error, Debug)]
pub enum RemotingError {
    /// No remoting manager was configured.
    #[error("remoting manager not defined")]
    InvalidManager,

    /// The action name was not a string.
    #[error("action name must be a string, got {0}")]
    InvalidActionNameType(&'static str),

    /// The action name did not have 2 or 3 non-empty segments.
    #[error("invalid remote action supplied: {0}")]
    InvalidActionNameFormat(String),

    /// The configured validator rejected the parameters.
    #[error(transparent)]
    Validation(BoxError),

    /// A before-send hook failed; the manager was not invoked.
    #[error("hook error: {0}")]
    Hook(#[from] HookError),

    /// The manager refused the invocation.
    #[error("manager failed to dispatch: {0}")]
    Dispatch(#[source] BoxError),
}

/// An error returned by a hook while a phase was firing.
///
/// The hooks registered after the failing one did not run.
#[derive(Error, Debug)]
#[error("{phase} hook `{}` failed: {source}", .hook.as_deref().unwrap_or("<anonymous>"))]
pub struct HookError {
    /// Phase that was firing.
    pub phase: Phase,
    /// Declared name of the failing hook, if any.
    pub hook: Option<String>,
    /// The error returned by the hook.
    #[source]
    pub source: BoxError,
}

impl HookError {
    /// Create a new hook error.
    pub fn new(phase: Phase, hook: Option<&str>, source: BoxError) -> Self {
        Self {
            phase,
            hook: hook.map(str::to_owned),
            source,
        }
    }
}

/// The normalized error built for a failed remote call.
#[derive(Error, Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
#[error("{message}")]
pub struct RemoteFailure {
    /// Message reported by the platform event.
    pub message: String,
    /// The raw response.
    pub result: Value,
    /// Platform stack trace, present only for `exception` events.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub apex_stack_trace: Option<String>,
}
