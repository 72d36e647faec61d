//! # remoting-core
//!
//! Core traits and value types for the remoting action adapter.
//!
//! This crate has minimal dependencies and is designed to be imported by
//! manager implementations and hook libraries that don't need the full
//! `remoting-std` implementation.
//!
//! # Building Blocks
//!
//! - [`ActionName`]: a validated `Controller.Method` or
//!   `Namespace.Controller.Method` identifier
//! - [`Manager`]: the host bridge that performs the remote call and answers
//!   through a [`Callback`]
//! - [`Hook`]: a named callable fired at one [`Phase`] of a call
//! - [`Payload`]: what each phase hands its hooks ([`InvocationContext`],
//!   [`Reply`], [`FailedReply`])
//!
//! # Error Types
//!
//! - [`RemotingError`] - Errors returned synchronously from `send`
//! - [`HookError`] - A hook failed while its phase was firing
//! - [`RemoteFailure`] - The normalized error for a failed remote call

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

mod action;
mod error;
mod event;
mod hook;
mod manager;
mod options;
mod payload;
mod phase;

// Re-exports
pub use action::{ActionName, IntoActionName};
pub use error::{BoxError, HookError, RemoteFailure, RemotingError};
pub use event::{EXCEPTION, RemoteEvent};
pub use hook::{FnHook, Hook, hook_fn, named};
pub use manager::{Callback, Invocation, Manager};
pub use options::InvokeOptions;
pub use payload::{Argument, FailedReply, InvocationContext, Payload, Reply};
pub use phase::Phase;
