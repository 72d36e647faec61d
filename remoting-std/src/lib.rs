//! # remoting-std
//!
//! Standard implementations for the remoting action adapter.
//!
//! This crate provides:
//! - **Hook registry**: [`HookList`], [`HookRegistry`]
//! - **Classification**: [`classify`], [`Outcome`]
//! - **Invocation**: [`ActionInvoker`], [`InvokerBuilder`]
//! - **Futures**: [`PromiseAdapter`], [`Pending`], [`Rejection`]
//! - **Standard hooks**: Logging
//! - **Testing utilities**: [`testing`]

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

// Re-export core traits
pub use remoting_core;

// Modules
pub mod classify;
pub mod hooks;
pub mod invoker;
pub mod promise;
pub mod registry;
pub mod testing;

pub use classify::{Outcome, classify};
pub use invoker::{ActionInvoker, InvokerBuilder, Validator};
pub use promise::{Pending, PromiseAdapter, Rejection};
pub use registry::{HookList, HookRegistry};
