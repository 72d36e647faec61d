//! # remoting - Hooked client for callback-based remote actions
//!
//! `remoting` standardizes calls to named remote procedures exposed by a
//! host bridge (the [`Manager`]). Every call goes through the same pipeline:
//!
//! 1. the action name (`Controller.Method` or `Namespace.Controller.Method`)
//!    is validated,
//! 2. before-send hooks observe the outgoing arguments,
//! 3. the manager performs the call and answers through a callback,
//! 4. the response is classified and success or failure hooks fire,
//! 5. complete hooks fire.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use remoting::prelude::*;
//! use serde_json::json;
//!
//! let mut provider = RemoteProvider::new();
//! provider.set_manager(bridge);
//! let remote = provider.get()?;
//!
//! remote.on_failure(named("report", |failed: &FailedReply| {
//!     eprintln!("{}", failed.error);
//!     Ok(())
//! }));
//!
//! let reply = remote.promise("AccountController.load", vec![json!("001xx")])?.await?;
//! ```

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

pub mod provider;

// Action names
pub use remoting_core::{ActionName, IntoActionName};

// Hooks
pub use remoting_core::{FnHook, Hook, Payload, Phase, hook_fn, named};

// Payloads
pub use remoting_core::{Argument, FailedReply, InvocationContext, Reply};

// Errors
pub use remoting_core::{BoxError, HookError, RemoteFailure, RemotingError};

// Manager
pub use remoting_core::{Callback, Invocation, InvokeOptions, Manager, RemoteEvent};

pub use remoting_std::{
    ActionInvoker, HookList, HookRegistry, InvokerBuilder, Outcome, Pending, PromiseAdapter,
    Rejection, Validator, classify,
};

pub use provider::{Remote, RemoteProvider};

/// Standard hook implementations.
pub mod hooks {
    pub use remoting_std::hooks::LoggingHook;
}

/// Testing utilities.
pub mod testing {
    pub use remoting_std::testing::{FailingHook, MockManager, RecordedCall, RecordingHook};
}

/// Prelude module - common imports for remoting.
///
/// # Usage
///
/// ```rust,ignore
/// use remoting::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{
        ActionInvoker, ActionName, BoxError, FailedReply, Hook, InvocationContext, InvokeOptions,
        Manager, PromiseAdapter, Rejection, Remote, RemoteEvent, RemoteProvider, RemotingError,
        Reply, hook_fn, hooks::LoggingHook, named,
    };
}
