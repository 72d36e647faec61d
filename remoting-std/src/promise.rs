//! Promise adapter: one remote call as a future.
//!
//! The resolve and reject hooks are scoped to the call they were created for
//! (see [`ActionInvoker::send_scoped`]), so one adapter can issue any number
//! of calls without earlier calls' hooks firing again.

use crate::{invoker::ActionInvoker, registry::HookRegistry};
use futures::{FutureExt, channel::oneshot};
use remoting_core::{FailedReply, IntoActionName, RemotingError, Reply, named};
use serde_json::Value;
use std::{
    future::Future,
    pin::Pin,
    sync::{Arc, Mutex, PoisonError},
    task::{Context, Poll},
};
use thiserror::Error;

type Settled = Result<Reply, FailedReply>;
type Slot = Arc<Mutex<Option<oneshot::Sender<Settled>>>>;

/// Why a [`Pending`] call did not resolve.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Rejection {
    /// The remote call failed.
    #[error("remote action failed: {}", .0.error)]
    Failed(FailedReply),

    /// The manager dropped the callback without answering.
    #[error("manager dropped the callback without responding")]
    Abandoned,
}

impl Rejection {
    /// The failed reply, if the call failed remotely.
    pub fn failure(&self) -> Option<&FailedReply> {
        match self {
            Rejection::Failed(failed) => Some(failed),
            Rejection::Abandoned => None,
        }
    }
}

/// A remote call in flight.
///
/// Resolves with the [`Reply`] on success and rejects with
/// [`Rejection::Failed`] on failure. If the manager keeps the callback but
/// never calls it, the future never completes.
#[derive(Debug)]
#[must_use = "futures do nothing unless polled"]
pub struct Pending {
    rx: oneshot::Receiver<Settled>,
}

impl Future for Pending {
    type Output = Result<Reply, Rejection>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        self.rx.poll_unpin(cx).map(|settled| match settled {
            Ok(Ok(reply)) => Ok(reply),
            Ok(Err(failed)) => Err(Rejection::Failed(failed)),
            Err(oneshot::Canceled) => Err(Rejection::Abandoned),
        })
    }
}

/// Wraps an [`ActionInvoker`] so each call returns a [`Pending`] future.
///
/// # Example
///
/// ```rust,ignore
/// let adapter = PromiseAdapter::new(ActionInvoker::new(bridge));
///
/// match adapter.send("AccountController.load", vec![json!("001xx")])?.await {
///     Ok(reply) => render(&reply.response),
///     Err(rejection) => report(&rejection),
/// }
/// ```
#[derive(Debug)]
pub struct PromiseAdapter {
    invoker: ActionInvoker,
}

impl PromiseAdapter {
    /// Wrap an invoker.
    pub fn new(invoker: ActionInvoker) -> Self {
        Self { invoker }
    }

    /// The wrapped invoker, for registering shared hooks.
    pub fn invoker(&self) -> &ActionInvoker {
        &self.invoker
    }

    /// Unwrap the invoker.
    pub fn into_invoker(self) -> ActionInvoker {
        self.invoker
    }

    /// Send a remote action and return a future for its outcome.
    ///
    /// Errors raised before dispatch are returned here, not through the
    /// future. Shared hooks on the invoker fire as usual, and the future
    /// settles even if one of them fails.
    pub fn send<N: IntoActionName>(
        &self,
        action: N,
        params: Vec<Value>,
    ) -> Result<Pending, RemotingError> {
        let (tx, rx) = oneshot::channel();
        let slot: Slot = Arc::new(Mutex::new(Some(tx)));

        let mut scoped = HookRegistry::new();
        let resolve = Arc::clone(&slot);
        scoped.success_mut().add(named("resolve", move |reply: &Reply| {
            settle(&resolve, Ok(reply.clone()));
            Ok(())
        }));
        scoped.failure_mut().add(named("reject", move |failed: &FailedReply| {
            settle(&slot, Err(failed.clone()));
            Ok(())
        }));

        self.invoker.send_scoped(action, params, scoped)?;
        Ok(Pending { rx })
    }
}

impl From<ActionInvoker> for PromiseAdapter {
    fn from(invoker: ActionInvoker) -> Self {
        Self::new(invoker)
    }
}

// First settlement wins.
fn settle(slot: &Slot, settled: Settled) {
    let sender = slot.lock().unwrap_or_else(PoisonError::into_inner).take();
    if let Some(sender) = sender {
        // The caller may have dropped the future.
        let _ = sender.send(settled);
    }
}
