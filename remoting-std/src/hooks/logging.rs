//! Logging hook for call observation.

use remoting_core::{BoxError, Hook, Payload};
use std::fmt::Debug;

/// A hook that logs the payload of whatever phase it is attached to.
///
/// It works for every phase, so the same value can be registered on all four.
/// Uses `tracing` when the `tracing` feature is enabled and does nothing
/// otherwise.
///
/// # Example
///
/// ```rust,ignore
/// invoker
///     .on_prior(LoggingHook::new())
///     .on_failure(LoggingHook::named("failures"));
///
/// // later
/// invoker.off_prior(Some("logging"));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct LoggingHook {
    name: &'static str,
}

impl LoggingHook {
    /// Create a new `LoggingHook` named `logging`.
    pub fn new() -> Self {
        Self { name: "logging" }
    }

    /// Create a new `LoggingHook` with a custom name.
    ///
    /// The name appears in log records and is the name to remove it by.
    pub fn named(name: &'static str) -> Self {
        Self { name }
    }
}

impl Default for LoggingHook {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: Payload + Debug> Hook<P> for LoggingHook {
    fn name(&self) -> Option<&str> {
        Some(self.name)
    }

    fn call(&self, payload: &P) -> Result<(), BoxError> {
        #[cfg(feature = "tracing")]
        {
            tracing::debug!(hook = %self.name, payload = ?payload, "remote action hook");
        }
        #[cfg(not(feature = "tracing"))]
        {
            let _ = payload;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ActionInvoker, testing::MockManager};
    use remoting_core::{FailedReply, InvocationContext, RemoteEvent};
    use serde_json::json;

    #[test]
    fn test_logging_hook_continues() {
        let manager = MockManager::replying(json!({}), RemoteEvent::failed("nope"));
        let invoker = ActionInvoker::new(manager.clone());
        invoker
            .on_prior(LoggingHook::new())
            .on_failure(LoggingHook::new())
            .on_complete(LoggingHook::new());

        invoker.send("Ctrl.run", vec![]).unwrap();

        assert!(manager.callback_errors().is_empty());
    }

    #[test]
    fn test_logging_hook_removed_by_name() {
        let invoker = ActionInvoker::new(MockManager::new());
        invoker
            .on_success(LoggingHook::named("audit"))
            .on_success(LoggingHook::new());

        assert_eq!(invoker.off_success(Some("audit")), 1);
        assert_eq!(invoker.hooks().success().names(), vec![Some("logging")]);

        let hook = LoggingHook::new();
        assert_eq!(Hook::<InvocationContext>::name(&hook), Some("logging"));
        assert_eq!(Hook::<FailedReply>::name(&hook), Some("logging"));
    }
}
