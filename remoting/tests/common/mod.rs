#![allow(dead_code)]

use remoting::{FailedReply, Hook, InvocationContext, Reply, testing::MockManager};
use std::sync::{Arc, Mutex};

// ============================================================================
// Test Fixtures
// ============================================================================

pub fn remote_with(manager: &MockManager) -> remoting::Remote {
    let mut provider = remoting::RemoteProvider::new();
    provider.set_manager(manager.clone());
    provider.get().expect("manager is configured")
}

// ============================================================================
// Test Hooks
// ============================================================================

/// Records `(label, phase)` into a shared journal for every phase it sees.
#[derive(Clone)]
pub struct JournalHook {
    pub label: &'static str,
    pub journal: Arc<Mutex<Vec<String>>>,
}

impl JournalHook {
    pub fn new(label: &'static str, journal: &Arc<Mutex<Vec<String>>>) -> Self {
        Self {
            label,
            journal: journal.clone(),
        }
    }

    fn record(&self, phase: &str) {
        self.journal
            .lock()
            .unwrap()
            .push(format!("{}:{}", self.label, phase));
    }
}

impl Hook<InvocationContext> for JournalHook {
    fn name(&self) -> Option<&str> {
        Some(self.label)
    }

    fn call(&self, _payload: &InvocationContext) -> Result<(), remoting::BoxError> {
        self.record("prior");
        Ok(())
    }
}

impl Hook<Reply> for JournalHook {
    fn name(&self) -> Option<&str> {
        Some(self.label)
    }

    fn call(&self, _payload: &Reply) -> Result<(), remoting::BoxError> {
        self.record("reply");
        Ok(())
    }
}

impl Hook<FailedReply> for JournalHook {
    fn name(&self) -> Option<&str> {
        Some(self.label)
    }

    fn call(&self, _payload: &FailedReply) -> Result<(), remoting::BoxError> {
        self.record("failure");
        Ok(())
    }
}
