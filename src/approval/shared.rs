// Serialized access to one workflow from many callers

use std::sync::{Arc, Mutex, MutexGuard};

use super::errors::ApprovalError;
use super::traits::ActorRef;
use super::types::{Transition, WorkflowSnapshot};
use super::workflow::ApprovalWorkflow;

/// A workflow behind a single lock.
///
/// Each approve/reject reads the step, queries the actor and mutates the tally
/// as one critical section. Clones share the same instance.
#[derive(Debug, Clone)]
pub struct SharedWorkflow {
    inner: Arc<Mutex<ApprovalWorkflow>>,
}

impl SharedWorkflow {
    pub fn new(workflow: ApprovalWorkflow) -> Self {
        Self {
            inner: Arc::new(Mutex::new(workflow)),
        }
    }

    pub fn approve(&self, actor: &ActorRef) -> Result<Transition, ApprovalError> {
        self.lock()?.approve(actor)
    }

    pub fn reject(&self, actor: &ActorRef) -> Result<Transition, ApprovalError> {
        self.lock()?.reject(actor)
    }

    pub fn is_finished(&self) -> Result<bool, ApprovalError> {
        Ok(self.lock()?.is_finished())
    }

    pub fn snapshot(&self) -> Result<WorkflowSnapshot, ApprovalError> {
        Ok(self.lock()?.snapshot())
    }

    /// Run several operations under one lock acquisition.
    pub fn with<R>(&self, f: impl FnOnce(&mut ApprovalWorkflow) -> R) -> Result<R, ApprovalError> {
        let mut guard = self.lock()?;
        Ok(f(&mut guard))
    }

    fn lock(&self) -> Result<MutexGuard<'_, ApprovalWorkflow>, ApprovalError> {
        self.inner.lock().map_err(|_| ApprovalError::LockPoisoned)
    }
}

impl From<ApprovalWorkflow> for SharedWorkflow {
    fn from(workflow: ApprovalWorkflow) -> Self {
        Self::new(workflow)
    }
}
