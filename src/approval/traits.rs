// Actor capability interface - the only thing the workflow knows about who is acting

use std::sync::Arc;

use super::errors::ApprovalError;

/// Capability queries the workflow issues against whoever calls approve/reject.
///
/// The workflow only ever asks about its current step. Step-indexed queries are
/// fallible so that an actor configured for fewer steps than the workflow has
/// can report `ApprovalError::StepOutOfRange` instead of guessing.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
pub trait Actor: Send + Sync {
    /// Whether this actor's vote counts on `step`
    fn can_vote_on_step(&self, step: usize) -> Result<bool, ApprovalError>;

    /// Whether this actor may push `step` through on their own
    fn can_force_step(&self, step: usize) -> Result<bool, ApprovalError>;

    /// Inactive actors have no effect on any workflow
    fn is_active(&self) -> bool;
}

/// Shared handle to an actor. Vote sets compare these by allocation, not by value.
pub type ActorRef = Arc<dyn Actor>;

/// Address of the actor allocation, used as its identity inside vote sets
pub(crate) fn actor_key(actor: &ActorRef) -> usize {
    Arc::as_ptr(actor) as *const () as usize
}
