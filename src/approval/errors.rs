use thiserror::Error;

/// Errors raised at the boundary between the workflow and its collaborators.
///
/// Permission mismatches, inactive actors and repeated votes are not errors;
/// they come back as `Transition::Ignored`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApprovalError {
    #[error("Step {step} is out of range for a permission table covering {steps} step(s)")]
    StepOutOfRange { step: usize, steps: usize },
    #[error("Actor can vote on step {step}, but the workflow only has {steps} step(s)")]
    InconsistentConfiguration { step: usize, steps: usize },
    #[error("Unknown permission '{0}' (expected one of: none, vote, force)")]
    UnknownPermission(String),
    #[error("Workflow lock poisoned by a panicking holder")]
    LockPoisoned,
}
