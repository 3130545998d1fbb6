// Approval Workflow Module - multi-step vote/force state machine
//
// The workflow owns the step configuration and per-step tallies; actors are
// injected through the `Actor` trait so the machine can be driven by real
// users, scenario files or mocks alike.

pub mod actor;
pub mod errors;
pub mod permissions;
pub mod shared;
pub mod traits;
pub mod types;
pub mod workflow;

#[cfg(test)]
pub mod mocks;


pub use actor::User;
pub use errors::ApprovalError;
pub use permissions::PermissionTable;
pub use shared::SharedWorkflow;
pub use traits::{Actor, ActorRef};
pub use types::{IgnoreReason, Permission, StepStatus, Transition, WorkflowSnapshot};
pub use workflow::ApprovalWorkflow;

#[cfg(feature = "testing")]
pub use traits::MockActor;
