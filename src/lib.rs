// Approval Workflow Library - multi-step vote/force approval state machine
// This exposes the core components for testing and integration

pub mod approval;
pub mod cli;
pub mod config;
pub mod scenario;
pub mod telemetry;

// Re-export key types for easy access
pub use approval::{
    Actor, ActorRef, ApprovalError, ApprovalWorkflow, IgnoreReason, Permission, PermissionTable,
    SharedWorkflow, Transition, User, WorkflowSnapshot,
};
pub use config::ApprovalWorkflowConfig;
pub use scenario::{Scenario, ScenarioError, ScenarioReport};
pub use telemetry::{create_workflow_span, generate_correlation_id, init_telemetry};
