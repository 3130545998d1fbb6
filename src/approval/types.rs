// Core types for the approval workflow state machine

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::errors::ApprovalError;

/// What an actor is allowed to do on a given step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Permission {
    /// No say on this step
    #[default]
    None,
    /// Counts towards the step's vote threshold
    Vote,
    /// Advances the step immediately
    Force,
}

impl Permission {
    pub const ALL: [Permission; 3] = [Permission::None, Permission::Vote, Permission::Force];
    pub const ACTIONABLE: [Permission; 2] = [Permission::Vote, Permission::Force];

    pub fn is_actionable(&self) -> bool {
        !matches!(self, Permission::None)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Permission::None => "none",
            Permission::Vote => "vote",
            Permission::Force => "force",
        }
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Permission {
    type Err = ApprovalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "none" => Ok(Permission::None),
            "vote" => Ok(Permission::Vote),
            "force" => Ok(Permission::Force),
            other => Err(ApprovalError::UnknownPermission(other.to_string())),
        }
    }
}

/// Why an approve/reject call left the workflow untouched
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IgnoreReason {
    /// The workflow already reached its terminal step
    Finished,
    /// The actor is deactivated
    Inactive,
    /// The actor holds no usable permission on the current step
    NotPermitted,
    /// The actor already voted on the current step
    AlreadyVoted,
}

/// Outcome of a single approve/reject call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Transition {
    Ignored { reason: IgnoreReason },
    /// Vote stored, threshold not reached yet
    VoteRecorded {
        step: usize,
        votes: usize,
        required: usize,
    },
    /// Moved forward exactly one step
    Advanced { from: usize, to: usize, forced: bool },
    /// Moved back one step (or restarted the first step)
    RolledBack { from: usize, to: usize },
}

impl Transition {
    pub(crate) fn ignored(reason: IgnoreReason) -> Self {
        Transition::Ignored { reason }
    }

    /// True when the current step index moved, or a rollback restarted voting.
    pub fn changed_step(&self) -> bool {
        matches!(self, Transition::Advanced { .. } | Transition::RolledBack { .. })
    }

    pub fn is_ignored(&self) -> bool {
        matches!(self, Transition::Ignored { .. })
    }
}

impl fmt::Display for Transition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Transition::Ignored { reason } => write!(f, "ignored ({reason:?})"),
            Transition::VoteRecorded {
                step,
                votes,
                required,
            } => write!(f, "vote recorded on step {step} ({votes}/{required})"),
            Transition::Advanced { from, to, forced } => {
                if *forced {
                    write!(f, "forced from step {from} to {to}")
                } else {
                    write!(f, "advanced from step {from} to {to}")
                }
            }
            Transition::RolledBack { from, to } => write!(f, "rolled back from step {from} to {to}"),
        }
    }
}

/// Per-step view used in snapshots
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepStatus {
    pub index: usize,
    pub required: usize,
    pub votes: usize,
}

/// Read-only view of a workflow, suitable for printing or JSON output
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkflowSnapshot {
    pub current_step: usize,
    pub step_count: usize,
    pub finished: bool,
    pub steps: Vec<StepStatus>,
}
