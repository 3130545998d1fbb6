//! Scripted replays of approve/reject sequences.
//!
//! A scenario file declares the step thresholds, the actors taking part and the
//! ordered actions they perform:
//!
//! ```toml
//! steps = [2, 3, 1]
//!
//! [[actors]]
//! name = "admin"
//! permissions = ["force"]
//!
//! [[actions]]
//! actor = "admin"
//! action = "approve"
//! expect_step = 1
//! ```

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use thiserror::Error;
use tracing::{debug, info};

use crate::approval::{
    ActorRef, ApprovalError, ApprovalWorkflow, PermissionTable, Transition, User,
    WorkflowSnapshot,
};
use crate::telemetry::{create_workflow_span, generate_correlation_id};

#[derive(Debug, Error)]
pub enum ScenarioError {
    #[error("Failed to read scenario file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid scenario document: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Action #{index} refers to undeclared actor '{name}'")]
    UnknownActor { index: usize, name: String },
    #[error("Actor '{0}' is declared more than once")]
    DuplicateActor(String),
    #[error("Action #{index} expectation failed: expected {expected}, got {actual}")]
    ExpectationFailed {
        index: usize,
        expected: String,
        actual: String,
    },
    #[error("Action #{index} failed: {source}")]
    Approval {
        index: usize,
        #[source]
        source: ApprovalError,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionKind {
    Approve,
    Reject,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActorSpec {
    pub name: String,
    #[serde(default)]
    pub permissions: PermissionTable,
    #[serde(default = "default_active")]
    pub active: bool,
}

fn default_active() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionSpec {
    pub actor: String,
    pub action: ActionKind,
    /// Step index the workflow must be on after this action
    #[serde(default)]
    pub expect_step: Option<usize>,
    #[serde(default)]
    pub expect_finished: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scenario {
    #[serde(default)]
    pub name: Option<String>,
    pub steps: Vec<i64>,
    #[serde(default)]
    pub actors: Vec<ActorSpec>,
    #[serde(default)]
    pub actions: Vec<ActionSpec>,
}

/// One replayed action and where it left the workflow
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActionRecord {
    pub index: usize,
    pub actor: String,
    pub action: ActionKind,
    pub transition: Transition,
    pub current_step: usize,
    pub finished: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScenarioReport {
    pub name: Option<String>,
    pub correlation_id: String,
    pub actions: Vec<ActionRecord>,
    pub outcome: WorkflowSnapshot,
}

impl Scenario {
    pub fn from_toml_str(source: &str) -> Result<Self, ScenarioError> {
        Ok(toml::from_str(source)?)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ScenarioError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Replay every action against a fresh workflow, stopping at the first
    /// failed expectation or collaborator error.
    pub fn run(&self) -> Result<ScenarioReport, ScenarioError> {
        let correlation_id = generate_correlation_id();
        let span = create_workflow_span("scenario_run", Some(&correlation_id));
        let _enter = span.enter();

        let actors = self.build_actors()?;
        let mut workflow = ApprovalWorkflow::from_thresholds(&self.steps);
        info!(
            scenario = self.name.as_deref().unwrap_or("unnamed"),
            steps = workflow.step_count(),
            actions = self.actions.len(),
            "Replaying scenario"
        );

        let mut records = Vec::with_capacity(self.actions.len());
        for (index, spec) in self.actions.iter().enumerate() {
            let actor = actors
                .get(spec.actor.as_str())
                .ok_or_else(|| ScenarioError::UnknownActor {
                    index,
                    name: spec.actor.clone(),
                })?;

            let result = match spec.action {
                ActionKind::Approve => workflow.approve(actor),
                ActionKind::Reject => workflow.reject(actor),
            };
            let transition = result.map_err(|source| ScenarioError::Approval { index, source })?;
            debug!(index, actor = %spec.actor, %transition, "Action replayed");

            let record = ActionRecord {
                index,
                actor: spec.actor.clone(),
                action: spec.action,
                transition,
                current_step: workflow.current_step(),
                finished: workflow.is_finished(),
            };
            check_expectations(spec, &record)?;
            records.push(record);
        }

        Ok(ScenarioReport {
            name: self.name.clone(),
            correlation_id,
            actions: records,
            outcome: workflow.snapshot(),
        })
    }

    fn build_actors(&self) -> Result<HashMap<&str, ActorRef>, ScenarioError> {
        let mut actors = HashMap::with_capacity(self.actors.len());
        for spec in &self.actors {
            let user = User::new(spec.name.clone(), spec.permissions.clone()).with_active(spec.active);
            if actors.insert(spec.name.as_str(), user.into_ref()).is_some() {
                return Err(ScenarioError::DuplicateActor(spec.name.clone()));
            }
        }
        Ok(actors)
    }
}

fn check_expectations(spec: &ActionSpec, record: &ActionRecord) -> Result<(), ScenarioError> {
    if let Some(expected) = spec.expect_step {
        if expected != record.current_step {
            return Err(ScenarioError::ExpectationFailed {
                index: record.index,
                expected: format!("step {expected}"),
                actual: format!("step {}", record.current_step),
            });
        }
    }
    if let Some(expected) = spec.expect_finished {
        if expected != record.finished {
            return Err(ScenarioError::ExpectationFailed {
                index: record.index,
                expected: format!("finished = {expected}"),
                actual: format!("finished = {}", record.finished),
            });
        }
    }
    Ok(())
}
