// Mock actors for testing - record every capability query the workflow makes

use std::sync::{Arc, Mutex};

use crate::approval::errors::ApprovalError;
use crate::approval::traits::{Actor, ActorRef};
use crate::approval::types::Permission;

/// Capability query issued against an actor
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActorQuery {
    CanVote { step: usize },
    CanForce { step: usize },
    IsActive,
}

/// Actor with a fixed answer for every step, tracking what it was asked
#[derive(Debug)]
pub struct RecordingActor {
    pub permission: Permission,
    pub active: bool,
    pub queries: Mutex<Vec<ActorQuery>>,
}

impl RecordingActor {
    pub fn new(permission: Permission) -> Self {
        Self {
            permission,
            active: true,
            queries: Mutex::new(Vec::new()),
        }
    }

    pub fn inactive(permission: Permission) -> Self {
        Self {
            active: false,
            ..Self::new(permission)
        }
    }

    /// Returns both the typed handle (for inspecting queries) and the workflow handle
    pub fn shared(self) -> (Arc<RecordingActor>, ActorRef) {
        let typed = Arc::new(self);
        let handle: ActorRef = typed.clone();
        (typed, handle)
    }

    pub fn get_queries(&self) -> Vec<ActorQuery> {
        self.queries.lock().map(|q| q.clone()).unwrap_or_default()
    }

    pub fn queried_steps(&self) -> Vec<usize> {
        self.get_queries()
            .into_iter()
            .filter_map(|query| match query {
                ActorQuery::CanVote { step } | ActorQuery::CanForce { step } => Some(step),
                ActorQuery::IsActive => None,
            })
            .collect()
    }

    fn record(&self, query: ActorQuery) {
        if let Ok(mut queries) = self.queries.lock() {
            queries.push(query);
        }
    }
}

impl Actor for RecordingActor {
    fn can_vote_on_step(&self, step: usize) -> Result<bool, ApprovalError> {
        self.record(ActorQuery::CanVote { step });
        Ok(self.permission == Permission::Vote)
    }

    fn can_force_step(&self, step: usize) -> Result<bool, ApprovalError> {
        self.record(ActorQuery::CanForce { step });
        Ok(self.permission == Permission::Force)
    }

    fn is_active(&self) -> bool {
        self.record(ActorQuery::IsActive);
        self.active
    }
}
