use std::collections::HashMap;

use tracing::{debug, info, warn};

use super::errors::ApprovalError;
use super::traits::{actor_key, ActorRef};
use super::types::{IgnoreReason, StepStatus, Transition, WorkflowSnapshot};

/// Multi-step approval state machine.
///
/// States are the step indices `0..=step_count`; `step_count` is terminal.
/// `approve` moves at most one step forward, `reject` at most one step back.
/// Only the current step ever holds votes: a step's tally is dropped whenever
/// the workflow leaves it, whichever way it leaves.
#[derive(Clone, Default)]
pub struct ApprovalWorkflow {
    required_votes: Vec<usize>,
    current_step: usize,
    votes: Vec<HashMap<usize, ActorRef>>,
}

impl ApprovalWorkflow {
    pub fn new(required_votes: Vec<usize>) -> Self {
        let votes = required_votes.iter().map(|_| HashMap::new()).collect();
        Self {
            required_votes,
            current_step: 0,
            votes,
        }
    }

    /// Build from signed thresholds; anything below zero behaves like zero and
    /// anything past `usize::MAX` saturates.
    pub fn from_thresholds(thresholds: &[i64]) -> Self {
        let required = thresholds
            .iter()
            .enumerate()
            .map(|(step, &threshold)| {
                if threshold < 0 {
                    warn!(step, threshold, "Negative vote threshold treated as zero");
                    return 0;
                }
                usize::try_from(threshold).unwrap_or_else(|_| {
                    warn!(step, threshold, "Vote threshold saturated to usize::MAX");
                    usize::MAX
                })
            })
            .collect();
        Self::new(required)
    }

    pub fn approve(&mut self, actor: &ActorRef) -> Result<Transition, ApprovalError> {
        if let Some(reason) = self.precheck(actor) {
            if reason == IgnoreReason::Finished {
                self.check_finished_approver(actor)?;
            }
            debug!(step = self.current_step, ?reason, "Approve ignored");
            return Ok(Transition::ignored(reason));
        }

        let step = self.current_step;
        if actor.can_force_step(step)? {
            return Ok(self.advance(true));
        }
        if !actor.can_vote_on_step(step)? {
            debug!(step, "Approve ignored, actor cannot vote or force");
            return Ok(Transition::ignored(IgnoreReason::NotPermitted));
        }

        Ok(self.vote(actor))
    }

    pub fn reject(&mut self, actor: &ActorRef) -> Result<Transition, ApprovalError> {
        if let Some(reason) = self.precheck(actor) {
            debug!(step = self.current_step, ?reason, "Reject ignored");
            return Ok(Transition::ignored(reason));
        }

        let step = self.current_step;
        if actor.can_vote_on_step(step)? || actor.can_force_step(step)? {
            Ok(self.roll_back())
        } else {
            debug!(step, "Reject ignored, actor has no permission on step");
            Ok(Transition::ignored(IgnoreReason::NotPermitted))
        }
    }

    pub fn is_finished(&self) -> bool {
        self.current_step == self.required_votes.len()
    }

    pub fn current_step(&self) -> usize {
        self.current_step
    }

    pub fn step_count(&self) -> usize {
        self.required_votes.len()
    }

    pub fn required_votes(&self, step: usize) -> Option<usize> {
        self.required_votes.get(step).copied()
    }

    /// Number of distinct votes currently held by `step`
    pub fn votes_at(&self, step: usize) -> usize {
        self.votes.get(step).map_or(0, HashMap::len)
    }

    pub fn has_voted(&self, step: usize, actor: &ActorRef) -> bool {
        self.votes
            .get(step)
            .is_some_and(|voters| voters.contains_key(&actor_key(actor)))
    }

    /// Votes still needed on the current step, `None` once finished
    pub fn remaining_votes(&self) -> Option<usize> {
        let required = self.required_votes(self.current_step)?;
        Some(required.saturating_sub(self.votes_at(self.current_step)))
    }

    pub fn snapshot(&self) -> WorkflowSnapshot {
        WorkflowSnapshot {
            current_step: self.current_step,
            step_count: self.step_count(),
            finished: self.is_finished(),
            steps: self
                .required_votes
                .iter()
                .enumerate()
                .map(|(index, &required)| StepStatus {
                    index,
                    required,
                    votes: self.votes_at(index),
                })
                .collect(),
        }
    }

    // Terminal and inactive checks come before any capability query.
    fn precheck(&self, actor: &ActorRef) -> Option<IgnoreReason> {
        if self.is_finished() {
            Some(IgnoreReason::Finished)
        } else if !actor.is_active() {
            Some(IgnoreReason::Inactive)
        } else {
            None
        }
    }

    // An active actor claiming a vote on the terminal step was configured for
    // a longer workflow than this one. Force and missing entries stay inert.
    fn check_finished_approver(&self, actor: &ActorRef) -> Result<(), ApprovalError> {
        if !actor.is_active() {
            return Ok(());
        }

        let step = self.current_step;
        match actor.can_vote_on_step(step) {
            Ok(true) => {
                warn!(step, steps = self.step_count(), "Vote on a step past the last one");
                Err(ApprovalError::InconsistentConfiguration {
                    step,
                    steps: self.step_count(),
                })
            }
            Ok(false) | Err(ApprovalError::StepOutOfRange { .. }) => Ok(()),
            Err(e) => Err(e),
        }
    }

    fn vote(&mut self, actor: &ActorRef) -> Transition {
        let step = self.current_step;
        let required = self.required_votes[step];
        let voters = &mut self.votes[step];

        let key = actor_key(actor);
        if voters.contains_key(&key) {
            debug!(step, "Actor already voted on step");
            return Transition::ignored(IgnoreReason::AlreadyVoted);
        }
        voters.insert(key, actor.clone());
        let votes = voters.len();

        // Insert before comparing: one vote always clears a zero threshold.
        if votes >= required {
            debug!(step, votes, required, "Vote threshold reached");
            return self.advance(false);
        }

        debug!(step, votes, required, "Vote recorded");
        Transition::VoteRecorded {
            step,
            votes,
            required,
        }
    }

    fn advance(&mut self, forced: bool) -> Transition {
        let from = self.current_step;
        self.votes[from].clear();
        self.current_step += 1;

        info!(from, to = self.current_step, forced, "Workflow advanced");
        if self.is_finished() {
            info!(steps = self.step_count(), "Workflow finished");
        }

        Transition::Advanced {
            from,
            to: self.current_step,
            forced,
        }
    }

    fn roll_back(&mut self) -> Transition {
        let from = self.current_step;
        self.votes[from].clear();
        self.current_step = from.saturating_sub(1);
        self.votes[self.current_step].clear();

        info!(from, to = self.current_step, "Workflow rolled back");
        Transition::RolledBack {
            from,
            to: self.current_step,
        }
    }
}

impl std::fmt::Debug for ApprovalWorkflow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApprovalWorkflow")
            .field("required_votes", &self.required_votes)
            .field("current_step", &self.current_step)
            .field(
                "votes",
                &self.votes.iter().map(HashMap::len).collect::<Vec<_>>(),
            )
            .finish()
    }
}
