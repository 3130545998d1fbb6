// Property-Based Testing for the approval workflow
// Checks step progression invariants over random configurations and action sequences

use approval_workflow::{ActorRef, ApprovalWorkflow, Permission, SharedWorkflow, User};
use proptest::prelude::*;
use std::thread;

#[derive(Debug, Clone)]
struct ActorConfig {
    permissions: Vec<Permission>,
    active: bool,
}

#[derive(Debug, Clone, Copy)]
enum Action {
    Approve(usize),
    Reject(usize),
}

fn permission_strategy() -> impl Strategy<Value = Permission> {
    prop_oneof![
        Just(Permission::None),
        Just(Permission::Vote),
        Just(Permission::Force),
    ]
}

fn actor_strategy(steps: usize, active: BoxedStrategy<bool>) -> impl Strategy<Value = ActorConfig> {
    (prop::collection::vec(permission_strategy(), steps), active)
        .prop_map(|(permissions, active)| ActorConfig { permissions, active })
}

fn action_strategy(actors: usize) -> impl Strategy<Value = Action> {
    prop_oneof![
        (0..actors).prop_map(Action::Approve),
        (0..actors).prop_map(Action::Reject),
    ]
}

// Thresholds, a pool of actors whose tables cover every step, and actions over that pool
fn setup_strategy(
    active: BoxedStrategy<bool>,
) -> impl Strategy<Value = (Vec<usize>, Vec<ActorConfig>, Vec<Action>)> {
    prop::collection::vec(0usize..4, 0..5).prop_flat_map(move |steps| {
        let actors = prop::collection::vec(actor_strategy(steps.len(), active.clone()), 1..6);
        (Just(steps), actors).prop_flat_map(|(steps, actors)| {
            let actions = prop::collection::vec(action_strategy(actors.len()), 0..40);
            (Just(steps), Just(actors), actions)
        })
    })
}

fn build_actors(configs: &[ActorConfig]) -> Vec<ActorRef> {
    configs
        .iter()
        .enumerate()
        .map(|(i, config)| {
            User::new(format!("actor{i}"), config.permissions.clone())
                .with_active(config.active)
                .into_ref()
        })
        .collect()
}

fn perform(workflow: &mut ApprovalWorkflow, actors: &[ActorRef], action: Action) {
    let result = match action {
        Action::Approve(i) => workflow.approve(&actors[i]),
        Action::Reject(i) => workflow.reject(&actors[i]),
    };
    // Every table covers every step, so no collaborator errors are possible.
    assert!(result.is_ok(), "unexpected error: {result:?}");
}

proptest! {
    #[test]
    fn prop_new_workflow_finished_iff_empty(steps in prop::collection::vec(0usize..5, 0..6)) {
        let workflow = ApprovalWorkflow::new(steps.clone());
        prop_assert_eq!(workflow.is_finished(), steps.is_empty());
        prop_assert_eq!(workflow.current_step(), 0);
    }

    #[test]
    fn prop_single_call_moves_at_most_one_step(
        (steps, configs, actions) in setup_strategy(any::<bool>().boxed())
    ) {
        let actors = build_actors(&configs);
        let mut workflow = ApprovalWorkflow::new(steps.clone());

        for action in actions {
            let before = workflow.current_step();
            perform(&mut workflow, &actors, action);
            let after = workflow.current_step();

            match action {
                Action::Approve(_) => prop_assert!(after == before || after == before + 1),
                Action::Reject(_) => prop_assert!(after == before || after + 1 == before),
            }
            prop_assert!(after <= steps.len());
        }
    }

    #[test]
    fn prop_only_current_step_holds_votes(
        (steps, configs, actions) in setup_strategy(any::<bool>().boxed())
    ) {
        let actors = build_actors(&configs);
        let mut workflow = ApprovalWorkflow::new(steps.clone());

        for action in actions {
            perform(&mut workflow, &actors, action);
            let current = workflow.current_step();
            for (step, &required) in steps.iter().enumerate() {
                let votes = workflow.votes_at(step);
                if step == current {
                    prop_assert!(votes <= required);
                } else {
                    prop_assert_eq!(votes, 0);
                }
            }
        }
    }

    #[test]
    fn prop_inactive_actors_change_nothing(
        (steps, configs, actions) in setup_strategy(Just(false).boxed())
    ) {
        let actors = build_actors(&configs);
        let mut workflow = ApprovalWorkflow::new(steps);
        let initial = workflow.snapshot();

        for action in actions {
            perform(&mut workflow, &actors, action);
            prop_assert_eq!(&workflow.snapshot(), &initial);
        }
    }

    #[test]
    fn prop_finished_is_absorbing(
        (steps, configs, actions) in setup_strategy(any::<bool>().boxed())
    ) {
        let actors = build_actors(&configs);
        let mut workflow = ApprovalWorkflow::new(steps);
        let mut finished = workflow.is_finished();

        for action in actions {
            perform(&mut workflow, &actors, action);
            if finished {
                prop_assert!(workflow.is_finished());
            }
            finished = workflow.is_finished();
        }
    }

    #[test]
    fn prop_repeat_vote_counts_once(required in 2usize..6) {
        let mut workflow = ApprovalWorkflow::new(vec![required]);
        let voter = User::new("voter", vec![Permission::Vote]).into_ref();

        workflow.approve(&voter).unwrap();
        let after_first = workflow.votes_at(0);
        workflow.approve(&voter).unwrap();
        prop_assert_eq!(after_first, 1);
        prop_assert_eq!(workflow.votes_at(0), 1);
    }
}

#[test]
fn prop_shared_workflow_serializes_mixed_callers() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(&(2usize..6, 0usize..4), |(voters, rejecters)| {
            let shared = SharedWorkflow::new(ApprovalWorkflow::new(vec![voters, 1]));

            let handles: Vec<_> = (0..voters + rejecters)
                .map(|i| {
                    let shared = shared.clone();
                    let permissions = if i < voters {
                        vec![Permission::Vote, Permission::None]
                    } else {
                        vec![Permission::Force, Permission::None]
                    };
                    thread::spawn(move || {
                        let actor = User::new(format!("caller{i}"), permissions).into_ref();
                        if i < voters {
                            shared.approve(&actor).map(|_| ())
                        } else {
                            shared.reject(&actor).map(|_| ())
                        }
                    })
                })
                .collect();

            for handle in handles {
                let joined = handle.join().map_err(|_| {
                    proptest::test_runner::TestCaseError::Fail("caller panicked".into())
                })?;
                joined.map_err(|e| proptest::test_runner::TestCaseError::Fail(e.to_string().into()))?;
            }

            let snapshot = shared.snapshot().map_err(|e| {
                proptest::test_runner::TestCaseError::Fail(e.to_string().into())
            })?;
            prop_assert!(snapshot.current_step <= 1);
            prop_assert!(snapshot.steps[0].votes < voters);
            prop_assert!(!snapshot.finished);
            Ok(())
        })
        .unwrap();
}
