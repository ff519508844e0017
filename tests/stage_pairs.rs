// The pairing invariant: whatever is thrown at the transition primitive,
// a task can only ever sit on one of the thirteen valid (status, stage)
// pairs, and the audit trail always matches the document.

mod common;

use chrono::Utc;
use common::{in_days, pipeline, upload};
use greenlight::workflow::state_machine::{apply_transition, Transition};
use greenlight::{is_valid_pair, Action, Role, Stage, Status, Task, UserId, VALID_PAIRS};
use proptest::prelude::*;

fn any_status() -> impl Strategy<Value = Option<Status>> {
    prop_oneof![
        Just(None),
        proptest::sample::select(VALID_PAIRS.map(|(status, _)| status).to_vec()).prop_map(Some),
    ]
}

fn any_stage() -> impl Strategy<Value = Option<Stage>> {
    prop_oneof![
        Just(None),
        proptest::sample::select(VALID_PAIRS.map(|(_, stage)| stage).to_vec()).prop_map(Some),
    ]
}

proptest! {
    /// Arbitrary status/stage requests either land on a valid pair or are
    /// rejected without touching the document.
    #[test]
    fn transitions_never_leave_the_valid_pairs(
        requests in proptest::collection::vec((any_status(), any_stage()), 1..40)
    ) {
        let mut task = Task::new(
            "prop".into(),
            "d".into(),
            Utc::now(),
            UserId::new(),
            Role::Client,
        );
        let actor = task.created_by;
        let mut expected_history = 0usize;

        for (status, stage) in requests {
            let before = task.clone();
            let result = apply_transition(
                &mut task,
                "prop",
                Transition { status, stage, note: String::new(), actor },
            );
            match result {
                Ok(()) => {
                    expected_history += 1;
                    prop_assert!(is_valid_pair(task.status, task.current_stage));
                    let last = task.history.last().unwrap();
                    prop_assert_eq!(last.status, task.status);
                    prop_assert_eq!(last.stage, task.current_stage);
                }
                Err(_) => {
                    prop_assert_eq!(&task, &before);
                }
            }
            prop_assert_eq!(task.history.len(), expected_history);
        }
    }
}

#[tokio::test]
async fn every_engine_step_lands_on_a_valid_pair_with_a_matching_owner() {
    let p = pipeline().await;
    let task = p.submit("Invariant Walk").await;
    let id = task.id;

    let steps: Vec<(greenlight::Actor, Action)> = vec![
        (
            p.hr,
            Action::AssignManager {
                manager: p.manager.id,
                team: None,
                deadline: None,
            },
        ),
        (
            p.manager,
            Action::AssignTeam {
                team: p.team,
                designer_deadline: Some(in_days(3)),
                developer_deadline: None,
                tester_deadline: None,
            },
        ),
        (
            p.designer,
            Action::SubmitDeliverable {
                file: upload("a.fig"),
            },
        ),
        (
            p.manager,
            Action::ForwardToDeveloper {
                deadline: Some(in_days(6)),
            },
        ),
        (
            p.developer,
            Action::SubmitDeliverable {
                file: upload("b.zip"),
            },
        ),
        (
            p.manager,
            Action::ForwardToTester {
                deadline: Some(in_days(8)),
            },
        ),
        (
            p.tester,
            Action::SubmitDeliverable {
                file: upload("c.pdf"),
            },
        ),
        (p.manager, Action::SendToHr),
        (p.hr, Action::SendToClient),
        (
            p.client,
            Action::RequestChanges {
                comment: "tighten the kerning".into(),
            },
        ),
        (p.hr, Action::ForwardFeedback { note: None }),
    ];

    let mut history_len = task.history.len();
    for (actor, action) in steps {
        let task = p.engine.advance(id, &actor, action).await.unwrap();

        assert!(is_valid_pair(task.status, task.current_stage));
        history_len += 1;
        assert_eq!(task.history.len(), history_len);

        // The stored owner agrees with the stage's deterministic expectation.
        match task.current_stage.owner_role() {
            Some(role) => {
                let owner = task.owner.expect("stage expects an owner");
                assert_eq!(owner.role, role);
            }
            None => assert!(task.owner.is_none()),
        }
    }
}
