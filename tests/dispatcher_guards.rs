// Every rejected action must leave the stored task byte-for-byte unchanged
// and surface the right error kind.

mod common;

use common::{in_days, pipeline, upload, Pipeline};
use greenlight::{Action, Actor, ProductionRole, Role, TaskId, WorkflowError};

async fn snapshot(p: &Pipeline, id: TaskId) -> serde_json::Value {
    serde_json::to_value(p.engine.task(id).await.unwrap()).unwrap()
}

/// Runs the action, asserts it fails the given way, and proves the stored
/// document did not move.
async fn assert_rejected(
    p: &Pipeline,
    id: TaskId,
    actor: &Actor,
    action: Action,
    check: fn(&WorkflowError) -> bool,
) {
    let before = snapshot(p, id).await;
    let err = p.engine.advance(id, actor, action).await.unwrap_err();
    assert!(check(&err), "unexpected error: {err:?}");
    let after = snapshot(p, id).await;
    assert_eq!(before, after, "rejected action mutated the task");
}

#[tokio::test]
async fn wrong_role_is_unauthorized() {
    let p = pipeline().await;
    let task = p.to_design("Guarded").await;

    assert_rejected(&p, task.id, &p.designer, Action::Approve, |e| {
        matches!(e, WorkflowError::Unauthorized { .. })
    })
    .await;
    assert_rejected(&p, task.id, &p.client, Action::SendToHr, |e| {
        matches!(e, WorkflowError::Unauthorized { .. })
    })
    .await;
    assert_rejected(
        &p,
        task.id,
        &p.tester,
        Action::ForwardToTester {
            deadline: Some(in_days(3)),
        },
        |e| matches!(e, WorkflowError::Unauthorized { .. }),
    )
    .await;
}

#[tokio::test]
async fn wrong_actor_within_the_right_role_is_unauthorized() {
    let p = pipeline().await;
    let task = p.to_design("Guarded").await;

    // A different manager cannot drive someone else's task.
    let other_manager = Actor::new(
        p.directory.add_user("Marlowe", Role::Manager).await,
        Role::Manager,
    );
    assert_rejected(
        &p,
        task.id,
        &other_manager,
        Action::Reopen {
            target: ProductionRole::Designer,
            note: None,
        },
        |e| matches!(e, WorkflowError::Unauthorized { .. }),
    )
    .await;

    // The developer cannot submit while holding no active slot claim.
    let other_designer = Actor::new(
        p.directory.add_user("Dorian", Role::Designer).await,
        Role::Designer,
    );
    assert_rejected(
        &p,
        task.id,
        &other_designer,
        Action::SubmitDeliverable {
            file: upload("fake.fig"),
        },
        |e| matches!(e, WorkflowError::Unauthorized { .. }),
    )
    .await;
}

#[tokio::test]
async fn actions_out_of_stage_are_invalid_transitions() {
    let p = pipeline().await;
    let task = p.to_design("Guarded").await;

    // Developer's stage has not opened yet.
    assert_rejected(
        &p,
        task.id,
        &p.developer,
        Action::SubmitDeliverable {
            file: upload("early.zip"),
        },
        |e| matches!(e, WorkflowError::InvalidStageTransition { .. }),
    )
    .await;
    // Nothing to forward while design is still running.
    assert_rejected(
        &p,
        task.id,
        &p.manager,
        Action::ForwardToDeveloper {
            deadline: Some(in_days(5)),
        },
        |e| matches!(e, WorkflowError::InvalidStageTransition { .. }),
    )
    .await;
    // The client cannot approve before HR releases the delivery.
    assert_rejected(&p, task.id, &p.client, Action::Approve, |e| {
        matches!(e, WorkflowError::InvalidStageTransition { .. })
    })
    .await;
    // HR may only attach files during delivery.
    assert_rejected(
        &p,
        task.id,
        &p.hr,
        Action::AttachSupportingFile {
            file: upload("too-early.pdf"),
        },
        |e| matches!(e, WorkflowError::InvalidStageTransition { .. }),
    )
    .await;
}

#[tokio::test]
async fn missing_or_blank_payloads_are_validation_errors() {
    let p = pipeline().await;
    let task = p.to_client_review("Guarded").await;

    assert_rejected(
        &p,
        task.id,
        &p.client,
        Action::RequestChanges {
            comment: "   ".into(),
        },
        |e| matches!(e, WorkflowError::Validation(_)),
    )
    .await;

    let in_review = p.to_design_review("Guarded Two").await;
    assert_rejected(
        &p,
        in_review.id,
        &p.manager,
        Action::ForwardToDeveloper { deadline: None },
        |e| matches!(e, WorkflowError::Validation(_)),
    )
    .await;
}

#[tokio::test]
async fn hr_cannot_assign_a_non_manager() {
    let p = pipeline().await;
    let task = p.submit("Guarded").await;

    assert_rejected(
        &p,
        task.id,
        &p.hr,
        Action::AssignManager {
            manager: p.designer.id,
            team: None,
            deadline: None,
        },
        |e| matches!(e, WorkflowError::NotFound { kind: "manager", .. }),
    )
    .await;
}

#[tokio::test]
async fn hr_cannot_pair_a_manager_with_someone_elses_team() {
    let p = pipeline().await;
    let task = p.submit("Guarded").await;

    let other_manager = p.directory.add_user("Marlowe", Role::Manager).await;
    assert_rejected(
        &p,
        task.id,
        &p.hr,
        Action::AssignManager {
            manager: other_manager,
            team: Some(p.team),
            deadline: None,
        },
        |e| matches!(e, WorkflowError::Unauthorized { .. }),
    )
    .await;
}

#[tokio::test]
async fn managers_can_only_staff_their_own_teams() {
    let p = pipeline().await;
    let task = p.to_planning("Guarded").await;

    let rival = Actor::new(
        p.directory.add_user("Marlowe", Role::Manager).await,
        Role::Manager,
    );
    let rival_team = p
        .directory
        .add_team("Rival Studio", rival.id, vec![p.designer.id])
        .await;

    assert_rejected(
        &p,
        task.id,
        &p.manager,
        Action::AssignTeam {
            team: rival_team,
            designer_deadline: Some(in_days(3)),
            developer_deadline: None,
            tester_deadline: None,
        },
        |e| matches!(e, WorkflowError::Unauthorized { .. }),
    )
    .await;
}

#[tokio::test]
async fn understaffed_teams_are_rejected_at_assignment() {
    let p = pipeline().await;
    let task = p.to_planning("Guarded").await;

    // No tester on this team.
    let partial_team = p
        .directory
        .add_team("Two of Three", p.manager.id, vec![p.designer.id, p.developer.id])
        .await;

    assert_rejected(
        &p,
        task.id,
        &p.manager,
        Action::AssignTeam {
            team: partial_team,
            designer_deadline: Some(in_days(3)),
            developer_deadline: None,
            tester_deadline: None,
        },
        |e| matches!(e, WorkflowError::Validation(_)),
    )
    .await;
}

#[tokio::test]
async fn only_clients_create_tasks() {
    let p = pipeline().await;
    let err = p
        .engine
        .create(
            &p.manager,
            greenlight::NewTaskRequest {
                title: "Not allowed".into(),
                description: "managers do not open requests".into(),
                deadline: in_days(7),
                attachments: vec![],
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, WorkflowError::Unauthorized { .. }));
}

#[tokio::test]
async fn attachment_cap_applies_at_creation() {
    let p = pipeline().await;
    let attachments = (0..9).map(|i| upload(&format!("file-{i}"))).collect();
    let err = p
        .engine
        .create(
            &p.client,
            greenlight::NewTaskRequest {
                title: "Too many".into(),
                description: "over the cap".into(),
                deadline: in_days(7),
                attachments,
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, WorkflowError::Validation(_)));
}

#[tokio::test]
async fn unknown_tasks_are_not_found() {
    let p = pipeline().await;
    let err = p
        .engine
        .advance(TaskId::new(), &p.client, Action::Approve)
        .await
        .unwrap_err();
    assert!(matches!(err, WorkflowError::NotFound { kind: "task", .. }));
}

#[tokio::test]
async fn stranger_clients_cannot_touch_the_review() {
    let p = pipeline().await;
    let task = p.to_client_review("Guarded").await;

    let stranger = Actor::new(
        p.directory.add_user("Nosy Nellie", Role::Client).await,
        Role::Client,
    );
    assert_rejected(&p, task.id, &stranger, Action::Approve, |e| {
        matches!(e, WorkflowError::Unauthorized { .. })
    })
    .await;
    assert_rejected(
        &p,
        task.id,
        &stranger,
        Action::RequestChanges {
            comment: "not mine but still".into(),
        },
        |e| matches!(e, WorkflowError::Unauthorized { .. }),
    )
    .await;
}
