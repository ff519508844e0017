// Pre-transition checks. Every guard runs before any field of the task is
// touched, so a rejection of any kind leaves the document byte-for-byte
// unchanged.

use chrono::{DateTime, Utc};

use crate::error::WorkflowError;
use crate::identity::{Actor, ProductionRole};
use crate::workflow::actions::Action;
use crate::workflow::stage::{Stage, Status};
use crate::workflow::task::Task;

/// Role gate: is this actor's role allowed to attempt the action at all?
pub fn require_role(actor: &Actor, action: &Action) -> Result<(), WorkflowError> {
    if action.permitted_roles().contains(&actor.role) {
        return Ok(());
    }
    Err(WorkflowError::unauthorized(format!(
        "role '{}' is not permitted to perform '{}'",
        actor.role,
        action.name()
    )))
}

/// Ownership gate for manager actions: the task's manager, nobody else.
pub fn require_manager(task: &Task, actor: &Actor) -> Result<(), WorkflowError> {
    match task.manager {
        Some(manager) if manager == actor.id => Ok(()),
        _ => Err(WorkflowError::unauthorized(
            "only the assigned manager can progress this task",
        )),
    }
}

/// Ownership gate for client actions: the requesting client, nobody else.
pub fn require_creator(task: &Task, actor: &Actor) -> Result<(), WorkflowError> {
    if task.created_by == actor.id {
        return Ok(());
    }
    Err(WorkflowError::unauthorized(
        "only the requesting client can act on this task",
    ))
}

/// Ownership gate for stage workers: the user named in the matching slot.
pub fn require_slot_owner(
    task: &Task,
    role: ProductionRole,
    actor: &Actor,
) -> Result<(), WorkflowError> {
    match task.stage_assignments.slot(role).user {
        Some(user) if user == actor.id => Ok(()),
        _ => Err(WorkflowError::unauthorized(format!(
            "you are not assigned as the {role} for this project"
        ))),
    }
}

/// Stage precondition: the action is only legal from one exact stage.
pub fn require_stage(
    task: &Task,
    action: &'static str,
    expected: Stage,
    detail: &str,
) -> Result<(), WorkflowError> {
    if task.current_stage == expected {
        return Ok(());
    }
    Err(WorkflowError::wrong_stage(
        action,
        task.current_stage,
        format!("{detail} (expected stage '{expected}')"),
    ))
}

/// Status precondition for the actions keyed on the visible label.
pub fn require_status_in(
    task: &Task,
    action: &'static str,
    allowed: &[Status],
    detail: &str,
) -> Result<(), WorkflowError> {
    if allowed.contains(&task.status) {
        return Ok(());
    }
    Err(WorkflowError::wrong_stage(
        action,
        task.current_stage,
        format!("{detail} (status is '{}')", task.status),
    ))
}

/// Deadline payloads are optional at the type level; certain forwards make
/// them mandatory.
pub fn require_deadline(
    value: Option<DateTime<Utc>>,
    label: &str,
) -> Result<DateTime<Utc>, WorkflowError> {
    value.ok_or_else(|| {
        WorkflowError::validation(format!("provide a {label} deadline before forwarding"))
    })
}

/// Parses a wire-format deadline for callers that receive strings. RFC 3339
/// and plain `YYYY-MM-DD` are accepted.
pub fn parse_deadline(raw: &str, label: &str) -> Result<DateTime<Utc>, WorkflowError> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Ok(parsed.with_timezone(&Utc));
    }
    if let Ok(date) = chrono::NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        if let Some(midnight) = date.and_hms_opt(0, 0, 0) {
            return Ok(DateTime::from_naive_utc_and_offset(midnight, Utc));
        }
    }
    Err(WorkflowError::validation(format!(
        "provide a valid {label} deadline"
    )))
}

/// Change requests must say something.
pub fn require_comment(comment: &str) -> Result<String, WorkflowError> {
    let trimmed = comment.trim();
    if trimmed.is_empty() {
        return Err(WorkflowError::validation(
            "provide a comment or reason for the requested changes",
        ));
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identity::{Role, UserId};

    fn task_with_manager(manager: UserId) -> Task {
        let mut task = Task::new(
            "T".into(),
            "d".into(),
            Utc::now(),
            UserId::new(),
            Role::Client,
        );
        task.manager = Some(manager);
        task
    }

    #[test]
    fn manager_gate_rejects_other_managers() {
        let owner = UserId::new();
        let task = task_with_manager(owner);
        let intruder = Actor::new(UserId::new(), Role::Manager);
        assert!(matches!(
            require_manager(&task, &intruder),
            Err(WorkflowError::Unauthorized { .. })
        ));
        assert!(require_manager(&task, &Actor::new(owner, Role::Manager)).is_ok());
    }

    #[test]
    fn role_gate_rejects_cross_role_actions() {
        let designer = Actor::new(UserId::new(), Role::Designer);
        assert!(matches!(
            require_role(&designer, &Action::Approve),
            Err(WorkflowError::Unauthorized { .. })
        ));
        assert!(require_role(&designer, &Action::SubmitDeliverable {
            file: crate::workflow::task::FileUpload {
                filename: "f".into(),
                original_name: "f".into(),
                size: 0,
                mime_type: "application/octet-stream".into(),
            }
        })
        .is_ok());
    }

    #[test]
    fn deadline_parsing_accepts_both_wire_forms() {
        assert!(parse_deadline("2026-03-01T12:00:00Z", "designer").is_ok());
        assert!(parse_deadline("2026-03-01", "designer").is_ok());
        let err = parse_deadline("soon", "designer").unwrap_err();
        assert!(matches!(err, WorkflowError::Validation(_)));
    }

    #[test]
    fn blank_comments_are_rejected() {
        assert!(require_comment("   ").is_err());
        assert_eq!(require_comment(" logo too small ").unwrap(), "logo too small");
    }
}
