// The one mutation primitive. Every higher-level action is a sequence of
// slot edits followed by exactly one `apply_transition` call, so the audit
// trail grows by exactly one entry per successful operation.

use chrono::Utc;
use tracing::debug;

use crate::error::WorkflowError;
use crate::identity::UserId;
use crate::workflow::stage::{is_valid_pair, Stage, Status};
use crate::workflow::task::{HistoryEntry, Task};

/// One requested state change. Omitted fields keep their current value,
/// which makes a pure audit entry (status and stage unchanged) legal —
/// supporting-file uploads use that form.
#[derive(Debug, Clone)]
pub struct Transition {
    pub status: Option<Status>,
    pub stage: Option<Stage>,
    pub note: String,
    pub actor: UserId,
}

impl Transition {
    pub fn to(status: Status, stage: Stage, note: impl Into<String>, actor: UserId) -> Self {
        Self {
            status: Some(status),
            stage: Some(stage),
            note: note.into(),
            actor,
        }
    }

    /// Audit-only entry: records the note against the current state.
    pub fn note_only(note: impl Into<String>, actor: UserId) -> Self {
        Self {
            status: None,
            stage: None,
            note: note.into(),
            actor,
        }
    }
}

/// Applies one transition, appending exactly one history entry that records
/// the post-change stage and status. Rejects any result outside the
/// valid-pair table and leaves the task untouched in that case.
pub fn apply_transition(
    task: &mut Task,
    action: &'static str,
    transition: Transition,
) -> Result<(), WorkflowError> {
    let status = transition.status.unwrap_or(task.status);
    let stage = transition.stage.unwrap_or(task.current_stage);

    if !is_valid_pair(status, stage) {
        return Err(WorkflowError::wrong_stage(
            action,
            task.current_stage,
            format!("'{status}' cannot pair with stage '{stage}'"),
        ));
    }

    task.status = status;
    task.current_stage = stage;
    task.updated_at = Utc::now();
    task.history.push(HistoryEntry {
        stage,
        status,
        note: transition.note,
        actor: transition.actor,
        created_at: task.updated_at,
    });

    debug!(
        task = %task.id,
        action,
        status = %status,
        stage = %stage,
        history_len = task.history.len(),
        "transition applied"
    );
    Ok(())
}
