use thiserror::Error;

use crate::workflow::stage::Stage;
use crate::workflow::task::TaskId;

/// Failure taxonomy for workflow operations.
///
/// Every rejection leaves the task untouched. `Conflict` is the only kind a
/// caller is expected to retry (re-fetch, resubmit); the rest require the
/// actor to correct their input.
#[derive(Debug, Error)]
pub enum WorkflowError {
    #[error("{kind} not found: {id}")]
    NotFound { kind: &'static str, id: String },

    #[error("{reason}")]
    Unauthorized { reason: String },

    #[error("action '{action}' is not legal in stage {current}: {detail}")]
    InvalidStageTransition {
        action: &'static str,
        current: Stage,
        detail: String,
    },

    #[error("{0}")]
    Validation(String),

    #[error("task {task} was modified concurrently: expected revision {expected}, found {found}")]
    Conflict {
        task: TaskId,
        expected: u64,
        found: u64,
    },
}

impl WorkflowError {
    pub fn not_found(kind: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            kind,
            id: id.to_string(),
        }
    }

    pub fn unauthorized(reason: impl Into<String>) -> Self {
        Self::Unauthorized {
            reason: reason.into(),
        }
    }

    pub fn wrong_stage(action: &'static str, current: Stage, detail: impl Into<String>) -> Self {
        Self::InvalidStageTransition {
            action,
            current,
            detail: detail.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Whether a caller may retry the same request unchanged.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Conflict { .. })
    }
}
