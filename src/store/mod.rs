// Task persistence seam. The store is the unit of mutual exclusion: saves
// are compare-and-swap on the task's revision, which serializes concurrent
// transitions against the same task while leaving different tasks fully
// independent.

pub mod memory;
pub mod snapshot;

use async_trait::async_trait;
use thiserror::Error;

use crate::error::WorkflowError;
use crate::workflow::task::{Task, TaskId};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("task not found: {0}")]
    NotFound(TaskId),

    #[error("revision mismatch on task {task}: expected {expected}, found {found}")]
    RevisionMismatch {
        task: TaskId,
        expected: u64,
        found: u64,
    },

    #[error("task {0} already exists")]
    AlreadyExists(TaskId),

    #[error("snapshot IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("snapshot serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("snapshot corrupt: {reason}")]
    Corrupt { reason: String },
}

impl From<StoreError> for WorkflowError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(id) => WorkflowError::not_found("task", id),
            StoreError::RevisionMismatch {
                task,
                expected,
                found,
            } => WorkflowError::Conflict {
                task,
                expected,
                found,
            },
            other => WorkflowError::validation(other.to_string()),
        }
    }
}

/// Persistence operations the engine needs; nothing about how the documents
/// are laid out on disk or in a database leaks through.
#[async_trait]
pub trait TaskStore: Send + Sync {
    /// Stores a brand-new task at revision 1.
    async fn insert(&self, task: Task) -> Result<Task, StoreError>;

    async fn get(&self, id: TaskId) -> Result<Option<Task>, StoreError>;

    /// Compare-and-swap save: succeeds only when the stored revision still
    /// equals `expected_revision`, then bumps it. The returned task carries
    /// the new revision.
    async fn save(&self, task: Task, expected_revision: u64) -> Result<Task, StoreError>;

    /// Administrative removal; returns whether the task existed.
    async fn remove(&self, id: TaskId) -> Result<bool, StoreError>;

    async fn all(&self) -> Result<Vec<Task>, StoreError>;
}
